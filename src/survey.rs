use std::sync::Arc;

use crate::api::DomSurveyor;
use crate::cache::{SurveyCell, SurveyRegistry};
use crate::classify;
use crate::errors::SurveyError;
use crate::events;
use crate::fallback;
use crate::hidden::{self, SelectorSet};
use crate::model::{Count, DocumentId, SurveyReport};
use crate::policy::SurveyPolicy;
use crate::ports::{
    DocumentPort, MutationClockPort, SelectorProviderPort, SystemTimeSource, TimeSource,
};

/// Budget-bounded surveyor over live document trees.
///
/// One instance serves any number of document contexts; cached
/// progress lives in the per-document registry. The whole survey runs
/// synchronously to completion, there is no suspension point.
pub struct DomSurveyorImpl<D, S, M>
where
    D: DocumentPort,
    S: SelectorProviderPort,
    M: MutationClockPort,
{
    document: Arc<D>,
    selectors: Arc<S>,
    mutations: Arc<M>,
    clock: Arc<dyn TimeSource>,
    policy: SurveyPolicy,
    registry: SurveyRegistry,
}

impl<D, S, M> DomSurveyorImpl<D, S, M>
where
    D: DocumentPort,
    S: SelectorProviderPort,
    M: MutationClockPort,
{
    pub fn new(document: Arc<D>, selectors: Arc<S>, mutations: Arc<M>) -> Self {
        Self::with_policy(document, selectors, mutations, SurveyPolicy::default())
    }

    pub fn with_policy(
        document: Arc<D>,
        selectors: Arc<S>,
        mutations: Arc<M>,
        policy: SurveyPolicy,
    ) -> Self {
        Self::with_clock(
            document,
            selectors,
            mutations,
            policy,
            Arc::new(SystemTimeSource),
        )
    }

    pub fn with_clock(
        document: Arc<D>,
        selectors: Arc<S>,
        mutations: Arc<M>,
        policy: SurveyPolicy,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            document,
            selectors,
            mutations,
            clock,
            policy,
            registry: SurveyRegistry::new(),
        }
    }

    pub fn registry(&self) -> &SurveyRegistry {
        &self.registry
    }

    fn classify_scripts(&self, doc: &DocumentId, cell: &SurveyCell) {
        let scripts = self.document.scripts(doc);
        let tally = classify::classify_scripts(&scripts);
        let inline_committed = match tally.inline_commit() {
            Some(flag) => {
                cell.commit_inline(flag);
                true
            }
            None => false,
        };
        cell.commit_external(tally.external_count());
        events::emit_classifier(doc, tally.external, inline_committed);
    }

    fn match_hidden_elements(&self, doc: &DocumentId, cell: &SurveyCell) {
        let count = match self.selectors.hiding_selectors(doc) {
            Some(selectors) => {
                let set = SelectorSet::partition(&selectors);
                let count = hidden::count_hidden_elements(&*self.document, doc, &set);
                events::emit_hidden(doc, count.as_i32(), true);
                count
            }
            None => {
                events::emit_hidden(doc, 0, false);
                Count::Known(0)
            }
        };
        cell.commit_hidden(count);
    }

    fn probe_javascript_anchor(&self, doc: &DocumentId, cell: &SurveyCell) {
        let hit = fallback::javascript_anchor_present(&*self.document, doc);
        events::emit_fallback_anchor(doc, hit);
        if hit {
            cell.commit_inline(Count::Known(1));
        }
    }

    fn scan_handler_attributes(&self, doc: &DocumentId, cell: &SurveyCell) {
        // Default committed up front: reaching this stage is enough
        // evidence to assert "no inline script" unless the scan says
        // otherwise.
        cell.commit_inline(Count::Known(0));
        let hit = fallback::handler_attribute_present(&*self.document, doc);
        events::emit_fallback_attributes(doc, hit);
        if hit {
            cell.commit_inline(Count::Known(1));
        }
    }
}

impl<D, S, M> DomSurveyor for DomSurveyorImpl<D, S, M>
where
    D: DocumentPort,
    S: SelectorProviderPort,
    M: MutationClockPort,
{
    fn survey(&self, doc: &DocumentId) -> Result<SurveyReport, SurveyError> {
        let t0 = self.clock.now();
        let deadline = t0 + self.policy.budget();

        let cell = self.registry.cell(doc, t0);
        if !cell.try_begin() {
            events::emit_busy(doc);
            return Err(SurveyError::Busy);
        }
        let invalidated = cell.refresh(self.mutations.last_mutation(doc), t0);

        if cell.snapshot().external_script_count.is_unknown() {
            self.classify_scripts(doc, &cell);
        }

        if cell.snapshot().hidden_element_count.is_unknown() {
            self.match_hidden_elements(doc, &cell);
        }

        // The fallback stages exist to keep looking for inline-script
        // evidence, but only while the time budget allows. A skipped
        // stage leaves the flag unknown for a later call to retry.
        if cell.snapshot().inline_script_count.is_unknown() {
            if self.clock.now() < deadline {
                self.probe_javascript_anchor(doc, &cell);
            } else {
                events::emit_budget_exhausted(doc, "anchor_probe");
            }
        }
        if cell.snapshot().inline_script_count.is_unknown() {
            if self.clock.now() < deadline {
                self.scan_handler_attributes(doc, &cell);
            } else {
                events::emit_budget_exhausted(doc, "attribute_scan");
            }
        }

        cell.end();
        let report = cell.report();
        events::emit_survey(doc, invalidated, &report, self.clock.now() - t0);
        Ok(report)
    }
}
