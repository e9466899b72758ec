use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::model::{Count, DocumentId, SurveyReport, SurveyState};

/// Handle to one document's cached survey state.
///
/// Every access takes the lock briefly and releases it before any pass
/// runs, so a re-entrant synchronous survey observes the busy flag
/// instead of deadlocking on the mutex.
#[derive(Clone)]
pub struct SurveyCell {
    inner: Arc<Mutex<SurveyState>>,
}

impl SurveyCell {
    fn new(now: Instant) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SurveyState::new(now))),
        }
    }

    /// Re-entrancy guard: claims the cell for one logical survey.
    /// Returns `false` if a survey is already in flight.
    pub fn try_begin(&self) -> bool {
        let mut state = self.inner.lock();
        if state.busy {
            return false;
        }
        state.busy = true;
        true
    }

    /// Unconditionally releases the busy flag. Last step of a survey.
    pub fn end(&self) {
        self.inner.lock().busy = false;
    }

    /// Invalidation check, run once per survey right after the guard is
    /// claimed: if the tree mutated after the last survey, all counts
    /// drop back to unknown. Stamps the cell with the survey start time
    /// either way. Returns whether an invalidation happened.
    pub fn refresh(&self, last_mutation: Option<Instant>, t0: Instant) -> bool {
        let mut state = self.inner.lock();
        let stale = matches!(last_mutation, Some(at) if state.surveyed_at < at);
        if stale {
            state.invalidate();
        }
        state.surveyed_at = t0;
        stale
    }

    pub fn snapshot(&self) -> SurveyState {
        self.inner.lock().clone()
    }

    pub fn report(&self) -> SurveyReport {
        self.inner.lock().report()
    }

    pub fn commit_hidden(&self, count: Count) {
        self.inner.lock().hidden_element_count = count;
    }

    pub fn commit_inline(&self, count: Count) {
        self.inner.lock().inline_script_count = count;
    }

    pub fn commit_external(&self, count: Count) {
        self.inner.lock().external_script_count = count;
    }
}

/// Per-document registry of survey cells, created lazily on first
/// survey of a document and kept for the page-context lifetime.
#[derive(Default)]
pub struct SurveyRegistry {
    entries: DashMap<DocumentId, SurveyCell>,
}

impl SurveyRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn cell(&self, doc: &DocumentId, now: Instant) -> SurveyCell {
        self.entries
            .entry(doc.clone())
            .or_insert_with(|| SurveyCell::new(now))
            .clone()
    }

    /// Drops the state for a document whose context went away.
    pub fn evict(&self, doc: &DocumentId) {
        self.entries.remove(doc);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn guard_rejects_reentry_until_end() {
        let cell = SurveyCell::new(Instant::now());
        assert!(cell.try_begin());
        assert!(!cell.try_begin());
        cell.end();
        assert!(cell.try_begin());
    }

    #[test]
    fn refresh_invalidates_only_when_mutation_is_newer() {
        let t0 = Instant::now();
        let cell = SurveyCell::new(t0);
        cell.commit_external(Count::Known(5));

        // Mutation older than the survey stamp: cache kept.
        assert!(!cell.refresh(Some(t0 - Duration::from_millis(10)), t0));
        assert_eq!(cell.snapshot().external_script_count, Count::Known(5));

        // Mutation newer: every count reset.
        let later = t0 + Duration::from_millis(10);
        assert!(cell.refresh(Some(later), later));
        assert!(cell.snapshot().external_script_count.is_unknown());
    }

    #[test]
    fn refresh_without_mutation_clock_keeps_cache() {
        let t0 = Instant::now();
        let cell = SurveyCell::new(t0);
        cell.commit_hidden(Count::Known(3));
        assert!(!cell.refresh(None, t0 + Duration::from_millis(5)));
        assert_eq!(cell.snapshot().hidden_element_count, Count::Known(3));
    }

    #[test]
    fn registry_creates_cells_lazily_and_evicts() {
        let registry = SurveyRegistry::new();
        assert!(registry.is_empty());
        let doc = DocumentId::new();
        let cell = registry.cell(&doc, Instant::now());
        cell.commit_inline(Count::Known(1));
        assert_eq!(registry.len(), 1);

        // Same document yields the same cell.
        let again = registry.cell(&doc, Instant::now());
        assert_eq!(again.snapshot().inline_script_count, Count::Known(1));

        registry.evict(&doc);
        assert!(registry.is_empty());
    }
}
