use std::time::Duration;

use tracing::debug;

use crate::metrics;
use crate::model::{DocumentId, SurveyReport};

pub fn emit_survey(doc: &DocumentId, invalidated: bool, report: &SurveyReport, duration: Duration) {
    metrics::record_survey(invalidated, duration);
    debug!(
        target: "survey.events",
        doc = %doc.0,
        invalidated,
        hidden = report.hidden_element_count.as_i32(),
        inline = report.inline_script_count.as_i32(),
        external = report.external_script_count.as_i32(),
        "survey.completed"
    );
}

pub fn emit_busy(doc: &DocumentId) {
    metrics::record_busy();
    debug!(
        target: "survey.events",
        doc = %doc.0,
        "survey.rejected_busy"
    );
}

pub fn emit_classifier(doc: &DocumentId, external: u8, inline_committed: bool) {
    metrics::record_classifier_run();
    debug!(
        target: "survey.events",
        doc = %doc.0,
        external,
        inline_committed,
        "survey.classifier.completed"
    );
}

pub fn emit_hidden(doc: &DocumentId, count: i32, provider_available: bool) {
    metrics::record_hidden_run();
    debug!(
        target: "survey.events",
        doc = %doc.0,
        count,
        provider_available,
        "survey.hidden_matcher.completed"
    );
}

pub fn emit_fallback_anchor(doc: &DocumentId, hit: bool) {
    metrics::record_fallback_anchor_run();
    debug!(
        target: "survey.events",
        doc = %doc.0,
        hit,
        "survey.fallback.anchor_probe.completed"
    );
}

pub fn emit_fallback_attributes(doc: &DocumentId, hit: bool) {
    metrics::record_fallback_attribute_run();
    debug!(
        target: "survey.events",
        doc = %doc.0,
        hit,
        "survey.fallback.attribute_scan.completed"
    );
}

pub fn emit_budget_exhausted(doc: &DocumentId, stage: &str) {
    metrics::record_budget_exhausted();
    debug!(
        target: "survey.events",
        doc = %doc.0,
        stage,
        "survey.fallback.budget_exhausted"
    );
}
