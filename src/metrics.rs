//! Telemetry helpers for the survey core.
//!
//! Lightweight counters + latency aggregates so the host can surface
//! basic health numbers without an external metrics backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

static SURVEY_TOTAL: AtomicU64 = AtomicU64::new(0);
static SURVEY_BUSY: AtomicU64 = AtomicU64::new(0);
static SURVEY_INVALIDATED: AtomicU64 = AtomicU64::new(0);
static SURVEY_LAT_NS: AtomicU64 = AtomicU64::new(0);
static SURVEY_LAT_SAMPLES: AtomicU64 = AtomicU64::new(0);

static CLASSIFIER_RUNS: AtomicU64 = AtomicU64::new(0);
static HIDDEN_RUNS: AtomicU64 = AtomicU64::new(0);
static FALLBACK_ANCHOR_RUNS: AtomicU64 = AtomicU64::new(0);
static FALLBACK_ATTRIBUTE_RUNS: AtomicU64 = AtomicU64::new(0);
static BUDGET_EXHAUSTED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricCounter {
    pub total: u64,
    pub avg_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PassMetric {
    pub classifier_runs: u64,
    pub hidden_runs: u64,
    pub fallback_anchor_runs: u64,
    pub fallback_attribute_runs: u64,
    pub budget_exhausted: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricSnapshot {
    pub survey: MetricCounter,
    pub busy_rejections: u64,
    pub invalidations: u64,
    pub passes: PassMetric,
}

pub fn record_survey(invalidated: bool, duration: Duration) {
    SURVEY_TOTAL.fetch_add(1, Ordering::Relaxed);
    if invalidated {
        SURVEY_INVALIDATED.fetch_add(1, Ordering::Relaxed);
    }
    record_latency(&SURVEY_LAT_NS, &SURVEY_LAT_SAMPLES, duration);
}

pub fn record_busy() {
    SURVEY_BUSY.fetch_add(1, Ordering::Relaxed);
}

pub fn record_classifier_run() {
    CLASSIFIER_RUNS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_hidden_run() {
    HIDDEN_RUNS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_fallback_anchor_run() {
    FALLBACK_ANCHOR_RUNS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_fallback_attribute_run() {
    FALLBACK_ATTRIBUTE_RUNS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_budget_exhausted() {
    BUDGET_EXHAUSTED.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> MetricSnapshot {
    MetricSnapshot {
        survey: make_counter(
            SURVEY_TOTAL.load(Ordering::Relaxed),
            SURVEY_LAT_NS.load(Ordering::Relaxed),
            SURVEY_LAT_SAMPLES.load(Ordering::Relaxed),
        ),
        busy_rejections: SURVEY_BUSY.load(Ordering::Relaxed),
        invalidations: SURVEY_INVALIDATED.load(Ordering::Relaxed),
        passes: PassMetric {
            classifier_runs: CLASSIFIER_RUNS.load(Ordering::Relaxed),
            hidden_runs: HIDDEN_RUNS.load(Ordering::Relaxed),
            fallback_anchor_runs: FALLBACK_ANCHOR_RUNS.load(Ordering::Relaxed),
            fallback_attribute_runs: FALLBACK_ATTRIBUTE_RUNS.load(Ordering::Relaxed),
            budget_exhausted: BUDGET_EXHAUSTED.load(Ordering::Relaxed),
        },
    }
}

fn make_counter(total: u64, nanos: u64, samples: u64) -> MetricCounter {
    let avg_ms = if samples == 0 {
        0.0
    } else {
        (nanos as f64 / samples as f64) / 1_000_000.0
    };
    MetricCounter { total, avg_ms }
}

fn record_latency(total_ns: &AtomicU64, samples: &AtomicU64, duration: Duration) {
    let nanos = duration_to_nanos(duration);
    total_ns.fetch_add(nanos, Ordering::Relaxed);
    samples.fetch_add(1, Ordering::Relaxed);
}

fn duration_to_nanos(duration: Duration) -> u64 {
    let nanos = duration.as_nanos();
    if nanos > u64::MAX as u128 {
        u64::MAX
    } else {
        nanos as u64
    }
}
