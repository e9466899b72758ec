use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for one surveyor instance.
///
/// The budget gates only the fallback stages; the classifier and the
/// hidden-element matcher always run to completion once started. The
/// budget is advisory: it is checked at stage boundaries, never
/// preemptively, so a single large pass can overrun it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurveyPolicy {
    /// Wall-clock budget in milliseconds, measured from survey start.
    pub budget_ms: u64,
}

impl SurveyPolicy {
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }
}

impl Default for SurveyPolicy {
    fn default() -> Self {
        Self { budget_ms: 60 }
    }
}
