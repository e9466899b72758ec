use crate::errors::SurveyError;
use crate::model::{DocumentId, SurveyReport};

/// One best-effort survey of a document tree.
///
/// Every call returns the current cached estimate, recomputing only
/// the fields that are still unknown. `Err(Busy)` means a survey for
/// the same document is already in flight; the caller gets no result
/// and may retry after the current call unwinds.
pub trait DomSurveyor: Send + Sync {
    fn survey(&self, doc: &DocumentId) -> Result<SurveyReport, SurveyError>;
}
