use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SurveyError {
    /// A survey is already running for this document context. The
    /// caller gets no result and may retry after the current call
    /// unwinds; cached progress is untouched.
    #[error("survey already in progress for this document")]
    Busy,
}
