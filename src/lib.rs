//! Budget-bounded heuristic survey of a live document tree.
//!
//! Estimates three signals about a loaded page for a content-filtering
//! agent: how many elements are hidden by declarative hiding selectors,
//! whether the page contains inline-script-like constructs, and how
//! many external script resources it loads. Results are best-effort
//! within a wall-clock budget, cached per document context across
//! invocations, and saturated at a fixed cap instead of counted
//! exactly.

pub mod api;
pub mod cache;
pub mod classify;
pub mod errors;
pub mod events;
pub mod fallback;
pub mod hidden;
pub mod metrics;
pub mod model;
pub mod policy;
pub mod ports;
pub mod survey;

pub use api::DomSurveyor;
pub use cache::{SurveyCell, SurveyRegistry};
pub use errors::SurveyError;
pub use hidden::SelectorSet;
pub use model::{Count, DocumentId, NodeId, ScriptRef, SurveyReport};
pub use policy::SurveyPolicy;
pub use ports::{
    DocumentPort, MutationClockPort, SelectorProviderPort, SystemTimeSource, TimeSource,
};
pub use survey::DomSurveyorImpl;
