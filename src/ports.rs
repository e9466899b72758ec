use std::time::Instant;

use crate::model::{DocumentId, NodeId, ScriptRef};

/// Read-only view of a live document tree.
///
/// The surveyor never mutates the tree; it only enumerates and probes.
/// Enumerations are in document order. All calls are synchronous: the
/// survey runs to completion within one invocation, with no suspension
/// point.
pub trait DocumentPort: Send + Sync {
    /// Script-bearing elements with their source reference, in
    /// document order.
    fn scripts(&self, doc: &DocumentId) -> Vec<ScriptRef>;

    /// All element nodes under the document body, in document order.
    fn body_elements(&self, doc: &DocumentId) -> Vec<NodeId>;

    /// Whether the node has a rendered box (offset-parent proxy).
    /// `false` means the node is treated as hidden.
    fn has_rendered_box(&self, doc: &DocumentId, node: NodeId) -> bool;

    /// Attribute names carried by the node, empty if none.
    fn attribute_names(&self, doc: &DocumentId, node: NodeId) -> Vec<String>;

    /// Whether the node directly matches the compound selector. An
    /// empty compound matches nothing.
    fn matches(&self, doc: &DocumentId, node: NodeId, compound: &str) -> bool;

    /// Nearest ancestor-or-self of the node matching the compound
    /// selector, if any. An empty compound matches nothing.
    fn closest(&self, doc: &DocumentId, node: NodeId, compound: &str) -> Option<NodeId>;

    /// Whether any anchor element references a `javascript:`-scheme
    /// target.
    fn has_javascript_anchor(&self, doc: &DocumentId) -> bool;
}

/// Supplies the current set of declarative hiding selectors.
pub trait SelectorProviderPort: Send + Sync {
    /// `None` means the provider is unavailable right now; the survey
    /// resolves the hidden count to zero rather than failing.
    fn hiding_selectors(&self, doc: &DocumentId) -> Option<Vec<String>>;
}

/// Externally maintained record of the last tree mutation, used solely
/// for cache invalidation.
pub trait MutationClockPort: Send + Sync {
    fn last_mutation(&self, doc: &DocumentId) -> Option<Instant>;
}

/// Injectable wall clock so the time budget is testable.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

/// Default production clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
