use std::collections::HashSet;

use crate::model::{Count, DocumentId, NodeId};
use crate::ports::DocumentPort;

/// Boundary between alternatives inside one provider selector string.
const ALTERNATION: &str = ",\n";

/// Hiding selectors partitioned by matching cost.
///
/// Testing "does this element match any of N selectors" scales with N
/// per node. Combinator-free selectors are cheap and batched into one
/// compound `matches` probe; combinator-bearing ones need the
/// ancestor-relationship probe instead. The split keeps the per-node
/// cost tolerable on large trees with large filter sets.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectorSet {
    simple: String,
    complex: String,
}

impl SelectorSet {
    pub fn partition<S: AsRef<str>>(selectors: &[S]) -> Self {
        let mut simple = Vec::new();
        let mut complex = Vec::new();
        for selector_str in selectors {
            for selector in selector_str.as_ref().split(ALTERNATION) {
                if selector.is_empty() {
                    continue;
                }
                if has_combinator(selector) {
                    complex.push(selector);
                } else {
                    simple.push(selector);
                }
            }
        }
        Self {
            simple: simple.join(ALTERNATION),
            complex: complex.join(ALTERNATION),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.complex.is_empty()
    }

    pub fn simple(&self) -> &str {
        &self.simple
    }

    pub fn complex(&self) -> &str {
        &self.complex
    }
}

fn has_combinator(selector: &str) -> bool {
    selector.contains([' ', '>', '+', '~'])
}

/// Hidden-element matcher pass.
///
/// Walks the body subtree in document order, pre-filters to nodes
/// without a rendered box, probes the two selector compounds, and
/// stops as soon as the deduplicated match set reaches the saturation
/// cap. An empty selector set resolves to zero without walking.
pub fn count_hidden_elements<D>(port: &D, doc: &DocumentId, set: &SelectorSet) -> Count
where
    D: DocumentPort + ?Sized,
{
    if set.is_empty() {
        return Count::Known(0);
    }

    let mut matched: HashSet<NodeId> = HashSet::new();
    for node in port.body_elements(doc) {
        if port.has_rendered_box(doc, node) {
            continue;
        }
        let direct = !set.simple.is_empty() && port.matches(doc, node, &set.simple);
        let via_ancestor = !direct
            && !set.complex.is_empty()
            && port.closest(doc, node, &set.complex) == Some(node);
        if !direct && !via_ancestor {
            continue;
        }
        matched.insert(node);
        if matched.len() == Count::CAP as usize {
            break;
        }
    }
    Count::saturating_from(matched.len())
}
