use crate::model::DocumentId;
use crate::ports::DocumentPort;

/// Event-handler attribute names whose presence marks an element as an
/// inline-script-like construct. Closed set, part of the external
/// contract. Sorted for binary search.
pub const EVENT_HANDLER_ATTRIBUTES: [&str; 78] = [
    "onabort",
    "onafterprint",
    "onbeforeprint",
    "onbeforeunload",
    "onblur",
    "oncancel",
    "oncanplay",
    "oncanplaythrough",
    "onchange",
    "onclick",
    "onclose",
    "oncontextmenu",
    "oncopy",
    "oncuechange",
    "oncut",
    "ondblclick",
    "ondrag",
    "ondragend",
    "ondragenter",
    "ondragexit",
    "ondragleave",
    "ondragover",
    "ondragstart",
    "ondrop",
    "ondurationchange",
    "onemptied",
    "onended",
    "onerror",
    "onfocus",
    "onhashchange",
    "oninput",
    "oninvalid",
    "onkeydown",
    "onkeypress",
    "onkeyup",
    "onlanguagechange",
    "onload",
    "onloadeddata",
    "onloadedmetadata",
    "onloadstart",
    "onmessage",
    "onmousedown",
    "onmouseenter",
    "onmouseleave",
    "onmousemove",
    "onmouseout",
    "onmouseover",
    "onmouseup",
    "onoffline",
    "ononline",
    "onpagehide",
    "onpageshow",
    "onpaste",
    "onpause",
    "onplay",
    "onplaying",
    "onpopstate",
    "onprogress",
    "onratechange",
    "onrejectionhandled",
    "onreset",
    "onresize",
    "onscroll",
    "onseeked",
    "onseeking",
    "onselect",
    "onshow",
    "onstalled",
    "onstorage",
    "onsubmit",
    "onsuspend",
    "ontimeupdate",
    "ontoggle",
    "onunhandledrejection",
    "onunload",
    "onvolumechange",
    "onwaiting",
    "onwheel",
];

pub fn is_event_handler_attribute(name: &str) -> bool {
    EVENT_HANDLER_ATTRIBUTES.binary_search(&name).is_ok()
}

/// Stage A: one existence probe for a `javascript:`-scheme anchor.
pub fn javascript_anchor_present<D>(port: &D, doc: &DocumentId) -> bool
where
    D: DocumentPort + ?Sized,
{
    port.has_javascript_anchor(doc)
}

/// Stage B: walk the body subtree looking for any element carrying an
/// event-handler attribute. Boolean signal, so the walk stops at the
/// first hit.
pub fn handler_attribute_present<D>(port: &D, doc: &DocumentId) -> bool
where
    D: DocumentPort + ?Sized,
{
    for node in port.body_elements(doc) {
        for attr in port.attribute_names(doc, node) {
            if is_event_handler_attribute(&attr) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_set_is_sorted_for_binary_search() {
        let mut sorted = EVENT_HANDLER_ATTRIBUTES;
        sorted.sort_unstable();
        assert_eq!(sorted, EVENT_HANDLER_ATTRIBUTES);
    }

    #[test]
    fn recognizes_members_of_the_closed_set() {
        for name in ["onclick", "onload", "onerror", "onsubmit", "onstorage"] {
            assert!(is_event_handler_attribute(name), "{name}");
        }
    }

    #[test]
    fn rejects_lookalikes() {
        for name in ["click", "onfoo", "data-onclick", "ONCLICK", "on"] {
            assert!(!is_event_handler_attribute(name), "{name}");
        }
    }
}
