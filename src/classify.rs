use crate::model::{Count, ScriptRef};

/// Outcome of one classifier pass over the document's scripts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScriptTally {
    pub external: u8,
    pub inline_found: bool,
}

impl ScriptTally {
    pub fn external_count(&self) -> Count {
        Count::Known(self.external)
    }

    /// Commit policy for the inline flag: only assert a value when an
    /// inline hit was seen, or when the external tally saturated and
    /// the scan therefore stopped early. Otherwise the flag stays
    /// unknown so the cheaper fallback heuristics get a chance.
    pub fn inline_commit(&self) -> Option<Count> {
        if self.inline_found {
            Some(Count::Known(1))
        } else if self.external == Count::CAP {
            Some(Count::Known(0))
        } else {
            None
        }
    }
}

/// An element whose source reference is empty or uses the `data:` or
/// `blob:` scheme carries its payload inline.
pub fn is_inline_ref(src: &str) -> bool {
    src.is_empty() || src.starts_with("data:") || src.starts_with("blob:")
}

/// Single document-order pass over the script-bearing elements.
///
/// Inline hits flag the tally but keep the iteration going: the
/// external count must still be collected. The scan stops the moment
/// the external tally reaches the saturation cap.
pub fn classify_scripts<'a, I>(scripts: I) -> ScriptTally
where
    I: IntoIterator<Item = &'a ScriptRef>,
{
    let mut tally = ScriptTally::default();
    for script in scripts {
        if is_inline_ref(&script.src) {
            tally.inline_found = true;
            continue;
        }
        tally.external += 1;
        if tally.external == Count::CAP {
            break;
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external(n: usize) -> Vec<ScriptRef> {
        (0..n)
            .map(|i| ScriptRef::external(format!("https://cdn.example/{i}.js")))
            .collect()
    }

    #[test]
    fn empty_src_and_data_and_blob_are_inline() {
        assert!(is_inline_ref(""));
        assert!(is_inline_ref("data:text/javascript,void 0"));
        assert!(is_inline_ref("blob:https://example.com/1234"));
        assert!(!is_inline_ref("https://cdn.example/app.js"));
        assert!(!is_inline_ref("/relative.js"));
    }

    #[test]
    fn counts_externals_and_flags_inline() {
        let mut scripts = external(5);
        scripts.insert(2, ScriptRef::inline());
        let tally = classify_scripts(&scripts);
        assert_eq!(tally.external, 5);
        assert!(tally.inline_found);
        assert_eq!(tally.inline_commit(), Some(Count::Known(1)));
    }

    #[test]
    fn inline_scripts_do_not_count_as_external() {
        let scripts = vec![ScriptRef::inline(), ScriptRef::inline()];
        let tally = classify_scripts(&scripts);
        assert_eq!(tally.external, 0);
        assert!(tally.inline_found);
    }

    #[test]
    fn external_tally_saturates_at_cap() {
        let tally = classify_scripts(&external(150));
        assert_eq!(tally.external, Count::CAP);
        assert!(tally.external_count().is_saturated());
    }

    #[test]
    fn saturation_commits_inline_zero() {
        // The scan stopped early, but saturation is treated as enough
        // evidence to commit the (absent) inline flag.
        let tally = classify_scripts(&external(150));
        assert!(!tally.inline_found);
        assert_eq!(tally.inline_commit(), Some(Count::Known(0)));
    }

    #[test]
    fn partial_scan_without_inline_leaves_flag_open() {
        let tally = classify_scripts(&external(7));
        assert_eq!(tally.inline_commit(), None);
    }

    #[test]
    fn inline_after_saturation_point_is_missed() {
        // The cap short-circuits the scan; a later inline script is
        // not observed. Saturation then commits inline as zero.
        let mut scripts = external(99);
        scripts.push(ScriptRef::inline());
        let tally = classify_scripts(&scripts);
        assert!(!tally.inline_found);
        assert_eq!(tally.inline_commit(), Some(Count::Known(0)));
    }
}
