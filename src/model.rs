use std::time::Instant;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one surveyed document context. One survey state record
/// exists per `DocumentId`, for the lifetime of the page context.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque handle to an element node, assigned by the document port.
/// Stable for the lifetime of the node within its document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// A script-bearing element's source reference as seen by the document
/// port. An element with no source reference reports an empty string.
#[derive(Clone, Debug, Default)]
pub struct ScriptRef {
    pub src: String,
}

impl ScriptRef {
    pub fn inline() -> Self {
        Self { src: String::new() }
    }

    pub fn external(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

/// A saturating survey count. `Unknown` replaces the legacy `-1`
/// sentinel; `Known` values never exceed [`Count::CAP`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Count {
    #[default]
    Unknown,
    Known(u8),
}

impl Count {
    /// Saturation cap: counting stops here and the cap itself is
    /// reported. Part of the observable contract, do not change.
    pub const CAP: u8 = 99;

    pub fn saturating_from(value: usize) -> Self {
        Count::Known(value.min(Self::CAP as usize) as u8)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Count::Unknown)
    }

    pub fn is_saturated(&self) -> bool {
        matches!(self, Count::Known(n) if *n == Self::CAP)
    }

    /// Wire encoding: `-1` for unknown, the bounded count otherwise.
    pub fn as_i32(&self) -> i32 {
        match self {
            Count::Unknown => -1,
            Count::Known(n) => i32::from(*n),
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i32::deserialize(deserializer)?;
        match raw {
            -1 => Ok(Count::Unknown),
            n if (0..=i32::from(Count::CAP)).contains(&n) => Ok(Count::Known(n as u8)),
            other => Err(de::Error::custom(format!(
                "count out of range: {other} (expected -1..={})",
                Count::CAP
            ))),
        }
    }
}

/// Cached survey progress for one document context.
///
/// Invariant: a `Known` field is only rewritten by mutation-clock
/// invalidation, never partially by a pass.
#[derive(Clone, Debug)]
pub struct SurveyState {
    pub busy: bool,
    pub hidden_element_count: Count,
    pub inline_script_count: Count,
    pub external_script_count: Count,
    pub surveyed_at: Instant,
}

impl SurveyState {
    pub fn new(now: Instant) -> Self {
        Self {
            busy: false,
            hidden_element_count: Count::Unknown,
            inline_script_count: Count::Unknown,
            external_script_count: Count::Unknown,
            surveyed_at: now,
        }
    }

    /// Mutation-clock invalidation: every count back to unknown. The
    /// busy flag and timestamp are managed by the caller.
    pub fn invalidate(&mut self) {
        self.hidden_element_count = Count::Unknown;
        self.inline_script_count = Count::Unknown;
        self.external_script_count = Count::Unknown;
    }

    pub fn report(&self) -> SurveyReport {
        SurveyReport {
            hidden_element_count: self.hidden_element_count,
            inline_script_count: self.inline_script_count,
            external_script_count: self.external_script_count,
        }
    }
}

/// The value object handed back to the injector. Each field is either
/// unknown (`-1` on the wire) or a bounded non-negative count.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub hidden_element_count: Count,
    pub inline_script_count: Count,
    pub external_script_count: Count,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_saturates_at_cap() {
        assert_eq!(Count::saturating_from(3), Count::Known(3));
        assert_eq!(Count::saturating_from(99), Count::Known(99));
        assert_eq!(Count::saturating_from(150), Count::Known(99));
        assert!(Count::saturating_from(150).is_saturated());
    }

    #[test]
    fn count_wire_encoding_round_trips() {
        let json = serde_json::to_string(&Count::Unknown).unwrap();
        assert_eq!(json, "-1");
        let back: Count = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Count::Unknown);

        let json = serde_json::to_string(&Count::Known(42)).unwrap();
        assert_eq!(json, "42");
        let back: Count = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Count::Known(42));
    }

    #[test]
    fn count_rejects_out_of_range_wire_values() {
        assert!(serde_json::from_str::<Count>("100").is_err());
        assert!(serde_json::from_str::<Count>("-2").is_err());
    }

    #[test]
    fn invalidate_resets_all_counts() {
        let mut state = SurveyState::new(Instant::now());
        state.hidden_element_count = Count::Known(7);
        state.inline_script_count = Count::Known(1);
        state.external_script_count = Count::Known(99);
        state.invalidate();
        assert!(state.hidden_element_count.is_unknown());
        assert!(state.inline_script_count.is_unknown());
        assert!(state.external_script_count.is_unknown());
    }

    #[test]
    fn report_serializes_with_sentinel_encoding() {
        let state = SurveyState::new(Instant::now());
        let json = serde_json::to_value(state.report()).unwrap();
        assert_eq!(json["hidden_element_count"], -1);
        assert_eq!(json["inline_script_count"], -1);
        assert_eq!(json["external_script_count"], -1);
    }
}
