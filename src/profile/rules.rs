//! Structural role heuristics for tag names.
//!
//! Each role is an ordered list of rules; a tag takes the role when any rule
//! matches. Roles are checked independently, so one tag may hold several.

use serde::{Deserialize, Serialize};

/// How a single rule inspects an upper-cased tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagRule {
    Contains(&'static str),
    EndsWith(&'static str),
}

impl TagRule {
    pub fn matches(self, upper_tag: &str) -> bool {
        match self {
            TagRule::Contains(s) => upper_tag.contains(s),
            TagRule::EndsWith(s) => upper_tag.ends_with(s),
        }
    }
}

pub const CONTAINER_RULES: &[TagRule] = &[
    TagRule::Contains("CONTAINER"),
    TagRule::EndsWith("CONTAINERS"),
    TagRule::EndsWith("-VALUES"),
    TagRule::EndsWith("ELEMENTS"),
];

pub const PARAMETER_RULES: &[TagRule] = &[
    TagRule::Contains("PARAM"),
    TagRule::Contains("PARAMETER"),
    TagRule::EndsWith("VALUE"),
    TagRule::EndsWith("-VALUE"),
];

pub const REFERENCE_RULES: &[TagRule] = &[
    TagRule::EndsWith("REF"),
    TagRule::EndsWith("-REF"),
    TagRule::Contains("REFERENCE"),
];

/// Substring that vetoes the reference role.
pub const REFERENCE_EXCLUSION: &str = "DEFINITION";

/// Role flags of one tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRoles {
    pub is_container: bool,
    pub is_parameter: bool,
    pub is_reference: bool,
}

impl ElementRoles {
    /// Classify a tag name (case-insensitive).
    pub fn classify(tag: &str) -> Self {
        let upper = tag.to_uppercase();
        let any = |rules: &[TagRule]| rules.iter().any(|r| r.matches(&upper));
        Self {
            is_container: any(CONTAINER_RULES),
            is_parameter: any(PARAMETER_RULES),
            is_reference: any(REFERENCE_RULES) && !upper.contains(REFERENCE_EXCLUSION),
        }
    }

    pub fn is_none(&self) -> bool {
        !(self.is_container || self.is_parameter || self.is_reference)
    }
}
