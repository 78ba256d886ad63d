//! Pattern finding.
//!
//! A [`PatternFinder`] evaluates registered [`PatternDefinition`]s (queries,
//! regular expressions, custom matchers) together with three built-in
//! pattern classes that need no registration:
//!
//! | class       | patterns                                           |
//! |-------------|----------------------------------------------------|
//! | structural  | `deep_nesting`, `high_fanout`, `duplicate_structure` |
//! | reference   | `broken_reference`, `unused_id`                    |
//! | statistical | `rare_element`, `constant_attribute`               |
//!
//! Results are flat [`PatternMatch`] records; see [`summarize`] and the
//! `group_by_*` functions for aggregation.

mod definition;
mod finder;
mod reference;
mod statistical;
mod structural;
mod summary;

pub use definition::{
    MatchValue, Metadata, NodeMatcher, PatternDefinition, PatternKind, PatternMatch,
    PatternPayload, Severity,
};
pub use finder::PatternFinder;
pub use structural::structure_signature;
pub use summary::{PatternSummary, group_by_kind, group_by_severity, summarize};
