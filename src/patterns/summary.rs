//! Grouping and summaries over pattern matches.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{PatternKind, PatternMatch};

/// Matches grouped by kind, kinds in order of first appearance.
pub fn group_by_kind(matches: &[PatternMatch]) -> IndexMap<PatternKind, Vec<&PatternMatch>> {
    let mut grouped: IndexMap<PatternKind, Vec<&PatternMatch>> = IndexMap::new();
    for m in matches {
        grouped.entry(m.pattern_kind).or_default().push(m);
    }
    grouped
}

/// Matches grouped by their metadata severity (`"info"` when absent).
pub fn group_by_severity(matches: &[PatternMatch]) -> IndexMap<String, Vec<&PatternMatch>> {
    let mut grouped: IndexMap<String, Vec<&PatternMatch>> = IndexMap::new();
    for m in matches {
        grouped.entry(m.severity().to_string()).or_default().push(m);
    }
    grouped
}

/// Match counts by kind, severity and pattern name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub total_matches: usize,
    pub by_kind: IndexMap<String, usize>,
    pub by_severity: IndexMap<String, usize>,
    pub by_pattern: IndexMap<String, usize>,
    pub unique_patterns: usize,
}

pub fn summarize(matches: &[PatternMatch]) -> PatternSummary {
    let mut summary = PatternSummary {
        total_matches: matches.len(),
        ..PatternSummary::default()
    };
    for m in matches {
        *summary
            .by_kind
            .entry(m.pattern_kind.label().to_string())
            .or_insert(0) += 1;
        *summary.by_severity.entry(m.severity().to_string()).or_insert(0) += 1;
        *summary.by_pattern.entry(m.pattern_name.clone()).or_insert(0) += 1;
    }
    summary.unique_patterns = summary.by_pattern.len();
    summary
}
