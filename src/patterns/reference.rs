//! Built-in reference-integrity patterns over attribute values.

use indexmap::{IndexMap, IndexSet};

use super::{PatternKind, PatternMatch, Severity};
use crate::base::constants::{IDENTIFIER_ATTRIBUTES, REFERENCE_ATTRIBUTES};
use crate::tree::TreeDocument;

const CATEGORY: &str = "reference";

pub(super) fn find(doc: &TreeDocument) -> Vec<PatternMatch> {
    let identifiers = collect_identifiers(doc);
    let references = collect_references(doc);
    let mut matches = Vec::new();

    for (value, paths) in &references {
        if identifiers.contains(value.as_str()) || value.starts_with('/') {
            continue;
        }
        for path in paths {
            matches.push(
                PatternMatch::new("broken_reference", PatternKind::Reference, path.clone(), value.as_str())
                    .with_context(format!("Reference '{value}' not found"))
                    .with_confidence(0.9)
                    .with_severity(Severity::Error)
                    .with_meta("category", CATEGORY),
            );
        }
    }

    for id in identifiers.iter().filter(|id| !references.contains_key(**id)) {
        matches.push(
            PatternMatch::new("unused_id", PatternKind::Reference, "global", *id)
                .with_context(format!("ID '{id}' is defined but never referenced"))
                .with_confidence(0.7)
                .with_severity(Severity::Info)
                .with_meta("category", CATEGORY),
        );
    }

    tracing::debug!(
        "[PATTERNS] {} identifiers, {} distinct references, {} reference matches",
        identifiers.len(),
        references.len(),
        matches.len()
    );
    matches
}

/// Non-empty identifier attribute values in document order.
fn collect_identifiers(doc: &TreeDocument) -> IndexSet<&str> {
    let mut identifiers = IndexSet::new();
    for id in doc.node_ids() {
        for attr in IDENTIFIER_ATTRIBUTES {
            if let Some(value) = doc[id].attribute(attr).filter(|v| !v.is_empty()) {
                identifiers.insert(value);
            }
        }
    }
    identifiers
}

/// Reference value → paths of the nodes carrying it, grouped by attribute.
fn collect_references(doc: &TreeDocument) -> IndexMap<String, Vec<String>> {
    let mut references: IndexMap<String, Vec<String>> = IndexMap::new();
    for attr in REFERENCE_ATTRIBUTES {
        for id in doc.node_ids() {
            if let Some(value) = doc[id].attribute(attr) {
                references
                    .entry(value.to_string())
                    .or_default()
                    .push(doc.path_of(id));
            }
        }
    }
    references
}
