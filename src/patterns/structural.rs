//! Built-in structural patterns: deep nesting, high fan-out and repeated
//! substructures.

use indexmap::IndexMap;

use super::{PatternKind, PatternMatch, Severity};
use crate::base::PatternConfig;
use crate::tree::{NodeId, TreeDocument};

const CATEGORY: &str = "structure";

pub(super) fn find(doc: &TreeDocument, config: &PatternConfig) -> Vec<PatternMatch> {
    let mut matches = Vec::new();

    let max_depth = max_depth(doc);
    if max_depth > config.deep_nesting_threshold {
        let severity = if max_depth > config.deep_nesting_warning {
            Severity::Warning
        } else {
            Severity::Info
        };
        matches.push(
            PatternMatch::new("deep_nesting", PatternKind::Structural, "/", max_depth)
                .with_context(format!("Maximum nesting depth: {max_depth}"))
                .with_severity(severity)
                .with_meta("category", CATEGORY),
        );
    }

    for id in doc.node_ids() {
        let child_count = doc[id].children().len();
        if child_count >= config.fanout_threshold {
            let severity = if child_count > config.fanout_warning {
                Severity::Warning
            } else {
                Severity::Info
            };
            matches.push(
                PatternMatch::new("high_fanout", PatternKind::Structural, doc.path_of(id), child_count)
                    .with_context(format!("Node has {child_count} children"))
                    .with_severity(severity)
                    .with_meta("category", CATEGORY),
            );
        }
    }

    for (signature, nodes) in group_by_structure(doc) {
        if nodes.len() < config.duplicate_min_occurrences {
            continue;
        }
        let paths: Vec<String> = nodes
            .iter()
            .take(config.duplicate_examples)
            .map(|&id| doc.path_of(id))
            .collect();
        let location = paths.first().cloned().unwrap_or_default();
        matches.push(
            PatternMatch::new("duplicate_structure", PatternKind::Structural, location, nodes.len())
                .with_context(signature)
                .with_confidence(0.8)
                .with_severity(Severity::Info)
                .with_meta("category", CATEGORY)
                .with_meta("paths", paths),
        );
    }

    tracing::debug!("[PATTERNS] {} structural matches, max depth {}", matches.len(), max_depth);
    matches
}

/// Longest root-to-node path, in edges.
fn max_depth(doc: &TreeDocument) -> usize {
    // Parents precede children in id order, so one forward pass suffices.
    let mut depths = vec![0usize; doc.len()];
    let mut max = 0;
    for id in doc.node_ids() {
        if let Some(parent) = doc[id].parent() {
            depths[id.index()] = depths[parent.index()] + 1;
            max = max.max(depths[id.index()]);
        }
    }
    max
}

/// Fingerprint of a node's shape: `TAG|children:A,B[|attrs:x,y]`.
///
/// Child tags are sorted and de-duplicated, attribute values are ignored.
pub fn structure_signature(doc: &TreeDocument, id: NodeId) -> String {
    let node = &doc[id];
    let mut child_tags: Vec<&str> = node.children().iter().map(|&c| doc[c].local_name()).collect();
    child_tags.sort_unstable();
    child_tags.dedup();

    let mut signature = format!("{}|children:{}", node.local_name(), child_tags.join(","));
    let mut attrs: Vec<&str> = node.attributes().keys().map(|k| k.as_str()).collect();
    if !attrs.is_empty() {
        attrs.sort_unstable();
        signature.push_str("|attrs:");
        signature.push_str(&attrs.join(","));
    }
    signature
}

fn group_by_structure(doc: &TreeDocument) -> IndexMap<String, Vec<NodeId>> {
    let mut groups: IndexMap<String, Vec<NodeId>> = IndexMap::new();
    for id in doc.node_ids().filter(|&id| !doc[id].is_leaf()) {
        groups.entry(structure_signature(doc, id)).or_default().push(id);
    }
    groups
}
