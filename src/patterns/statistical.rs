//! Built-in statistical patterns: rare elements and constant attributes.

use indexmap::IndexMap;

use super::{PatternKind, PatternMatch, Severity};
use crate::base::PatternConfig;
use crate::tree::TreeDocument;

const CATEGORY: &str = "statistics";

pub(super) fn find(doc: &TreeDocument, config: &PatternConfig) -> Vec<PatternMatch> {
    let mut matches = Vec::new();

    let mut element_counts: IndexMap<&str, usize> = IndexMap::new();
    let mut attribute_values: IndexMap<&str, IndexMap<&str, usize>> = IndexMap::new();
    for id in doc.node_ids() {
        let node = &doc[id];
        *element_counts.entry(node.local_name()).or_insert(0) += 1;
        for (name, value) in node.attributes() {
            *attribute_values
                .entry(name.as_str())
                .or_default()
                .entry(value.as_str())
                .or_insert(0) += 1;
        }
    }

    let total = doc.len();
    for (&tag, &count) in &element_counts {
        let frequency = count as f64 / total as f64;
        if count == 1 && frequency < config.rare_element_ratio {
            matches.push(
                PatternMatch::new("rare_element", PatternKind::Statistical, format!("element:{tag}"), count)
                    .with_context(format!("Element '{tag}' appears only {count} time(s)"))
                    .with_confidence(0.6)
                    .with_meta("frequency", frequency)
                    .with_severity(Severity::Info)
                    .with_meta("category", CATEGORY),
            );
        }
    }

    for (&attr, values) in &attribute_values {
        if values.len() != 1 {
            continue;
        }
        let Some((&value, &count)) = values.first() else {
            continue;
        };
        if count >= config.constant_attribute_min {
            matches.push(
                PatternMatch::new("constant_attribute", PatternKind::Statistical, format!("attribute:{attr}"), value)
                    .with_context(format!("Attribute '{attr}' always has value '{value}'"))
                    .with_confidence(0.8)
                    .with_meta("count", count)
                    .with_severity(Severity::Info)
                    .with_meta("category", CATEGORY),
            );
        }
    }

    tracing::debug!(
        "[PATTERNS] {} distinct tags, {} distinct attributes, {} statistical matches",
        element_counts.len(),
        attribute_values.len(),
        matches.len()
    );
    matches
}
