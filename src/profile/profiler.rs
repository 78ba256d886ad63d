//! The single-walk document profiler.

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use smol_str::SmolStr;

use super::{DocumentProfile, ElementPattern, ProfileStatistics, TagCount, TagPair};
use crate::base::constants::UNKNOWN_DOCUMENT_TYPE;
use crate::base::{AnalysisError, ProfilerConfig};
use crate::tree::{NodeId, TreeDocument, prefix};

/// Discovers the structure of a document without a schema.
///
/// The profiler holds configuration only; every call to
/// [`profile`](Self::profile) starts from fresh scratch state, so one
/// instance can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct DocumentProfiler {
    config: ProfilerConfig,
}

/// Per-walk accumulator, dropped when the profile is returned.
#[derive(Default)]
struct Walk {
    patterns: IndexMap<SmolStr, ElementPattern>,
    common_attributes: IndexSet<SmolStr>,
    max_depth: usize,
    pruned: usize,
}

impl DocumentProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Profile one document.
    ///
    /// Fails only for a document without a root element.
    pub fn profile(&self, doc: &TreeDocument) -> Result<DocumentProfile, AnalysisError> {
        let root = doc.root().ok_or(AnalysisError::EmptyDocument)?;
        tracing::debug!("[PROFILER] Profiling document with {} nodes", doc.len());

        let (namespace, namespaces) = extract_namespaces(doc, root);
        let walk = self.walk(doc, root);
        if walk.pruned > 0 {
            tracing::warn!(
                "[PROFILER] max_depth {:?} reached, {} subtrees not descended",
                self.config.max_depth,
                walk.pruned
            );
        }

        let type_scores = self.score_document_types(&walk.patterns);
        let document_type = self.pick_document_type(&type_scores);

        let mut naming_conventions = IndexMap::new();
        let mut container_patterns = Vec::new();
        let mut parameter_patterns = Vec::new();
        let mut reference_patterns = Vec::new();
        for pattern in walk.patterns.values() {
            *naming_conventions
                .entry(pattern.naming_convention)
                .or_insert(0usize) += 1;
            if pattern.is_container {
                container_patterns.push(pattern.tag_name.clone());
            }
            if pattern.is_parameter {
                parameter_patterns.extend(pairs_with_parents(pattern));
            }
            if pattern.is_reference {
                reference_patterns.extend(pairs_with_parents(pattern));
            }
        }

        let statistics = self.statistics(&walk, type_scores);
        tracing::debug!(
            "[PROFILER] Profiled {} elements, {} unique tags, type {}",
            statistics.total_elements,
            statistics.unique_elements,
            document_type
        );

        Ok(DocumentProfile {
            document_type,
            namespace,
            namespaces,
            root_element: doc[root].local_name().to_string(),
            element_patterns: walk.patterns,
            naming_conventions,
            common_attributes: walk.common_attributes,
            parameter_patterns,
            reference_patterns,
            container_patterns,
            hierarchy_depth: walk.max_depth,
            statistics,
        })
    }

    /// Profile many documents in parallel, one result per input.
    pub fn profile_documents(
        &self,
        docs: &[TreeDocument],
    ) -> Vec<Result<DocumentProfile, AnalysisError>> {
        docs.par_iter().map(|doc| self.profile(doc)).collect()
    }

    fn walk(&self, doc: &TreeDocument, root: NodeId) -> Walk {
        let mut walk = Walk::default();
        let mut stack = vec![(root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &doc[id];
            let tag = node.local_name();
            walk.max_depth = walk.max_depth.max(depth);

            let pattern = walk
                .patterns
                .entry(SmolStr::new(tag))
                .or_insert_with(|| ElementPattern::new(tag));
            pattern.frequency += 1;
            pattern.depth_levels.insert(depth);
            pattern.attributes.extend(node.attributes().keys().cloned());
            let text = node.text().map(str::trim).filter(|t| !t.is_empty());
            if let Some(text) = text {
                if pattern.text_samples.len() < self.config.max_text_samples {
                    pattern
                        .text_samples
                        .push(text.chars().take(self.config.text_sample_len).collect());
                }
            }
            walk.common_attributes
                .extend(node.attributes().keys().cloned());

            if let Some(parent) = node.parent() {
                let parent_tag = doc[parent].local_name();
                if let Some(pattern) = walk.patterns.get_mut(tag) {
                    pattern.parent_tags.insert(SmolStr::new(parent_tag));
                }
                if let Some(parent_pattern) = walk.patterns.get_mut(parent_tag) {
                    parent_pattern.child_tags.insert(SmolStr::new(tag));
                }
            }

            if node.is_leaf() {
                continue;
            }
            if self.config.max_depth.is_some_and(|max| depth >= max) {
                walk.pruned += 1;
                continue;
            }
            stack.extend(node.children().iter().rev().map(|&c| (c, depth + 1)));
        }

        tracing::trace!("[PROFILER] Walk visited {} tags", walk.patterns.len());
        walk
    }

    fn score_document_types(
        &self,
        patterns: &IndexMap<SmolStr, ElementPattern>,
    ) -> IndexMap<String, usize> {
        let mut scores: IndexMap<String, usize> = IndexMap::new();
        for tag in patterns.keys() {
            let upper = tag.to_uppercase();
            for indicator in &self.config.type_indicators {
                let hits = indicator
                    .keywords
                    .iter()
                    .filter(|k| upper.contains(k.as_str()))
                    .count();
                if hits > 0 {
                    *scores.entry(indicator.document_type.clone()).or_insert(0) += hits;
                }
            }
        }
        scores
    }

    /// Highest score wins; ties go to the type that scored first during the walk.
    fn pick_document_type(&self, scores: &IndexMap<String, usize>) -> String {
        let mut best: Option<(&str, usize)> = None;
        for (document_type, &score) in scores {
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((document_type, score));
            }
        }
        best.map_or_else(|| UNKNOWN_DOCUMENT_TYPE.to_string(), |(t, _)| t.to_string())
    }

    fn statistics(&self, walk: &Walk, type_scores: IndexMap<String, usize>) -> ProfileStatistics {
        let patterns = &walk.patterns;
        let mut by_frequency: Vec<&ElementPattern> = patterns.values().collect();
        by_frequency.sort_by(|a, b| b.frequency.cmp(&a.frequency));

        ProfileStatistics {
            total_elements: patterns.values().map(|p| p.frequency).sum(),
            unique_elements: patterns.len(),
            max_depth: walk.max_depth,
            container_count: patterns.values().filter(|p| p.is_container).count(),
            parameter_count: patterns.values().filter(|p| p.is_parameter).count(),
            reference_count: patterns.values().filter(|p| p.is_reference).count(),
            top_elements: by_frequency
                .into_iter()
                .take(self.config.top_elements)
                .map(|p| TagCount {
                    tag: p.tag_name.clone(),
                    count: p.frequency,
                })
                .collect(),
            type_scores,
        }
    }
}

fn pairs_with_parents(pattern: &ElementPattern) -> impl Iterator<Item = TagPair> + '_ {
    pattern.parent_tags.iter().map(|parent| TagPair {
        parent: parent.clone(),
        tag: pattern.tag_name.clone(),
    })
}

/// Namespace URI of the root element plus the root's declarations.
fn extract_namespaces(doc: &TreeDocument, root: NodeId) -> (Option<String>, IndexMap<String, String>) {
    let node = &doc[root];
    let namespaces = node.namespaces().clone();
    let tag = node.tag();

    let namespace = if let Some((uri, _)) = tag.strip_prefix('{').and_then(|t| t.split_once('}')) {
        Some(uri.to_string())
    } else {
        let key = prefix(tag).unwrap_or_default();
        namespaces.get(key).cloned()
    };
    (namespace, namespaces)
}
