//! The pattern registry and the per-kind finders.

use indexmap::IndexMap;
use regex::Regex;

use super::{MatchValue, PatternDefinition, PatternKind, PatternMatch, PatternPayload};
use super::{reference, statistical, structural};
use crate::base::constants::CONTEXT_ATTRIBUTES;
use crate::base::{AnalysisError, PatternConfig};
use crate::tree::{NodeId, TreeDocument};

const CONTEXT_TEXT_LIMIT: usize = 50;
const CONTEXT_LIMIT: usize = 100;

/// Registry of pattern definitions plus the built-in pattern classes.
///
/// Structural, reference and statistical patterns need no registration.
/// A definition that cannot be evaluated (bad query, bad regex) is logged
/// and skipped; it never fails the whole scan.
#[derive(Clone, Debug, Default)]
pub struct PatternFinder {
    definitions: IndexMap<String, PatternDefinition>,
    config: PatternConfig,
}

impl PatternFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PatternConfig) -> Self {
        Self {
            definitions: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Register a definition, replacing any earlier one with the same name.
    pub fn register(&mut self, definition: PatternDefinition) {
        tracing::trace!("[PATTERNS] Registering '{}' ({})", definition.name, definition.kind);
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn register_many(&mut self, definitions: impl IntoIterator<Item = PatternDefinition>) {
        for definition in definitions {
            self.register(definition);
        }
    }

    /// Registered definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &PatternDefinition> {
        self.definitions.values()
    }

    pub fn get(&self, name: &str) -> Option<&PatternDefinition> {
        self.definitions.get(name)
    }

    fn registered(&self, accept: impl Fn(&PatternPayload) -> bool) -> Vec<&PatternDefinition> {
        self.definitions
            .values()
            .filter(|d| accept(&d.payload))
            .collect()
    }

    // =========================================================================
    // Finders
    // =========================================================================

    /// Evaluate query definitions; `None` uses every registered one.
    pub fn find_query_patterns(
        &self,
        doc: &TreeDocument,
        definitions: Option<&[PatternDefinition]>,
    ) -> Result<Vec<PatternMatch>, AnalysisError> {
        doc.root().ok_or(AnalysisError::EmptyDocument)?;
        let selected: Vec<&PatternDefinition> = match definitions {
            Some(defs) => defs.iter().collect(),
            None => self.registered(|p| matches!(p, PatternPayload::Query(_))),
        };

        let mut matches = Vec::new();
        for definition in selected {
            let PatternPayload::Query(query) = &definition.payload else {
                continue;
            };
            match doc.query(query) {
                Ok(nodes) => matches.extend(node_matches(doc, definition, &nodes)),
                Err(e) => tracing::warn!(
                    "[PATTERNS] Error matching query pattern '{}': {}",
                    definition.name,
                    e
                ),
            }
        }
        Ok(matches)
    }

    /// Evaluate regex definitions line by line against `text`.
    ///
    /// Locations are `line:N:offset` with a 1-based line number and a
    /// 0-based character offset.
    pub fn find_regex_patterns(
        &self,
        text: &str,
        definitions: Option<&[PatternDefinition]>,
    ) -> Vec<PatternMatch> {
        let selected: Vec<&PatternDefinition> = match definitions {
            Some(defs) => defs.iter().collect(),
            None => self.registered(|p| matches!(p, PatternPayload::Regex(_))),
        };

        let mut matches = Vec::new();
        for definition in selected {
            let PatternPayload::Regex(source) = &definition.payload else {
                continue;
            };
            let regex = match Regex::new(source) {
                Ok(regex) => regex,
                Err(e) => {
                    tracing::warn!(
                        "[PATTERNS] Error compiling regex pattern '{}': {}",
                        definition.name,
                        e
                    );
                    continue;
                }
            };
            for (index, line) in text.split('\n').enumerate() {
                for captures in regex.captures_iter(line) {
                    let Some(whole) = captures.get(0) else {
                        continue;
                    };
                    let offset = line[..whole.start()].chars().count();
                    let groups: Vec<serde_json::Value> = captures
                        .iter()
                        .skip(1)
                        .map(|g| g.map_or(serde_json::Value::Null, |m| m.as_str().into()))
                        .collect();
                    matches.push(
                        PatternMatch::new(
                            definition.name.clone(),
                            PatternKind::Regex,
                            format!("line:{}:{}", index + 1, offset),
                            whole.as_str(),
                        )
                        .with_context(line.trim())
                        .with_meta("groups", groups)
                        .with_meta("severity", definition.severity.label())
                        .with_meta("category", definition.category.clone()),
                    );
                }
            }
        }
        matches
    }

    /// Deep nesting, high fan-out and duplicate structures.
    pub fn find_structural_patterns(&self, doc: &TreeDocument) -> Result<Vec<PatternMatch>, AnalysisError> {
        doc.root().ok_or(AnalysisError::EmptyDocument)?;
        Ok(structural::find(doc, &self.config))
    }

    /// Broken references and unused identifiers.
    pub fn find_reference_patterns(&self, doc: &TreeDocument) -> Result<Vec<PatternMatch>, AnalysisError> {
        doc.root().ok_or(AnalysisError::EmptyDocument)?;
        Ok(reference::find(doc))
    }

    /// Rare elements and constant attributes.
    pub fn find_statistical_patterns(
        &self,
        doc: &TreeDocument,
    ) -> Result<Vec<PatternMatch>, AnalysisError> {
        doc.root().ok_or(AnalysisError::EmptyDocument)?;
        Ok(statistical::find(doc, &self.config))
    }

    /// Evaluate matcher-backed definitions; `None` uses every registered one.
    pub fn find_custom_patterns(
        &self,
        doc: &TreeDocument,
        definitions: Option<&[PatternDefinition]>,
    ) -> Result<Vec<PatternMatch>, AnalysisError> {
        doc.root().ok_or(AnalysisError::EmptyDocument)?;
        let selected: Vec<&PatternDefinition> = match definitions {
            Some(defs) => defs.iter().collect(),
            None => self.registered(|p| matches!(p, PatternPayload::Matcher(_))),
        };

        let mut matches = Vec::new();
        for definition in selected {
            let PatternPayload::Matcher(matcher) = &definition.payload else {
                continue;
            };
            let (valid, foreign): (Vec<NodeId>, Vec<NodeId>) =
                matcher(doc).into_iter().partition(|&id| doc.contains(id));
            if !foreign.is_empty() {
                tracing::warn!(
                    "[PATTERNS] Matcher '{}' returned {} nodes outside the document",
                    definition.name,
                    foreign.len()
                );
            }
            matches.extend(node_matches(doc, definition, &valid));
        }
        Ok(matches)
    }

    /// Every pattern class; regex patterns run only when `text` is non-empty.
    pub fn find_all(
        &self,
        doc: &TreeDocument,
        text: Option<&str>,
    ) -> Result<Vec<PatternMatch>, AnalysisError> {
        let mut matches = self.find_query_patterns(doc, None)?;
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            matches.extend(self.find_regex_patterns(text, None));
        }
        matches.extend(self.find_structural_patterns(doc)?);
        matches.extend(self.find_reference_patterns(doc)?);
        matches.extend(self.find_statistical_patterns(doc)?);
        matches.extend(self.find_custom_patterns(doc, None)?);
        tracing::debug!("[PATTERNS] find_all produced {} matches", matches.len());
        Ok(matches)
    }
}

fn node_matches<'a>(
    doc: &'a TreeDocument,
    definition: &'a PatternDefinition,
    nodes: &'a [NodeId],
) -> impl Iterator<Item = PatternMatch> + 'a {
    nodes.iter().map(move |&id| {
        let node = &doc[id];
        let value = match node.text() {
            Some(text) => MatchValue::Text(text.to_string()),
            None => MatchValue::Text(format!("<{}>", node.tag())),
        };
        PatternMatch::new(definition.name.clone(), definition.kind, doc.path_of(id), value)
            .with_context(element_context(doc, id))
            .with_metadata(definition.metadata())
    })
}

/// `<TAG KEY="v">text`, text only when short, capped at 100 characters.
fn element_context(doc: &TreeDocument, id: NodeId) -> String {
    let node = &doc[id];
    let mut parts = vec![format!("<{}", node.tag())];
    for attr in CONTEXT_ATTRIBUTES {
        if let Some(value) = node.attribute(attr).filter(|v| !v.is_empty()) {
            parts.push(format!("{attr}=\"{value}\""));
        }
    }
    let mut context = parts.join(" ");
    context.push('>');
    if let Some(text) = node.text() {
        if text.chars().count() < CONTEXT_TEXT_LIMIT {
            context.push_str(text);
        }
    }
    context.chars().take(CONTEXT_LIMIT).collect()
}
