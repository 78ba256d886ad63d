//! Pattern definitions and the matches they produce.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::tree::{NodeId, TreeDocument};

/// Class of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Query,
    Regex,
    Structural,
    Statistical,
    Sequence,
    Reference,
}

impl PatternKind {
    pub fn label(self) -> &'static str {
        match self {
            PatternKind::Query => "query",
            PatternKind::Regex => "regex",
            PatternKind::Structural => "structural",
            PatternKind::Statistical => "statistical",
            PatternKind::Sequence => "sequence",
            PatternKind::Reference => "reference",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity level of a pattern match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Lowercase label stored in match metadata.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "info" => Some(Severity::Info),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caller-supplied node selector.
pub type NodeMatcher = Arc<dyn Fn(&TreeDocument) -> Vec<NodeId> + Send + Sync>;

/// What a definition evaluates.
#[derive(Clone)]
pub enum PatternPayload {
    /// Path query evaluated against the tree.
    Query(String),
    /// Regular expression evaluated line by line against the raw text.
    Regex(String),
    /// Arbitrary selector over the tree.
    Matcher(NodeMatcher),
}

impl fmt::Debug for PatternPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternPayload::Query(q) => f.debug_tuple("Query").field(q).finish(),
            PatternPayload::Regex(r) => f.debug_tuple("Regex").field(r).finish(),
            PatternPayload::Matcher(_) => f.write_str("Matcher(..)"),
        }
    }
}

/// A registered pattern.
#[derive(Clone, Debug)]
pub struct PatternDefinition {
    pub name: String,
    pub kind: PatternKind,
    pub payload: PatternPayload,
    pub description: String,
    pub severity: Severity,
    pub category: String,
    pub tags: Vec<String>,
}

impl PatternDefinition {
    fn new(name: impl Into<String>, kind: PatternKind, payload: PatternPayload) -> Self {
        Self {
            name: name.into(),
            kind,
            payload,
            description: String::new(),
            severity: Severity::Info,
            category: "general".to_string(),
            tags: Vec::new(),
        }
    }

    pub fn query(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self::new(name, PatternKind::Query, PatternPayload::Query(query.into()))
    }

    pub fn regex(name: impl Into<String>, regex: impl Into<String>) -> Self {
        Self::new(name, PatternKind::Regex, PatternPayload::Regex(regex.into()))
    }

    /// A definition backed by a closure, reported under `kind`
    /// (typically [`PatternKind::Sequence`]).
    pub fn matcher<F>(name: impl Into<String>, kind: PatternKind, matcher: F) -> Self
    where
        F: Fn(&TreeDocument) -> Vec<NodeId> + Send + Sync + 'static,
    {
        Self::new(name, kind, PatternPayload::Matcher(Arc::new(matcher)))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// `severity`, `category` and `tags` as match metadata.
    pub(crate) fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("severity".into(), self.severity.label().into());
        metadata.insert("category".into(), self.category.clone().into());
        metadata.insert("tags".into(), self.tags.clone().into());
        metadata
    }
}

/// Open-ended match metadata.
pub type Metadata = IndexMap<String, serde_json::Value>;

/// The matched value of a [`PatternMatch`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchValue {
    Count(u64),
    Text(String),
    Missing,
}

impl From<usize> for MatchValue {
    fn from(count: usize) -> Self {
        MatchValue::Count(count as u64)
    }
}

impl From<String> for MatchValue {
    fn from(text: String) -> Self {
        MatchValue::Text(text)
    }
}

impl From<&str> for MatchValue {
    fn from(text: &str) -> Self {
        MatchValue::Text(text.to_string())
    }
}

/// One occurrence of a pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern_name: String,
    pub pattern_kind: PatternKind,
    /// Node path, `line:N:offset`, `element:TAG`, `attribute:NAME` or `global`.
    pub location: String,
    pub value: MatchValue,
    pub context: Option<String>,
    pub confidence: f64,
    pub metadata: Metadata,
}

impl PatternMatch {
    pub fn new(
        pattern_name: impl Into<String>,
        pattern_kind: PatternKind,
        location: impl Into<String>,
        value: impl Into<MatchValue>,
    ) -> Self {
        Self {
            pattern_name: pattern_name.into(),
            pattern_kind,
            location: location.into(),
            value: value.into(),
            context: None,
            confidence: 1.0,
            metadata: Metadata::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_severity(self, severity: Severity) -> Self {
        self.with_meta("severity", severity.label())
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata.extend(metadata);
        self
    }

    /// Severity label from metadata, `"info"` when absent.
    pub fn severity(&self) -> &str {
        self.metadata
            .get("severity")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(Severity::Info.label())
    }

    pub fn category(&self) -> Option<&str> {
        self.metadata
            .get("category")
            .and_then(serde_json::Value::as_str)
    }
}
