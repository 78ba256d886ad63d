//! Query-based document-type detection.
//!
//! Each candidate type carries a priority and a list of queries. A type's
//! confidence is the fraction of its queries that select something, damped
//! by its priority: `ratio * (1 - (priority - 1) * 0.05)`.

use serde::{Deserialize, Serialize};

use crate::base::constants::{GENERIC_DOCUMENT_TYPE, TYPE_DETECTION_RULES, UNKNOWN_DOCUMENT_TYPE};
use crate::base::{AnalysisError, DetectorConfig};
use crate::tree::TreeDocument;

/// One candidate document type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    pub name: String,
    /// 1 is the strongest.
    pub priority: u32,
    pub patterns: Vec<String>,
}

impl TypeRule {
    pub fn new(name: impl Into<String>, priority: u32, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            priority,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn priority_factor(&self) -> f64 {
        1.0 - (f64::from(self.priority) - 1.0) * 0.05
    }
}

/// A type that met the confidence threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedType {
    pub name: String,
    pub confidence: f64,
    pub matched_patterns: Vec<String>,
    /// Elements selected by the matched patterns, or the document size for
    /// the generic fallback.
    pub element_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDetail {
    pub name: String,
    /// Percentage with two decimals, e.g. `"95.00%"`.
    pub confidence: String,
    pub element_count: usize,
    pub patterns_matched: usize,
    pub patterns_total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeStatistics {
    pub primary_type: String,
    pub all_types: Vec<String>,
    pub type_details: Vec<TypeDetail>,
}

#[derive(Clone, Debug)]
pub struct TypeDetector {
    rules: Vec<TypeRule>,
    config: DetectorConfig,
}

impl Default for TypeDetector {
    fn default() -> Self {
        Self::with_config(DetectorConfig::default())
    }
}

impl TypeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in AUTOSAR rules with custom settings.
    pub fn with_config(config: DetectorConfig) -> Self {
        let rules = TYPE_DETECTION_RULES
            .iter()
            .map(|(name, priority, patterns)| TypeRule::new(*name, *priority, patterns))
            .collect();
        Self { rules, config }
    }

    pub fn with_rules(rules: Vec<TypeRule>, config: DetectorConfig) -> Self {
        Self { rules, config }
    }

    pub fn rules(&self) -> &[TypeRule] {
        &self.rules
    }

    /// Detected types, most confident first.
    ///
    /// Never empty: when no rule qualifies a single generic result with
    /// confidence 1.0 is returned.
    pub fn detect(&self, doc: &TreeDocument) -> Result<Vec<DetectedType>, AnalysisError> {
        if doc.root().is_none() {
            return Err(AnalysisError::EmptyDocument);
        }

        let mut detected = Vec::new();
        for rule in &self.rules {
            if rule.patterns.is_empty() {
                continue;
            }
            let mut matched_patterns = Vec::new();
            let mut element_count = 0;
            for pattern in &rule.patterns {
                match doc.query(pattern) {
                    Ok(nodes) if !nodes.is_empty() => {
                        tracing::trace!("[PROFILER] Pattern '{}' matched {} elements", pattern, nodes.len());
                        element_count += nodes.len();
                        matched_patterns.push(pattern.clone());
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("[PROFILER] Error evaluating pattern '{}': {}", pattern, e),
                }
            }
            if matched_patterns.is_empty() {
                continue;
            }

            let ratio = matched_patterns.len() as f64 / rule.patterns.len() as f64;
            let confidence = ratio * rule.priority_factor();
            if confidence >= self.config.min_confidence {
                tracing::debug!("[PROFILER] Detected type: {} (confidence: {:.2})", rule.name, confidence);
                detected.push(DetectedType {
                    name: rule.name.clone(),
                    confidence,
                    matched_patterns,
                    element_count,
                });
            }
        }

        detected.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        if detected.is_empty() {
            tracing::debug!("[PROFILER] No specific type detected, classified as {}", GENERIC_DOCUMENT_TYPE);
            detected.push(DetectedType {
                name: GENERIC_DOCUMENT_TYPE.to_string(),
                confidence: 1.0,
                matched_patterns: vec!["*".to_string()],
                element_count: doc.len(),
            });
        }
        Ok(detected)
    }

    pub fn detect_primary(&self, doc: &TreeDocument) -> Result<String, AnalysisError> {
        let detected = self.detect(doc)?;
        Ok(detected
            .into_iter()
            .next()
            .map_or_else(|| GENERIC_DOCUMENT_TYPE.to_string(), |t| t.name))
    }

    pub fn detect_all(&self, doc: &TreeDocument) -> Result<Vec<String>, AnalysisError> {
        Ok(self.detect(doc)?.into_iter().map(|t| t.name).collect())
    }

    pub fn type_statistics(&self, doc: &TreeDocument) -> Result<TypeStatistics, AnalysisError> {
        let detected = self.detect(doc)?;
        let type_details = detected
            .iter()
            .map(|t| TypeDetail {
                name: t.name.clone(),
                confidence: format!("{:.2}%", t.confidence * 100.0),
                element_count: t.element_count,
                patterns_matched: t.matched_patterns.len(),
                patterns_total: self
                    .rules
                    .iter()
                    .find(|r| r.name == t.name)
                    .map_or(0, |r| r.patterns.len()),
            })
            .collect();
        Ok(TypeStatistics {
            primary_type: detected
                .first()
                .map_or_else(|| UNKNOWN_DOCUMENT_TYPE.to_string(), |t| t.name.clone()),
            all_types: detected.into_iter().map(|t| t.name).collect(),
            type_details,
        })
    }
}
