//! Tunables for the analysis components.
//!
//! Every config has a `Default` matching the established heuristics and
//! can be loaded from YAML or JSON. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use super::constants::DOCUMENT_TYPE_INDICATORS;
use super::AnalysisError;

/// One row of the document-type keyword table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeIndicator {
    /// Label reported as the document type.
    pub document_type: String,
    /// Upper-case keywords; each tag containing one scores a point.
    pub keywords: Vec<String>,
}

impl TypeIndicator {
    pub fn new(document_type: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            document_type: document_type.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Document profiler settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Text samples kept per tag.
    pub max_text_samples: usize,
    /// Characters kept per text sample.
    pub text_sample_len: usize,
    /// Length of the most-frequent-tags list.
    pub top_elements: usize,
    /// Nodes deeper than this are counted but not descended.
    pub max_depth: Option<usize>,
    /// Ordered document-type keyword table.
    pub type_indicators: Vec<TypeIndicator>,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            max_text_samples: 10,
            text_sample_len: 100,
            top_elements: 10,
            max_depth: None,
            type_indicators: DOCUMENT_TYPE_INDICATORS
                .iter()
                .map(|(doc_type, keywords)| TypeIndicator::new(*doc_type, keywords))
                .collect(),
        }
    }
}

/// Pattern finder thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Depth above which a deep-nesting match is emitted.
    pub deep_nesting_threshold: usize,
    /// Depth above which deep nesting is a warning.
    pub deep_nesting_warning: usize,
    /// Child count at which a high fan-out match is emitted.
    pub fanout_threshold: usize,
    /// Child count above which high fan-out is a warning.
    pub fanout_warning: usize,
    /// Minimum group size reported as a duplicate structure.
    pub duplicate_min_occurrences: usize,
    /// Example locations kept per duplicate group.
    pub duplicate_examples: usize,
    /// Relative frequency below which a single-occurrence tag is rare.
    pub rare_element_ratio: f64,
    /// Occurrences needed before a constant attribute is reported.
    pub constant_attribute_min: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            deep_nesting_threshold: 10,
            deep_nesting_warning: 15,
            fanout_threshold: 50,
            fanout_warning: 100,
            duplicate_min_occurrences: 3,
            duplicate_examples: 5,
            rare_element_ratio: 0.001,
            constant_attribute_min: 10,
        }
    }
}

/// Cross-reference analyzer settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrefConfig {
    /// Length of the most-referenced ranking in reports.
    pub most_referenced: usize,
    /// Broken references listed in reports.
    pub report_broken_limit: usize,
    /// Unused elements listed in reports.
    pub report_unused_limit: usize,
    /// Cycles listed in reports.
    pub report_cycle_limit: usize,
    /// Map `DEST` kinds through the entity kind rules before building target ids.
    pub normalize_target_kinds: bool,
}

impl Default for XrefConfig {
    fn default() -> Self {
        Self {
            most_referenced: 10,
            report_broken_limit: 10,
            report_unused_limit: 10,
            report_cycle_limit: 5,
            normalize_target_kinds: false,
        }
    }
}

/// Type detector settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Detected types below this confidence are dropped.
    pub min_confidence: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { min_confidence: 0.3 }
    }
}

/// Settings for every component, loadable as one document.
///
/// ```yaml
/// profiler:
///   top_elements: 20
/// patterns:
///   fanout_threshold: 200
/// xref:
///   normalize_target_kinds: true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub profiler: ProfilerConfig,
    pub patterns: PatternConfig,
    pub xref: XrefConfig,
    pub detector: DetectorConfig,
}

impl AnalysisConfig {
    /// Parse a YAML configuration document.
    pub fn from_yaml_str(input: &str) -> Result<Self, AnalysisError> {
        serde_yaml::from_str(input).map_err(|e| AnalysisError::config(format!("YAML: {e}")))
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(input: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(input).map_err(|e| AnalysisError::config(format!("JSON: {e}")))
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String, AnalysisError> {
        serde_yaml::to_string(self).map_err(|e| AnalysisError::serialization(e.to_string()))
    }
}
