//! Flat export view of a [`DocumentProfile`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{DocumentProfile, ProfileStatistics, TagPair};
use crate::base::AnalysisError;

/// The record consumed by report formatters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileExport {
    pub document_type: String,
    pub namespace: Option<String>,
    pub namespaces: IndexMap<String, String>,
    pub root_element: String,
    pub statistics: ProfileStatistics,
    pub container_patterns: Vec<SmolStr>,
    pub parameter_patterns: Vec<TagPair>,
    pub reference_patterns: Vec<TagPair>,
    /// Convention label → number of tags.
    pub naming_conventions: IndexMap<String, usize>,
}

impl DocumentProfile {
    pub fn export(&self) -> ProfileExport {
        ProfileExport {
            document_type: self.document_type.clone(),
            namespace: self.namespace.clone(),
            namespaces: self.namespaces.clone(),
            root_element: self.root_element.clone(),
            statistics: self.statistics.clone(),
            container_patterns: self.container_patterns.clone(),
            parameter_patterns: self.parameter_patterns.clone(),
            reference_patterns: self.reference_patterns.clone(),
            naming_conventions: self
                .naming_conventions
                .iter()
                .map(|(convention, count)| (convention.label().to_string(), *count))
                .collect(),
        }
    }

    /// Pretty-printed JSON of [`export`](Self::export).
    pub fn to_json(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }
}
