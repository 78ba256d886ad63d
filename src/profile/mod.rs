//! Document profiling.
//!
//! [`DocumentProfiler`] walks a tree once and discovers its vocabulary:
//! per-tag statistics, naming conventions, structural roles and a
//! keyword-scored document type. [`TypeDetector`] is the query-based
//! alternative for the document type, with a confidence per type.
//!
//! ```text
//! DocumentProfile
//! ├── document_type / namespace / namespaces / root_element
//! ├── element_patterns: tag -> ElementPattern (first-visit order)
//! ├── container_patterns, parameter_patterns, reference_patterns
//! ├── naming_conventions: histogram
//! └── statistics: counts, top-N tags, type scores
//! ```

mod detector;
mod export;
mod naming;
mod profiler;
mod rules;

pub use detector::{DetectedType, TypeDetail, TypeDetector, TypeRule, TypeStatistics};
pub use export::ProfileExport;
pub use naming::NamingConvention;
pub use profiler::DocumentProfiler;
pub use rules::{ElementRoles, TagRule};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::BTreeSet;

use crate::base::constants::SUGGESTION_TERMS;

/// Everything learned about one tag during a profiling walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementPattern {
    /// Local tag name.
    pub tag_name: SmolStr,
    pub frequency: usize,
    pub depth_levels: BTreeSet<usize>,
    pub parent_tags: IndexSet<SmolStr>,
    pub child_tags: IndexSet<SmolStr>,
    pub attributes: IndexSet<SmolStr>,
    /// Bounded, truncated samples of direct text.
    pub text_samples: Vec<String>,
    pub naming_convention: NamingConvention,
    pub is_container: bool,
    pub is_parameter: bool,
    pub is_reference: bool,
}

impl ElementPattern {
    /// An unseen tag with its name-derived classifications filled in.
    pub fn new(tag_name: impl Into<SmolStr>) -> Self {
        let tag_name = tag_name.into();
        let roles = ElementRoles::classify(&tag_name);
        Self {
            naming_convention: NamingConvention::classify(&tag_name),
            is_container: roles.is_container,
            is_parameter: roles.is_parameter,
            is_reference: roles.is_reference,
            tag_name,
            frequency: 0,
            depth_levels: BTreeSet::new(),
            parent_tags: IndexSet::new(),
            child_tags: IndexSet::new(),
            attributes: IndexSet::new(),
            text_samples: Vec::new(),
        }
    }
}

/// A `(parent, tag)` occurrence of a parameter or reference tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagPair {
    pub parent: SmolStr,
    pub tag: SmolStr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: SmolStr,
    pub count: usize,
}

/// Aggregate numbers of a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStatistics {
    pub total_elements: usize,
    pub unique_elements: usize,
    pub max_depth: usize,
    pub container_count: usize,
    pub parameter_count: usize,
    pub reference_count: usize,
    pub top_elements: Vec<TagCount>,
    /// Keyword score per candidate document type, only types that scored.
    pub type_scores: IndexMap<String, usize>,
}

/// Result of [`DocumentProfiler::profile`]. Immutable once returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentProfile {
    pub document_type: String,
    /// URI of the root element's namespace.
    pub namespace: Option<String>,
    /// Prefix → URI declared on the root; the default namespace is keyed `""`.
    pub namespaces: IndexMap<String, String>,
    /// Local name of the root element.
    pub root_element: String,
    pub element_patterns: IndexMap<SmolStr, ElementPattern>,
    /// Number of tags per naming convention.
    pub naming_conventions: IndexMap<NamingConvention, usize>,
    pub common_attributes: IndexSet<SmolStr>,
    pub parameter_patterns: Vec<TagPair>,
    pub reference_patterns: Vec<TagPair>,
    pub container_patterns: Vec<SmolStr>,
    pub hierarchy_depth: usize,
    pub statistics: ProfileStatistics,
}

impl DocumentProfile {
    pub fn pattern(&self, tag: &str) -> Option<&ElementPattern> {
        self.element_patterns.get(tag)
    }

    pub fn container_elements(&self) -> Vec<&str> {
        self.tags_where(|p| p.is_container)
    }

    pub fn parameter_elements(&self) -> Vec<&str> {
        self.tags_where(|p| p.is_parameter)
    }

    pub fn reference_elements(&self) -> Vec<&str> {
        self.tags_where(|p| p.is_reference)
    }

    fn tags_where(&self, predicate: impl Fn(&ElementPattern) -> bool) -> Vec<&str> {
        self.element_patterns
            .values()
            .filter(|p| predicate(p))
            .map(|p| p.tag_name.as_str())
            .collect()
    }

    /// Tags that look like `kind` (`module`, `container`, `parameter`,
    /// `reference` or `configuration`). Unknown kinds yield nothing.
    pub fn suggest_patterns(&self, kind: &str) -> Vec<&str> {
        let kind = kind.to_lowercase();
        let Some((_, terms)) = SUGGESTION_TERMS.iter().find(|(k, _)| *k == kind) else {
            return Vec::new();
        };
        self.element_patterns
            .keys()
            .filter(|tag| {
                let upper = tag.to_uppercase();
                terms.iter().any(|term| upper.contains(term))
            })
            .map(SmolStr::as_str)
            .collect()
    }

    /// Query selecting every element named `tag` in this document.
    ///
    /// Namespaced documents get a `local-name()` test so the query does not
    /// depend on the prefix in use.
    pub fn element_query(&self, tag: &str) -> String {
        if self.namespace.is_some() {
            format!("//*[local-name()='{tag}']")
        } else {
            format!("//{tag}")
        }
    }
}
