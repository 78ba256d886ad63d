//! Summary report over a dependency graph.

use serde::{Deserialize, Serialize};

use super::{DependencyGraph, GraphStatistics};
use crate::base::XrefConfig;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_elements: usize,
    pub total_references: usize,
    pub broken_references: usize,
    pub unused_elements: usize,
    pub circular_dependencies: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenReference {
    pub source: String,
    pub target: String,
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementEntry {
    pub element: String,
    pub kind: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedElement {
    pub element: String,
    pub kind: String,
    pub name: String,
    pub reference_count: usize,
}

/// Counts plus truncated lists of the interesting parts of a graph.
///
/// Summary counts cover the whole graph; the lists are cut to the
/// [`XrefConfig`] limits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphReport {
    pub summary: ReportSummary,
    pub statistics: GraphStatistics,
    pub broken_references: Vec<BrokenReference>,
    pub unused_elements: Vec<ElementEntry>,
    pub most_referenced: Vec<RankedElement>,
    pub circular_dependencies: Vec<Vec<String>>,
}

impl GraphReport {
    pub fn build(graph: &DependencyGraph, config: &XrefConfig) -> Self {
        let broken = graph.find_broken_references();
        let unused = graph.find_unused_elements();
        let mut cycles = graph.find_circular_dependencies();

        let summary = ReportSummary {
            total_elements: graph.node_count(),
            total_references: graph.edge_count(),
            broken_references: broken.len(),
            unused_elements: unused.len(),
            circular_dependencies: cycles.len(),
        };
        cycles.truncate(config.report_cycle_limit);

        Self {
            summary,
            statistics: graph.statistics().clone(),
            broken_references: broken
                .iter()
                .take(config.report_broken_limit)
                .map(|r| BrokenReference {
                    source: r.source.clone(),
                    target: r.target.clone(),
                    kind: r.kind.label().to_string(),
                })
                .collect(),
            unused_elements: unused
                .iter()
                .take(config.report_unused_limit)
                .map(|n| ElementEntry {
                    element: n.id.clone(),
                    kind: n.kind.label().to_string(),
                    name: n.name.clone(),
                })
                .collect(),
            most_referenced: graph
                .find_most_referenced(config.most_referenced)
                .into_iter()
                .map(|(n, count)| RankedElement {
                    element: n.id.clone(),
                    kind: n.kind.label().to_string(),
                    name: n.name.clone(),
                    reference_count: count,
                })
                .collect(),
            circular_dependencies: cycles,
        }
    }

    pub fn to_json(&self) -> Result<String, crate::base::AnalysisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
