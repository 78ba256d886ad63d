//! Graph description (DOT) and structured dump of a dependency graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;

use super::{DependencyGraph, DependencyNode, EntityKind, GraphStatistics, Reference, ReferenceKind};
use crate::base::AnalysisError;

/// Structured dump: nodes, edges and the last computed statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDump {
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    #[serde(default)]
    pub statistics: GraphStatistics,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDump {
    pub source: String,
    pub target: String,
    pub kind: ReferenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
}

impl DependencyGraph {
    /// Graphviz description: one statement per node, one labelled statement per edge.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph DependencyGraph {\n  rankdir=LR;\n  node [shape=box];\n");
        for node in self.nodes() {
            let _ = writeln!(
                out,
                "  \"{}\" [label=\"{}\\n[{}]\", fillcolor={}, style=filled];",
                escape(&node.id),
                escape(&node.name),
                node.kind,
                node.kind.fill_colour()
            );
        }
        for edge in self.edges() {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                escape(&edge.source),
                escape(&edge.target),
                edge.kind.label().replace('_', " ")
            );
        }
        out.push('}');
        out
    }

    pub fn to_dump(&self) -> GraphDump {
        GraphDump {
            nodes: self
                .nodes()
                .map(|n| NodeDump {
                    id: n.id.clone(),
                    kind: n.kind.clone(),
                    name: n.name.clone(),
                    file: n.file.clone(),
                    attributes: n.attributes.clone(),
                })
                .collect(),
            edges: self
                .edges()
                .iter()
                .map(|e| EdgeDump {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    kind: e.kind,
                    file: e.file.clone(),
                    metadata: e.metadata.clone(),
                })
                .collect(),
            statistics: self.statistics().clone(),
        }
    }

    /// Pretty-printed JSON of [`to_dump`](Self::to_dump).
    pub fn to_json(&self) -> Result<String, AnalysisError> {
        Ok(serde_json::to_string_pretty(&self.to_dump())?)
    }

    /// Rebuild a graph from a dump.
    ///
    /// Edge endpoint kinds are read back from the `KIND:` prefix of their ids.
    pub fn from_dump(dump: GraphDump) -> Self {
        let mut graph = DependencyGraph::new();
        for n in dump.nodes {
            let mut node = DependencyNode::new(n.kind, n.name).with_file(n.file);
            node.id = n.id;
            node.attributes = n.attributes;
            graph.add_node(node);
        }
        for e in dump.edges {
            let edge = Reference {
                source_kind: kind_of(&e.source),
                target_kind: kind_of(&e.target),
                source: e.source,
                target: e.target,
                kind: e.kind,
                file: e.file,
                metadata: e.metadata,
            };
            graph.add_edge(edge);
        }
        graph.set_statistics(dump.statistics);
        graph
    }

    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let dump: GraphDump = serde_json::from_str(json)?;
        Ok(Self::from_dump(dump))
    }
}

fn kind_of(id: &str) -> EntityKind {
    EntityKind::from_label(id.split_once(':').map_or(id, |(kind, _)| kind))
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
