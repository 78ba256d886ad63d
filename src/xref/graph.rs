//! The dependency graph: nodes keyed by `KIND:name`, references as edges.
//!
//! ```text
//! DependencyGraph
//! ├── nodes: IndexMap<String, DependencyNode>   (insertion order)
//! │   └── incoming / outgoing: Vec<usize>       (indices into edges)
//! ├── edges: Vec<Reference>
//! └── statistics: GraphStatistics               (see calculate_statistics)
//! ```
//!
//! Edges may point at ids that have no node (broken references). The
//! per-node edge index lists are maintained by [`DependencyGraph::add_node`]
//! and [`DependencyGraph::add_edge`] only, so they always agree with the
//! edge list.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{EntityKind, ReferenceKind};

// ============================================================================
// NODES AND EDGES
// ============================================================================

/// A referenceable entity.
#[derive(Clone, Debug, PartialEq)]
pub struct DependencyNode {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    pub file: Option<PathBuf>,
    pub attributes: IndexMap<String, String>,
    incoming: Vec<usize>,
    outgoing: Vec<usize>,
}

impl DependencyNode {
    /// Node `KIND:name`.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: node_id(&kind, &name),
            kind,
            name,
            file: None,
            attributes: IndexMap::new(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Indices of the edges pointing at this node.
    pub fn incoming(&self) -> &[usize] {
        &self.incoming
    }

    /// Indices of the edges leaving this node.
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }
}

/// Composite node key `KIND:name`.
pub fn node_id(kind: &EntityKind, name: &str) -> String {
    format!("{}:{}", kind.label(), name)
}

/// A reference from one entity to another.
#[derive(Clone, Debug, PartialEq)]
pub struct Reference {
    pub source: String,
    pub source_kind: EntityKind,
    pub target: String,
    pub target_kind: EntityKind,
    pub kind: ReferenceKind,
    pub file: Option<PathBuf>,
    /// Always holds `ref_path`, the raw reference string.
    pub metadata: IndexMap<String, String>,
}

impl Reference {
    pub fn new(
        source: (EntityKind, &str),
        target: (EntityKind, &str),
        kind: ReferenceKind,
        ref_path: impl Into<String>,
    ) -> Self {
        let mut metadata = IndexMap::new();
        metadata.insert("ref_path".to_string(), ref_path.into());
        Self {
            source: node_id(&source.0, source.1),
            source_kind: source.0,
            target: node_id(&target.0, target.1),
            target_kind: target.0,
            kind,
            file: None,
            metadata,
        }
    }

    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    /// The raw reference string.
    pub fn ref_path(&self) -> Option<&str> {
        self.metadata.get("ref_path").map(String::as_str)
    }
}

/// Derived graph statistics, filled by [`DependencyGraph::calculate_statistics`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub node_types: IndexMap<String, usize>,
    pub reference_types: IndexMap<String, usize>,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub isolated_nodes: usize,
    pub circular_dependencies: usize,
}

// ============================================================================
// GRAPH
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    nodes: IndexMap<String, DependencyNode>,
    edges: Vec<Reference>,
    statistics: GraphStatistics,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; a node with the same id is replaced.
    ///
    /// The replacement inherits the edge index lists of the node it replaces.
    /// A new id picks up edges added before it existed.
    pub fn add_node(&mut self, mut node: DependencyNode) {
        match self.nodes.get_mut(&node.id) {
            Some(existing) => {
                tracing::trace!("[XREF] Replacing node {}", node.id);
                node.incoming = std::mem::take(&mut existing.incoming);
                node.outgoing = std::mem::take(&mut existing.outgoing);
                *existing = node;
            }
            None => {
                node.incoming.clear();
                node.outgoing.clear();
                for (index, edge) in self.edges.iter().enumerate() {
                    if edge.source == node.id {
                        node.outgoing.push(index);
                    }
                    if edge.target == node.id {
                        node.incoming.push(index);
                    }
                }
                self.nodes.insert(node.id.clone(), node);
            }
        }
    }

    /// Append an edge and index it on whichever endpoints exist.
    pub fn add_edge(&mut self, edge: Reference) {
        let index = self.edges.len();
        if let Some(source) = self.nodes.get_mut(&edge.source) {
            source.outgoing.push(index);
        }
        if let Some(target) = self.nodes.get_mut(&edge.target) {
            target.incoming.push(index);
        }
        self.edges.push(edge);
    }

    pub fn node(&self, id: &str) -> Option<&DependencyNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &DependencyNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Reference] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Statistics from the last [`calculate_statistics`](Self::calculate_statistics) call.
    pub fn statistics(&self) -> &GraphStatistics {
        &self.statistics
    }

    pub(crate) fn set_statistics(&mut self, statistics: GraphStatistics) {
        self.statistics = statistics;
    }

    pub fn incoming_refs(&self, id: &str) -> impl Iterator<Item = &Reference> {
        self.edge_refs(id, DependencyNode::incoming)
    }

    pub fn outgoing_refs(&self, id: &str) -> impl Iterator<Item = &Reference> {
        self.edge_refs(id, DependencyNode::outgoing)
    }

    fn edge_refs(
        &self,
        id: &str,
        side: fn(&DependencyNode) -> &[usize],
    ) -> impl Iterator<Item = &Reference> {
        self.nodes
            .get(id)
            .map(side)
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| self.edges.get(i))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Targets of the node's outgoing edges and sources of its incoming edges.
    ///
    /// Both sets are empty for an unknown id.
    pub fn dependencies_and_dependents(&self, id: &str) -> (IndexSet<&str>, IndexSet<&str>) {
        let dependencies = self.outgoing_refs(id).map(|r| r.target.as_str()).collect();
        let dependents = self.incoming_refs(id).map(|r| r.source.as_str()).collect();
        (dependencies, dependents)
    }

    /// Cycles found by depth-first search, each closed (`[X, Y, Z, X]`).
    ///
    /// The search restarts from every node not yet visited, but the visited
    /// set is shared across restarts: a cycle reachable only through a node
    /// already explored from an earlier start is not reported.
    pub fn find_circular_dependencies(&self) -> Vec<Vec<String>> {
        struct Frame<'g> {
            id: &'g str,
            next: usize,
        }

        let mut cycles = Vec::new();
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut on_path: FxHashMap<&str, usize> = FxHashMap::default();
        let mut path: Vec<&str> = Vec::new();
        let mut frames: Vec<Frame<'_>> = Vec::new();

        for start in self.nodes.keys() {
            if visited.contains(start.as_str()) {
                continue;
            }
            visited.insert(start);
            on_path.insert(start, 0);
            path.push(start);
            frames.push(Frame { id: start, next: 0 });

            while let Some(frame) = frames.last_mut() {
                let outgoing = self.nodes.get(frame.id).map_or(&[][..], |n| &n.outgoing[..]);
                let Some(&edge) = outgoing.get(frame.next) else {
                    on_path.remove(frame.id);
                    path.pop();
                    frames.pop();
                    continue;
                };
                frame.next += 1;

                let target = self.edges[edge].target.as_str();
                if let Some(&position) = on_path.get(target) {
                    let mut cycle: Vec<String> = path[position..].iter().map(|s| s.to_string()).collect();
                    cycle.push(target.to_string());
                    cycles.push(cycle);
                    continue;
                }
                if !visited.insert(target) {
                    continue;
                }
                on_path.insert(target, path.len());
                path.push(target);
                frames.push(Frame { id: target, next: 0 });
            }
        }

        tracing::debug!("[XREF] {} circular dependencies", cycles.len());
        cycles
    }

    /// Edges whose target id has no node.
    pub fn find_broken_references(&self) -> Vec<&Reference> {
        self.edges
            .iter()
            .filter(|e| !self.nodes.contains_key(&e.target))
            .collect()
    }

    /// Nodes without incoming edges, top-level kinds excluded.
    pub fn find_unused_elements(&self) -> Vec<&DependencyNode> {
        self.nodes
            .values()
            .filter(|n| n.incoming.is_empty() && !n.kind.is_top_level())
            .collect()
    }

    /// Up to `top_n` nodes by descending in-degree; ties keep insertion order.
    pub fn find_most_referenced(&self, top_n: usize) -> Vec<(&DependencyNode, usize)> {
        let mut ranked: Vec<(&DependencyNode, usize)> =
            self.nodes.values().map(|n| (n, n.in_degree())).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);
        ranked
    }

    /// Recompute and store the statistics.
    pub fn calculate_statistics(&mut self) -> &GraphStatistics {
        let mut stats = GraphStatistics {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            circular_dependencies: self.find_circular_dependencies().len(),
            ..GraphStatistics::default()
        };
        for node in self.nodes.values() {
            *stats.node_types.entry(node.kind.label().to_string()).or_insert(0) += 1;
            stats.max_in_degree = stats.max_in_degree.max(node.in_degree());
            stats.max_out_degree = stats.max_out_degree.max(node.out_degree());
            if node.in_degree() == 0 && node.out_degree() == 0 {
                stats.isolated_nodes += 1;
            }
        }
        for edge in &self.edges {
            *stats.reference_types.entry(edge.kind.label().to_string()).or_insert(0) += 1;
        }
        self.statistics = stats;
        &self.statistics
    }
}
