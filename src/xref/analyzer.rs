//! Extraction of entities and references from tree documents.

use crate::base::constants::{CATEGORY, DEST, SHORT_NAME, UUID};
use crate::base::{AnalysisError, XrefConfig};
use crate::tree::{NodeId, TreeDocument};

use super::kinds::entity_families;
use super::{
    DependencyGraph, DependencyNode, EntityKind, GraphReport, Reference, ReferenceKind,
    entity_kind_for_tag,
};

/// Declared target kind when a reference has no `DEST` attribute.
const UNKNOWN_TARGET: &str = "UNKNOWN";

/// Builds a [`DependencyGraph`] from one or several documents.
///
/// The graph accumulates across calls; use a fresh analyzer per analysis
/// unless accumulation is wanted.
#[derive(Clone, Debug, Default)]
pub struct CrossReferenceAnalyzer {
    graph: DependencyGraph,
    config: XrefConfig,
}

impl CrossReferenceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: XrefConfig) -> Self {
        Self {
            graph: DependencyGraph::new(),
            config,
        }
    }

    pub fn config(&self) -> &XrefConfig {
        &self.config
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DependencyGraph {
        self.graph
    }

    /// Extract elements, then references, then compute statistics.
    pub fn analyze_document(&mut self, doc: &TreeDocument) -> Result<&DependencyGraph, AnalysisError> {
        self.analyze_documents(std::slice::from_ref(doc))
    }

    /// Like [`analyze_document`](Self::analyze_document) over several
    /// documents: every document's elements are extracted before any
    /// reference, so edges across documents resolve.
    ///
    /// Fails without touching the graph if any document has no root.
    pub fn analyze_documents(&mut self, docs: &[TreeDocument]) -> Result<&DependencyGraph, AnalysisError> {
        if docs.iter().any(|d| d.root().is_none()) {
            return Err(AnalysisError::EmptyDocument);
        }
        tracing::debug!("[XREF] Analyzing {} document(s)", docs.len());
        for doc in docs {
            self.extract_elements(doc)?;
        }
        for doc in docs {
            self.extract_references(doc)?;
        }
        self.graph.calculate_statistics();
        tracing::debug!(
            "[XREF] Graph has {} nodes and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        Ok(&self.graph)
    }

    /// Add a node for every named entity of a known family.
    ///
    /// Tags are visited in family order, then in tag-list order, each in
    /// document order.
    ///
    /// Entities without a `SHORT-NAME` are skipped; a later node with the same
    /// id replaces an earlier one.
    pub fn extract_elements(&mut self, doc: &TreeDocument) -> Result<usize, AnalysisError> {
        doc.root().ok_or(AnalysisError::EmptyDocument)?;
        let mut added = 0;
        for (kind, tags) in entity_families() {
            for id in tags
                .iter()
                .flat_map(|&tag| doc.node_ids().filter(move |&id| doc[id].local_name() == tag))
            {
                match entity_node(doc, id, kind.clone()) {
                    Some(node) => {
                        tracing::trace!("[XREF] Element {}", node.id);
                        self.graph.add_node(node);
                        added += 1;
                    }
                    None => tracing::trace!("[XREF] Skipping unnamed {} at {}", kind, doc.path_of(id)),
                }
            }
        }
        tracing::debug!("[XREF] Extracted {} elements", added);
        Ok(added)
    }

    /// Add an edge for every reference element with text and a named ancestor.
    pub fn extract_references(&mut self, doc: &TreeDocument) -> Result<usize, AnalysisError> {
        doc.root().ok_or(AnalysisError::EmptyDocument)?;
        let mut added = 0;
        for kind in ReferenceKind::ALL {
            let tags = kind.tags();
            for id in doc.node_ids().filter(|&id| tags.contains(&doc[id].local_name())) {
                match self.reference(doc, id, kind) {
                    Some(edge) => {
                        tracing::trace!("[XREF] {} -> {} ({})", edge.source, edge.target, kind);
                        self.graph.add_edge(edge);
                        added += 1;
                    }
                    None => tracing::trace!("[XREF] Skipping reference at {}", doc.path_of(id)),
                }
            }
        }
        tracing::debug!("[XREF] Extracted {} references", added);
        Ok(added)
    }

    /// Report over the current graph, limited by the config.
    pub fn report(&self) -> GraphReport {
        GraphReport::build(&self.graph, &self.config)
    }

    fn reference(&self, doc: &TreeDocument, id: NodeId, kind: ReferenceKind) -> Option<Reference> {
        let raw = doc[id].text().filter(|t| !t.is_empty())?;
        let (source, source_name) = std::iter::once(id)
            .chain(doc.ancestors(id))
            .find_map(|n| doc.child_text(n, SHORT_NAME).map(|name| (n, name)))?;

        let declared = doc[id].attribute(DEST).unwrap_or(UNKNOWN_TARGET);
        let target_kind = if self.config.normalize_target_kinds {
            entity_kind_for_tag(declared)
        } else {
            EntityKind::from_label(declared)
        };
        let target_name = raw.rsplit('/').next().unwrap_or(raw);

        Some(
            Reference::new(
                (entity_kind_for_tag(doc[source].tag()), source_name),
                (target_kind, target_name),
                kind,
                raw,
            )
            .with_file(doc.file().map(Into::into)),
        )
    }
}

/// Node for the entity at `id`, or `None` when it has no name.
fn entity_node(doc: &TreeDocument, id: NodeId, kind: EntityKind) -> Option<DependencyNode> {
    let name = doc.child_text(id, SHORT_NAME)?;
    let mut node = DependencyNode::new(kind, name).with_file(doc.file().map(Into::into));
    let uuid = doc[id]
        .attribute(UUID)
        .filter(|v| !v.is_empty())
        .or_else(|| descendant_text(doc, id, UUID));
    if let Some(uuid) = uuid {
        node = node.with_attribute("uuid", uuid);
    }
    if let Some(category) = descendant_text(doc, id, CATEGORY) {
        node = node.with_attribute("category", category);
    }
    Some(node)
}

/// Non-empty text of the first descendant named `name`.
fn descendant_text<'d>(doc: &'d TreeDocument, id: NodeId, name: &str) -> Option<&'d str> {
    doc.descendants(id)
        .skip(1)
        .find(|&d| doc[d].local_name() == name)
        .and_then(|d| doc[d].text())
        .filter(|t| !t.is_empty())
}
