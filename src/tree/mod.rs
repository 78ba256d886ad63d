//! In-memory tree documents.
//!
//! A [`TreeDocument`] stores its nodes in an arena indexed by [`NodeId`].
//! Ids are handed out in document (pre-)order by [`TreeBuilder`], so
//! sorting ids sorts nodes into document order.
//!
//! ```text
//! TreeDocument
//! ├── nodes: Vec<Node>         (NodeId = index, pre-order)
//! │   ├── tag / attributes / namespaces / text
//! │   └── parent: Option<NodeId>, children: Vec<NodeId>
//! └── file: Option<PathBuf>    (provenance for graph nodes and edges)
//! ```
//!
//! Nodes are queried with a small XPath subset, see [`query`].

mod builder;
mod error;
pub mod query;
#[cfg(feature = "xml")]
mod xml;

pub use builder::TreeBuilder;
pub use error::TreeError;
pub use query::{Query, QueryError};

use indexmap::IndexMap;
use smol_str::SmolStr;
use std::fmt;
use std::ops::Index;
use std::path::{Path, PathBuf};

// ============================================================================
// IDS
// ============================================================================

/// Handle of a node inside one [`TreeDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the node in the arena (and in document order).
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// NODE
// ============================================================================

/// One element of a tree document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) tag: SmolStr,
    pub(crate) attributes: IndexMap<SmolStr, String>,
    pub(crate) namespaces: IndexMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Tag as written in the source, possibly `prefix:local`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Tag without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.tag)
    }

    /// Attributes in source order (namespace declarations excluded).
    pub fn attributes(&self) -> &IndexMap<SmolStr, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Namespace declarations made on this node; the default namespace uses the key `""`.
    pub fn namespaces(&self) -> &IndexMap<String, String> {
        &self.namespaces
    }

    /// Direct text: the trimmed text before the first child element.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Strip a namespace from a tag, handling both `prefix:local` and `{uri}local`.
pub fn local_name(tag: &str) -> &str {
    if let Some((_, local)) = tag.rsplit_once('}') {
        return local;
    }
    match tag.rsplit_once(':') {
        Some((_, local)) => local,
        None => tag,
    }
}

/// Namespace prefix of a `prefix:local` tag.
pub fn prefix(tag: &str) -> Option<&str> {
    if tag.starts_with('{') {
        return None;
    }
    tag.split_once(':').map(|(p, _)| p)
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// A parsed, queryable tree.
///
/// A default-constructed document has no root; every analysis component
/// rejects it with [`AnalysisError::EmptyDocument`](crate::AnalysisError).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeDocument {
    pub(crate) nodes: Vec<Node>,
    pub(crate) file: Option<PathBuf>,
}

impl TreeDocument {
    /// The root element, if any.
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// File the document was read from.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// All node ids in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Pre-order walk of the subtree rooted at `id`, `id` included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        Descendants { doc: self, stack }
    }

    /// Ancestors of `id`, nearest first, `id` excluded.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).and_then(Node::parent), move |&p| {
            self.node(p).and_then(Node::parent)
        })
    }

    /// Number of edges between the root and `id`.
    pub fn depth_of(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// First child whose local name is `name`.
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id)?
            .children
            .iter()
            .copied()
            .find(|&c| self[c].local_name() == name)
    }

    /// Non-empty direct text of the first child named `name`.
    pub fn child_text(&self, id: NodeId, name: &str) -> Option<&str> {
        let child = self.child_by_name(id, name)?;
        self[child].text().filter(|t| !t.is_empty())
    }

    /// Stable location string such as `/AUTOSAR/AR-PACKAGES/AR-PACKAGE[2]`.
    ///
    /// A 1-based index is appended only when the parent has several
    /// children with the same tag.
    pub fn path_of(&self, id: NodeId) -> String {
        if !self.contains(id) {
            return String::new();
        }
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self[node_id];
            let segment = match node.parent {
                Some(parent) => {
                    let siblings: Vec<NodeId> = self[parent]
                        .children
                        .iter()
                        .copied()
                        .filter(|&c| self[c].tag == node.tag)
                        .collect();
                    if siblings.len() > 1 {
                        let position = siblings.iter().position(|&c| c == node_id).unwrap_or(0);
                        format!("{}[{}]", node.tag, position + 1)
                    } else {
                        node.tag.to_string()
                    }
                }
                None => node.tag.to_string(),
            };
            segments.push(segment);
            current = node.parent;
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Evaluate a query with the document itself as context.
    pub fn query(&self, expr: &str) -> Result<Vec<NodeId>, QueryError> {
        Ok(Query::parse(expr)?.evaluate(self, None))
    }

    /// Evaluate a query relative to `context`.
    pub fn query_from(&self, context: NodeId, expr: &str) -> Result<Vec<NodeId>, QueryError> {
        Ok(Query::parse(expr)?.evaluate(self, Some(context)))
    }
}

impl Index<NodeId> for TreeDocument {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Iterator returned by [`TreeDocument::descendants`].
pub struct Descendants<'d> {
    doc: &'d TreeDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.doc[id].children.iter().rev().copied());
        Some(id)
    }
}
