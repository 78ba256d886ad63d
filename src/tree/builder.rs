//! Incremental construction of tree documents.

use smol_str::SmolStr;
use std::path::PathBuf;

use super::{Node, NodeId, TreeDocument, TreeError};

/// Builds a [`TreeDocument`] from start/end events.
///
/// Ids are allocated when an element starts, which keeps them in document
/// order. Attributes and text apply to the innermost open element.
///
/// ```
/// use arxml_lens::tree::TreeBuilder;
///
/// let mut b = TreeBuilder::new();
/// b.start("AUTOSAR");
/// b.attribute("xmlns", "http://autosar.org/schema/r4.0");
/// b.leaf("SHORT-NAME", Some("Pkg"));
/// b.end();
/// let doc = b.finish().unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    open: Vec<NodeId>,
    file: Option<PathBuf>,
    extra_root: Option<String>,
    unbalanced: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the originating file.
    pub fn file(&mut self, file: impl Into<PathBuf>) -> &mut Self {
        self.file = Some(file.into());
        self
    }

    /// Open a new element as a child of the innermost open element.
    pub fn start(&mut self, tag: &str) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let parent = self.open.last().copied();
        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None if !self.nodes.is_empty() => {
                if self.extra_root.is_none() {
                    self.extra_root = Some(tag.to_string());
                }
            }
            None => {}
        }
        self.nodes.push(Node {
            tag: SmolStr::new(tag),
            parent,
            ..Node::default()
        });
        self.open.push(id);
        id
    }

    /// Add an attribute to the innermost open element.
    ///
    /// `xmlns` and `xmlns:prefix` are recorded as namespace declarations.
    pub fn attribute(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let Some(&current) = self.open.last() else {
            return self;
        };
        let node = &mut self.nodes[current.index()];
        if key == "xmlns" {
            node.namespaces.insert(String::new(), value.into());
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            node.namespaces.insert(prefix.to_string(), value.into());
        } else {
            node.attributes.insert(SmolStr::new(key), value.into());
        }
        self
    }

    /// Append text to the innermost open element.
    ///
    /// Only text arriving before the element's first child is kept.
    pub fn text(&mut self, text: &str) -> &mut Self {
        let Some(&current) = self.open.last() else {
            return self;
        };
        let node = &mut self.nodes[current.index()];
        if !node.children.is_empty() {
            return self;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self;
        }
        match node.text.as_mut() {
            Some(existing) => existing.push_str(trimmed),
            None => node.text = Some(trimmed.to_string()),
        }
        self
    }

    /// Close the innermost open element.
    pub fn end(&mut self) -> Option<NodeId> {
        let closed = self.open.pop();
        if closed.is_none() {
            self.unbalanced = true;
        }
        closed
    }

    /// Open and immediately close an element with optional text.
    pub fn leaf(&mut self, tag: &str, text: Option<&str>) -> NodeId {
        let id = self.start(tag);
        if let Some(t) = text {
            self.text(t);
        }
        self.end();
        id
    }

    /// Number of elements started so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finish the document.
    pub fn finish(self) -> Result<TreeDocument, TreeError> {
        if self.unbalanced {
            return Err(TreeError::UnbalancedEnd);
        }
        if let Some(&open) = self.open.last() {
            return Err(TreeError::Unclosed(self.nodes[open.index()].tag.to_string()));
        }
        if let Some(tag) = self.extra_root {
            return Err(TreeError::MultipleRoots(tag));
        }
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        Ok(TreeDocument {
            nodes: self.nodes,
            file: self.file,
        })
    }
}
