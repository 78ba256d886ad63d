//! A small XPath subset over [`TreeDocument`]s.
//!
//! Supported:
//! - absolute (`/A/B`), descendant (`//B`) and relative (`B/C`, `.//C`, `..`) paths
//! - name tests on local names, `*` wildcard
//! - unions with `|`
//! - predicates: `[n]`, `[@ATTR]`, `[@ATTR='v']`, `[CHILD='v']`, `[text()='v']`,
//!   `[local-name()='v']`, `!=`, `and`, `or`, and parentheses
//!
//! Results are element ids in document order without duplicates.

mod eval;
mod lexer;
mod parser;

use std::fmt;
use thiserror::Error;

use super::{NodeId, TreeDocument};
use lexer::Token;
use parser::LocationPath;

/// Errors raised while parsing a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("empty query")]
    Empty,

    #[error("invalid character at offset {offset}")]
    InvalidCharacter { offset: usize },

    #[error("unexpected '{found}' at offset {offset}, expected {expected}")]
    Unexpected {
        found: String,
        expected: &'static str,
        offset: usize,
    },

    #[error("unexpected end of query, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unknown function '{name}' at offset {offset}")]
    UnknownFunction { name: String, offset: usize },
}

impl QueryError {
    fn unexpected(token: &Token<'_>, expected: &'static str) -> Self {
        Self::Unexpected {
            found: token.text.to_string(),
            expected,
            offset: token.offset,
        }
    }
}

/// A parsed query, reusable across documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    source: String,
    paths: Vec<LocationPath>,
}

impl Query {
    pub fn parse(source: &str) -> Result<Self, QueryError> {
        let paths = parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            paths,
        })
    }

    /// Evaluate against `doc`; `None` uses the document node as context.
    pub fn evaluate(&self, doc: &TreeDocument, context: Option<NodeId>) -> Vec<NodeId> {
        let mut results: Vec<NodeId> = self
            .paths
            .iter()
            .flat_map(|path| eval::evaluate_path(doc, path, context))
            .flatten()
            .collect();
        results.sort_unstable();
        results.dedup();
        results
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
