//! # arxml-lens
//!
//! Schema-agnostic structural analysis for AUTOSAR ARXML documents:
//! document profiling, pattern finding and cross-reference graphs.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! xref      → Cross-reference analyzer (dependency graph, cycles, DOT/JSON)
//!   ↓
//! patterns  → Pattern finder (registry, structural/reference/statistical patterns)
//!   ↓
//! profile   → Document profiler and document-type detector
//!   ↓
//! tree      → Tree documents, path queries, XML reader
//!   ↓
//! base      → Config, errors, AUTOSAR keyword tables
//! ```
//!
//! The three analysis components do not call each other; a caller builds a
//! [`TreeDocument`] and hands it to whichever it needs.
//!
//! ```
//! use arxml_lens::{DocumentProfiler, TreeBuilder};
//!
//! let mut b = TreeBuilder::new();
//! b.start("AUTOSAR");
//! b.leaf("ECUC-MODULE-CONFIGURATION-VALUES", None);
//! b.end();
//! let doc = b.finish().unwrap();
//!
//! let profile = DocumentProfiler::new().profile(&doc).unwrap();
//! assert_eq!(profile.document_type, "ECUC");
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → profile → patterns → xref)
// ============================================================================

/// Foundation types: config, errors, domain constants
pub mod base;

/// Tree documents: arena nodes, path queries, XML reading
pub mod tree;

/// Document profiler and document-type detector
pub mod profile;

/// Pattern finder and match summaries
pub mod patterns;

/// Cross-reference analyzer and dependency graph
pub mod xref;

// Re-export the entry points
pub use base::{AnalysisConfig, AnalysisError};
pub use patterns::{PatternDefinition, PatternFinder, PatternKind, PatternMatch, Severity};
pub use profile::{DocumentProfile, DocumentProfiler, TypeDetector};
pub use tree::{NodeId, Query, QueryError, TreeBuilder, TreeDocument, TreeError};
pub use xref::{CrossReferenceAnalyzer, DependencyGraph, GraphReport};
