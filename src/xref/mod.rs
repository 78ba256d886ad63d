//! Cross-reference analysis.
//!
//! [`CrossReferenceAnalyzer`] turns named AUTOSAR entities (components,
//! interfaces, ports, signals, runnables) into [`DependencyNode`]s keyed
//! `KIND:name`, and reference elements (`*-TREF`, `*-REF`) into
//! [`Reference`] edges from the nearest named ancestor to
//! `DEST-kind:last-path-segment`.
//!
//! The resulting [`DependencyGraph`] answers cycle, broken-reference,
//! unused-element and ranking queries, and exports to DOT or JSON.

mod analyzer;
mod export;
mod graph;
mod kinds;
mod report;

pub use analyzer::CrossReferenceAnalyzer;
pub use export::{EdgeDump, GraphDump, NodeDump};
pub use graph::{DependencyGraph, DependencyNode, GraphStatistics, Reference, node_id};
pub use kinds::{EntityKind, ReferenceKind, entity_kind_for_tag};
pub use report::{BrokenReference, ElementEntry, GraphReport, RankedElement, ReportSummary};
