//! Dependency graphs built from ARXML documents and by hand.

use std::io::Write;

use rstest::rstest;

use arxml_lens::base::XrefConfig;
use arxml_lens::xref::{DependencyNode, EntityKind, Reference, ReferenceKind};
use arxml_lens::{AnalysisError, CrossReferenceAnalyzer, DependencyGraph, TreeDocument};

use crate::helpers::fixtures::{COMPONENTS_ARXML, INTERFACES_ARXML, SYSTEM_ARXML, parse};

fn normalizing() -> CrossReferenceAnalyzer {
    CrossReferenceAnalyzer::with_config(XrefConfig {
        normalize_target_kinds: true,
        ..XrefConfig::default()
    })
}

fn ids<'a>(nodes: impl IntoIterator<Item = &'a DependencyNode>) -> Vec<&'a str> {
    nodes.into_iter().map(|n| n.id.as_str()).collect()
}

/// Graph over `X`, `Y`, ... with the given `(source, target)` module edges.
fn module_graph(names: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for name in names {
        graph.add_node(DependencyNode::new(EntityKind::Module, *name));
    }
    for &(source, target) in edges {
        graph.add_edge(Reference::new(
            (EntityKind::Module, source),
            (EntityKind::Module, target),
            ReferenceKind::Definition,
            format!("/{target}"),
        ));
    }
    graph
}

#[test]
fn test_system_document_with_normalized_targets() {
    let mut analyzer = normalizing();
    let graph = analyzer.analyze_document(&parse(SYSTEM_ARXML)).unwrap();

    assert_eq!(
        ids(graph.nodes()),
        ["SWC:SpeedSensor", "INTERFACE:SpeedIf", "PORT:SpeedOut", "PORT:ConfigIn"]
    );
    assert_eq!(graph.edge_count(), 2);

    let edge = &graph.edges()[0];
    assert_eq!(edge.source, "PORT:SpeedOut");
    assert_eq!(edge.target, "INTERFACE:SpeedIf");
    assert_eq!(edge.kind, ReferenceKind::Interface);
    assert_eq!(edge.ref_path(), Some("/Interfaces/SpeedIf"));

    let broken: Vec<_> = graph.find_broken_references().iter().map(|r| r.target.as_str()).collect();
    assert_eq!(broken, ["INTERFACE:ConfigIf"]);
    assert_eq!(ids(graph.find_unused_elements()), ["PORT:SpeedOut", "PORT:ConfigIn"]);

    let swc = graph.node("SWC:SpeedSensor").unwrap();
    assert_eq!(swc.attributes["uuid"], "swc-1");
    assert_eq!(swc.attributes["category"], "APPLICATION");

    let stats = graph.statistics();
    assert_eq!(stats.total_nodes, 4);
    assert_eq!(stats.node_types["PORT"], 2);
    assert_eq!(stats.reference_types["INTERFACE_REF"], 2);
    assert_eq!(stats.max_in_degree, 1);
    // the SWC has neither referrers nor references of its own
    assert_eq!(stats.isolated_nodes, 1);
}

#[test]
fn test_declared_target_kinds_by_default() {
    let mut analyzer = CrossReferenceAnalyzer::new();
    let graph = analyzer.analyze_document(&parse(SYSTEM_ARXML)).unwrap();

    let targets: Vec<_> = graph.edges().iter().map(|e| e.target.as_str()).collect();
    assert_eq!(
        targets,
        ["SENDER-RECEIVER-INTERFACE:SpeedIf", "CLIENT-SERVER-INTERFACE:ConfigIf"]
    );
    assert_eq!(graph.find_broken_references().len(), 2);
    assert_eq!(
        ids(graph.find_unused_elements()),
        ["INTERFACE:SpeedIf", "PORT:SpeedOut", "PORT:ConfigIn"]
    );
}

#[test]
fn test_references_resolve_across_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut docs = Vec::new();
    for (name, xml) in [("components.arxml", COMPONENTS_ARXML), ("interfaces.arxml", INTERFACES_ARXML)] {
        let path = dir.path().join(name);
        std::fs::File::create(&path).unwrap().write_all(xml.as_bytes()).unwrap();
        docs.push(TreeDocument::from_path(&path).unwrap());
    }

    let mut analyzer = normalizing();
    let graph = analyzer.analyze_documents(&docs).unwrap();

    assert!(graph.contains("INTERFACE:SpeedIf"));
    assert_eq!(graph.find_broken_references().len(), 1);
    assert_eq!(
        graph.node("INTERFACE:SpeedIf").unwrap().file.as_deref(),
        Some(dir.path().join("interfaces.arxml").as_path())
    );
    assert_eq!(
        graph.edges()[0].file.as_deref(),
        Some(dir.path().join("components.arxml").as_path())
    );

    let (dependencies, dependents) = graph.dependencies_and_dependents("INTERFACE:SpeedIf");
    assert!(dependencies.is_empty());
    assert_eq!(dependents.into_iter().collect::<Vec<_>>(), ["PORT:SpeedOut"]);
}

#[test]
fn test_rootless_document_leaves_graph_untouched() {
    let mut analyzer = normalizing();
    let docs = [parse(SYSTEM_ARXML), TreeDocument::default()];
    assert!(matches!(
        analyzer.analyze_documents(&docs),
        Err(AnalysisError::EmptyDocument)
    ));
    assert!(analyzer.graph().is_empty());
}

#[test]
fn test_three_node_cycle() {
    let graph = module_graph(&["X", "Y", "Z"], &[("X", "Y"), ("Y", "Z"), ("Z", "X")]);
    assert_eq!(
        graph.find_circular_dependencies(),
        [["MODULE:X", "MODULE:Y", "MODULE:Z", "MODULE:X"]]
    );
}

#[test]
fn test_unreferenced_port_is_unused() {
    let mut graph = DependencyGraph::new();
    graph.add_node(DependencyNode::new(EntityKind::Swc, "C1"));
    graph.add_node(DependencyNode::new(EntityKind::Port, "P1"));
    assert_eq!(ids(graph.find_unused_elements()), ["PORT:P1"]);
}

#[rstest]
#[case::cycle(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")])]
#[case::two_cycles(&["A", "B", "C", "D"], &[("A", "B"), ("B", "A"), ("C", "D"), ("D", "C")])]
#[case::self_loop(&["A"], &[("A", "A")])]
#[case::dangling(&["A", "B"], &[("A", "B"), ("B", "GONE"), ("GONE", "A")])]
#[case::diamond(&["A", "B", "C", "D"], &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "A")])]
#[case::acyclic(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")])]
fn test_graph_properties(#[case] names: &[&str], #[case] edges: &[(&str, &str)]) {
    let mut graph = module_graph(names, edges);
    let has_edge = |s: &str, t: &str| graph.edges().iter().any(|e| e.source == s && e.target == t);

    // every reported cycle is a closed walk along existing edges
    for cycle in graph.find_circular_dependencies() {
        assert!(cycle.len() >= 2);
        assert_eq!(cycle.first(), cycle.last());
        assert!(cycle.windows(2).all(|w| has_edge(&w[0], &w[1])), "{cycle:?}");
    }

    let broken: Vec<_> = graph.find_broken_references().iter().map(|r| r.target.clone()).collect();
    let expected: Vec<_> = graph
        .edges()
        .iter()
        .filter(|e| !graph.contains(&e.target))
        .map(|e| e.target.clone())
        .collect();
    assert_eq!(broken, expected);

    let stats = graph.calculate_statistics().clone();
    let restored = DependencyGraph::from_json(&graph.to_json().unwrap()).unwrap();
    assert_eq!(restored.node_count(), graph.node_count());
    assert_eq!(restored.edge_count(), graph.edge_count());
    assert_eq!(restored.statistics(), &stats);
    assert_eq!(restored.find_circular_dependencies(), graph.find_circular_dependencies());
}

#[test]
fn test_report_and_dot() {
    let mut analyzer = CrossReferenceAnalyzer::with_config(XrefConfig {
        normalize_target_kinds: true,
        report_unused_limit: 1,
        ..XrefConfig::default()
    });
    analyzer.analyze_document(&parse(SYSTEM_ARXML)).unwrap();

    let report = analyzer.report();
    assert_eq!(report.summary.total_elements, 4);
    assert_eq!(report.summary.total_references, 2);
    assert_eq!(report.summary.broken_references, 1);
    assert_eq!(report.summary.unused_elements, 2);
    assert_eq!(report.unused_elements.len(), 1);
    assert_eq!(report.broken_references[0].kind, "INTERFACE_REF");
    assert_eq!(report.most_referenced[0].element, "INTERFACE:SpeedIf");
    assert_eq!(report.most_referenced[0].reference_count, 1);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["summary"]["circular_dependencies"], 0);

    let dot = analyzer.graph().to_dot();
    assert!(dot.starts_with("digraph DependencyGraph {"));
    assert!(dot.contains(r#""SWC:SpeedSensor" [label="SpeedSensor\n[SWC]", fillcolor=lightblue, style=filled];"#));
    assert!(dot.contains(r#""PORT:SpeedOut" -> "INTERFACE:SpeedIf" [label="INTERFACE REF"];"#));
    assert!(dot.ends_with('}'));
}
