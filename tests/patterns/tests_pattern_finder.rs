//! Built-in and registered pattern classes over whole documents.

use rstest::rstest;

use arxml_lens::base::PatternConfig;
use arxml_lens::patterns::{MatchValue, group_by_kind, summarize};
use arxml_lens::{AnalysisError, PatternDefinition, PatternFinder, PatternKind, Severity, TreeBuilder, TreeDocument};

use crate::helpers::fixtures::{SYSTEM_ARXML, chain, parse, repeated_items};

fn named<'a>(
    matches: &'a [arxml_lens::PatternMatch],
    name: &str,
) -> Vec<&'a arxml_lens::PatternMatch> {
    matches.iter().filter(|m| m.pattern_name == name).collect()
}

#[test]
fn test_repeated_structure_is_reported_once() {
    let matches = PatternFinder::new()
        .find_structural_patterns(&repeated_items(3))
        .unwrap();
    let duplicates = named(&matches, "duplicate_structure");
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].value, MatchValue::Count(3));
    assert_eq!(duplicates[0].location, "/ROOT/ITEM[1]");
    assert_eq!(duplicates[0].context.as_deref(), Some("ITEM|children:X,Y"));
    assert_eq!(duplicates[0].confidence, 0.8);
    assert_eq!(
        duplicates[0].metadata["paths"],
        serde_json::json!(["/ROOT/ITEM[1]", "/ROOT/ITEM[2]", "/ROOT/ITEM[3]"])
    );
}

#[rstest]
#[case(1)]
#[case(2)]
fn test_too_few_repeats_are_not_duplicates(#[case] n: usize) {
    let matches = PatternFinder::new()
        .find_structural_patterns(&repeated_items(n))
        .unwrap();
    assert!(named(&matches, "duplicate_structure").is_empty());
}

#[rstest]
#[case(10, None)]
#[case(11, Some("info"))]
#[case(15, Some("info"))]
#[case(16, Some("warning"))]
fn test_deep_nesting_severity(#[case] depth: usize, #[case] severity: Option<&str>) {
    let matches = PatternFinder::new().find_structural_patterns(&chain(depth)).unwrap();
    let deep = named(&matches, "deep_nesting");
    assert_eq!(deep.first().map(|m| m.severity()), severity);
    if let Some(m) = deep.first() {
        assert_eq!(m.value, MatchValue::Count(depth as u64));
    }
}

#[test]
fn test_fanout_threshold_is_configurable() {
    let mut b = TreeBuilder::new();
    b.start("ELEMENTS");
    for i in 0..8 {
        b.leaf(&format!("E{i}"), None);
    }
    b.end();
    let doc = b.finish().unwrap();

    assert!(PatternFinder::new().find_structural_patterns(&doc).unwrap().is_empty());

    let finder = PatternFinder::with_config(PatternConfig {
        fanout_threshold: 8,
        fanout_warning: 7,
        ..PatternConfig::default()
    });
    let matches = finder.find_structural_patterns(&doc).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].location, "/ELEMENTS");
    assert_eq!(matches[0].severity(), "warning");
}

#[test]
fn test_reference_patterns_on_arxml() {
    let matches = PatternFinder::new()
        .find_reference_patterns(&parse(SYSTEM_ARXML))
        .unwrap();

    // DEST holds a type name, never an identifier
    let broken = named(&matches, "broken_reference");
    assert_eq!(broken.len(), 2);
    assert_eq!(broken[0].value, MatchValue::Text("SENDER-RECEIVER-INTERFACE".into()));
    assert!(broken[0].location.ends_with("/P-PORT-PROTOTYPE/PROVIDED-INTERFACE-TREF"));

    let unused: Vec<_> = named(&matches, "unused_id")
        .iter()
        .map(|m| m.value.clone())
        .collect();
    assert_eq!(
        unused,
        ["pkg-1", "swc-1", "port-1", "port-2", "pkg-2", "if-1"].map(|s| MatchValue::Text(s.into()))
    );
}

#[test]
fn test_regex_over_raw_text() {
    let mut finder = PatternFinder::new();
    finder.register(
        PatternDefinition::regex("dest", r#"DEST="([A-Z-]+)""#).with_severity(Severity::Warning),
    );
    let matches = finder.find_regex_patterns(SYSTEM_ARXML, None);
    assert_eq!(matches.len(), 2);
    assert!(matches[0].location.starts_with("line:13:"));
    assert!(matches[1].location.starts_with("line:17:"));
    assert_eq!(matches[1].metadata["groups"], serde_json::json!(["CLIENT-SERVER-INTERFACE"]));
    assert_eq!(matches[1].severity(), "warning");
}

#[test]
fn test_find_all_and_summary() {
    let mut finder = PatternFinder::new();
    finder.register_many([
        PatternDefinition::query("ports", "//P-PORT-PROTOTYPE | //R-PORT-PROTOTYPE")
            .with_category("ports"),
        PatternDefinition::query("broken", "//PORTS["),
        PatternDefinition::regex("short-names", "<SHORT-NAME>"),
    ]);
    let doc = parse(SYSTEM_ARXML);

    let without_text = finder.find_all(&doc, None).unwrap();
    let with_text = finder.find_all(&doc, Some(SYSTEM_ARXML)).unwrap();
    assert_eq!(with_text.len(), without_text.len() + 6);

    let summary = summarize(&with_text);
    assert_eq!(summary.total_matches, with_text.len());
    assert_eq!(summary.by_pattern["ports"], 2);
    assert_eq!(summary.by_pattern["short-names"], 6);
    assert_eq!(summary.by_pattern["broken_reference"], 2);
    assert_eq!(summary.by_pattern["unused_id"], 6);
    assert!(!summary.by_pattern.contains_key("broken"));
    assert_eq!(summary.by_severity["error"], 2);

    let by_kind = group_by_kind(&with_text);
    assert_eq!(by_kind.keys().next(), Some(&PatternKind::Query));
    assert_eq!(by_kind[&PatternKind::Regex].len(), 6);
    assert_eq!(by_kind[&PatternKind::Query][0].category(), Some("ports"));
}

#[test]
fn test_empty_document_is_rejected() {
    let doc = TreeDocument::default();
    let finder = PatternFinder::new();
    assert!(matches!(finder.find_all(&doc, Some("<A/>")), Err(AnalysisError::EmptyDocument)));
    assert!(matches!(
        finder.find_reference_patterns(&doc),
        Err(AnalysisError::EmptyDocument)
    ));
}
