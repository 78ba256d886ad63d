//! Document profiler behaviour on hand-built and parsed documents.

use rstest::rstest;

use arxml_lens::profile::{ElementRoles, NamingConvention};
use arxml_lens::{AnalysisError, DocumentProfiler, TreeBuilder, TreeDocument};

use crate::helpers::fixtures::{
    ECUC_ARXML, SYSTEM_ARXML, chain, count_nodes, parse, repeated_items, scenario_a, true_depth,
};

#[test]
fn test_scenario_a_frequencies() {
    let profile = DocumentProfiler::new().profile(&scenario_a()).unwrap();

    assert_eq!(profile.pattern("A").unwrap().frequency, 1);
    assert_eq!(profile.pattern("B").unwrap().frequency, 3);
    assert_eq!(profile.pattern("C").unwrap().frequency, 1);
    assert_eq!(profile.hierarchy_depth, 2);
    for tag in ["A", "B", "C"] {
        let p = profile.pattern(tag).unwrap();
        assert!(!p.is_container && !p.is_parameter && !p.is_reference, "{tag}");
    }
    assert_eq!(profile.root_element, "ROOT");
    assert_eq!(profile.document_type, "UNKNOWN");
}

#[rstest]
#[case::scenario_a(scenario_a())]
#[case::items(repeated_items(7))]
#[case::chain(chain(40))]
#[case::system(parse(SYSTEM_ARXML))]
#[case::ecuc(parse(ECUC_ARXML))]
fn test_counts_and_depth_match_reference_walk(#[case] doc: TreeDocument) {
    let profile = DocumentProfiler::new().profile(&doc).unwrap();
    assert_eq!(profile.statistics.total_elements, count_nodes(&doc));
    assert_eq!(profile.hierarchy_depth, true_depth(&doc));
    assert_eq!(
        profile.element_patterns.values().map(|p| p.frequency).sum::<usize>(),
        count_nodes(&doc)
    );
}

#[test]
fn test_root_only_document() {
    let mut b = TreeBuilder::new();
    b.leaf("AUTOSAR", None);
    let profile = DocumentProfiler::new().profile(&b.finish().unwrap()).unwrap();
    assert_eq!(profile.element_patterns.len(), 1);
    assert_eq!(profile.hierarchy_depth, 0);
}

#[test]
fn test_empty_document_is_rejected() {
    let result = DocumentProfiler::new().profile(&TreeDocument::default());
    assert!(matches!(result, Err(AnalysisError::EmptyDocument)));
}

#[test]
fn test_ecuc_profile() {
    let profile = DocumentProfiler::new().profile(&parse(ECUC_ARXML)).unwrap();

    assert_eq!(profile.document_type, "ECUC");
    assert_eq!(profile.namespace.as_deref(), Some("http://autosar.org/schema/r4.0"));
    assert_eq!(profile.root_element, "AUTOSAR");

    let containers = profile.container_elements();
    assert!(containers.contains(&"ECUC-CONTAINER-VALUE"));
    assert!(containers.contains(&"PARAMETER-VALUES"));
    assert!(profile.parameter_elements().contains(&"ECUC-NUMERICAL-PARAM-VALUE"));
    assert!(profile.reference_elements().contains(&"VALUE-REF"));
    // definition references are not generic references
    assert!(!profile.reference_elements().contains(&"DEFINITION-REF"));

    let value = profile.pattern("VALUE").unwrap();
    assert_eq!(value.text_samples, ["0"]);
    assert_eq!(
        value.parent_tags.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        ["ECUC-NUMERICAL-PARAM-VALUE"]
    );

    assert_eq!(
        profile.element_query("VALUE-REF"),
        "//*[local-name()='VALUE-REF']"
    );
    assert!(profile.suggest_patterns("module").contains(&"ECUC-MODULE-CONFIGURATION-VALUES"));
}

#[test]
fn test_profile_export_json() {
    let profile = DocumentProfiler::new().profile(&parse(SYSTEM_ARXML)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&profile.to_json().unwrap()).unwrap();

    assert_eq!(json["root_element"], "AUTOSAR");
    assert_eq!(json["namespace"], "http://autosar.org/schema/r4.0");
    assert!(json["naming_conventions"]["UPPER_CASE"].as_u64().unwrap() > 0);
    assert_eq!(
        json["statistics"]["total_elements"].as_u64().unwrap() as usize,
        count_nodes(&parse(SYSTEM_ARXML))
    );
}

#[test]
fn test_batch_profiles_are_independent() {
    let docs = vec![scenario_a(), parse(ECUC_ARXML), scenario_a()];
    let profiles = DocumentProfiler::new().profile_documents(&docs);
    assert_eq!(profiles.len(), 3);
    let first = profiles[0].as_ref().unwrap();
    let last = profiles[2].as_ref().unwrap();
    assert_eq!(first.element_patterns, last.element_patterns);
    assert_eq!(first.pattern("B").unwrap().frequency, 3);
}

#[test]
fn test_scenario_b_classification() {
    assert_eq!(NamingConvention::classify("ECUC-MODULE-DEF"), NamingConvention::UpperCase);
    assert!(ElementRoles::classify("ECUC-MODULE-DEF").is_none());
}

#[test]
fn test_type_tie_goes_to_first_scored_type() {
    let mut b = TreeBuilder::new();
    b.start("PORT-THING");
    b.leaf("LIN-X", None);
    b.end();
    let profile = DocumentProfiler::new().profile(&b.finish().unwrap()).unwrap();

    assert_eq!(profile.statistics.type_scores["MCAL"], 1);
    assert_eq!(profile.statistics.type_scores["COMMUNICATION"], 1);
    assert_eq!(profile.document_type, "MCAL");
}
