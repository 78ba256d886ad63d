//! Query-based document-type detection.

use rstest::rstest;

use arxml_lens::TypeDetector;
use arxml_lens::base::DetectorConfig;
use arxml_lens::profile::TypeRule;

use crate::helpers::fixtures::{ECUC_ARXML, SYSTEM_ARXML, parse, scenario_a};

#[test]
fn test_ecuc_confidence_uses_priority_decay() {
    let detected = TypeDetector::new().detect(&parse(ECUC_ARXML)).unwrap();
    let ecuc = detected.iter().find(|t| t.name == "ECUC").unwrap();
    // 2 of 5 queries match, priority 5
    assert!((ecuc.confidence - 0.4 * 0.8).abs() < 1e-9);
    assert_eq!(ecuc.matched_patterns.len(), 2);
    assert_eq!(detected[0].name, "ECUC");
}

#[rstest]
#[case::no_matches(0.3)]
#[case::strict(0.99)]
fn test_generic_fallback(#[case] min_confidence: f64) {
    let detector = TypeDetector::with_config(DetectorConfig { min_confidence });
    let doc = scenario_a();
    let detected = detector.detect(&doc).unwrap();
    assert_eq!(detected.len(), 1);
    assert_eq!(detected[0].name, "GENERIC");
    assert_eq!(detected[0].confidence, 1.0);
    assert_eq!(detected[0].element_count, doc.len());
}

#[test]
fn test_custom_rules_sorted_by_confidence() {
    let rules = vec![
        TypeRule::new("PORTS", 1, &["//P-PORT-PROTOTYPE", "//MISSING"]),
        TypeRule::new("PACKAGES", 2, &["//AR-PACKAGE"]),
        TypeRule::new("BROKEN", 1, &["//A["]),
    ];
    let detector = TypeDetector::with_rules(rules, DetectorConfig::default());
    let doc = parse(SYSTEM_ARXML);

    assert_eq!(detector.detect_all(&doc).unwrap(), ["PACKAGES", "PORTS"]);
    assert_eq!(detector.detect_primary(&doc).unwrap(), "PACKAGES");

    let stats = detector.type_statistics(&doc).unwrap();
    assert_eq!(stats.primary_type, "PACKAGES");
    assert_eq!(stats.type_details[0].confidence, "95.00%");
    assert_eq!(stats.type_details[0].element_count, 2);
    assert_eq!(stats.type_details[1].patterns_matched, 1);
    assert_eq!(stats.type_details[1].patterns_total, 2);
}

#[rstest]
#[case::zero(0, 1.05)]
#[case::first(1, 1.0)]
#[case::third(3, 0.9)]
fn test_priority_factor(#[case] priority: u32, #[case] expected: f64) {
    let detector = TypeDetector::with_rules(
        vec![TypeRule::new("PACKAGES", priority, &["//AR-PACKAGE"])],
        DetectorConfig::default(),
    );
    let detected = detector.detect(&parse(SYSTEM_ARXML)).unwrap();
    assert_eq!(detected[0].name, "PACKAGES");
    assert!((detected[0].confidence - expected).abs() < 1e-9);
}
