//! Path query evaluation against a realistic ARXML document.

use rstest::rstest;

use arxml_lens::tree::QueryError;

use crate::helpers::fixtures::{SYSTEM_ARXML, parse};

#[rstest]
#[case("//SHORT-NAME", 6)]
#[case("/AUTOSAR/AR-PACKAGES/AR-PACKAGE", 2)]
#[case("//AR-PACKAGE[SHORT-NAME='Interfaces']//SHORT-NAME", 2)]
#[case("//*[local-name()='P-PORT-PROTOTYPE']", 1)]
#[case("//*[@UUID]", 6)]
#[case("//*[@DEST='CLIENT-SERVER-INTERFACE']", 1)]
#[case("//PORTS/*[2]", 1)]
#[case("//P-PORT-PROTOTYPE | //R-PORT-PROTOTYPE", 2)]
#[case("//ELEMENTS/*[SHORT-NAME='SpeedIf' or SHORT-NAME='SpeedSensor']", 2)]
#[case("//SHORT-NAME[text()='SpeedOut']/..", 1)]
#[case("//ar:SHORT-NAME", 6)]
#[case("//*[*[local-name()='SHORT-NAME'] and @UUID!='pkg-1']", 5)]
#[case("//MISSING", 0)]
fn test_query_counts(#[case] expr: &str, #[case] expected: usize) {
    let doc = parse(SYSTEM_ARXML);
    assert_eq!(doc.query(expr).unwrap().len(), expected, "query {expr}");
}

#[rstest]
#[case("")]
#[case("//")]
#[case("//A[")]
#[case("//A[@]")]
#[case("//A[count()]")]
#[case("//A[0]")]
fn test_malformed_queries_are_errors(#[case] expr: &str) {
    let doc = parse(SYSTEM_ARXML);
    assert!(doc.query(expr).is_err(), "query {expr:?} should fail");
}

#[test]
fn test_results_are_in_document_order() {
    let doc = parse(SYSTEM_ARXML);
    let ids = doc.query("//SENDER-RECEIVER-INTERFACE | //P-PORT-PROTOTYPE").unwrap();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(doc[ids[0]].local_name(), "P-PORT-PROTOTYPE");
}

#[test]
fn test_relative_query_from_context() {
    let doc = parse(SYSTEM_ARXML);
    let swc = doc.query("//APPLICATION-SW-COMPONENT-TYPE").unwrap()[0];
    let names: Vec<_> = doc
        .query_from(swc, ".//SHORT-NAME")
        .unwrap()
        .into_iter()
        .filter_map(|id| doc[id].text())
        .collect();
    assert_eq!(names, ["SpeedSensor", "SpeedOut", "ConfigIn"]);
}

#[test]
fn test_error_reports_offset() {
    let doc = parse(SYSTEM_ARXML);
    match doc.query("//A]") {
        Err(QueryError::Unexpected { offset, .. }) => assert_eq!(offset, 3),
        other => panic!("unexpected result: {other:?}"),
    }
}
