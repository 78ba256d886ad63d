//! Reading ARXML files into tree documents.

use std::io::Write;

use arxml_lens::{TreeDocument, TreeError};

use crate::helpers::fixtures::{COMPONENTS_ARXML, SYSTEM_ARXML, parse};

#[test]
fn test_parse_structure() {
    let doc = parse(SYSTEM_ARXML);
    let root = doc.root().unwrap();
    assert_eq!(doc[root].tag(), "AUTOSAR");
    assert_eq!(
        doc[root].namespaces().get(""),
        Some(&"http://autosar.org/schema/r4.0".to_string())
    );

    let port = doc.query("//P-PORT-PROTOTYPE").unwrap()[0];
    assert_eq!(doc.child_text(port, "SHORT-NAME"), Some("SpeedOut"));
    assert_eq!(doc[port].attribute("UUID"), Some("port-1"));
    assert_eq!(doc.depth_of(port), 6);
    assert_eq!(
        doc.path_of(port),
        "/AUTOSAR/AR-PACKAGES/AR-PACKAGE[1]/ELEMENTS/APPLICATION-SW-COMPONENT-TYPE/PORTS/P-PORT-PROTOTYPE"
    );
    // whitespace between elements is not text
    assert_eq!(doc[port].text(), None);
}

#[test]
fn test_from_path_records_file() {
    let mut file = tempfile::Builder::new().suffix(".arxml").tempfile().unwrap();
    file.write_all(COMPONENTS_ARXML.as_bytes()).unwrap();

    let doc = TreeDocument::from_path(file.path()).unwrap();
    assert_eq!(doc.file(), Some(file.path()));
    assert_eq!(doc.query("//SHORT-NAME").unwrap().len(), 4);
}

#[test]
fn test_malformed_and_missing_inputs() {
    assert!(matches!(
        TreeDocument::parse_str("<AUTOSAR><A></B></AUTOSAR>"),
        Err(TreeError::Xml(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.arxml");
    assert!(matches!(TreeDocument::from_path(missing), Err(TreeError::Io(_))));
}
