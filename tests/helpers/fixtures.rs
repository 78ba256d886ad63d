//! ARXML sources and hand-built trees shared by the integration tests.

use arxml_lens::{NodeId, TreeBuilder, TreeDocument};

/// A component package: one SWC with a provided and a required port.
pub const COMPONENTS_ARXML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AUTOSAR xmlns="http://autosar.org/schema/r4.0">
  <AR-PACKAGES>
    <AR-PACKAGE UUID="pkg-1">
      <SHORT-NAME>Components</SHORT-NAME>
      <ELEMENTS>
        <APPLICATION-SW-COMPONENT-TYPE UUID="swc-1">
          <SHORT-NAME>SpeedSensor</SHORT-NAME>
          <CATEGORY>APPLICATION</CATEGORY>
          <PORTS>
            <P-PORT-PROTOTYPE UUID="port-1">
              <SHORT-NAME>SpeedOut</SHORT-NAME>
              <PROVIDED-INTERFACE-TREF DEST="SENDER-RECEIVER-INTERFACE">/Interfaces/SpeedIf</PROVIDED-INTERFACE-TREF>
            </P-PORT-PROTOTYPE>
            <R-PORT-PROTOTYPE UUID="port-2">
              <SHORT-NAME>ConfigIn</SHORT-NAME>
              <REQUIRED-INTERFACE-TREF DEST="CLIENT-SERVER-INTERFACE">/Interfaces/ConfigIf</REQUIRED-INTERFACE-TREF>
            </R-PORT-PROTOTYPE>
          </PORTS>
        </APPLICATION-SW-COMPONENT-TYPE>
      </ELEMENTS>
    </AR-PACKAGE>
  </AR-PACKAGES>
</AUTOSAR>
"#;

/// An interface package defining `SpeedIf` only.
pub const INTERFACES_ARXML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AUTOSAR xmlns="http://autosar.org/schema/r4.0">
  <AR-PACKAGES>
    <AR-PACKAGE UUID="pkg-2">
      <SHORT-NAME>Interfaces</SHORT-NAME>
      <ELEMENTS>
        <SENDER-RECEIVER-INTERFACE UUID="if-1">
          <SHORT-NAME>SpeedIf</SHORT-NAME>
        </SENDER-RECEIVER-INTERFACE>
      </ELEMENTS>
    </AR-PACKAGE>
  </AR-PACKAGES>
</AUTOSAR>
"#;

/// Both packages in one document.
pub const SYSTEM_ARXML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AUTOSAR xmlns="http://autosar.org/schema/r4.0">
  <AR-PACKAGES>
    <AR-PACKAGE UUID="pkg-1">
      <SHORT-NAME>Components</SHORT-NAME>
      <ELEMENTS>
        <APPLICATION-SW-COMPONENT-TYPE UUID="swc-1">
          <SHORT-NAME>SpeedSensor</SHORT-NAME>
          <CATEGORY>APPLICATION</CATEGORY>
          <PORTS>
            <P-PORT-PROTOTYPE UUID="port-1">
              <SHORT-NAME>SpeedOut</SHORT-NAME>
              <PROVIDED-INTERFACE-TREF DEST="SENDER-RECEIVER-INTERFACE">/Interfaces/SpeedIf</PROVIDED-INTERFACE-TREF>
            </P-PORT-PROTOTYPE>
            <R-PORT-PROTOTYPE UUID="port-2">
              <SHORT-NAME>ConfigIn</SHORT-NAME>
              <REQUIRED-INTERFACE-TREF DEST="CLIENT-SERVER-INTERFACE">/Interfaces/ConfigIf</REQUIRED-INTERFACE-TREF>
            </R-PORT-PROTOTYPE>
          </PORTS>
        </APPLICATION-SW-COMPONENT-TYPE>
      </ELEMENTS>
    </AR-PACKAGE>
    <AR-PACKAGE UUID="pkg-2">
      <SHORT-NAME>Interfaces</SHORT-NAME>
      <ELEMENTS>
        <SENDER-RECEIVER-INTERFACE UUID="if-1">
          <SHORT-NAME>SpeedIf</SHORT-NAME>
        </SENDER-RECEIVER-INTERFACE>
      </ELEMENTS>
    </AR-PACKAGE>
  </AR-PACKAGES>
</AUTOSAR>
"#;

/// An ECU configuration document.
pub const ECUC_ARXML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<AUTOSAR xmlns="http://autosar.org/schema/r4.0">
  <AR-PACKAGES>
    <AR-PACKAGE>
      <SHORT-NAME>EcucConfig</SHORT-NAME>
      <ELEMENTS>
        <ECUC-MODULE-CONFIGURATION-VALUES>
          <SHORT-NAME>Can</SHORT-NAME>
          <DEFINITION-REF DEST="ECUC-MODULE-DEF">/AUTOSAR/EcucDefs/Can</DEFINITION-REF>
          <CONTAINERS>
            <ECUC-CONTAINER-VALUE>
              <SHORT-NAME>CanGeneral</SHORT-NAME>
              <PARAMETER-VALUES>
                <ECUC-NUMERICAL-PARAM-VALUE>
                  <DEFINITION-REF DEST="ECUC-INTEGER-PARAM-DEF">/AUTOSAR/EcucDefs/Can/CanGeneral/CanIndex</DEFINITION-REF>
                  <VALUE>0</VALUE>
                </ECUC-NUMERICAL-PARAM-VALUE>
              </PARAMETER-VALUES>
              <REFERENCE-VALUES>
                <ECUC-REFERENCE-VALUE>
                  <VALUE-REF DEST="ECUC-CONTAINER-VALUE">/EcucConfig/Can/CanController</VALUE-REF>
                </ECUC-REFERENCE-VALUE>
              </REFERENCE-VALUES>
            </ECUC-CONTAINER-VALUE>
          </CONTAINERS>
        </ECUC-MODULE-CONFIGURATION-VALUES>
      </ELEMENTS>
    </AR-PACKAGE>
  </AR-PACKAGES>
</AUTOSAR>
"#;

pub fn parse(xml: &str) -> TreeDocument {
    TreeDocument::parse_str(xml).unwrap()
}

/// `ROOT -> (A, B, B, B -> C)`.
pub fn scenario_a() -> TreeDocument {
    let mut b = TreeBuilder::new();
    b.start("ROOT");
    b.leaf("A", None);
    b.leaf("B", None);
    b.leaf("B", None);
    b.start("B");
    b.leaf("C", None);
    b.end();
    b.end();
    b.finish().unwrap()
}

/// A root with `n` copies of `ITEM -> (X, Y)`.
pub fn repeated_items(n: usize) -> TreeDocument {
    let mut b = TreeBuilder::new();
    b.start("ROOT");
    for _ in 0..n {
        b.start("ITEM");
        b.leaf("X", None);
        b.leaf("Y", None);
        b.end();
    }
    b.end();
    b.finish().unwrap()
}

/// A straight chain of `depth + 1` elements named `L0`, `L1`, ...
pub fn chain(depth: usize) -> TreeDocument {
    let mut b = TreeBuilder::new();
    for level in 0..=depth {
        b.start(&format!("L{level}"));
    }
    for _ in 0..=depth {
        b.end();
    }
    b.finish().unwrap()
}

/// Node count by recursive walk from the root.
pub fn count_nodes(doc: &TreeDocument) -> usize {
    fn walk(doc: &TreeDocument, id: NodeId) -> usize {
        1 + doc[id].children().iter().map(|&c| walk(doc, c)).sum::<usize>()
    }
    doc.root().map_or(0, |root| walk(doc, root))
}

/// Longest root-to-node path length by recursive walk.
pub fn true_depth(doc: &TreeDocument) -> usize {
    fn walk(doc: &TreeDocument, id: NodeId) -> usize {
        doc[id]
            .children()
            .iter()
            .map(|&c| 1 + walk(doc, c))
            .max()
            .unwrap_or(0)
    }
    doc.root().map_or(0, |root| walk(doc, root))
}
