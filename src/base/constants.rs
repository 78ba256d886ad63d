//! AUTOSAR vocabulary used by the heuristics.
//!
//! These tables are data, not logic: the analysis code only ever iterates
//! them, so a different dialect can be supported by swapping the tables
//! (the document-type table is also overridable through
//! [`ProfilerConfig`](super::ProfilerConfig)).

// ============================================================================
// COMMON TAGS AND ATTRIBUTES
// ============================================================================

/// Child element carrying an entity's display name.
pub const SHORT_NAME: &str = "SHORT-NAME";

/// Element or attribute carrying an entity's UUID.
pub const UUID: &str = "UUID";

/// Child element carrying an entity's category.
pub const CATEGORY: &str = "CATEGORY";

/// Attribute declaring the kind of a reference target.
pub const DEST: &str = "DEST";

/// Attributes whose value is a reference to another element.
pub const REFERENCE_ATTRIBUTES: &[&str] = &["REF", "DEST", "TARGET-REF", "BASE-REF"];

/// Attributes whose value identifies the element carrying them.
pub const IDENTIFIER_ATTRIBUTES: &[&str] = &["UUID", "ID", "SHORT-NAME"];

/// Attributes shown in the short context string of a query match.
pub const CONTEXT_ATTRIBUTES: &[&str] = &["SHORT-NAME", "UUID", "ID", "TYPE"];

/// Document type reported when no keyword matched.
pub const UNKNOWN_DOCUMENT_TYPE: &str = "UNKNOWN";

/// Document type reported by the type detector when no rule qualified.
pub const GENERIC_DOCUMENT_TYPE: &str = "GENERIC";

// ============================================================================
// DOCUMENT TYPE KEYWORDS
// ============================================================================

/// Keyword lists per candidate document type, scored against tag names.
pub const DOCUMENT_TYPE_INDICATORS: &[(&str, &[&str])] = &[
    ("ECUC", &["ECUC", "ECU-CONFIGURATION", "MODULE-CONFIGURATION"]),
    ("SYSTEM", &["SYSTEM", "SYSTEM-DESCRIPTION", "SYSTEMS"]),
    ("SWC", &["SW-COMPONENT", "SOFTWARE-COMPONENT", "APPLICATION-SW"]),
    ("INTERFACE", &["PORT-INTERFACE", "INTERFACE", "SERVICE-INTERFACE"]),
    ("GATEWAY", &["GATEWAY", "PDU-R", "ROUTING", "PDUR"]),
    ("DIAGNOSTIC", &["DIAGNOSTIC", "DCM", "DEM", "DIAG"]),
    ("COMMUNICATION", &["COM", "COMMUNICATION", "CAN", "LIN", "ETHERNET"]),
    ("MCAL", &["MCAL", "MICROCONTROLLER", "MCU", "PORT", "DIO"]),
];

/// Search terms behind `DocumentProfile::suggest_patterns`.
pub const SUGGESTION_TERMS: &[(&str, &[&str])] = &[
    ("module", &["MODULE", "MOD"]),
    ("container", &["CONTAINER", "CONT"]),
    ("parameter", &["PARAM", "PARAMETER", "VALUE"]),
    ("reference", &["REF", "REFERENCE"]),
    ("configuration", &["CONFIG", "CONFIGURATION", "CONF"]),
];

// ============================================================================
// DOCUMENT TYPE DETECTION (query based)
// ============================================================================

/// `(type, priority, query patterns)` rows for the type detector.
pub const TYPE_DETECTION_RULES: &[(&str, u32, &[&str])] = &[
    (
        "SYSTEM",
        1,
        &[
            ".//AR-PACKAGES//ELEMENTS//SYSTEM",
            ".//SYSTEM-MAPPING",
            ".//FIBEX-ELEMENTS",
            ".//SYSTEM-VERSION",
        ],
    ),
    (
        "ECU_EXTRACT",
        2,
        &[
            ".//ECU-INSTANCE",
            ".//ECU-EXTRACT",
            ".//CONNECTORS//CAN-COMMUNICATION-CONNECTOR",
            ".//CONNECTORS//ETHERNET-COMMUNICATION-CONNECTOR",
            ".//ECU-CONFIGURATION-VALUES",
        ],
    ),
    (
        "SWC",
        3,
        &[
            ".//APPLICATION-SW-COMPONENT-TYPE",
            ".//COMPLEX-DEVICE-DRIVER-SW-COMPONENT-TYPE",
            ".//SERVICE-SW-COMPONENT-TYPE",
            ".//SWC-INTERNAL-BEHAVIOR",
            ".//SW-COMPONENT-PROTOTYPE",
            ".//SWC-IMPLEMENTATION",
        ],
    ),
    (
        "INTERFACE",
        4,
        &[
            ".//SENDER-RECEIVER-INTERFACE",
            ".//CLIENT-SERVER-INTERFACE",
            ".//MODE-SWITCH-INTERFACE",
            ".//NV-DATA-INTERFACE",
            ".//PARAMETER-INTERFACE",
            ".//TRIGGER-INTERFACE",
        ],
    ),
    (
        "ECUC",
        5,
        &[
            ".//ECUC-MODULE-CONFIGURATION-VALUES",
            ".//ECUC-CONTAINER-VALUE",
            ".//ECUC-VALUE-COLLECTION",
            ".//ECUC-PARAMETER-VALUES",
            ".//ECUC-MODULE-DEF",
        ],
    ),
    (
        "MCAL",
        6,
        &[
            ".//MCAL-MODULE-CONFIGURATION",
            ".//DIO-CONFIG",
            ".//PORT-CONFIG",
            ".//ADC-CONFIG",
            ".//PWM-CONFIG",
            ".//CAN-CONFIG",
            ".//LIN-CONFIG",
            ".//MCU-CONFIG",
            ".//GPT-CONFIG",
            ".//WDG-CONFIG",
        ],
    ),
    (
        "DIAGNOSTIC",
        7,
        &[
            ".//DCM-MODULE-CONFIGURATION",
            ".//DEM-EVENT-PARAMETER",
            ".//DIAGNOSTIC-EXTRACT",
            ".//DIAGNOSTIC-SERVICE-TABLE",
            ".//DIAGNOSTIC-TROUBLE-CODE",
            ".//DIAGNOSTIC-DATA-IDENTIFIER",
        ],
    ),
    (
        "GATEWAY",
        8,
        &[
            ".//GATEWAY-MAPPING",
            ".//I-PDU-MAPPING",
            ".//SIGNAL-MAPPING",
            ".//PDU-R-ROUTING-PATH",
            ".//PDU-R-ROUTING-TABLE",
            ".//GATEWAY-MODULE-CONFIGURATION",
        ],
    ),
    (
        "COMMUNICATION",
        9,
        &[
            ".//I-SIGNAL",
            ".//I-SIGNAL-GROUP",
            ".//I-PDU",
            ".//N-PDU",
            ".//DCM-I-PDU",
            ".//CAN-FRAME",
            ".//FLEXRAY-FRAME",
            ".//ETHERNET-FRAME",
            ".//LIN-FRAME",
        ],
    ),
    (
        "BSW",
        10,
        &[
            ".//BSW-MODULE-DESCRIPTION",
            ".//BSW-MODULE-ENTRY",
            ".//BSW-MODULE-DEPENDENCY",
            ".//SERVICE-MAPPING",
            ".//BSW-IMPLEMENTATION",
        ],
    ),
    (
        "CALIBRATION",
        11,
        &[
            ".//CALIBRATION-PARAMETER-VALUE",
            ".//CALIBRATION-DATA",
            ".//SW-AXIS-TYPE",
            ".//SW-VALUE-CONT",
        ],
    ),
    (
        "TIMING",
        12,
        &[
            ".//TIMING-EVENT",
            ".//TIMING-CONSTRAINT",
            ".//TIME-SYNCHRONIZATION",
            ".//TIMING-EXTENSION",
        ],
    ),
];

// ============================================================================
// CROSS-REFERENCE ENTITIES
// ============================================================================

/// Software component types (the top-level entity kind).
pub const COMPONENT_TAGS: &[&str] = &[
    "APPLICATION-SW-COMPONENT-TYPE",
    "COMPLEX-DEVICE-DRIVER-SW-COMPONENT-TYPE",
    "SERVICE-SW-COMPONENT-TYPE",
    "SENSOR-ACTUATOR-SW-COMPONENT-TYPE",
];

/// Port interface types.
pub const INTERFACE_TAGS: &[&str] = &[
    "SENDER-RECEIVER-INTERFACE",
    "CLIENT-SERVER-INTERFACE",
    "MODE-SWITCH-INTERFACE",
    "PARAMETER-INTERFACE",
    "NV-DATA-INTERFACE",
];

/// Port prototypes.
pub const PORT_TAGS: &[&str] = &["P-PORT-PROTOTYPE", "R-PORT-PROTOTYPE", "PR-PORT-PROTOTYPE"];

/// Signals.
pub const SIGNAL_TAGS: &[&str] = &["I-SIGNAL", "SIGNAL"];

/// Runnable entities.
pub const RUNNABLE_TAGS: &[&str] = &["RUNNABLE-ENTITY"];

pub const INTERFACE_REF_TAGS: &[&str] = &[
    "PROVIDED-INTERFACE-TREF",
    "REQUIRED-INTERFACE-TREF",
    "PROVIDED-REQUIRED-INTERFACE-TREF",
];

pub const PORT_REF_TAGS: &[&str] = &[
    "PORT-PROTOTYPE-REF",
    "CONTEXT-P-PORT-REF",
    "CONTEXT-R-PORT-REF",
];

pub const TYPE_REF_TAGS: &[&str] = &["TYPE-TREF"];

pub const DEFINITION_REF_TAGS: &[&str] = &["DEFINITION-REF"];

pub const VALUE_REF_TAGS: &[&str] = &["VALUE-REF"];

pub const TARGET_REF_TAGS: &[&str] = &[
    "TARGET-DATA-PROTOTYPE-REF",
    "TARGET-PROVIDED-OPERATION-REF",
    "TARGET-REQUIRED-OPERATION-REF",
];
