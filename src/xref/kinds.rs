//! Entity and reference kinds of the dependency graph.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

use crate::base::constants::{
    COMPONENT_TAGS, DEFINITION_REF_TAGS, INTERFACE_REF_TAGS, INTERFACE_TAGS, PORT_REF_TAGS,
    PORT_TAGS, RUNNABLE_TAGS, SIGNAL_TAGS, TARGET_REF_TAGS, TYPE_REF_TAGS, VALUE_REF_TAGS,
};
use crate::tree::local_name;

// ============================================================================
// ENTITY KINDS
// ============================================================================

/// Kind of a graph node.
///
/// Serialized as its label (`"SWC"`, `"PORT"`, ...). Tags outside the known
/// families map to [`EntityKind::Other`] carrying the tag in upper snake case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Swc,
    Interface,
    Port,
    Signal,
    Runnable,
    Module,
    Other(SmolStr),
}

/// Substring rules from tag to kind label, first match wins.
const KIND_RULES: &[(&str, &str)] = &[
    ("SW-COMPONENT", "SWC"),
    ("INTERFACE", "INTERFACE"),
    ("PORT", "PORT"),
    ("SIGNAL", "SIGNAL"),
    ("RUNNABLE", "RUNNABLE"),
    ("MODULE", "MODULE"),
];

/// Entity families extracted as graph nodes, in extraction order.
pub(crate) fn entity_families() -> [(EntityKind, &'static [&'static str]); 5] {
    [
        (EntityKind::Swc, COMPONENT_TAGS),
        (EntityKind::Interface, INTERFACE_TAGS),
        (EntityKind::Port, PORT_TAGS),
        (EntityKind::Signal, SIGNAL_TAGS),
        (EntityKind::Runnable, RUNNABLE_TAGS),
    ]
}

impl EntityKind {
    pub fn label(&self) -> &str {
        match self {
            EntityKind::Swc => "SWC",
            EntityKind::Interface => "INTERFACE",
            EntityKind::Port => "PORT",
            EntityKind::Signal => "SIGNAL",
            EntityKind::Runnable => "RUNNABLE",
            EntityKind::Module => "MODULE",
            EntityKind::Other(label) => label,
        }
    }

    /// Inverse of [`label`](Self::label); unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "SWC" => EntityKind::Swc,
            "INTERFACE" => EntityKind::Interface,
            "PORT" => EntityKind::Port,
            "SIGNAL" => EntityKind::Signal,
            "RUNNABLE" => EntityKind::Runnable,
            "MODULE" => EntityKind::Module,
            other => EntityKind::Other(SmolStr::new(other)),
        }
    }

    /// Top-level kinds are expected to have no referrers.
    pub fn is_top_level(&self) -> bool {
        matches!(self, EntityKind::Swc)
    }

    /// Graphviz fill colour.
    pub fn fill_colour(&self) -> &'static str {
        match self {
            EntityKind::Swc => "lightblue",
            EntityKind::Interface => "lightgreen",
            EntityKind::Signal => "lightyellow",
            EntityKind::Port => "lightcoral",
            EntityKind::Runnable => "lightgray",
            EntityKind::Module | EntityKind::Other(_) => "white",
        }
    }
}

/// Kind of the element tagged `tag`.
///
/// The namespace prefix is ignored. Rules are checked in order
/// (`SW-COMPONENT`, `INTERFACE`, `PORT`, `SIGNAL`, `RUNNABLE`, `MODULE`);
/// any other tag yields `Other` with `-` replaced by `_`.
pub fn entity_kind_for_tag(tag: &str) -> EntityKind {
    let tag = local_name(tag);
    KIND_RULES
        .iter()
        .find(|(needle, _)| tag.contains(needle))
        .map(|(_, label)| EntityKind::from_label(label))
        .unwrap_or_else(|| EntityKind::Other(SmolStr::new(tag.to_uppercase().replace('-', "_"))))
}

impl From<String> for EntityKind {
    fn from(label: String) -> Self {
        EntityKind::from_label(&label)
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.label().to_string()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// REFERENCE KINDS
// ============================================================================

/// Kind of a graph edge, named after the reference tag family it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReferenceKind {
    #[serde(rename = "INTERFACE_REF")]
    Interface,
    #[serde(rename = "PORT_REF")]
    Port,
    #[serde(rename = "TYPE_REF")]
    Type,
    #[serde(rename = "DEFINITION_REF")]
    Definition,
    #[serde(rename = "VALUE_REF")]
    Value,
    #[serde(rename = "TARGET_REF")]
    Target,
}

impl ReferenceKind {
    /// Every kind, in extraction order.
    pub const ALL: [ReferenceKind; 6] = [
        ReferenceKind::Interface,
        ReferenceKind::Port,
        ReferenceKind::Type,
        ReferenceKind::Definition,
        ReferenceKind::Value,
        ReferenceKind::Target,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReferenceKind::Interface => "INTERFACE_REF",
            ReferenceKind::Port => "PORT_REF",
            ReferenceKind::Type => "TYPE_REF",
            ReferenceKind::Definition => "DEFINITION_REF",
            ReferenceKind::Value => "VALUE_REF",
            ReferenceKind::Target => "TARGET_REF",
        }
    }

    /// Reference tags belonging to this kind.
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            ReferenceKind::Interface => INTERFACE_REF_TAGS,
            ReferenceKind::Port => PORT_REF_TAGS,
            ReferenceKind::Type => TYPE_REF_TAGS,
            ReferenceKind::Definition => DEFINITION_REF_TAGS,
            ReferenceKind::Value => VALUE_REF_TAGS,
            ReferenceKind::Target => TARGET_REF_TAGS,
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
