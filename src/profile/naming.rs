//! Naming-convention classification of tag names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical casing style of a tag name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NamingConvention {
    /// `ECUC-MODULE-DEF`
    #[serde(rename = "UPPER_CASE")]
    UpperCase,
    /// `module`
    #[serde(rename = "lower_case")]
    LowerCase,
    /// `ModuleDef`
    #[serde(rename = "PascalCase")]
    PascalCase,
    /// `moduleDef`
    #[serde(rename = "camelCase")]
    CamelCase,
    /// `module_def`
    #[serde(rename = "snake_case")]
    SnakeCase,
    /// `module-def`
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "mixed")]
    Mixed,
}

impl NamingConvention {
    pub const ALL: [NamingConvention; 7] = [
        Self::UpperCase,
        Self::LowerCase,
        Self::PascalCase,
        Self::CamelCase,
        Self::SnakeCase,
        Self::KebabCase,
        Self::Mixed,
    ];

    /// Classify a name. Total: every input, including `""`, gets exactly one label.
    pub fn classify(name: &str) -> Self {
        let has_upper = name.chars().any(char::is_uppercase);
        let has_lower = name.chars().any(char::is_lowercase);

        if has_upper && !has_lower {
            return Self::UpperCase;
        }
        if has_lower && !has_upper {
            return if name.contains('-') {
                Self::KebabCase
            } else if name.contains('_') {
                Self::SnakeCase
            } else {
                Self::LowerCase
            };
        }

        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() && !name.contains(['-', '_']) => Self::PascalCase,
            Some(first) if first.is_lowercase() && chars.any(char::is_uppercase) => {
                Self::CamelCase
            }
            _ => Self::Mixed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UpperCase => "UPPER_CASE",
            Self::LowerCase => "lower_case",
            Self::PascalCase => "PascalCase",
            Self::CamelCase => "camelCase",
            Self::SnakeCase => "snake_case",
            Self::KebabCase => "kebab-case",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
