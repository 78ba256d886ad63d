//! Foundation types for arxml-lens.
//!
//! This module provides the pieces every analysis component shares:
//! - [`AnalysisConfig`] and the per-component configs
//! - [`AnalysisError`] - top-level failure for input that cannot be walked
//! - Domain constants (AUTOSAR keyword tables, entity and reference tag families)
//!
//! This module has NO dependencies on other arxml-lens modules.

mod config;
pub mod constants;
mod error;

pub use config::{
    AnalysisConfig, DetectorConfig, PatternConfig, ProfilerConfig, TypeIndicator, XrefConfig,
};
pub use error::AnalysisError;
