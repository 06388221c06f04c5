//! Core domain models for clearclause
//!
//! This crate contains:
//! - Entity spans and types produced by recognizers
//! - The redaction summary shared by the UI and the exporters
//! - Risk assessment results returned by the analysis service

pub mod analysis;
pub mod entity;
pub mod error;
pub mod summary;

pub use analysis::{AnalysisErrorKind, AnalysisResult, RiskAssessment, RiskLevel};
pub use entity::{EntityType, TextSpan};
pub use error::{Error, Result};
pub use summary::RedactionSummary;
