//! Report assembly - deterministic export rendering
//!
//! Both export forms are derived from the same redaction summary and
//! analysis result. Same inputs always give byte-identical outputs.

pub mod assemble;
pub mod text;

pub use assemble::{Report, ReportAssembler, StructuredReport, assemble};
