//! Remote risk analysis
//!
//! Sends masked document text to a hosted language model and turns its
//! reply into a [`clause_core::AnalysisResult`]. Failures of the remote
//! service are reported inside the result, never as errors.

pub mod client;
pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod provider;

pub use client::AnalysisClient;
pub use gemini::GeminiProvider;
pub use parse::{extract_json_object, parse_assessment};
pub use prompt::build_prompt;
pub use provider::{ModelProvider, ProviderError};
