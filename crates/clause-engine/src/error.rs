use clause_security::RedactionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Conditions that stop a document before analysis.
///
/// Remote analysis problems are not listed here; they come back inside
/// the [`AnalysisResult`](clause_core::AnalysisResult).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Redaction(#[from] RedactionError),

    #[error("Document contains no text")]
    EmptyDocument,

    #[error("Analysis provider setup failed: {0}")]
    ProviderSetup(String),
}

impl PipelineError {
    /// True when the recognizer itself could not run
    pub fn is_recognition_unavailable(&self) -> bool {
        matches!(self, PipelineError::Redaction(RedactionError::RecognitionUnavailable(_)))
    }
}
