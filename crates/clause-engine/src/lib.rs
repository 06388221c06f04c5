//! Document processing pipeline
//!
//! extracted text -> redactor -> analysis client -> report assembler
//!
//! Every value is created per request. The only process-wide state is the
//! shared recognizer, which is read-only after initialization.

pub mod document;
pub mod error;

use std::sync::Arc;

use clause_analysis::{AnalysisClient, GeminiProvider, ModelProvider};
use clause_config::Config;
use clause_core::{AnalysisResult, RedactionSummary, TextSpan};
use clause_report::Report;
use clause_security::{
    CommandRecognizer, CompositeRecognizer, EntityRecognizer, MaskedText, PatternRecognizer, Redactor, shared_recognizer,
};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span};

pub use document::Document;
pub use error::{PipelineError, Result};

/// Everything produced for one document
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub masked: MaskedText,
    pub summary: RedactionSummary,
    pub analysis: AnalysisResult,
    pub report: Report,
}

pub struct Pipeline {
    redactor: Redactor,
    client: AnalysisClient,
}

impl Pipeline {
    pub fn new(redactor: Redactor, client: AnalysisClient) -> Self {
        Self { redactor, client }
    }

    /// Build the default pipeline: pattern recognizer plus any configured
    /// custom patterns, and the Gemini provider with the configured models.
    pub fn from_config(config: &Config) -> Result<Self> {
        let redactor = Redactor::new(recognizer_from_config(config)?);

        let analysis = &config.analysis;
        let provider = GeminiProvider::from_env(analysis.api_base.clone(), &analysis.api_key_env)
            .map_err(|e| PipelineError::ProviderSetup(e.to_string()))?
            .with_json_mode(analysis.json_mode);
        let provider: Arc<dyn ModelProvider> = Arc::new(provider);
        let client = AnalysisClient::new(provider, analysis.models.clone()).with_timeout(analysis.timeout());

        Ok(Self::new(redactor, client))
    }

    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Mask the document without contacting the analysis service
    pub fn redact_only(&self, document: &Document) -> Result<(MaskedText, RedactionSummary)> {
        Ok(self.redactor.redact(document.text())?)
    }

    /// Resolved entities in document order, for local inspection
    pub fn entities(&self, document: &Document) -> Result<Vec<TextSpan>> {
        Ok(self.redactor.entity_details(document.text())?)
    }

    pub async fn process(&self, document: &Document) -> Result<PipelineOutput> {
        self.process_with_cancel(document, CancellationToken::new()).await
    }

    /// Run the full pipeline.
    ///
    /// A redaction failure returns before any network call is made. Analysis
    /// failures, including cancellation, are reported in the output.
    pub async fn process_with_cancel(&self, document: &Document, cancel: CancellationToken) -> Result<PipelineOutput> {
        let request_id = uuid::Uuid::new_v4();
        let span = info_span!("process", %request_id);

        async move {
            if document.is_empty() {
                return Err(PipelineError::EmptyDocument);
            }

            let (masked, summary) = self.redactor.redact(document.text())?;
            info!(redactions = summary.total(), "document redacted");

            let analysis = self.client.analyze_with_cancel(&masked, cancel).await;
            let report = clause_report::assemble(&summary, &analysis);
            info!(success = analysis.success(), "document processed");

            Ok(PipelineOutput {
                masked,
                summary,
                analysis,
                report,
            })
        }
        .instrument(span)
        .await
    }
}

/// Recognizer chain for a configuration: the NER command if one is set,
/// then custom patterns, then the shared built-in patterns.
pub fn recognizer_from_config(config: &Config) -> Result<Arc<dyn EntityRecognizer>> {
    let builtin: Arc<dyn EntityRecognizer> = shared_recognizer()?;
    let redaction = &config.redaction;

    let mut members: Vec<Arc<dyn EntityRecognizer>> = Vec::new();
    if let Some(ner) = CommandRecognizer::from_argv(&redaction.ner_command) {
        members.push(Arc::new(ner));
    }
    if !redaction.custom_patterns.is_empty() {
        let mut custom = PatternRecognizer::empty();
        for pattern in &redaction.custom_patterns {
            custom = custom.with_pattern(&pattern.name, &pattern.entity_type, &pattern.pattern)?;
        }
        members.push(Arc::new(custom));
    }

    if members.is_empty() {
        return Ok(builtin);
    }
    members.push(builtin);
    Ok(Arc::new(CompositeRecognizer::new(members)))
}
