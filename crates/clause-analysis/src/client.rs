//! Analysis client with ordered model fallback

use std::sync::Arc;
use std::time::Duration;

use clause_core::{AnalysisErrorKind, AnalysisResult};
use clause_security::MaskedText;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::parse::parse_assessment;
use crate::prompt::build_prompt;
use crate::provider::ModelProvider;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Scores masked text with the first model that answers.
///
/// Models are tried in configured order, each at most once. A model that
/// errors or exceeds the per-attempt timeout is skipped. The first response
/// body received is parsed and returned, even if it turns out malformed.
#[derive(Clone)]
pub struct AnalysisClient {
    provider: Arc<dyn ModelProvider>,
    models: Vec<String>,
    timeout: Duration,
}

impl AnalysisClient {
    pub fn new(provider: Arc<dyn ModelProvider>, models: Vec<String>) -> Self {
        Self {
            provider,
            models,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Analyse masked text. Never fails; problems come back as a failed result.
    pub async fn analyze(&self, masked: &MaskedText) -> AnalysisResult {
        if self.models.is_empty() {
            return AnalysisResult::failure(
                AnalysisErrorKind::Unavailable,
                "Analysis service unavailable: no models configured",
            );
        }

        let prompt = build_prompt(masked);
        let mut last_error = String::new();

        for (attempt, model) in self.models.iter().enumerate() {
            info!(
                provider = self.provider.name(),
                model = %model,
                attempt = attempt + 1,
                "requesting analysis"
            );

            let outcome = tokio::time::timeout(self.timeout, self.provider.generate(model, &prompt)).await;

            let body = match outcome {
                Ok(Ok(body)) => body,
                Ok(Err(e)) => {
                    warn!(model = %model, error = %e, "model rejected request");
                    last_error = e.to_string();
                    continue;
                }
                Err(_) => {
                    warn!(model = %model, timeout_secs = self.timeout.as_secs(), "model timed out");
                    last_error = format!("{} timed out after {}s", model, self.timeout.as_secs());
                    continue;
                }
            };

            return match parse_assessment(&body) {
                Ok(assessment) => {
                    info!(model = %model, risk_score = assessment.risk_score, "analysis complete");
                    AnalysisResult::Success(assessment)
                }
                Err(message) => {
                    warn!(model = %model, error = %message, "malformed analysis response");
                    AnalysisResult::failure(AnalysisErrorKind::MalformedResponse, message)
                }
            };
        }

        AnalysisResult::failure(
            AnalysisErrorKind::Unavailable,
            format!(
                "Analysis service unavailable: all models failed ({}). Last error: {}",
                self.models.join(", "),
                last_error
            ),
        )
    }

    /// Like [`analyze`](Self::analyze), but gives up as soon as `cancel` fires.
    ///
    /// The pending request is dropped; nothing is shared with other requests.
    pub async fn analyze_with_cancel(&self, masked: &MaskedText, cancel: CancellationToken) -> AnalysisResult {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("analysis cancelled by caller");
                AnalysisResult::failure(AnalysisErrorKind::Cancelled, "Analysis cancelled")
            }
            result = self.analyze(masked) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use clause_core::{RiskLevel, TextSpan};
    use clause_security::{EntityRecognizer, Redactor};
    use std::collections::HashMap;
    use std::sync::Mutex;

    const VALID_BODY: &str = "noise {\"risk_score\": 42, \"risk_level\": \"Medium\", \"summary\": \"ok\", \"financial_risks\": [], \"privacy_risks\": [], \"legal_risks\": []} trailing";

    enum Reply {
        Body(&'static str),
        Reject,
        Hang,
    }

    /// Scripted provider that records which models were asked
    struct ScriptedProvider {
        replies: HashMap<&'static str, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<(&'static str, Reply)>) -> Arc<Self> {
            Arc::new(Self {
                replies: replies.into_iter().collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelProvider for ScriptedProvider {
        async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
            assert!(prompt.contains("---DOCUMENT---"));
            self.calls.lock().unwrap().push(model.to_string());

            match self.replies.get(model) {
                Some(Reply::Body(body)) => Ok(body.to_string()),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
                Some(Reply::Reject) | None => Err(ProviderError::Rejected {
                    status: 429,
                    body: "quota exhausted".to_string(),
                }),
            }
        }
    }

    struct NoEntities;

    impl EntityRecognizer for NoEntities {
        fn detect(&self, _text: &str) -> clause_security::Result<Vec<TextSpan>> {
            Ok(Vec::new())
        }
    }

    fn masked(text: &str) -> MaskedText {
        Redactor::new(Arc::new(NoEntities)).redact(text).unwrap().0
    }

    fn models(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_primary_success() {
        let provider = ScriptedProvider::new(vec![("primary", Reply::Body(VALID_BODY))]);
        let client = AnalysisClient::new(provider.clone(), models(&["primary", "fallback"]));

        let result = client.analyze(&masked("some lease")).await;

        assert!(result.success());
        assert_eq!(result.risk_score(), Some(42));
        assert_eq!(result.risk_level(), Some(RiskLevel::High));
        assert_eq!(provider.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_falls_back_in_order() {
        let provider = ScriptedProvider::new(vec![
            ("primary", Reply::Reject),
            ("second", Reply::Reject),
            ("third", Reply::Body(VALID_BODY)),
        ]);
        let client = AnalysisClient::new(provider.clone(), models(&["primary", "second", "third"]));

        let result = client.analyze(&masked("doc")).await;

        assert!(result.success());
        assert_eq!(provider.calls(), vec!["primary", "second", "third"]);
    }

    #[tokio::test]
    async fn test_all_models_fail() {
        let provider = ScriptedProvider::new(vec![("a", Reply::Reject), ("b", Reply::Reject)]);
        let client = AnalysisClient::new(provider.clone(), models(&["a", "b"]));

        let result = client.analyze(&masked("doc")).await;

        assert!(!result.success());
        assert_eq!(result.error_kind(), Some(AnalysisErrorKind::Unavailable));
        assert!(result.error_message().unwrap().contains("service unavailable"));
        assert_eq!(result.risk_score(), None);
        assert_eq!(provider.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_malformed_response_does_not_fall_back() {
        let provider = ScriptedProvider::new(vec![
            ("a", Reply::Body("Sorry, I can't do that.")),
            ("b", Reply::Body(VALID_BODY)),
        ]);
        let client = AnalysisClient::new(provider.clone(), models(&["a", "b"]));

        let result = client.analyze(&masked("doc")).await;

        assert_eq!(result.error_kind(), Some(AnalysisErrorKind::MalformedResponse));
        assert!(!result.error_message().unwrap().is_empty());
        assert_eq!(result.risk_score(), None);
        assert_eq!(provider.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_no_models_configured() {
        let provider = ScriptedProvider::new(vec![]);
        let client = AnalysisClient::new(provider.clone(), Vec::new());

        let result = client.analyze(&masked("doc")).await;

        assert_eq!(result.error_kind(), Some(AnalysisErrorKind::Unavailable));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_moves_to_next_model() {
        let provider = ScriptedProvider::new(vec![("slow", Reply::Hang), ("fast", Reply::Body(VALID_BODY))]);
        let client = AnalysisClient::new(provider.clone(), models(&["slow", "fast"]))
            .with_timeout(Duration::from_secs(5));

        let result = client.analyze(&masked("doc")).await;

        assert!(result.success());
        assert_eq!(provider.calls(), vec!["slow", "fast"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_timeouts_unavailable() {
        let provider = ScriptedProvider::new(vec![("slow", Reply::Hang)]);
        let client = AnalysisClient::new(provider, models(&["slow"])).with_timeout(Duration::from_secs(5));

        let result = client.analyze(&masked("doc")).await;

        assert_eq!(result.error_kind(), Some(AnalysisErrorKind::Unavailable));
        assert!(result.error_message().unwrap().contains("timed out"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_request() {
        let provider = ScriptedProvider::new(vec![("slow", Reply::Hang)]);
        let client = AnalysisClient::new(provider, models(&["slow"])).with_timeout(Duration::from_secs(600));
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let result = client.analyze_with_cancel(&masked("doc"), cancel).await;

        assert_eq!(result.error_kind(), Some(AnalysisErrorKind::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_does_not_affect_other_requests() {
        let provider = ScriptedProvider::new(vec![("m", Reply::Body(VALID_BODY))]);
        let client = AnalysisClient::new(provider, models(&["m"]));

        let cancelled = CancellationToken::new();
        cancelled.cancel();
        let doc = masked("doc");

        let (first, second) = tokio::join!(
            client.analyze_with_cancel(&doc, cancelled),
            client.analyze_with_cancel(&doc, CancellationToken::new()),
        );

        assert_eq!(first.error_kind(), Some(AnalysisErrorKind::Cancelled));
        assert!(second.success());
    }
}
