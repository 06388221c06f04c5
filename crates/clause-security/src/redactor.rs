//! PII redaction engine

use std::fmt;
use std::sync::Arc;

use clause_core::{RedactionSummary, TextSpan};
use serde::Serialize;
use tracing::debug;

use crate::recognizer::EntityRecognizer;
use crate::{Result, shared_recognizer};

/// Document text with every resolved entity span replaced by a placeholder.
///
/// Only [`Redactor`] can build one, so anything that accepts `&MaskedText`
/// cannot be handed raw document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MaskedText(String);

impl MaskedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MaskedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MaskedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Masks entity spans found by an [`EntityRecognizer`]
#[derive(Clone)]
pub struct Redactor {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl Redactor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Redactor backed by the process-wide pattern recognizer
    pub fn shared() -> Result<Self> {
        let recognizer: Arc<dyn EntityRecognizer> = shared_recognizer()?;
        Ok(Self::new(recognizer))
    }

    /// Mask all resolved entity spans in `text`.
    ///
    /// The recognizer runs once over the whole text. A recognizer failure is
    /// returned as an error; no partially masked text is ever produced.
    pub fn redact(&self, text: &str) -> Result<(MaskedText, RedactionSummary)> {
        if text.is_empty() {
            return Ok((MaskedText(String::new()), RedactionSummary::empty()));
        }

        let spans = self.resolved_spans(text)?;
        let masked = mask(text, &spans);
        let summary = RedactionSummary::from_spans(&spans);

        debug!(
            recognizer = self.recognizer.name(),
            masked = summary.total(),
            input_len = text.len(),
            output_len = masked.len(),
            "redaction complete"
        );

        Ok((MaskedText(masked), summary))
    }

    /// Resolved entities with their source text, in document order
    pub fn entity_details(&self, text: &str) -> Result<Vec<TextSpan>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.resolved_spans(text)
    }

    fn resolved_spans(&self, text: &str) -> Result<Vec<TextSpan>> {
        let detected = self.recognizer.detect(text)?;
        let detected_count = detected.len();
        let resolved = resolve_spans(text, detected);

        if resolved.len() < detected_count {
            debug!(
                detected = detected_count,
                retained = resolved.len(),
                "dropped invalid or overlapping spans"
            );
        }
        Ok(resolved)
    }
}

/// Validate, order, and de-overlap recognizer output.
///
/// Spans with empty or out-of-range offsets are dropped. The rest are
/// sorted by start ascending, then end descending, and a span is kept only
/// if it starts at or after the end of the last kept span. Each kept span's
/// `text` is refreshed from `source`.
pub fn resolve_spans(source: &str, mut spans: Vec<TextSpan>) -> Vec<TextSpan> {
    spans.retain(|span| span.is_valid_for(source));
    spans.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    let mut resolved: Vec<TextSpan> = Vec::with_capacity(spans.len());
    for mut span in spans {
        if let Some(last) = resolved.last()
            && span.start < last.end
        {
            continue;
        }
        span.text = source[span.start..span.end].to_string();
        resolved.push(span);
    }
    resolved
}

// `spans` must come from `resolve_spans` for the same source.
fn mask(source: &str, spans: &[TextSpan]) -> String {
    let mut result = String::with_capacity(source.len());
    let mut cursor = 0;

    for span in spans {
        result.push_str(&source[cursor..span.start]);
        result.push_str(&span.entity_type.placeholder());
        cursor = span.end;
    }
    result.push_str(&source[cursor..]);

    result
}
