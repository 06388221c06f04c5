use std::collections::BTreeMap;

use clause_core::{AnalysisResult, EntityType, RedactionSummary, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::text;

/// Key-value export of a processed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub risk_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub financial_risks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub privacy_risks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub legal_risks: Option<Vec<String>>,
    pub redaction_summary: BTreeMap<EntityType, usize>,
    pub total_redactions: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_message: Option<String>,
}

/// Both export forms of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    structured: StructuredReport,
    text: String,
}

impl Report {
    pub fn structured(&self) -> &StructuredReport {
        &self.structured
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pretty-printed JSON with a stable key order
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.structured)
    }

    /// Hex blake3 hash of the textual report
    pub fn digest(&self) -> String {
        blake3::hash(self.text.as_bytes()).to_hex().to_string()
    }
}

/// Combine a redaction summary and an analysis result into a report.
///
/// Pure: no I/O, and no state beyond the two inputs.
pub fn assemble(summary: &RedactionSummary, analysis: &AnalysisResult) -> Report {
    let (financial_risks, privacy_risks, legal_risks) = match analysis.assessment() {
        Some(a) => (
            Some(a.financial_risks.clone()),
            Some(a.privacy_risks.clone()),
            Some(a.legal_risks.clone()),
        ),
        None => (None, None, None),
    };

    let structured = StructuredReport {
        success: analysis.success(),
        risk_score: analysis.risk_score(),
        risk_level: analysis.risk_level(),
        summary: analysis.summary().map(str::to_string),
        financial_risks,
        privacy_risks,
        legal_risks,
        redaction_summary: summary.breakdown().clone(),
        total_redactions: summary.total(),
        error_message: analysis.error_message().map(str::to_string),
    };
    let text = text::render(&structured);

    Report { structured, text }
}

/// Stateless handle for callers that prefer a value to pass around
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(&self, summary: &RedactionSummary, analysis: &AnalysisResult) -> Report {
        assemble(summary, analysis)
    }
}
