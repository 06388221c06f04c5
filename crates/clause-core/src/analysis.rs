//! Risk analysis results

use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk band derived from a 0-100 score, where a higher score is safer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Fixed thresholds: 81-100 Low, 51-80 Medium, 0-50 High.
    ///
    /// Scores above 100 are treated as 100.
    pub fn from_score(score: u8) -> Self {
        match score {
            81.. => RiskLevel::Low,
            51..=80 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated assessment returned by the remote analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub summary: String,
    pub financial_risks: Vec<String>,
    pub privacy_risks: Vec<String>,
    pub legal_risks: Vec<String>,
}

impl RiskAssessment {
    /// Build an assessment, deriving the level from the score.
    ///
    /// Fails if the score is outside 0-100.
    pub fn new(
        risk_score: i64,
        summary: impl Into<String>,
        financial_risks: Vec<String>,
        privacy_risks: Vec<String>,
        legal_risks: Vec<String>,
    ) -> crate::Result<Self> {
        let risk_score = u8::try_from(risk_score)
            .ok()
            .filter(|score| *score <= 100)
            .ok_or(crate::Error::RiskScoreOutOfRange(risk_score))?;

        Ok(Self {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            summary: summary.into(),
            financial_risks,
            privacy_risks,
            legal_risks,
        })
    }
}

/// Why an analysis produced no assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisErrorKind {
    /// Every configured model failed or timed out
    Unavailable,
    /// A response arrived but no valid assessment could be extracted
    MalformedResponse,
    /// The caller abandoned the request
    Cancelled,
}

/// Outcome of one analysis request.
///
/// A failure never carries a score, and only a failure carries a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success(RiskAssessment),
    Failure {
        kind: AnalysisErrorKind,
        message: String,
    },
}

impl AnalysisResult {
    pub fn failure(kind: AnalysisErrorKind, message: impl Into<String>) -> Self {
        AnalysisResult::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }

    pub fn assessment(&self) -> Option<&RiskAssessment> {
        match self {
            AnalysisResult::Success(assessment) => Some(assessment),
            AnalysisResult::Failure { .. } => None,
        }
    }

    pub fn risk_score(&self) -> Option<u8> {
        self.assessment().map(|a| a.risk_score)
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.assessment().map(|a| a.risk_level)
    }

    pub fn summary(&self) -> Option<&str> {
        self.assessment().map(|a| a.summary.as_str())
    }

    pub fn error_kind(&self) -> Option<AnalysisErrorKind> {
        match self {
            AnalysisResult::Success(_) => None,
            AnalysisResult::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AnalysisResult::Success(_) => None,
            AnalysisResult::Failure { message, .. } => Some(message.as_str()),
        }
    }
}
