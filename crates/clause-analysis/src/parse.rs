//! Response parsing
//!
//! Models wrap their JSON in prose or code fences often enough that the
//! response is scanned for the outermost object rather than parsed whole.

use clause_core::RiskAssessment;
use serde::Deserialize;
use serde_json::Number;
use tracing::debug;

/// Substring from the first `{` to the last `}` inclusive.
///
/// Returns `None` when either brace is missing or they are out of order.
pub fn extract_json_object(body: &str) -> Option<&str> {
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}

#[derive(Deserialize)]
struct RawAssessment {
    risk_score: Option<Number>,
    #[serde(default)]
    risk_level: Option<String>,
    summary: Option<String>,
    #[serde(default)]
    financial_risks: Vec<String>,
    #[serde(default)]
    privacy_risks: Vec<String>,
    #[serde(default)]
    legal_risks: Vec<String>,
}

/// Extract and validate an assessment from a raw model response.
///
/// The error string is suitable for showing to the user.
pub fn parse_assessment(body: &str) -> Result<RiskAssessment, String> {
    let json = extract_json_object(body).ok_or_else(|| "No valid JSON found in AI response".to_string())?;

    let raw: RawAssessment = serde_json::from_str(json)
        .map_err(|e| format!("Failed to parse AI response as JSON: {}", e))?;

    let score = raw
        .risk_score
        .ok_or_else(|| "AI response is missing risk_score".to_string())
        .and_then(|n| integral_score(&n))?;

    let summary = raw
        .summary
        .ok_or_else(|| "AI response is missing summary".to_string())?;

    let assessment = RiskAssessment::new(
        score,
        summary,
        raw.financial_risks,
        raw.privacy_risks,
        raw.legal_risks,
    )
    .map_err(|e| format!("Invalid AI response: {}", e))?;

    if let Some(reported) = raw.risk_level
        && !reported.eq_ignore_ascii_case(assessment.risk_level.as_str())
    {
        debug!(
            reported = %reported,
            derived = %assessment.risk_level,
            "model risk level disagrees with score, using derived level"
        );
    }

    Ok(assessment)
}

fn integral_score(n: &Number) -> Result<i64, String> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(format!("risk_score must be an integer, got {}", n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clause_core::RiskLevel;

    #[test]
    fn test_extract_with_noise() {
        let body = "Here you go: {\"a\": {\"b\": 1}} hope it helps";
        assert_eq!(extract_json_object(body), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_missing_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("only { open"), None);
        assert_eq!(extract_json_object("} reversed {"), None);
    }

    #[test]
    fn test_parse_noisy_response() {
        let body = "noise {\"risk_score\": 42, \"risk_level\": \"Medium\", \"summary\": \"ok\", \"financial_risks\": [], \"privacy_risks\": [], \"legal_risks\": []} trailing";

        let assessment = parse_assessment(body).unwrap();
        assert_eq!(assessment.risk_score, 42);
        // Level follows the fixed thresholds, not the model's label
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.summary, "ok");
    }

    #[test]
    fn test_parse_code_fenced_response() {
        let body = "```json\n{\n  \"risk_score\": 85,\n  \"summary\": \"Standard lease\",\n  \"legal_risks\": [\"Auto-renewal clause\"]\n}\n```";

        let assessment = parse_assessment(body).unwrap();
        assert_eq!(assessment.risk_score, 85);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.financial_risks.is_empty());
        assert_eq!(assessment.legal_risks, vec!["Auto-renewal clause".to_string()]);
    }

    #[test]
    fn test_parse_float_score() {
        let assessment = parse_assessment(r#"{"risk_score": 60.0, "summary": "s"}"#).unwrap();
        assert_eq!(assessment.risk_score, 60);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);

        assert!(parse_assessment(r#"{"risk_score": 60.5, "summary": "s"}"#).is_err());
    }

    #[test]
    fn test_parse_no_json() {
        let err = parse_assessment("I cannot help with that.").unwrap_err();
        assert!(err.contains("No valid JSON"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_assessment("{risk_score: forty}").unwrap_err();
        assert!(err.contains("Failed to parse"));
    }

    #[test]
    fn test_parse_missing_fields() {
        let err = parse_assessment(r#"{"summary": "s"}"#).unwrap_err();
        assert!(err.contains("risk_score"));

        let err = parse_assessment(r#"{"risk_score": 10}"#).unwrap_err();
        assert!(err.contains("summary"));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(parse_assessment(r#"{"risk_score": 101, "summary": "s"}"#).is_err());
        assert!(parse_assessment(r#"{"risk_score": -5, "summary": "s"}"#).is_err());
    }

    #[test]
    fn test_parse_non_string_risks() {
        let err = parse_assessment(r#"{"risk_score": 10, "summary": "s", "legal_risks": [1, 2]}"#).unwrap_err();
        assert!(err.contains("Failed to parse"));
    }
}
