//! Analysis prompt

use clause_security::MaskedText;

/// Fixed instructions sent ahead of every document
pub const INSTRUCTIONS: &str = r#"You are reviewing a document in which personal details have been replaced by bracketed placeholders such as [PERSON] or [PHONE]. Assess the risks it poses to the person signing or sharing it.

Respond with a single JSON object of exactly this shape:

{
  "risk_score": <integer 0-100>,
  "risk_level": "<High|Medium|Low>",
  "summary": "<one sentence on the overall risk>",
  "financial_risks": ["<specific financial risk>", ...],
  "privacy_risks": ["<specific privacy risk>", ...],
  "legal_risks": ["<specific legal risk>", ...]
}

Scoring bands (higher is safer):
- 0-50: High risk, several concerning issues
- 51-80: Medium risk, some areas of concern
- 81-100: Low risk, generally safe

Be concise and specific. Return only the JSON object, with no other text."#;

const DOCUMENT_DELIMITER: &str = "---DOCUMENT---";

/// Instructions followed by the masked text. Nothing else is included.
pub fn build_prompt(masked: &MaskedText) -> String {
    format!("{}\n\n{}\n{}\n", INSTRUCTIONS, DOCUMENT_DELIMITER, masked.as_str())
}
