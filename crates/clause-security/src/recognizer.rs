//! Entity recognizers
//!
//! A recognizer turns raw text into typed spans. The statistical NER model
//! is an external collaborator; anything implementing [`EntityRecognizer`]
//! can be plugged into the [`Redactor`](crate::Redactor), and
//! [`CommandRecognizer`](crate::CommandRecognizer) runs one as a subprocess. The built-in
//! [`PatternRecognizer`] covers the structured PII that regexes find
//! reliably (phone numbers, e-mail addresses, dates).

use std::sync::Arc;

use clause_core::{EntityType, TextSpan};
use regex::Regex;

use crate::{RedactionError, Result};

/// Capability: given text, return the spans of PII found in it.
///
/// Implementations must be deterministic for identical input and safe to
/// call from several requests at once. Hosts wrapping a recognizer that is
/// not thread-safe must serialize access before handing it over.
pub trait EntityRecognizer: Send + Sync {
    /// Detect entities. Offsets are byte offsets into `text`.
    fn detect(&self, text: &str) -> Result<Vec<TextSpan>>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "recognizer"
    }
}

impl<R: EntityRecognizer + ?Sized> EntityRecognizer for Arc<R> {
    fn detect(&self, text: &str) -> Result<Vec<TextSpan>> {
        (**self).detect(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

struct PatternRule {
    name: String,
    entity_type: EntityType,
    regex: Regex,
}

/// Regex-based recognizer for structured PII
pub struct PatternRecognizer {
    rules: Vec<PatternRule>,
}

// (name, type, pattern). Longer phone formats come first; overlaps between
// rules are resolved later by the redactor.
const BUILTIN_PATTERNS: &[(&str, EntityType, &str)] = &[
    (
        "phone",
        EntityType::Phone,
        r"(?:\+?1[-.\s]?)?(?:\([0-9]{3}\)\s?|\b[0-9]{3}[-.\s]?)[0-9]{3}[-.\s]?[0-9]{4}\b",
    ),
    ("phone_local", EntityType::Phone, r"\b[0-9]{3}-[0-9]{4}\b"),
    (
        "email",
        EntityType::Email,
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    ),
    (
        "date_numeric",
        EntityType::Date,
        r"\b(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4})\b",
    ),
    (
        "date_written",
        EntityType::Date,
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+[0-9]{1,2}(?:st|nd|rd|th)?,?\s+[0-9]{4}\b",
    ),
];

impl PatternRecognizer {
    /// Recognizer with the built-in patterns
    pub fn new() -> Result<Self> {
        let mut recognizer = Self { rules: Vec::new() };
        for (name, entity_type, pattern) in BUILTIN_PATTERNS {
            recognizer.push_rule(name, *entity_type, pattern)?;
        }
        Ok(recognizer)
    }

    /// Recognizer with no rules at all
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom pattern; `entity_type` accepts names like `PERSON` or `GPE`.
    pub fn with_pattern(mut self, name: &str, entity_type: &str, pattern: &str) -> Result<Self> {
        let entity_type: EntityType = entity_type
            .parse()
            .map_err(|_| RedactionError::UnknownEntityType(entity_type.to_string()))?;
        self.push_rule(name, entity_type, pattern)?;
        Ok(self)
    }

    fn push_rule(&mut self, name: &str, entity_type: EntityType, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|e| RedactionError::InvalidPattern {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        self.rules.push(PatternRule {
            name: name.to_string(),
            entity_type,
            regex,
        });
        Ok(())
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn detect(&self, text: &str) -> Result<Vec<TextSpan>> {
        let mut spans = Vec::new();

        for rule in &self.rules {
            let before = spans.len();
            spans.extend(
                rule.regex
                    .find_iter(text)
                    .map(|m| TextSpan::new(m.start(), m.end(), rule.entity_type, m.as_str())),
            );
            if spans.len() > before {
                tracing::trace!(rule = %rule.name, matches = spans.len() - before, "pattern matched");
            }
        }

        Ok(spans)
    }

    fn name(&self) -> &str {
        "patterns"
    }
}

/// Runs several recognizers and concatenates their spans.
///
/// Typically an NER model followed by the pattern recognizer. If any member
/// fails, the whole detection fails.
pub struct CompositeRecognizer {
    members: Vec<Arc<dyn EntityRecognizer>>,
}

impl CompositeRecognizer {
    pub fn new(members: Vec<Arc<dyn EntityRecognizer>>) -> Self {
        Self { members }
    }
}

impl EntityRecognizer for CompositeRecognizer {
    fn detect(&self, text: &str) -> Result<Vec<TextSpan>> {
        let mut spans = Vec::new();
        for member in &self.members {
            spans.extend(member.detect(text)?);
        }
        Ok(spans)
    }

    fn name(&self) -> &str {
        "composite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detected(text: &str) -> Vec<(EntityType, String)> {
        let recognizer = PatternRecognizer::new().unwrap();
        recognizer
            .detect(text)
            .unwrap()
            .into_iter()
            .map(|s| (s.entity_type, s.text))
            .collect()
    }

    #[test]
    fn test_phone_formats() {
        let found = detected("Call (555) 123-4567 or +1 555.987.6543 today");
        assert!(found.contains(&(EntityType::Phone, "(555) 123-4567".to_string())));
        assert!(found.contains(&(EntityType::Phone, "+1 555.987.6543".to_string())));
    }

    #[test]
    fn test_local_phone() {
        let found = detected("phone 555-1234.");
        assert_eq!(found, vec![(EntityType::Phone, "555-1234".to_string())]);
    }

    #[test]
    fn test_email() {
        let found = detected("Write to jane.doe@example.com please");
        assert_eq!(found, vec![(EntityType::Email, "jane.doe@example.com".to_string())]);
    }

    #[test]
    fn test_dates() {
        let found = detected("Signed on 2024-03-15 and renewed March 3rd, 2025.");
        assert!(found.contains(&(EntityType::Date, "2024-03-15".to_string())));
        assert!(found.contains(&(EntityType::Date, "March 3rd, 2025".to_string())));
    }

    #[test]
    fn test_no_pii() {
        assert!(detected("Just some ordinary contract wording").is_empty());
    }

    #[test]
    fn test_custom_pattern() {
        let recognizer = PatternRecognizer::empty()
            .with_pattern("acme", "ORG", r"Acme Corp")
            .unwrap();

        let spans = recognizer.detect("Acme Corp signs").unwrap();
        assert_eq!(spans, vec![TextSpan::new(0, 9, EntityType::Org, "Acme Corp")]);
    }

    #[test]
    fn test_custom_pattern_errors() {
        let bad_type = PatternRecognizer::empty().with_pattern("x", "SPACESHIP", "x");
        assert!(matches!(bad_type, Err(RedactionError::UnknownEntityType(_))));

        let bad_regex = PatternRecognizer::empty().with_pattern("x", "ORG", "(unclosed");
        assert!(matches!(bad_regex, Err(RedactionError::InvalidPattern { .. })));
    }

    struct Failing;

    impl EntityRecognizer for Failing {
        fn detect(&self, _text: &str) -> Result<Vec<TextSpan>> {
            Err(RedactionError::RecognitionUnavailable("model not loaded".to_string()))
        }
    }

    #[test]
    fn test_composite_concatenates() {
        let names = PatternRecognizer::empty()
            .with_pattern("name", "PERSON", r"John Smith")
            .unwrap();
        let composite = CompositeRecognizer::new(vec![
            Arc::new(names),
            Arc::new(PatternRecognizer::new().unwrap()),
        ]);

        let spans = composite.detect("John Smith, 555-1234").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].entity_type, EntityType::Person);
        assert_eq!(spans[1].entity_type, EntityType::Phone);
    }

    #[test]
    fn test_composite_propagates_failure() {
        let composite = CompositeRecognizer::new(vec![
            Arc::new(PatternRecognizer::new().unwrap()),
            Arc::new(Failing),
        ]);

        let result = composite.detect("anything");
        assert!(matches!(result, Err(RedactionError::RecognitionUnavailable(_))));
    }
}
