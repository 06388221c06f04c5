//! Entity spans reported by recognizers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Category of personally identifiable information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    #[serde(alias = "ORGANIZATION")]
    Org,
    #[serde(alias = "GPE", alias = "LOC")]
    Location,
    Date,
    #[serde(alias = "PHONE_NUMBER")]
    Phone,
    Email,
    Other,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Org => "ORG",
            EntityType::Location => "LOCATION",
            EntityType::Date => "DATE",
            EntityType::Phone => "PHONE",
            EntityType::Email => "EMAIL",
            EntityType::Other => "OTHER",
        }
    }

    /// Token written in place of a masked span, e.g. `[PERSON]`
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PERSON" => Ok(EntityType::Person),
            "ORG" | "ORGANIZATION" => Ok(EntityType::Org),
            "LOCATION" | "GPE" | "LOC" => Ok(EntityType::Location),
            "DATE" => Ok(EntityType::Date),
            "PHONE" | "PHONE_NUMBER" => Ok(EntityType::Phone),
            "EMAIL" => Ok(EntityType::Email),
            "OTHER" => Ok(EntityType::Other),
            _ => Err(Error::UnknownEntityType(s.to_string())),
        }
    }
}

/// A contiguous range of source text tagged with an entity type.
///
/// `start` and `end` are byte offsets into the UTF-8 source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
    pub entity_type: EntityType,
    pub text: String,
}

impl TextSpan {
    pub fn new(start: usize, end: usize, entity_type: EntityType, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            entity_type,
            text: text.into(),
        }
    }

    /// Build a span from offsets, copying its text out of `source`.
    ///
    /// Returns `None` when the offsets do not describe a valid range.
    pub fn from_source(source: &str, start: usize, end: usize, entity_type: EntityType) -> Option<Self> {
        let text = source.get(start..end)?;
        if start >= end {
            return None;
        }
        Some(Self::new(start, end, entity_type, text))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty, inside `source`, and on char boundaries at both ends
    pub fn is_valid_for(&self, source: &str) -> bool {
        self.start < self.end
            && self.end <= source.len()
            && source.is_char_boundary(self.start)
            && source.is_char_boundary(self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(EntityType::Person.placeholder(), "[PERSON]");
        assert_eq!(EntityType::Org.placeholder(), "[ORG]");
        assert_eq!(EntityType::Phone.placeholder(), "[PHONE]");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("GPE".parse::<EntityType>().unwrap(), EntityType::Location);
        assert_eq!("phone_number".parse::<EntityType>().unwrap(), EntityType::Phone);
        assert_eq!(" org ".parse::<EntityType>().unwrap(), EntityType::Org);
        assert!("SPACESHIP".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EntityType::Location).unwrap();
        assert_eq!(json, "\"LOCATION\"");

        let parsed: EntityType = serde_json::from_str("\"GPE\"").unwrap();
        assert_eq!(parsed, EntityType::Location);
    }

    #[test]
    fn test_span_validity() {
        let source = "Héllo world";

        assert!(TextSpan::new(0, 5, EntityType::Person, "Héll").is_valid_for(source));
        // Inside the two-byte 'é'
        assert!(!TextSpan::new(0, 2, EntityType::Person, "H").is_valid_for(source));
        assert!(!TextSpan::new(3, 3, EntityType::Person, "").is_valid_for(source));
        assert!(!TextSpan::new(4, 40, EntityType::Person, "").is_valid_for(source));
    }

    #[test]
    fn test_from_source() {
        let span = TextSpan::from_source("Call Alice now", 5, 10, EntityType::Person).unwrap();
        assert_eq!(span.text, "Alice");
        assert_eq!(span.len(), 5);

        assert!(TextSpan::from_source("short", 2, 99, EntityType::Person).is_none());
        assert!(TextSpan::from_source("short", 3, 3, EntityType::Person).is_none());
    }
}
