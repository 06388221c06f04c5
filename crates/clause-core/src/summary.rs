//! Redaction summary

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EntityType, TextSpan};

/// Per-type count of masked spans for one document.
///
/// Built once by the redactor and read-only afterwards. `total` always
/// equals the sum of the per-type counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SummaryRepr", into = "SummaryRepr")]
pub struct RedactionSummary {
    counts: BTreeMap<EntityType, usize>,
    total: usize,
}

impl RedactionSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Count the given (already resolved) spans by type
    pub fn from_spans<'a>(spans: impl IntoIterator<Item = &'a TextSpan>) -> Self {
        let mut counts = BTreeMap::new();
        for span in spans {
            *counts.entry(span.entity_type).or_insert(0) += 1;
        }
        Self::from_counts(counts)
    }

    pub fn from_counts(counts: BTreeMap<EntityType, usize>) -> Self {
        let counts: BTreeMap<_, _> = counts.into_iter().filter(|(_, n)| *n > 0).collect();
        let total = counts.values().sum();
        Self { counts, total }
    }

    pub fn count(&self, entity_type: EntityType) -> usize {
        self.counts.get(&entity_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Non-zero counts in entity-type order
    pub fn breakdown(&self) -> &BTreeMap<EntityType, usize> {
        &self.counts
    }
}

#[derive(Serialize, Deserialize)]
struct SummaryRepr {
    entity_breakdown: BTreeMap<EntityType, usize>,
    total_redactions: usize,
}

impl From<SummaryRepr> for RedactionSummary {
    // The stored total is ignored and recomputed from the breakdown.
    fn from(repr: SummaryRepr) -> Self {
        Self::from_counts(repr.entity_breakdown)
    }
}

impl From<RedactionSummary> for SummaryRepr {
    fn from(summary: RedactionSummary) -> Self {
        Self {
            entity_breakdown: summary.counts,
            total_redactions: summary.total,
        }
    }
}
