//! Fixed-layout text rendering

use std::fmt::Write;

use crate::StructuredReport;

const TITLE: &str = "ClearClause Analysis Report";

/// Render the human-readable report from its structured form
pub fn render(report: &StructuredReport) -> String {
    let mut out = String::new();

    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(TITLE.len()));
    out.push_str("\n\n");

    match (report.risk_score, report.risk_level) {
        (Some(score), Some(level)) if report.success => {
            let _ = writeln!(out, "Risk Score: {}/100", score);
            let _ = writeln!(out, "Risk Level: {}", level);
            let _ = writeln!(out, "Summary: {}", one_line(report.summary.as_deref().unwrap_or("")));
            out.push('\n');

            section(&mut out, "Financial Risks", report.financial_risks.as_deref());
            section(&mut out, "Privacy Risks", report.privacy_risks.as_deref());
            section(&mut out, "Legal Risks", report.legal_risks.as_deref());
        }
        _ => {
            let message = report.error_message.as_deref().unwrap_or("unknown error");
            let _ = writeln!(out, "Analysis unavailable: {}", one_line(message));
            out.push('\n');
        }
    }

    out.push_str("Redactions:\n");
    if report.redaction_summary.is_empty() {
        out.push_str("No PII detected\n");
    } else {
        for (entity_type, count) in &report.redaction_summary {
            let _ = writeln!(out, "- {}: {}", entity_type, count);
        }
    }
    let _ = writeln!(out, "Total Redactions: {}", report.total_redactions);

    out
}

fn section(out: &mut String, label: &str, items: Option<&[String]>) {
    let items = items.unwrap_or_default();
    let _ = writeln!(out, "{}:", label);
    if items.is_empty() {
        out.push_str("None identified\n");
    } else {
        for item in items {
            let _ = writeln!(out, "- {}", one_line(item));
        }
    }
    out.push('\n');
}

// Each entry occupies exactly one line of the layout.
fn one_line(value: &str) -> String {
    value.split(['\r', '\n']).filter(|part| !part.is_empty()).collect::<Vec<_>>().join(" ")
}
