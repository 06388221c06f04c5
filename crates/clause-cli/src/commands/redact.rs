use anyhow::Result;
use clause_config::Config;
use std::path::Path;

use super::{build_redactor, read_document, warn_without_ner};

pub fn handle(input: &Path, json: bool, config: &Config) -> Result<()> {
    warn_without_ner(config);
    let document = read_document(input)?;
    let redactor = build_redactor(config)?;
    let (masked, summary) = redactor.redact(document.text())?;

    if json {
        let output = serde_json::json!({
            "redacted_text": masked,
            "redaction_summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", masked);
    println!();
    println!("Total redactions: {}", summary.total());
    if summary.is_empty() {
        println!("  No PII detected");
    }
    for (entity_type, count) in summary.breakdown() {
        println!("  {}: {}", entity_type, count);
    }

    Ok(())
}
