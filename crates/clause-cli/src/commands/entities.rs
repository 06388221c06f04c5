use anyhow::Result;
use clause_config::Config;
use std::path::Path;

use super::{build_redactor, read_document};

pub fn handle(input: &Path, json: bool, config: &Config) -> Result<()> {
    let document = read_document(input)?;
    let entities = build_redactor(config)?.entity_details(document.text())?;

    if json {
        let output = serde_json::json!({
            "entities": entities,
            "total_entities": entities.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if entities.is_empty() {
        println!("No entities found.");
        return Ok(());
    }

    println!("Entities ({}):", entities.len());
    for span in &entities {
        println!("  [{}..{}] {:<8} {}", span.start, span.end, span.entity_type.as_str(), span.text);
    }

    Ok(())
}
