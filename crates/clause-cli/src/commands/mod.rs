pub mod analyze;
pub mod config;
pub mod entities;
pub mod redact;

use anyhow::{Context, Result};
use clause_config::Config;
use clause_engine::{Document, recognizer_from_config};
use clause_security::Redactor;
use std::io::Read;
use std::path::Path;

/// Read extracted text from a file, or stdin when the path is `-`
pub fn read_document(input: &Path) -> Result<Document> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?
    };

    Ok(Document::from_extracted(&raw))
}

/// Notice printed when only pattern-based detection is available
pub fn ner_warning(config: &Config) -> Option<&'static str> {
    if config.redaction.has_ner() {
        return None;
    }
    Some(
        "Warning: no NER command configured ([redaction] ner_command); \
         person names and organizations will not be masked.",
    )
}

pub fn warn_without_ner(config: &Config) {
    if let Some(warning) = ner_warning(config) {
        eprintln!("{}", warning);
    }
}

/// Local-only redactor built from config
pub fn build_redactor(config: &Config) -> Result<Redactor> {
    let recognizer = recognizer_from_config(config).context("Failed to initialize entity recognizer")?;
    Ok(Redactor::new(recognizer))
}
