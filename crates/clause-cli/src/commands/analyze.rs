use anyhow::{Context, Result};
use clause_config::Config;
use clause_engine::Pipeline;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use super::{read_document, warn_without_ner};

/// How an `analyze` run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Analysed,
    /// The report was produced but the analysis service gave no result
    AnalysisFailed,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Analysed => 0,
            Outcome::AnalysisFailed => 2,
        }
    }
}

pub async fn handle(
    input: &Path,
    models: Vec<String>,
    json_out: Option<PathBuf>,
    text_out: Option<PathBuf>,
    mut config: Config,
) -> Result<Outcome> {
    if !models.is_empty() {
        config.analysis.models = models;
    }
    warn_without_ner(&config);

    let document = read_document(input)?;
    let pipeline = Pipeline::from_config(&config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, cancelling analysis...");
            on_interrupt.cancel();
        }
    });

    eprintln!(
        "Redacted text will be sent to: {}",
        pipeline.client().models().join(", ")
    );
    let output = pipeline.process_with_cancel(&document, cancel).await?;

    print!("{}", output.report.text());

    if let Some(path) = json_out {
        std::fs::write(&path, output.report.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("✓ Wrote {}", path.display());
    }
    if let Some(path) = text_out {
        std::fs::write(&path, output.report.text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("✓ Wrote {}", path.display());
    }

    if let Some(message) = output.analysis.error_message() {
        eprintln!("Error: {}", message);
        eprintln!("  The document was not analysed; you can retry.");
        return Ok(Outcome::AnalysisFailed);
    }

    Ok(Outcome::Analysed)
}
