//! Recognizer backed by an external NER program
//!
//! The program receives the document on stdin and prints a JSON array of
//! entities on stdout:
//!
//! ```json
//! [{"label": "PERSON", "start": 8, "end": 18}]
//! ```
//!
//! `start` and `end` count characters, as most NER toolkits report them.
//! Labels outside PERSON, ORG, GPE/LOC and DATE are ignored.

use std::io::Write;
use std::process::{Command, Stdio};

use clause_core::{EntityType, TextSpan};
use serde::Deserialize;
use tracing::debug;

use crate::recognizer::EntityRecognizer;
use crate::{RedactionError, Result};

const REDACTABLE_LABELS: &[&str] = &["PERSON", "ORG", "GPE", "LOC", "LOCATION", "DATE"];

#[derive(Debug, Deserialize)]
struct RawEntity {
    #[serde(alias = "type")]
    label: String,
    start: usize,
    end: usize,
}

/// Runs a configured NER command once per document
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` list; `None` when the list is empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    fn run(&self, text: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| unavailable(format!("failed to start '{}': {}", self.program, e)))?;

        // Feed stdin from another thread so a chatty child cannot block on a
        // full stdout pipe while we are still writing.
        let stdin = child.stdin.take();
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or(Ok(()));
            (output, written)
        });

        let (output, written) = output;
        let output = output.map_err(|e| unavailable(format!("'{}' did not finish: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(unavailable(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| unavailable(format!("failed to send document to '{}': {}", self.program, e)))?;

        Ok(output.stdout)
    }
}

impl EntityRecognizer for CommandRecognizer {
    fn detect(&self, text: &str) -> Result<Vec<TextSpan>> {
        let stdout = self.run(text)?;
        let entities: Vec<RawEntity> = serde_json::from_slice(&stdout)
            .map_err(|e| unavailable(format!("invalid output from '{}': {}", self.program, e)))?;

        let offsets = char_offsets(text);
        let mut spans = Vec::with_capacity(entities.len());
        for entity in entities {
            let label = entity.label.trim().to_ascii_uppercase();
            if !REDACTABLE_LABELS.contains(&label.as_str()) {
                continue;
            }
            let Ok(entity_type) = label.parse::<EntityType>() else {
                continue;
            };

            let range = offsets.get(entity.start).zip(offsets.get(entity.end));
            match range.and_then(|(&start, &end)| TextSpan::from_source(text, start, end, entity_type)) {
                Some(span) => spans.push(span),
                None => debug!(
                    label = %label,
                    start = entity.start,
                    end = entity.end,
                    "ignoring entity with invalid offsets"
                ),
            }
        }

        Ok(spans)
    }

    fn name(&self) -> &str {
        "command"
    }
}

// Byte offset of every char index, plus one entry for the end of the text.
fn char_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

fn unavailable(message: String) -> RedactionError {
    RedactionError::RecognitionUnavailable(message)
}
