//! Local PII detection and masking
//!
//! Nothing in this crate performs network I/O. The [`Redactor`] is the only
//! producer of [`MaskedText`], the type the analysis client accepts.

pub mod command;
pub mod error;
pub mod recognizer;
pub mod redactor;

use std::sync::Arc;

use lazy_static::lazy_static;

pub use command::CommandRecognizer;
pub use error::{RedactionError, Result};
pub use recognizer::{CompositeRecognizer, EntityRecognizer, PatternRecognizer};
pub use redactor::{MaskedText, Redactor, resolve_spans};

lazy_static! {
    // Built on first use and kept for the life of the process.
    static ref SHARED_RECOGNIZER: std::result::Result<Arc<PatternRecognizer>, RedactionError> =
        PatternRecognizer::new().map(Arc::new);
}

/// Process-wide default recognizer.
///
/// Initialization happens once, even under concurrent first calls. If it
/// failed, every call reports `RecognitionUnavailable`.
pub fn shared_recognizer() -> Result<Arc<PatternRecognizer>> {
    match &*SHARED_RECOGNIZER {
        Ok(recognizer) => Ok(Arc::clone(recognizer)),
        Err(e) => Err(RedactionError::RecognitionUnavailable(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_recognizer_is_reused() {
        let first = shared_recognizer().unwrap();
        let second = shared_recognizer().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_shared_recognizer_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| shared_recognizer().unwrap()))
            .collect();
        let recognizers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for recognizer in &recognizers[1..] {
            assert!(Arc::ptr_eq(&recognizers[0], recognizer));
        }
    }
}
