//! Extracted document text

/// Text handed over by the external extractor, already joined across pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Join page texts with newlines and trim the result.
    ///
    /// The recognizer later runs over the whole document at once, so
    /// entities split across a page break can still be found.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for page in pages {
            text.push_str(page.as_ref());
            text.push('\n');
        }
        Self {
            text: text.trim().to_string(),
        }
    }

    /// Split on form feeds, the page separator most extractors emit
    pub fn from_extracted(raw: &str) -> Self {
        Self::from_pages(raw.split('\x0c'))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
