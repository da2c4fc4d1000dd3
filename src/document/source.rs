//! Document sources — where pages come from.
//!
//! [`DocumentSource`] is the seam for format-specific extraction.  Real PDF
//! decoding is an external concern and stays behind this trait; the crate
//! ships [`PlainTextSource`], which reads UTF-8 text files and paginates
//! them for the reader.

use std::path::Path;

use thiserror::Error;

use super::assemble::paginate;
use super::PageContent;

// ---------------------------------------------------------------------------
// ExtractError
// ---------------------------------------------------------------------------

/// Errors reported while extracting a document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source file could not be read.
    #[error("could not read document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but this source cannot decode it.
    #[error("unsupported document format: {0}")]
    Unsupported(String),
}

// ---------------------------------------------------------------------------
// DocumentSource trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for document extractors.
///
/// An implementation turns a file on disk into an ordered sequence of
/// [`PageContent`].  The reader only ever consumes individual sentences
/// the user selects from that text, so extraction quality affects display
/// but never the scoring core.
pub trait DocumentSource: Send + Sync {
    fn extract(&self, path: &Path) -> Result<Vec<PageContent>, ExtractError>;
}

// Compile-time assertion: Box<dyn DocumentSource> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn DocumentSource>) {}
};

// ---------------------------------------------------------------------------
// PlainTextSource
// ---------------------------------------------------------------------------

/// Built-in source for plain UTF-8 text files.
///
/// The file is read whole and split into pages of roughly `page_chars`
/// characters at paragraph boundaries (see
/// [`paginate`](crate::document::paginate)).
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    page_chars: usize,
}

impl PlainTextSource {
    pub fn new(page_chars: usize) -> Self {
        Self { page_chars }
    }
}

impl DocumentSource for PlainTextSource {
    fn extract(&self, path: &Path) -> Result<Vec<PageContent>, ExtractError> {
        let text = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let pages = paginate(&text, self.page_chars);
        log::debug!(
            "extract: {} → {} pages (~{} chars each)",
            path.display(),
            pages.len(),
            self.page_chars
        );
        Ok(pages)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn extracts_and_paginates_a_text_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "First paragraph here.\n\nSecond paragraph here.").unwrap();

        let source = PlainTextSource::new(30);
        let pages = source.extract(file.path()).expect("extract");

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "First paragraph here.");
        assert_eq!(pages[1].text, "Second paragraph here.");
        assert!(pages.iter().all(|p| p.images.is_empty()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = PlainTextSource::new(100);
        let err = source
            .extract(Path::new("/nonexistent/book.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/book.txt"));
    }

    #[test]
    fn empty_file_still_yields_one_page() {
        let file = NamedTempFile::new().expect("temp file");
        let source = PlainTextSource::new(100);
        let pages = source.extract(file.path()).expect("extract");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "");
    }
}
