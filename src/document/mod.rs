//! Document ingestion: extraction seam, text assembly, pagination.
//!
//! A document becomes an ordered sequence of [`PageContent`] — plain page
//! text plus any extracted image references.  Format decoding lives behind
//! [`DocumentSource`]; the helpers here ([`assemble_page_text`],
//! [`paginate`]) are the in-crate text plumbing every source shares.

pub mod assemble;
pub mod source;

// ---------------------------------------------------------------------------
// PageContent
// ---------------------------------------------------------------------------

/// One extracted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Plain text of the page.
    pub text: String,
    /// References to images extracted from the page (data URLs or paths).
    pub images: Vec<String>,
}

impl PageContent {
    /// A text-only page.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            images: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use assemble::{assemble_page_text, paginate};
pub use source::{DocumentSource, ExtractError, PlainTextSource};
