//! Reading surface state: the open book, the page cursor, and the selected
//! sentence.
//!
//! The surface is plain state — no I/O.  The front-end feeds it pages from
//! a `DocumentSource`, persists the page cursor through the library, and
//! forwards selection changes to the shadowing session and teacher panel.

use crate::document::PageContent;
use crate::text::split_sentences;

/// State of the currently open book.
///
/// Page numbers are 1-based throughout, matching what the reader displays.
/// Turning a page clears the sentence selection — a selection belongs to
/// the page it was made on.
#[derive(Debug, Clone)]
pub struct ReaderSurface {
    pages: Vec<PageContent>,
    page_number: usize,
    book_id: Option<String>,
    selected: Option<String>,
    min_selection_chars: usize,
}

impl ReaderSurface {
    pub fn new(min_selection_chars: usize) -> Self {
        Self {
            pages: Vec::new(),
            page_number: 1,
            book_id: None,
            selected: None,
            min_selection_chars,
        }
    }

    // -----------------------------------------------------------------------
    // Opening
    // -----------------------------------------------------------------------

    /// Show a book.  `start_page` (usually the saved progress) is clamped
    /// into the valid range.
    pub fn open(&mut self, book_id: Option<String>, pages: Vec<PageContent>, start_page: usize) {
        let num_pages = pages.len().max(1);
        self.pages = pages;
        self.page_number = start_page.clamp(1, num_pages);
        self.book_id = book_id;
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn book_id(&self) -> Option<&str> {
        self.book_id.as_deref()
    }

    // -----------------------------------------------------------------------
    // Page cursor
    // -----------------------------------------------------------------------

    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn current_page(&self) -> Option<&PageContent> {
        self.pages.get(self.page_number.wrapping_sub(1))
    }

    /// Jump to `page` (1-based).  Returns `false` when out of range.
    pub fn goto(&mut self, page: usize) -> bool {
        if page < 1 || page > self.pages.len() {
            return false;
        }
        if page != self.page_number {
            self.page_number = page;
            self.selected = None;
        }
        true
    }

    pub fn go_next(&mut self) -> bool {
        self.goto(self.page_number + 1)
    }

    pub fn go_prev(&mut self) -> bool {
        self.page_number > 1 && self.goto(self.page_number - 1)
    }

    // -----------------------------------------------------------------------
    // Sentence selection
    // -----------------------------------------------------------------------

    /// Sentences of the current page, in reading order.
    pub fn sentences(&self) -> Vec<String> {
        self.current_page()
            .map(|page| split_sentences(&page.text))
            .unwrap_or_default()
    }

    /// Select the `index`-th sentence (0-based) of the current page.
    ///
    /// Too-short sentences are not selectable (accidental selections, lone
    /// punctuation); those and out-of-range indices return `None` and leave
    /// the previous selection in place.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let sentence = self.sentences().into_iter().nth(index)?;
        if sentence.chars().count() < self.min_selection_chars {
            log::debug!("reader: selection too short, ignored: {sentence:?}");
            return None;
        }
        self.selected = Some(sentence);
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
