//! Page text assembly and plain-text pagination.
//!
//! Extractors hand back per-page text fragments (for PDFs, the raw text
//! items of the content stream).  [`assemble_page_text`] joins them into
//! one readable string; [`paginate`] turns a flat plain-text document into
//! reader pages.

use super::PageContent;

/// Average fragment length below which a page is treated as
/// letter-fragmented (each item is a single glyph) and joined without
/// separators.
const FRAGMENT_AVG_LEN_THRESHOLD: f64 = 1.3;

// ---------------------------------------------------------------------------
// assemble_page_text
// ---------------------------------------------------------------------------

/// Join extracted text fragments into one page string.
///
/// Some documents deliver whole words per fragment, others a single letter
/// per fragment.  The mean fragment length decides the join: below
/// [`FRAGMENT_AVG_LEN_THRESHOLD`] fragments are concatenated directly,
/// otherwise they are space-separated.  Whitespace runs are then collapsed
/// to single spaces and the result trimmed.
///
/// # Examples
///
/// ```
/// use shadow_reader::document::assemble_page_text;
///
/// // Word fragments → spaces between them.
/// assert_eq!(assemble_page_text(&["Good", "morning"]), "Good morning");
///
/// // Letter fragments → joined directly.
/// assert_eq!(assemble_page_text(&["H", "i", " ", "y", "o", "u"]), "Hi you");
/// ```
pub fn assemble_page_text(items: &[&str]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let total_len: usize = items.iter().map(|item| item.chars().count()).sum();
    let avg_len = total_len as f64 / items.len() as f64;
    let separator = if avg_len < FRAGMENT_AVG_LEN_THRESHOLD {
        ""
    } else {
        " "
    };

    let joined = items.join(separator);
    collapse_whitespace(&joined)
}

/// Collapse every whitespace run to a single space and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// paginate
// ---------------------------------------------------------------------------

/// Split a flat plain-text document into pages of roughly `max_chars`.
///
/// Paragraphs (blank-line separated) are accumulated until the next one
/// would push the page past `max_chars`.  A paragraph longer than a whole
/// page gets a page of its own rather than being split mid-sentence.
/// Empty input yields a single empty page so the reader always has
/// something to show.
pub fn paginate(text: &str, max_chars: usize) -> Vec<PageContent> {
    let max_chars = max_chars.max(1);
    let mut pages: Vec<PageContent> = Vec::new();
    let mut current = String::new();

    for paragraph in text.split("\n\n") {
        let paragraph = collapse_whitespace(paragraph);
        if paragraph.is_empty() {
            continue;
        }

        let projected = current.chars().count() + 1 + paragraph.chars().count();
        if !current.is_empty() && projected > max_chars {
            pages.push(PageContent::from_text(std::mem::take(&mut current)));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&paragraph);
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(PageContent::from_text(current));
    }

    pages
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- assemble_page_text ---

    #[test]
    fn word_fragments_get_spaces() {
        assert_eq!(
            assemble_page_text(&["The", "quick", "fox"]),
            "The quick fox"
        );
    }

    #[test]
    fn letter_fragments_join_directly() {
        let items = ["H", "e", "l", "l", "o", " ", "y", "o", "u"];
        assert_eq!(assemble_page_text(&items), "Hello you");
    }

    #[test]
    fn whitespace_runs_collapse_to_single_spaces() {
        assert_eq!(
            assemble_page_text(&["Good ", "  morning", "\tall"]),
            "Good morning all"
        );
    }

    #[test]
    fn empty_items_yield_empty_page() {
        assert_eq!(assemble_page_text(&[]), "");
    }

    #[test]
    fn threshold_boundary_uses_spaces() {
        // avg = 1.5 ≥ 1.3 → word mode.
        assert_eq!(assemble_page_text(&["ab", "c"]), "ab c");
    }

    // ---- paginate ---

    #[test]
    fn short_text_is_one_page() {
        let pages = paginate("Just one short paragraph.", 200);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "Just one short paragraph.");
    }

    #[test]
    fn paragraphs_accumulate_until_the_limit() {
        let text = "aaaa aaaa\n\nbbbb bbbb\n\ncccc cccc";
        let pages = paginate(text, 20);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "aaaa aaaa bbbb bbbb");
        assert_eq!(pages[1].text, "cccc cccc");
    }

    #[test]
    fn oversized_paragraph_gets_its_own_page() {
        let long = "x".repeat(50);
        let text = format!("short one\n\n{long}\n\nshort two");
        let pages = paginate(&text, 20);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].text, long);
    }

    #[test]
    fn empty_input_yields_a_single_empty_page() {
        let pages = paginate("", 100);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "");
    }

    #[test]
    fn blank_paragraphs_are_skipped() {
        let pages = paginate("one\n\n\n\n\n\ntwo", 100);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "one two");
    }

    #[test]
    fn internal_newlines_inside_a_paragraph_become_spaces() {
        let pages = paginate("line one\nline two", 100);
        assert_eq!(pages[0].text, "line one line two");
    }
}
