//! Book library: metadata index, stored book content, reading progress.
//!
//! Persistence is deliberately plain — two JSON files plus a content
//! directory (see [`store`]).  Nothing here interacts with the scoring
//! core; the library only feeds the reading surface.

pub mod store;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use store::{BookMetadata, Library, LibraryError};
