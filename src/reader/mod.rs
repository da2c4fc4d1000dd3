//! The reading surface — open book, page cursor, sentence selection.

pub mod surface;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use surface::ReaderSurface;
