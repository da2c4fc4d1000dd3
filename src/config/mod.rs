//! Application configuration: settings structs, TOML persistence and
//! platform paths.

pub mod paths;
pub mod settings;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use paths::AppPaths;
pub use settings::{AppConfig, ExplainConfig, ReaderConfig, SpeechConfig};
