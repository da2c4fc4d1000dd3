//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\shadow-reader\
//!   macOS:   ~/Library/Application Support/shadow-reader/
//!   Linux:   ~/.config/shadow-reader/
//!
//! Data dir (library: index, progress, stored books):
//!   Windows: %LOCALAPPDATA%\shadow-reader\
//!   macOS:   ~/Library/Application Support/shadow-reader/
//!   Linux:   ~/.local/share/shadow-reader/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Root of the book library (`library.json`, `progress.json`, `books/`).
    pub library_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "shadow-reader";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let library_dir = data_dir.join("library");

        Self {
            config_dir,
            settings_file,
            library_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
