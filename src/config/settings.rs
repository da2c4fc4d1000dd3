//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across
//! threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the speech capabilities (capture and synthesis).
///
/// Voice selection and playback rate are explicit configuration handed to
/// each `speak` call — there is no ambient "currently selected voice"
/// state anywhere in the crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// BCP-47 locale passed to the recognizer.  The reader targets English
    /// material, so this stays an English variant.
    pub locale: String,
    /// Synthesis voice id — `None` means the engine default.
    pub voice: Option<String>,
    /// Synthesis playback rate, 1.0 = normal speed.
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            voice: None,
            rate: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ExplainConfig
// ---------------------------------------------------------------------------

/// Settings for the explanation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Base URL of the OpenAI-compatible API.
    ///
    /// Groq default: `https://api.groq.com/openai`
    pub base_url: String,
    /// API key — `None` falls back to the `GROQ_API_KEY` environment
    /// variable; missing both is a configuration error surfaced as display
    /// text, never a crash.
    pub api_key: Option<String>,
    /// Model identifier sent to the API.
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Maximum seconds to wait for a response before timing out.
    pub timeout_secs: u64,
}

impl ExplainConfig {
    /// The API key to use: config value first, then the `GROQ_API_KEY`
    /// environment variable.  Empty strings count as missing.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("GROQ_API_KEY").ok().filter(|key| !key.is_empty()))
    }
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai".into(),
            api_key: None,
            model: "llama-3.3-70b-versatile".into(),
            temperature: 0.7,
            timeout_secs: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Settings for the reading surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Approximate characters per page when paginating plain text.
    pub page_chars: usize,
    /// Minimum selection length before a sentence becomes selectable
    /// (filters accidental one-letter selections).
    pub min_selection_chars: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            page_chars: 1200,
            min_selection_chars: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use shadow_reader::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Speech capture / synthesis settings.
    pub speech: SpeechConfig,
    /// Explanation service settings.
    pub explain: ExplainConfig,
    /// Reading surface settings.
    pub reader: ReaderConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a
    /// missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
