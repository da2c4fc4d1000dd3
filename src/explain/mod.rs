//! LLM-backed explanation ("Mini Maestro") for selected text.
//!
//! This module provides:
//! * [`Explainer`] — async trait implemented by explanation backends.
//! * [`ApiExplainer`] — OpenAI-compatible chat-completions client.
//! * [`PromptBuilder`] / [`PromptStyle`] — sentence vs. word-example prompts.
//! * [`Explanation`] — displayable outcome; failures become display text,
//!   never errors.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use shadow_reader::config::AppConfig;
//! use shadow_reader::explain::{ApiExplainer, Explainer, PromptStyle};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let explainer = ApiExplainer::from_config(&config.explain);
//!
//!     let explanation = explainer
//!         .explain("The early bird catches the worm", PromptStyle::Sentence)
//!         .await;
//!     println!("{}", explanation.text);
//! }
//! ```

pub mod prompt;
pub mod service;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use prompt::{PromptBuilder, PromptStyle};
pub use service::{ApiExplainer, Explainer, Explanation};
