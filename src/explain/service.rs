//! Explanation service client.
//!
//! [`ApiExplainer`] calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint (Groq by default).  Every failure mode — missing credentials,
//! rate limiting, error payloads, transport faults — is converted to a
//! displayable [`Explanation`] at this boundary; the read path never sees
//! an `Err`.
//!
//! Missing credentials are detected **before** any network call and yield
//! a fixed configuration message.  HTTP 429 is translated to a friendly
//! retry message for sentence explanations only; the word-examples style
//! passes the raw response text through.  Callers should not rely on that
//! asymmetry.

use async_trait::async_trait;

use crate::config::ExplainConfig;

use super::prompt::{PromptBuilder, PromptStyle};

// ---------------------------------------------------------------------------
// User-facing messages (learner language: Spanish)
// ---------------------------------------------------------------------------

const MSG_MISSING_KEY: &str = "⚠️ No se ha configurado la API Key. Añade api_key en settings.toml \
     o define la variable de entorno GROQ_API_KEY.";

const MSG_RATE_LIMITED: &str =
    "⏳ El maestro está atendiendo muchas consultas. Espera unos segundos y vuelve a intentarlo.";

const MSG_CONNECTION: &str = "Error de conexión con el servidor de IA.";

const MSG_EMPTY: &str = "No se pudo obtener una explicación.";

// ---------------------------------------------------------------------------
// Explanation
// ---------------------------------------------------------------------------

/// Displayable outcome of an explanation request.
///
/// `text` is always renderable as-is; `failed` marks it as an error notice
/// rather than actual teacher output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub failed: bool,
    pub text: String,
}

impl Explanation {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            failed: false,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            failed: true,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Explainer trait
// ---------------------------------------------------------------------------

/// Async interface for explanation backends.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn Explainer>`.  Note the infallible signature — converting
/// failures to display text is part of the contract.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, text: &str, style: PromptStyle) -> Explanation;
}

// ---------------------------------------------------------------------------
// ApiExplainer
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// All connection details (`base_url`, `api_key`, `model`) come from the
/// [`ExplainConfig`] passed to [`from_config`](ApiExplainer::from_config);
/// nothing is hardcoded.
pub struct ApiExplainer {
    client: reqwest::Client,
    config: ExplainConfig,
    prompts: PromptBuilder,
}

impl ApiExplainer {
    /// Build an `ApiExplainer` from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is the last-resort fallback
    /// if the builder fails.
    pub fn from_config(config: &ExplainConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
            prompts: PromptBuilder::new(),
        }
    }

    async fn request(&self, api_key: &str, text: &str, style: PromptStyle) -> Explanation {
        let (system_msg, user_msg) = self.prompts.build_chat(text, style);

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "temperature": self.config.temperature
        });

        let response = match self.client.post(&url).bearer_auth(api_key).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("explain: request failed: {e}");
                return Explanation::error(MSG_CONNECTION);
            }
        };

        let status = response.status();
        let raw = match response.text().await {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("explain: could not read response body: {e}");
                return Explanation::error(MSG_CONNECTION);
            }
        };

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Explanation::error(rate_limit_text(style, &raw));
        }

        let json: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("explain: unparseable response ({status}): {e}");
                return Explanation::error(MSG_CONNECTION);
            }
        };

        if let Some(err) = json.get("error") {
            let detail = err["message"].as_str().unwrap_or("error desconocido");
            log::warn!("explain: API error: {detail}");
            return Explanation::error(format!("Error consultando al servicio de IA: {detail}"));
        }

        match json["choices"][0]["message"]["content"].as_str() {
            Some(content) if !content.trim().is_empty() => Explanation::ok(content.trim()),
            _ => Explanation::error(MSG_EMPTY),
        }
    }
}

/// Rate-limit translation: friendly text for the sentence panel, raw
/// passthrough for word examples.
fn rate_limit_text(style: PromptStyle, raw: &str) -> String {
    match style {
        PromptStyle::Sentence => MSG_RATE_LIMITED.to_string(),
        PromptStyle::WordExamples => raw.to_string(),
    }
}

#[async_trait]
impl Explainer for ApiExplainer {
    async fn explain(&self, text: &str, style: PromptStyle) -> Explanation {
        // Configuration error: detected before any network traffic.
        let Some(api_key) = self.config.resolved_api_key() else {
            return Explanation::error(MSG_MISSING_KEY);
        };

        self.request(&api_key, text, style).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
