//! Prompt builder for the reading teacher.
//!
//! [`PromptBuilder`] constructs `(system, user)` chat messages for any
//! OpenAI-compatible `/v1/chat/completions` endpoint.  Two styles exist:
//!
//! * [`PromptStyle::Sentence`] — explain a selected sentence (the "Mini
//!   Maestro" panel).
//! * [`PromptStyle::WordExamples`] — extra example sentences for a single
//!   word (the word inspector's "more examples" action).
//!
//! The learner-facing language is Spanish; the material being read is
//! English.

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

const SYSTEM_INSTRUCTION: &str = "Eres un profesor de inglés experto y amable.";

// ---------------------------------------------------------------------------
// PromptStyle
// ---------------------------------------------------------------------------

/// Which kind of explanation is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Explain a whole selected sentence.
    Sentence,
    /// Example sentences for one word.
    WordExamples,
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the chat messages for an explanation request.
///
/// # Example
/// ```rust
/// use shadow_reader::explain::{PromptBuilder, PromptStyle};
///
/// let builder = PromptBuilder::new();
/// let (system, user) = builder.build_chat("Good morning", PromptStyle::Sentence);
/// assert!(system.contains("profesor"));
/// assert!(user.contains("Good morning"));
/// ```
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the `(system, user)` message pair for `text` in `style`.
    pub fn build_chat(&self, text: &str, style: PromptStyle) -> (String, String) {
        let user = match style {
            PromptStyle::Sentence => format!(
                "Actúa como un compañero de estudio divertido, ingenioso y breve.\n\
                 Explica el siguiente texto: \"{text}\".\n\n\
                 Reglas:\n\
                 1. ¡SÉ BREVE! Nada de biblias. Máximo 2-3 frases por punto.\n\
                 2. Tono: Humorístico, casual y directo. Usa emojis. ⚡️\n\
                 3. Estructura:\n\
                 \x20  - 🇪🇸 **Traducción**: Lo que significa en español (coloquial si aplica).\n\
                 \x20  - 🤓 **El \"por qué\"**: Explicación rápida y sencilla.\n\
                 \x20  - 😂 **Dato**: Algo divertido o un chiste corto relacionado.\n\n\
                 No te enrolles. ¡Hazlo ágil y en español!"
            ),
            PromptStyle::WordExamples => format!(
                "Dame 3 frases de ejemplo en inglés usando la palabra \"{text}\", \
                 cada una con su traducción al español entre paréntesis. \
                 Frases cortas y cotidianas. Solo la lista, sin introducción."
            ),
        };

        (SYSTEM_INSTRUCTION.to_string(), user)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_prompt_embeds_the_text() {
        let (system, user) = PromptBuilder::new().build_chat("The quick fox", PromptStyle::Sentence);
        assert_eq!(system, SYSTEM_INSTRUCTION);
        assert!(user.contains("\"The quick fox\""));
        assert!(user.contains("Traducción"));
    }

    #[test]
    fn word_examples_prompt_asks_for_examples() {
        let (_system, user) = PromptBuilder::new().build_chat("fox", PromptStyle::WordExamples);
        assert!(user.contains("\"fox\""));
        assert!(user.contains("ejemplo"));
    }

    #[test]
    fn styles_produce_different_prompts() {
        let builder = PromptBuilder::new();
        let (_, sentence) = builder.build_chat("word", PromptStyle::Sentence);
        let (_, examples) = builder.build_chat("word", PromptStyle::WordExamples);
        assert_ne!(sentence, examples);
    }
}
