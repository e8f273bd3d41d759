//! Free-form replies for messages outside the booking flow.

use super::LlmProvider;

/// Fixed assistant persona: real estate, home buying, financing.
const PERSONA_PROMPT: &str = "Antworte kurz, freundlich und natürlich.\n\
                              Thema: Immobilien, Hauskauf, Finanzierung.";

pub fn build_prompt(message: &str, user_lang: &str) -> String {
    let lang = if user_lang.trim().is_empty() {
        "de"
    } else {
        user_lang.trim()
    };
    format!("Nutzer: \"{message}\" ({lang})\n{PERSONA_PROMPT}")
}

pub async fn generate_reply(
    llm: &dyn LlmProvider,
    message: &str,
    user_lang: &str,
) -> anyhow::Result<String> {
    let prompt = build_prompt(message, user_lang);
    let reply = llm.complete(&prompt).await?;
    Ok(reply.trim().to_string())
}
