//! Cooking assistant chat backed by the text generator.

use crate::errors::AppError;
use crate::llm_client::prompts::DEFAULT_TEMPERATURE;
use crate::llm_client::{GenerationRequest, TextGenerator};

pub mod handlers;
pub mod prompts;
pub mod store;

/// Maximum number of history entries returned per request.
pub const HISTORY_LIMIT: i64 = 50;

/// Uses the caller's conversation id, or starts a new one from the current epoch millis.
pub fn resolve_conversation_id(given: Option<&str>, now_millis: i64) -> String {
    given
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| now_millis.to_string())
}

/// Sends one system + user exchange and returns the reply text.
pub async fn ask(
    generator: Option<&dyn TextGenerator>,
    system: &str,
    user_message: &str,
    max_tokens: u32,
) -> Result<String, AppError> {
    let generator =
        generator.ok_or_else(|| AppError::Llm("text generation is not configured".to_string()))?;

    let request = GenerationRequest {
        system,
        prompt: user_message,
        max_tokens,
        temperature: DEFAULT_TEMPERATURE,
    };
    generator
        .generate(request)
        .await
        .map_err(|e| AppError::Llm(format!("Chat completion failed: {e}")))
}

/// Trims a required text field, rejecting blanks with `message`.
pub fn require_text(value: Option<&str>, message: &str) -> Result<String, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeGenerator;

    #[test]
    fn test_conversation_id_defaults_to_timestamp() {
        assert_eq!(resolve_conversation_id(None, 1_700_000_000_000), "1700000000000");
        assert_eq!(resolve_conversation_id(Some("  "), 42), "42");
        assert_eq!(resolve_conversation_id(Some("conv-1"), 42), "conv-1");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(matches!(
            require_text(Some(" \n"), "Message is required"),
            Err(AppError::Validation(ref m)) if m == "Message is required"
        ));
        assert_eq!(require_text(Some(" 안녕 "), "x").unwrap(), "안녕");
    }

    #[tokio::test]
    async fn test_ask_without_generator_is_llm_error() {
        let result = ask(None, "sys", "hi", 500).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_ask_forwards_budget_and_temperature() {
        let generator = FakeGenerator::replying("두부를 넣어보세요.");
        let reply = ask(Some(&generator), "sys", "된장찌개 팁?", 400).await.unwrap();
        assert_eq!(reply, "두부를 넣어보세요.");

        let requests = generator.requests();
        assert_eq!(requests[0].system, "sys");
        assert_eq!(requests[0].prompt, "된장찌개 팁?");
        assert_eq!(requests[0].max_tokens, 400);
        assert!((requests[0].temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_ask_maps_upstream_failure() {
        let generator = FakeGenerator::failing(503, "overloaded");
        let result = ask(Some(&generator), "sys", "hi", 500).await;
        assert!(matches!(result, Err(AppError::Llm(ref m)) if m.contains("overloaded")));
    }
}
