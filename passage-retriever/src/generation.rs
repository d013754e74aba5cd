//! Answer generation over retrieved contexts.
//!
//! The retrieval core's only obligation toward generation is to hand over the
//! retrieved chunk texts in ranking order; everything else about the model is
//! opaque behind [`AnswerGenerator`]. [`GeminiGenerator`] is the production
//! implementation, a thin client for the Gemini `generateContent` REST API.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde_json::json;

/// Default generation model.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.0-flash";

/// Turns a query plus retrieved context passages into a final answer.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(&self, query: &str, contexts: &[String]) -> Result<String>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiGenerator {
    /// Build a generator for `model`, reading the API key from the
    /// `GEMINI_API_KEY` environment variable.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
        })
    }

    /// The grounding prompt: answer from the supplied contexts, admit
    /// ignorance otherwise.
    fn build_prompt(query: &str, contexts: &[String]) -> String {
        let context_text = contexts.join("\n\n");
        format!(
            "You are a helpful assistant. Use the following information to answer the question.\n\
             If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\
             \n\
             Context:\n{context_text}\n\
             \n\
             Question:\n{query}\n\
             \n\
             Answer:"
        )
    }
}

#[async_trait]
impl AnswerGenerator for GeminiGenerator {
    async fn generate_answer(&self, query: &str, contexts: &[String]) -> Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = json!({
            "contents": [{
                "parts": [{ "text": Self::build_prompt(query, contexts) }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("sending generation request")?
            .error_for_status()
            .context("generation request rejected")?;
        let payload: serde_json::Value =
            response.json().await.context("decoding generation response")?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("generation response contained no text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_contexts_in_order() {
        let contexts = vec![
            "Cats are domesticated mammals.".to_string(),
            "They are known for their agility.".to_string(),
        ];
        let prompt = GeminiGenerator::build_prompt("What are cats?", &contexts);

        assert!(prompt.contains("Question:\nWhat are cats?"));
        let first = prompt.find("Cats are domesticated mammals.").unwrap();
        let second = prompt.find("They are known for their agility.").unwrap();
        assert!(first < second);
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_prompt_with_no_contexts() {
        let prompt = GeminiGenerator::build_prompt("Anything?", &[]);
        assert!(prompt.contains("Context:\n\n"));
        assert!(prompt.contains("Anything?"));
    }
}
