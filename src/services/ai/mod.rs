pub mod openai;
pub mod smalltalk;

use async_trait::async_trait;

/// Single blocking text-generation call. The first choice is taken
/// unconditionally; no streaming, no retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
