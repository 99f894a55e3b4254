//! LlmClient trait definition

use async_trait::async_trait;

use super::LlmError;

/// Stateless LLM client - each call is independent
///
/// This is the core abstraction for interacting with the provider. A call
/// takes one rendered prompt and returns the raw text of the response;
/// no conversation state is kept between calls. Concurrent generation
/// requests are fully independent.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single prompt and return the provider's raw text response
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
