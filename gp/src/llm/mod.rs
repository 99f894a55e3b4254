//! LLM client module for goalplanner
//!
//! Provides the provider abstraction and the Gemini implementation.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;

pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Fails when no API key is present in the environment or the provider
/// name is unknown. Callers that want the fallback path simply carry on
/// without a client.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: gemini",
                other
            )))
        }
    }
}
