//! The provider seam between prompt code and a model API

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A hosted model that answers [`CompletionRequest`]s.
///
/// Implementations own the HTTP client and translate the request into the
/// vendor's wire format.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send one request and wait for the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short provider identifier, used in logs
    fn name(&self) -> &str;

    /// Send one request and return only the text of the reply
    async fn complete_text(&self, request: CompletionRequest) -> Result<String> {
        let response = self.complete(request).await?;
        Ok(response.message.joined_text())
    }
}
