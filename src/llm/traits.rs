use super::types::{GenerationParams, ProviderResponse};
use std::future::Future;
use std::pin::Pin;

pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "gemini", "openai").
    fn name(&self) -> &str;

    /// Whether a credential is present. Unconfigured providers are skipped
    /// by the fallback chain instead of being called.
    fn is_configured(&self) -> bool {
        true
    }

    /// Send one prompt and return the generated text.
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>>;
}
