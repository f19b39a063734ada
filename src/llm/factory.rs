use super::compatible::OpenAiCompatibleProvider;
use super::fallback::{ChainEntry, FallbackChain, default_timeout};
use super::gemini::GeminiProvider;
use super::traits::Provider;
use super::types::GenerationParams;
use crate::config::{ProviderConfig, ReliabilityConfig};
use std::time::Duration;

/// Generic key variable consulted after the provider-specific ones.
pub const GENERIC_API_KEY_ENV: &str = "QUILLSHIFT_API_KEY";

/// Resolve API key for a provider from config and environment variables.
///
/// Resolution order:
/// 1. Explicitly provided `api_key` (trimmed, ignored if empty)
/// 2. Provider-specific environment variable (e.g. `GEMINI_API_KEY`)
/// 3. `QUILLSHIFT_API_KEY`
pub fn resolve_api_key(name: &str, explicit_api_key: Option<&str>) -> Option<String> {
    if let Some(key) = explicit_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    let provider_env_candidates: &[&str] = match name {
        "gemini" | "google" | "google-gemini" => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        "openai" => &["OPENAI_API_KEY"],
        "openrouter" => &["OPENROUTER_API_KEY"],
        "groq" => &["GROQ_API_KEY"],
        "mistral" => &["MISTRAL_API_KEY"],
        "deepseek" => &["DEEPSEEK_API_KEY"],
        "xai" | "grok" => &["XAI_API_KEY"],
        "together" | "together-ai" => &["TOGETHER_API_KEY"],
        _ => &[],
    };

    provider_env_candidates
        .iter()
        .chain(std::iter::once(&GENERIC_API_KEY_ENV))
        .find_map(|env_var| {
            std::env::var(env_var)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
}

/// Maps well-known OpenAI-compatible provider names to `(display_name, base_url)`.
pub fn compatible_provider_spec(name: &str) -> Option<(&'static str, &'static str)> {
    let spec = match name {
        "openai" => ("OpenAI", "https://api.openai.com/v1"),
        "openrouter" => ("OpenRouter", "https://openrouter.ai/api/v1"),
        "groq" => ("Groq", "https://api.groq.com/openai/v1"),
        "mistral" => ("Mistral", "https://api.mistral.ai/v1"),
        "deepseek" => ("DeepSeek", "https://api.deepseek.com/v1"),
        "xai" | "grok" => ("xAI", "https://api.x.ai/v1"),
        "together" | "together-ai" => ("Together AI", "https://api.together.xyz/v1"),
        _ => return None,
    };
    Some(spec)
}

/// Create a boxed [`Provider`] for one configured chain entry.
///
/// Supported names:
/// - `"gemini"` / `"google"` / `"google-gemini"` — native Gemini API
/// - every compatible-spec provider (see [`compatible_provider_spec`])
/// - `"custom:<base_url>"` — any OpenAI-compatible endpoint
///
/// A missing credential is not an error: the provider is created
/// unconfigured and the chain skips it.
pub fn create_provider(entry: &ProviderConfig) -> anyhow::Result<Box<dyn Provider>> {
    let name = entry.name.as_str();
    let resolved_key = resolve_api_key(name, entry.api_key.as_deref());
    let api_key = resolved_key.as_deref();
    let base_override = entry.base_url.as_deref();

    if matches!(name, "gemini" | "google" | "google-gemini") {
        return Ok(Box::new(GeminiProvider::with_base_url(api_key, base_override)));
    }

    if let Some((display_name, base_url)) = compatible_provider_spec(name) {
        return Ok(Box::new(OpenAiCompatibleProvider::new(
            display_name,
            base_override.unwrap_or(base_url),
            api_key,
        )));
    }

    if let Some(base_url) = name.strip_prefix("custom:") {
        if base_url.is_empty() {
            anyhow::bail!("Custom provider requires a URL. Format: custom:https://your-api.com/v1");
        }
        return Ok(Box::new(OpenAiCompatibleProvider::new(
            "Custom",
            base_override.unwrap_or(base_url),
            api_key,
        )));
    }

    anyhow::bail!(
        "Unknown provider: {name}.\n\
         Tip: Use \"custom:https://your-api.com/v1\" for OpenAI-compatible endpoints."
    )
}

fn params_for(entry: &ProviderConfig) -> GenerationParams {
    GenerationParams {
        model: entry.model.clone(),
        temperature: entry.temperature,
        top_p: entry.top_p,
        top_k: entry.top_k,
        max_output_tokens: entry.max_output_tokens,
    }
}

/// Build the fallback chain from the configured provider list, in order.
///
/// Unknown provider names are logged and dropped; duplicates keep their
/// first position.
pub fn create_fallback_chain(
    providers: &[ProviderConfig],
    reliability: &ReliabilityConfig,
) -> FallbackChain {
    let mut entries: Vec<ChainEntry> = Vec::with_capacity(providers.len());

    for entry in providers {
        if entries.iter().any(|e| e.name == entry.name) {
            continue;
        }
        match create_provider(entry) {
            Ok(provider) => {
                let timeout = entry
                    .timeout_secs
                    .map_or_else(|| default_timeout(entries.len()), Duration::from_secs);
                entries.push(ChainEntry::new(
                    entry.name.clone(),
                    provider,
                    params_for(entry),
                    timeout,
                ));
            }
            Err(e) => {
                tracing::warn!(provider = entry.name.as_str(), "Ignoring invalid provider: {e}");
            }
        }
    }

    FallbackChain::new(
        entries,
        reliability.provider_retries,
        reliability.provider_backoff_ms,
    )
}
