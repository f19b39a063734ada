use super::traits::Provider;
use super::types::GenerationParams;
use crate::error::PipelineError;
use crate::retry::RetryPolicy;
use std::time::Duration;

/// Per-call timeout for the first chain entry.
pub const PRIMARY_TIMEOUT: Duration = Duration::from_secs(240);
/// Per-call timeout for every later entry.
pub const SECONDARY_TIMEOUT: Duration = Duration::from_secs(180);
/// Longest wait between retries of one provider.
const MAX_BACKOFF: Duration = Duration::from_secs(10);

pub fn default_timeout(position: usize) -> Duration {
    if position == 0 {
        PRIMARY_TIMEOUT
    } else {
        SECONDARY_TIMEOUT
    }
}

/// Check if an error is non-retryable (client errors that won't resolve with retries).
pub(crate) fn is_non_retryable(err: &anyhow::Error) -> bool {
    let msg = err.to_string();
    if is_quota_exhausted(&msg) {
        return true;
    }

    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>()
        && let Some(status) = reqwest_err.status()
    {
        let code = status.as_u16();
        // 429 and 408 are transient.
        return status.is_client_error() && code != 429 && code != 408;
    }
    for word in msg.split(|c: char| !c.is_ascii_digit()) {
        if let Ok(code) = word.parse::<u16>()
            && (400..500).contains(&code)
        {
            return code != 429 && code != 408;
        }
    }
    false
}

fn is_quota_exhausted(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("insufficient_quota")
        || lower.contains("exceeded your current quota")
        || lower.contains("resource_exhausted")
        || lower.contains("billing")
}

/// One prioritized provider with its own parameters and timeout.
pub struct ChainEntry {
    pub name: String,
    pub provider: Box<dyn Provider>,
    pub params: GenerationParams,
    pub timeout: Duration,
}

impl ChainEntry {
    pub fn new(
        name: impl Into<String>,
        provider: Box<dyn Provider>,
        params: GenerationParams,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            params,
            timeout,
        }
    }
}

/// First non-empty result of a chain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub provider: String,
    pub model: Option<String>,
}

/// Ordered provider list tried one at a time until one returns text.
pub struct FallbackChain {
    entries: Vec<ChainEntry>,
    /// `max_attempts` is the number of retries after the first call.
    retry: RetryPolicy,
}

impl FallbackChain {
    pub fn new(entries: Vec<ChainEntry>, max_retries: u32, base_backoff_ms: u64) -> Self {
        Self {
            entries,
            retry: RetryPolicy::exponential(
                Duration::from_millis(base_backoff_ms.max(50)),
                max_retries,
                MAX_BACKOFF,
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Whether at least one entry holds a credential.
    pub fn has_configured_provider(&self) -> bool {
        self.entries.iter().any(|e| e.provider.is_configured())
    }

    async fn attempt(&self, entry: &ChainEntry, prompt: &str) -> anyhow::Result<Generation> {
        let call = entry.provider.generate(prompt, &entry.params);
        let response = tokio::time::timeout(entry.timeout, call)
            .await
            .map_err(|_| anyhow::anyhow!("timed out after {}s", entry.timeout.as_secs()))??;
        if response.text.trim().is_empty() {
            anyhow::bail!("returned empty text");
        }
        Ok(Generation {
            text: response.text,
            provider: entry.name.clone(),
            model: response.model,
        })
    }

    /// Try every configured entry in order. Exhaustion is terminal.
    pub async fn generate(&self, prompt: &str) -> Result<Generation, PipelineError> {
        let mut failures = Vec::new();

        for entry in &self.entries {
            let provider_name = entry.name.as_str();
            if !entry.provider.is_configured() {
                tracing::info!(provider = provider_name, "Skipping provider without credentials");
                failures.push(format!("{provider_name}: skipped (no credentials)"));
                continue;
            }

            let max_retries = self.retry.max_attempts;
            for attempt in 0..=max_retries {
                match self.attempt(entry, prompt).await {
                    Ok(generation) => {
                        if attempt > 0 {
                            tracing::info!(
                                provider = provider_name,
                                attempt,
                                "Provider recovered after retries"
                            );
                        }
                        tracing::info!(
                            provider = provider_name,
                            chars = generation.text.len(),
                            "Generation succeeded"
                        );
                        return Ok(generation);
                    }
                    Err(e) => {
                        let non_retryable = is_non_retryable(&e);
                        failures.push(format!(
                            "{provider_name} attempt {}/{}: {e}",
                            attempt + 1,
                            max_retries + 1
                        ));

                        if non_retryable {
                            tracing::warn!(
                                provider = provider_name,
                                "Non-retryable error, switching provider: {e}"
                            );
                            break;
                        }

                        if attempt < max_retries {
                            tracing::warn!(
                                provider = provider_name,
                                attempt = attempt + 1,
                                max_retries,
                                "Provider call failed, retrying: {e}"
                            );
                            tokio::time::sleep(self.retry.delay_for(attempt)).await;
                        } else {
                            tracing::warn!(provider = provider_name, "Provider call failed: {e}");
                        }
                    }
                }
            }

            tracing::warn!(provider = provider_name, "Switching to fallback provider");
        }

        Err(PipelineError::GenerationUnavailable { attempts: failures })
    }
}
