//! Single-call rephrase service, one request per body segment.

use super::segments::split_on_headings;
use super::{HumanizeOptions, HumanizeOutcome, HumanizerUsed, RemoteHumanizer};
use crate::config::RemoteAConfig;
use crate::error::HumanizerError;
use crate::llm::{api_error, build_provider_client_with_timeout};
use crate::text::reattach_whitespace;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const SERVICE: &str = "remote_a";

#[derive(Debug, Serialize)]
struct RephraseRequest<'a> {
    prompt: &'a str,
    rephrase: bool,
}

#[derive(Debug, Deserialize)]
struct RephraseResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    cost: Option<f64>,
}

pub struct DirectHumanizer {
    base_url: String,
    api_key: String,
    min_segment_chars: usize,
    request_delay: Duration,
    client: Client,
}

impl DirectHumanizer {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let defaults = RemoteAConfig::default();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            min_segment_chars: defaults.min_segment_chars,
            request_delay: Duration::from_millis(defaults.request_delay_ms),
            client: build_provider_client_with_timeout(defaults.request_timeout_secs),
        }
    }

    /// `None` unless both base URL and key are set.
    pub fn from_config(config: &RemoteAConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let base_url = config.base_url.as_deref()?;
        let api_key = config.api_key.as_deref()?;
        Some(Self {
            min_segment_chars: config.min_segment_chars,
            request_delay: Duration::from_millis(config.request_delay_ms),
            client: build_provider_client_with_timeout(config.request_timeout_secs),
            ..Self::new(base_url, api_key)
        })
    }

    pub fn with_min_segment_chars(mut self, min_segment_chars: usize) -> Self {
        self.min_segment_chars = min_segment_chars;
        self
    }

    async fn rephrase(&self, text: &str) -> anyhow::Result<(String, f64)> {
        let response = self
            .client
            .post(format!("{}/rephrase", self.base_url))
            .header("api-token", &self.api_key)
            .json(&RephraseRequest {
                prompt: text,
                rephrase: true,
            })
            .send()
            .await
            .context("rephrase request failed")?;
        if !response.status().is_success() {
            return Err(api_error(SERVICE, response).await);
        }

        let body: RephraseResponse = response
            .json()
            .await
            .context("rephrase returned an unreadable response")?;
        let result = body
            .result
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("empty rephrase result"))?;
        Ok((result, body.cost.unwrap_or(0.0)))
    }

    async fn run(&self, text: &str, options: &HumanizeOptions) -> HumanizeOutcome {
        let delay = options.request_delay.unwrap_or(self.request_delay);
        let mut outcome = HumanizeOutcome::unchanged("");
        let mut content = String::with_capacity(text.len());

        for (index, segment) in split_on_headings(text).iter().enumerate() {
            if !segment.is_rewritable(self.min_segment_chars) {
                content.push_str(&segment.text);
                continue;
            }
            if outcome.attempted > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            outcome.attempted += 1;

            match self.rephrase(segment.text.trim()).await {
                Ok((result, cost)) => {
                    content.push_str(&reattach_whitespace(&segment.text, &result));
                    outcome.cost += cost;
                    outcome.rewritten += 1;
                }
                Err(e) => {
                    let err = HumanizerError::SegmentRewriteFailed {
                        index,
                        reason: e.to_string(),
                    };
                    tracing::warn!(humanizer = SERVICE, segment = index, "{err}");
                    content.push_str(&segment.text);
                }
            }
        }

        tracing::debug!(
            humanizer = SERVICE,
            rewritten = outcome.rewritten,
            attempted = outcome.attempted,
            "Segments processed"
        );
        outcome.success = outcome.rewritten > 0;
        outcome.content = content;
        outcome
    }
}

impl RemoteHumanizer for DirectHumanizer {
    fn kind(&self) -> HumanizerUsed {
        HumanizerUsed::RemoteA
    }

    fn humanize<'a>(
        &'a self,
        text: &'a str,
        options: &'a HumanizeOptions,
    ) -> Pin<Box<dyn Future<Output = HumanizeOutcome> + Send + 'a>> {
        Box::pin(self.run(text, options))
    }
}
