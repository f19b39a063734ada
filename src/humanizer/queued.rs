//! Submit, poll and retrieve document service.

use super::jobs::{JobRegistry, JobStatus, RemoteHumanizeJob};
use super::segments::{pack_chunks, split_on_headings};
use super::{HumanizeOptions, HumanizeOutcome, HumanizerUsed, RemoteHumanizer};
use crate::config::RemoteBConfig;
use crate::error::HumanizerError;
use crate::llm::{api_error, build_provider_client_with_timeout};
use crate::retry::RetryPolicy;
use crate::text::reattach_whitespace;
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const SERVICE: &str = "remote_b";

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    content: &'a str,
    readability: &'a str,
    purpose: &'a str,
    strength: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct DocumentRequest<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    cost: Option<f64>,
}

impl DocumentResponse {
    fn is_failed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("failed") || s.eq_ignore_ascii_case("error"))
    }
}

pub struct QueuedHumanizer {
    base_url: String,
    api_key: String,
    readability: String,
    purpose: String,
    strength: String,
    direct_threshold_chars: usize,
    max_chunk_chars: usize,
    request_delay: Duration,
    poll: RetryPolicy,
    registry: JobRegistry,
    client: Client,
}

impl QueuedHumanizer {
    /// `None` unless both base URL and key are set.
    pub fn from_config(config: &RemoteBConfig) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        Some(Self {
            base_url: config.base_url.as_deref()?.trim_end_matches('/').to_string(),
            api_key: config.api_key.as_deref()?.trim().to_string(),
            readability: config.readability.clone(),
            purpose: config.purpose.clone(),
            strength: config.strength.clone(),
            direct_threshold_chars: config.direct_threshold_chars,
            max_chunk_chars: config.max_chunk_chars.max(1),
            request_delay: Duration::from_millis(config.request_delay_ms),
            poll: RetryPolicy::fixed(
                Duration::from_millis(config.poll_interval_ms),
                config.max_poll_attempts,
            ),
            registry: JobRegistry::new(Duration::from_secs(config.job_ttl_secs)),
            client: build_provider_client_with_timeout(config.request_timeout_secs),
        })
    }

    pub fn poll_policy(&self) -> RetryPolicy {
        self.poll
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    fn chunk(&self, text: &str) -> Vec<String> {
        if text.chars().count() < self.direct_threshold_chars {
            return vec![text.to_string()];
        }
        pack_chunks(&split_on_headings(text), self.max_chunk_chars)
    }

    async fn submit(&self, content: &str, options: &HumanizeOptions) -> anyhow::Result<String> {
        let request = SubmitRequest {
            content,
            readability: options.readability.as_deref().unwrap_or(&self.readability),
            purpose: options.purpose.as_deref().unwrap_or(&self.purpose),
            strength: options.strength.as_deref().unwrap_or(&self.strength),
        };
        let response = self
            .client
            .post(format!("{}/submit", self.base_url))
            .header("apikey", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("submit request failed")?;
        if !response.status().is_success() {
            return Err(api_error(SERVICE, response).await);
        }
        let body: SubmitResponse = response
            .json()
            .await
            .context("submit returned an unreadable response")?;
        if body.id.trim().is_empty() {
            anyhow::bail!("submit returned an empty document id");
        }
        Ok(body.id)
    }

    async fn fetch(&self, document_id: &str) -> anyhow::Result<DocumentResponse> {
        let response = self
            .client
            .post(format!("{}/document", self.base_url))
            .header("apikey", &self.api_key)
            .json(&DocumentRequest { id: document_id })
            .send()
            .await
            .context("document request failed")?;
        if !response.status().is_success() {
            return Err(api_error(SERVICE, response).await);
        }
        response
            .json()
            .await
            .context("document returned an unreadable response")
    }

    /// Poll until the document has output, fails, or attempts run out.
    async fn await_document(&self, document_id: &str) -> Result<(String, f64), HumanizerError> {
        for attempt in 0..self.poll.max_attempts {
            tokio::time::sleep(self.poll.delay_for(attempt)).await;
            match self.fetch(document_id).await {
                Ok(doc) if doc.is_failed() => {
                    return Err(HumanizerError::Rejected {
                        service: SERVICE.into(),
                        document_id: document_id.into(),
                    });
                }
                Ok(doc) => {
                    if let Some(output) = doc.output.filter(|o| !o.trim().is_empty()) {
                        return Ok((output, doc.cost.unwrap_or(0.0)));
                    }
                }
                Err(e) => {
                    tracing::debug!(humanizer = SERVICE, document_id, attempt, "Poll failed: {e}");
                }
            }
        }
        Err(HumanizerError::PollTimeout {
            document_id: document_id.into(),
            attempts: self.poll.max_attempts,
        })
    }

    async fn process_chunk(
        &self,
        chunk: &str,
        options: &HumanizeOptions,
    ) -> Result<(String, String, f64), HumanizerError> {
        let document_id = self
            .submit(chunk.trim(), options)
            .await
            .map_err(|e| HumanizerError::Request {
                service: SERVICE.into(),
                message: e.to_string(),
            })?;
        let (output, cost) = self.await_document(&document_id).await?;
        Ok((document_id, output, cost))
    }

    async fn run(&self, text: &str, options: &HumanizeOptions) -> HumanizeOutcome {
        let chunks = self.chunk(text);
        let delay = options.request_delay.unwrap_or(self.request_delay);
        let job_id = self.registry.insert(RemoteHumanizeJob::new(chunks.len()));
        let mut results: Vec<Option<String>> = vec![None; chunks.len()];
        let mut outcome = HumanizeOutcome::unchanged("");

        for (index, chunk) in chunks.iter().enumerate() {
            if chunk.trim().is_empty() {
                continue;
            }
            if outcome.attempted > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            outcome.attempted += 1;

            match self.process_chunk(chunk, options).await {
                Ok((document_id, output, cost)) => {
                    outcome.cost += cost;
                    let rewritten = reattach_whitespace(chunk, &output);
                    self.registry.update(job_id, |job| {
                        job.submitted_chunks[index] = Some(document_id);
                        job.result_chunks[index] = Some(rewritten.clone());
                    });
                    results[index] = Some(rewritten);
                }
                Err(err) => {
                    tracing::warn!(humanizer = SERVICE, segment = index, "{err}");
                }
            }
        }

        outcome.rewritten = results.iter().filter(|result| result.is_some()).count();
        let status = if outcome.rewritten > 0 {
            JobStatus::Ready
        } else {
            JobStatus::Failed
        };
        match self.registry.remove(job_id) {
            Some(mut job) => {
                job.status = status;
                tracing::debug!(
                    humanizer = SERVICE,
                    job = %job.job_id,
                    status = %job.status,
                    rewritten = outcome.rewritten,
                    stored = job.ready_chunks(),
                    chunks = chunks.len(),
                    "Job finished"
                );
            }
            None => {
                tracing::warn!(
                    humanizer = SERVICE,
                    job = %job_id,
                    status = %status,
                    "Job left the registry before completion"
                );
            }
        }

        outcome.content = chunks
            .iter()
            .zip(results)
            .map(|(original, result)| result.unwrap_or_else(|| original.clone()))
            .collect();
        outcome.success = outcome.rewritten > 0;
        outcome
    }
}

impl RemoteHumanizer for QueuedHumanizer {
    fn kind(&self) -> HumanizerUsed {
        HumanizerUsed::RemoteB
    }

    fn humanize<'a>(
        &'a self,
        text: &'a str,
        options: &'a HumanizeOptions,
    ) -> Pin<Box<dyn Future<Output = HumanizeOutcome> + Send + 'a>> {
        Box::pin(self.run(text, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(uri: &str) -> RemoteBConfig {
        RemoteBConfig {
            base_url: Some(uri.to_string()),
            api_key: Some("b-key".into()),
            request_delay_ms: 0,
            poll_interval_ms: 1,
            max_poll_attempts: 3,
            ..RemoteBConfig::default()
        }
    }

    #[test]
    fn unconfigured_service_is_not_built() {
        assert!(QueuedHumanizer::from_config(&RemoteBConfig::default()).is_none());
    }

    #[test]
    fn short_text_is_one_chunk_long_text_is_packed() {
        let mut cfg = config("http://localhost:1");
        cfg.direct_threshold_chars = 40;
        cfg.max_chunk_chars = 30;
        let humanizer = QueuedHumanizer::from_config(&cfg).unwrap();
        assert_eq!(humanizer.chunk("## A\nshort body\n").len(), 1);

        let long = "## A\nfirst body text here\n## B\nsecond body text here\n";
        let chunks = humanizer.chunk(long);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.concat(), long);
    }

    #[tokio::test]
    async fn submit_then_poll_until_ready() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(header("apikey", "b-key"))
            .and(body_partial_json(json!({"readability": "High School", "strength": "More Human"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "doc-1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/document"))
            .and(body_partial_json(json!({"id": "doc-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "doc-1", "status": "done", "output": "Humanized body.", "cost": 2.0
            })))
            .mount(&server)
            .await;

        let humanizer = QueuedHumanizer::from_config(&config(&server.uri())).unwrap();
        let outcome = humanizer
            .humanize("Original body.\n", &HumanizeOptions::default())
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.content, "Humanized body.\n");
        assert!((outcome.cost - 2.0).abs() < f64::EPSILON);
        assert!(humanizer.registry().is_empty());
    }

    #[tokio::test]
    async fn expired_job_still_returns_its_rewrites() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "doc-4"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/document"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "doc-4", "status": "done", "output": "Rewritten anyway.", "cost": 1.0
            })))
            .mount(&server)
            .await;

        let cfg = RemoteBConfig {
            job_ttl_secs: 0,
            ..config(&server.uri())
        };
        let humanizer = QueuedHumanizer::from_config(&cfg).unwrap();
        let outcome = humanizer
            .humanize("Original text.\n", &HumanizeOptions::default())
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.rewritten, 1);
        assert_eq!(outcome.content, "Rewritten anyway.\n");
        assert!(humanizer.registry().is_empty());
    }

    #[tokio::test]
    async fn never_ready_document_keeps_original() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "doc-2"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/document"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "doc-2", "status": "queued", "output": ""})),
            )
            .expect(3)
            .mount(&server)
            .await;

        let humanizer = QueuedHumanizer::from_config(&config(&server.uri())).unwrap();
        let outcome = humanizer
            .humanize("Stays as written.", &HumanizeOptions::default())
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.content, "Stays as written.");
    }

    #[tokio::test]
    async fn failed_status_stops_polling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "doc-3"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/document"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "doc-3", "status": "failed"})))
            .expect(1)
            .mount(&server)
            .await;

        let humanizer = QueuedHumanizer::from_config(&config(&server.uri())).unwrap();
        let outcome = humanizer.humanize("Unchanged.", &HumanizeOptions::default()).await;
        assert_eq!(outcome.content, "Unchanged.");
    }

    #[tokio::test]
    async fn rejected_submit_keeps_original() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad apikey"))
            .mount(&server)
            .await;

        let humanizer = QueuedHumanizer::from_config(&config(&server.uri())).unwrap();
        let outcome = humanizer.humanize("Untouched.", &HumanizeOptions::default()).await;
        assert!(!outcome.success);
        assert_eq!(outcome.attempted, 1);
        assert_eq!(outcome.content, "Untouched.");
    }
}
