//! Generic OpenAI-compatible chat-completions provider.

use super::http_client::build_provider_client;
use super::scrub::api_error;
use super::traits::Provider;
use super::types::{GenerationParams, ProviderResponse};
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

pub struct OpenAiCompatibleProvider {
    name: String,
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// The key is sent as `Authorization: Bearer <key>`.
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::trim).filter(|k| !k.is_empty()).map(String::from),
            client: build_provider_client(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request<'a>(prompt: &'a str, params: &'a GenerationParams) -> ChatRequest<'a> {
        ChatRequest {
            model: &params.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            top_p: params.top_p,
            max_tokens: params.max_output_tokens,
        }
    }

    fn extract_text(&self, response: ChatResponse) -> anyhow::Result<ProviderResponse> {
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        if text.trim().is_empty() {
            anyhow::bail!("No response from {}", self.name);
        }

        let mut out = match response.usage {
            Some(usage) => {
                ProviderResponse::with_usage(text, usage.prompt_tokens, usage.completion_tokens)
            }
            None => ProviderResponse::text_only(text),
        };
        if let Some(model) = response.model {
            out = out.with_model(model);
        }
        Ok(out)
    }

    async fn call_api(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> anyhow::Result<ProviderResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!("{} API key not set. Add it to config.toml or the environment.", self.name)
        })?;

        let response = self
            .client
            .post(self.chat_completions_url())
            .bearer_auth(api_key)
            .json(&Self::build_request(prompt, params))
            .send()
            .await
            .with_context(|| format!("{} request failed", self.name))?;
        if !response.status().is_success() {
            return Err(api_error(&self.name, response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .with_context(|| format!("{} returned an unreadable response", self.name))?;
        self.extract_text(body)
    }
}

impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
        Box::pin(async move { self.call_api(prompt, params).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_sampling_parameters() {
        let mut params = GenerationParams::for_model("gpt-4o");
        params.top_p = Some(0.9);
        let json = serde_json::to_value(OpenAiCompatibleProvider::build_request("hi", &params))
            .unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["max_tokens"], 8192);
        assert!((json["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn top_p_is_omitted_when_unset() {
        let mut params = GenerationParams::for_model("m");
        params.top_p = None;
        let json = serde_json::to_value(OpenAiCompatibleProvider::build_request("hi", &params))
            .unwrap();
        assert!(json.get("top_p").is_none());
    }

    #[test]
    fn blank_key_is_unconfigured() {
        let provider = OpenAiCompatibleProvider::new("openai", "https://x/v1/", Some("  "));
        assert!(!provider.is_configured());
        assert_eq!(provider.chat_completions_url(), "https://x/v1/chat/completions");
    }

    #[test]
    fn empty_choice_is_an_error() {
        let provider = OpenAiCompatibleProvider::new("openai", "https://x", Some("k"));
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(provider.extract_text(body).is_err());
    }
}
