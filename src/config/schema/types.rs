use super::humanizer::HumanizerConfig;
use crate::rewrite::RewriteOptions;
use crate::scoring::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Generation providers in fallback order.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    #[serde(default)]
    pub reliability: ReliabilityConfig,

    #[serde(default)]
    pub humanizer: HumanizerConfig,

    #[serde(default)]
    pub rewrite: RewriteOptions,

    #[serde(default)]
    pub scoring: ScoringWeights,

    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            providers: default_providers(),
            reliability: ReliabilityConfig::default(),
            humanizer: HumanizerConfig::default(),
            rewrite: RewriteOptions::default(),
            scoring: ScoringWeights::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            top_k: Some(40),
            ..ProviderConfig::named("gemini", "gemini-2.5-pro")
        },
        ProviderConfig::named("openai", "gpt-4o"),
    ]
}

// ── Providers ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// `gemini`, `openai`, another compatible name, or `custom:<base_url>`.
    pub name: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-call timeout; unset means 240 s for the first entry, 180 s after.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub top_k: Option<u32>,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f64 {
    0.92
}

#[allow(clippy::unnecessary_wraps)]
fn default_top_p() -> Option<f64> {
    Some(0.95)
}

fn default_max_output_tokens() -> u32 {
    8192
}

impl ProviderConfig {
    pub fn named(name: &str, model: &str) -> Self {
        Self {
            name: name.to_string(),
            model: model.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: None,
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: None,
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

// ── Reliability ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityConfig {
    /// Extra attempts per provider before moving down the chain.
    #[serde(default = "default_provider_retries")]
    pub provider_retries: u32,
    #[serde(default = "default_provider_backoff_ms")]
    pub provider_backoff_ms: u64,
}

fn default_provider_retries() -> u32 {
    0
}

fn default_provider_backoff_ms() -> u64 {
    500
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            provider_retries: default_provider_retries(),
            provider_backoff_ms: default_provider_backoff_ms(),
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Scores below this trigger the single extra local pass.
    #[serde(default = "default_extra_pass_threshold")]
    pub extra_pass_threshold: u32,
    /// Local rewrite passes before the remote stage.
    #[serde(default = "default_local_passes")]
    pub local_passes: u32,
    /// Multiplier applied to injection rates on the extra pass.
    #[serde(default = "default_extra_pass_intensity")]
    pub extra_pass_intensity: f64,
    /// Upper bound for the whole remote humanizer stage.
    #[serde(default = "default_humanizer_stage_timeout_secs")]
    pub humanizer_stage_timeout_secs: u64,
    /// Fixed random seed; unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_extra_pass_threshold() -> u32 {
    70
}

fn default_local_passes() -> u32 {
    1
}

fn default_extra_pass_intensity() -> f64 {
    1.5
}

fn default_humanizer_stage_timeout_secs() -> u64 {
    900
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extra_pass_threshold: default_extra_pass_threshold(),
            local_passes: default_local_passes(),
            extra_pass_intensity: default_extra_pass_intensity(),
            humanizer_stage_timeout_secs: default_humanizer_stage_timeout_secs(),
            seed: None,
        }
    }
}
