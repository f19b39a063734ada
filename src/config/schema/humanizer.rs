use crate::pipeline::HumanizerPreference;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanizerConfig {
    #[serde(default)]
    pub preferred: HumanizerPreference,
    #[serde(default)]
    pub remote_a: RemoteAConfig,
    #[serde(default)]
    pub remote_b: RemoteBConfig,
}

fn has_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Single-call rephrase service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Segments shorter than this are passed through untouched.
    #[serde(default = "default_min_segment_chars")]
    pub min_segment_chars: usize,
    /// Pause between consecutive segment calls.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_remote_a_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_min_segment_chars() -> usize {
    120
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_remote_a_timeout_secs() -> u64 {
    120
}

impl Default for RemoteAConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            min_segment_chars: default_min_segment_chars(),
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_remote_a_timeout_secs(),
        }
    }
}

impl RemoteAConfig {
    pub fn is_configured(&self) -> bool {
        has_value(self.base_url.as_deref()) && has_value(self.api_key.as_deref())
    }
}

/// Submit / poll / retrieve document service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_readability")]
    pub readability: String,
    #[serde(default = "default_purpose")]
    pub purpose: String,
    #[serde(default = "default_strength")]
    pub strength: String,
    /// Text shorter than this is submitted as a single chunk.
    #[serde(default = "default_direct_threshold_chars")]
    pub direct_threshold_chars: usize,
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    /// Registry entries older than this are evicted.
    #[serde(default = "default_job_ttl_secs")]
    pub job_ttl_secs: u64,
    #[serde(default = "default_remote_b_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_readability() -> String {
    "High School".into()
}

fn default_purpose() -> String {
    "General Writing".into()
}

fn default_strength() -> String {
    "More Human".into()
}

fn default_direct_threshold_chars() -> usize {
    10_000
}

fn default_max_chunk_chars() -> usize {
    8_000
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_max_poll_attempts() -> u32 {
    60
}

fn default_job_ttl_secs() -> u64 {
    3_600
}

fn default_remote_b_timeout_secs() -> u64 {
    60
}

impl Default for RemoteBConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            readability: default_readability(),
            purpose: default_purpose(),
            strength: default_strength(),
            direct_threshold_chars: default_direct_threshold_chars(),
            max_chunk_chars: default_max_chunk_chars(),
            request_delay_ms: default_request_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            job_ttl_secs: default_job_ttl_secs(),
            request_timeout_secs: default_remote_b_timeout_secs(),
        }
    }
}

impl RemoteBConfig {
    pub fn is_configured(&self) -> bool {
        has_value(self.base_url.as_deref()) && has_value(self.api_key.as_deref())
    }
}
