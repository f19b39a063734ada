use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::PipelineError;
use crate::prompt::PersonaKind;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Conversational,
    Professional,
    Authoritative,
    Friendly,
    Witty,
}

/// Immutable input to one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRequest {
    pub topic: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub tone: Tone,
    pub min_words: u32,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub references: Option<String>,
    #[serde(default)]
    pub eeat_hints: Option<String>,
    #[serde(default)]
    pub persona: PersonaKind,
}

impl ContentRequest {
    pub fn new(topic: impl Into<String>, min_words: u32) -> Self {
        Self {
            topic: topic.into(),
            keywords: String::new(),
            target_audience: String::new(),
            tone: Tone::default(),
            min_words,
            headings: Vec::new(),
            references: None,
            eeat_hints: None,
            persona: PersonaKind::default(),
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.topic.trim().is_empty() {
            return Err(PipelineError::InvalidInput("topic is required".into()));
        }
        if self.min_words == 0 {
            return Err(PipelineError::InvalidInput(
                "min_words must be at least 1".into(),
            ));
        }
        if self.headings.iter().any(|h| h.trim().is_empty()) {
            return Err(PipelineError::InvalidInput(
                "headings must not contain blank entries".into(),
            ));
        }
        Ok(())
    }

    /// Headings with surrounding whitespace removed.
    pub fn clean_headings(&self) -> Vec<String> {
        self.headings.iter().map(|h| h.trim().to_string()).collect()
    }
}

/// Which remote humanizer a run should use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HumanizerPreference {
    /// Remote A when configured, else remote B, else local only.
    #[default]
    Auto,
    RemoteA,
    RemoteB,
    Local,
}

/// Per-run operational overrides. `None` falls back to configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFlags {
    #[serde(default)]
    pub humanizer: Option<HumanizerPreference>,
    #[serde(default)]
    pub local_passes: Option<u32>,
    #[serde(default)]
    pub opener_rate: Option<f64>,
    #[serde(default)]
    pub hedge_rate: Option<f64>,
    #[serde(default)]
    pub question_rate: Option<f64>,
    #[serde(default)]
    pub extra_pass_threshold: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunFlags {
    pub fn validate(&self) -> Result<(), PipelineError> {
        let rates = [
            ("opener_rate", self.opener_rate),
            ("hedge_rate", self.hedge_rate),
            ("question_rate", self.question_rate),
        ];
        for (name, rate) in rates {
            if let Some(rate) = rate
                && !(0.0..=1.0).contains(&rate)
            {
                return Err(PipelineError::InvalidInput(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        if let Some(threshold) = self.extra_pass_threshold
            && threshold > 100
        {
            return Err(PipelineError::InvalidInput(format!(
                "extra_pass_threshold must be at most 100, got {threshold}"
            )));
        }
        if self.local_passes == Some(0) {
            return Err(PipelineError::InvalidInput(
                "local_passes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
