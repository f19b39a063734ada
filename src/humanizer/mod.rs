//! Remote rewriting services.
//!
//! Both adapters swallow their own failures: whatever cannot be rewritten
//! comes back as the original text, so a caller only has to decide whether
//! the outcome is worth keeping.

pub mod direct;
pub mod jobs;
pub mod queued;
pub mod segments;

pub use direct::DirectHumanizer;
pub use jobs::{JobRegistry, JobStatus, RemoteHumanizeJob};
pub use queued::QueuedHumanizer;
pub use segments::{Segment, pack_chunks, split_on_headings};

use crate::config::HumanizerConfig;
use crate::pipeline::HumanizerPreference;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Which humanizer produced the final body.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HumanizerUsed {
    RemoteA,
    RemoteB,
    LocalOnly,
}

/// Per-call overrides. `None` keeps the adapter's configured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanizeOptions {
    pub request_delay: Option<Duration>,
    pub readability: Option<String>,
    pub purpose: Option<String>,
    pub strength: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HumanizeOutcome {
    /// At least one segment or chunk came back rewritten.
    pub success: bool,
    pub content: String,
    pub cost: f64,
    pub rewritten: usize,
    pub attempted: usize,
}

impl HumanizeOutcome {
    pub(crate) fn unchanged(text: &str) -> Self {
        Self {
            success: false,
            content: text.to_string(),
            cost: 0.0,
            rewritten: 0,
            attempted: 0,
        }
    }
}

pub trait RemoteHumanizer: Send + Sync {
    fn kind(&self) -> HumanizerUsed;

    /// Rewrite `text`. Never fails; unrewritable parts keep their text.
    fn humanize<'a>(
        &'a self,
        text: &'a str,
        options: &'a HumanizeOptions,
    ) -> Pin<Box<dyn Future<Output = HumanizeOutcome> + Send + 'a>>;
}

/// Pick the adapter for `preference`. `None` means local rewriting only.
pub fn select_humanizer(
    preference: HumanizerPreference,
    config: &HumanizerConfig,
) -> Option<Box<dyn RemoteHumanizer>> {
    let direct = || {
        DirectHumanizer::from_config(&config.remote_a)
            .map(|h| Box::new(h) as Box<dyn RemoteHumanizer>)
    };
    let queued = || {
        QueuedHumanizer::from_config(&config.remote_b)
            .map(|h| Box::new(h) as Box<dyn RemoteHumanizer>)
    };

    let selected = match preference {
        HumanizerPreference::Local => return None,
        HumanizerPreference::Auto => direct().or_else(queued),
        HumanizerPreference::RemoteA => direct(),
        HumanizerPreference::RemoteB => queued(),
    };
    if selected.is_none() && preference != HumanizerPreference::Auto {
        tracing::warn!(
            humanizer = %preference,
            "Requested humanizer is not configured; using local rewriting only"
        );
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RemoteAConfig, RemoteBConfig};

    fn configured() -> HumanizerConfig {
        HumanizerConfig {
            preferred: HumanizerPreference::Auto,
            remote_a: RemoteAConfig {
                base_url: Some("https://a.example.com".into()),
                api_key: Some("a".into()),
                ..RemoteAConfig::default()
            },
            remote_b: RemoteBConfig {
                base_url: Some("https://b.example.com".into()),
                api_key: Some("b".into()),
                ..RemoteBConfig::default()
            },
        }
    }

    fn kind_of(pref: HumanizerPreference, config: &HumanizerConfig) -> Option<HumanizerUsed> {
        select_humanizer(pref, config).map(|h| h.kind())
    }

    #[test]
    fn auto_prefers_a_then_b() {
        let mut config = configured();
        assert_eq!(
            kind_of(HumanizerPreference::Auto, &config),
            Some(HumanizerUsed::RemoteA)
        );
        config.remote_a.api_key = None;
        assert_eq!(
            kind_of(HumanizerPreference::Auto, &config),
            Some(HumanizerUsed::RemoteB)
        );
        config.remote_b.base_url = None;
        assert_eq!(kind_of(HumanizerPreference::Auto, &config), None);
    }

    #[test]
    fn explicit_choices_are_honoured() {
        let config = configured();
        assert_eq!(
            kind_of(HumanizerPreference::RemoteB, &config),
            Some(HumanizerUsed::RemoteB)
        );
        assert_eq!(kind_of(HumanizerPreference::Local, &config), None);
        assert_eq!(
            kind_of(HumanizerPreference::RemoteA, &HumanizerConfig::default()),
            None
        );
    }
}
