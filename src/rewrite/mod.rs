//! Local, offline rewriting. Every stage is a pure function of its input text
//! and the random source, so a fixed seed reproduces a run exactly.

pub mod conclusion;
pub mod injection;
pub mod lexical;
pub mod lists;
pub mod punctuation;
pub mod rebalance;

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

pub use injection::InjectionRates;

fn default_opener_rate() -> f64 {
    0.15
}

fn default_hedge_rate() -> f64 {
    0.08
}

fn default_question_rate() -> f64 {
    0.06
}

fn default_aside_rate() -> f64 {
    0.30
}

fn default_ellipsis_rate() -> f64 {
    0.05
}

/// Probabilities for the stochastic rewrite stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewriteOptions {
    #[serde(default = "default_opener_rate")]
    pub opener_rate: f64,
    #[serde(default = "default_hedge_rate")]
    pub hedge_rate: f64,
    #[serde(default = "default_question_rate")]
    pub question_rate: f64,
    #[serde(default = "default_aside_rate")]
    pub aside_rate: f64,
    #[serde(default = "default_ellipsis_rate")]
    pub ellipsis_rate: f64,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            opener_rate: default_opener_rate(),
            hedge_rate: default_hedge_rate(),
            question_rate: default_question_rate(),
            aside_rate: default_aside_rate(),
            ellipsis_rate: default_ellipsis_rate(),
        }
    }
}

impl RewriteOptions {
    pub fn injection_rates(&self) -> InjectionRates {
        InjectionRates {
            opener: self.opener_rate,
            hedge: self.hedge_rate,
            question: self.question_rate,
        }
    }

    /// Every rate multiplied by `factor`, capped at 1. Used for the extra pass.
    pub fn boosted(&self, factor: f64) -> Self {
        let scale = |rate: f64| (rate * factor).clamp(0.0, 1.0);
        Self {
            opener_rate: scale(self.opener_rate),
            hedge_rate: scale(self.hedge_rate),
            question_rate: scale(self.question_rate),
            aside_rate: scale(self.aside_rate),
            ellipsis_rate: scale(self.ellipsis_rate),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let rates = [
            ("opener_rate", self.opener_rate),
            ("hedge_rate", self.hedge_rate),
            ("question_rate", self.question_rate),
            ("aside_rate", self.aside_rate),
            ("ellipsis_rate", self.ellipsis_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be within [0, 1], got {rate}"));
            }
        }
        Ok(())
    }
}

/// Named stages, in the order [`LocalRewriter::rewrite`] runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RewriteStage {
    Substitute,
    Contract,
    Lists,
    Conclusions,
    Friction,
    Rebalance,
    Inject,
}

/// Runs the full local rewrite chain over a document.
#[derive(Debug, Clone, Default)]
pub struct LocalRewriter {
    options: RewriteOptions,
}

impl LocalRewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    fn apply_stage(&self, stage: RewriteStage, text: &str, rng: &mut dyn RandomSource) -> String {
        let o = &self.options;
        match stage {
            RewriteStage::Substitute => lexical::substitute_flagged(text, rng),
            RewriteStage::Contract => lexical::apply_contractions(text),
            RewriteStage::Lists => lists::normalize_lists(text, rng),
            RewriteStage::Conclusions => conclusion::rewrite_conclusions(text, rng),
            RewriteStage::Friction => {
                punctuation::add_friction(text, o.aside_rate, o.ellipsis_rate, rng)
            }
            RewriteStage::Rebalance => rebalance::rebalance(text),
            RewriteStage::Inject => injection::inject_voice(text, o.injection_rates(), rng),
        }
    }

    /// Apply every stage in order. A stage that yields blank output is
    /// skipped and the previous text carries forward.
    pub fn rewrite(&self, text: &str, rng: &mut dyn RandomSource) -> String {
        use strum::IntoEnumIterator;

        let mut current = text.to_string();
        for stage in RewriteStage::iter() {
            let next = self.apply_stage(stage, &current, rng);
            if next.trim().is_empty() && !current.trim().is_empty() {
                tracing::warn!(stage = %stage, "rewrite stage produced empty output, keeping input");
                continue;
            }
            if next != current {
                tracing::debug!(stage = %stage, chars = next.len(), "rewrite stage applied");
            }
            current = next;
        }
        current
    }
}
