//! Heuristic human-likeness score for a draft.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::lexicon::{CONCLUSION_PHRASES, FLAGGED_TABLE, NEGATIONS};
use crate::rewrite::lists::find_triplets;
use crate::text::{BlockKind, BurstinessReport, split_blocks};

fn default_flagged_penalty() -> u32 {
    3
}
fn default_flagged_cap() -> u32 {
    30
}
fn default_burstiness_penalty() -> u32 {
    20
}
fn default_burstiness_cv_threshold() -> f64 {
    40.0
}
fn default_triplet_penalty() -> u32 {
    10
}
fn default_max_triplets() -> usize {
    2
}
fn default_negation_penalty() -> u32 {
    10
}
fn default_max_negations() -> usize {
    5
}
fn default_conclusion_penalty() -> u32 {
    5
}
fn default_low_risk_floor() -> u32 {
    80
}
fn default_medium_risk_floor() -> u32 {
    60
}

/// Penalties and band boundaries. Every number is tunable from config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points per flagged vocabulary occurrence.
    #[serde(default = "default_flagged_penalty")]
    pub flagged_penalty: u32,
    #[serde(default = "default_flagged_cap")]
    pub flagged_cap: u32,
    #[serde(default = "default_burstiness_penalty")]
    pub burstiness_penalty: u32,
    /// Coefficient of variation (percent) at or below which the text is flat.
    #[serde(default = "default_burstiness_cv_threshold")]
    pub burstiness_cv_threshold: f64,
    #[serde(default = "default_triplet_penalty")]
    pub triplet_penalty: u32,
    /// Triplets tolerated before the penalty applies.
    #[serde(default = "default_max_triplets")]
    pub max_triplets: usize,
    #[serde(default = "default_negation_penalty")]
    pub negation_penalty: u32,
    /// Uncontracted negations tolerated before the penalty applies.
    #[serde(default = "default_max_negations")]
    pub max_negations: usize,
    /// Points per distinct summary phrase.
    #[serde(default = "default_conclusion_penalty")]
    pub conclusion_penalty: u32,
    #[serde(default = "default_low_risk_floor")]
    pub low_risk_floor: u32,
    #[serde(default = "default_medium_risk_floor")]
    pub medium_risk_floor: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            flagged_penalty: default_flagged_penalty(),
            flagged_cap: default_flagged_cap(),
            burstiness_penalty: default_burstiness_penalty(),
            burstiness_cv_threshold: default_burstiness_cv_threshold(),
            triplet_penalty: default_triplet_penalty(),
            max_triplets: default_max_triplets(),
            negation_penalty: default_negation_penalty(),
            max_negations: default_max_negations(),
            conclusion_penalty: default_conclusion_penalty(),
            low_risk_floor: default_low_risk_floor(),
            medium_risk_floor: default_medium_risk_floor(),
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), String> {
        if self.medium_risk_floor > self.low_risk_floor || self.low_risk_floor > 100 {
            return Err(format!(
                "risk floors must satisfy medium <= low <= 100, got medium={} low={}",
                self.medium_risk_floor, self.low_risk_floor
            ));
        }
        if !self.burstiness_cv_threshold.is_finite() || self.burstiness_cv_threshold < 0.0 {
            return Err("burstiness_cv_threshold must be a non-negative number".into());
        }
        Ok(())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub risk_level: RiskLevel,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Raw signal counts behind an assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSignals {
    pub flagged_occurrences: usize,
    pub coefficient_of_variation: f64,
    pub triplets: usize,
    pub negations: usize,
    pub conclusion_phrases: Vec<&'static str>,
}

impl RiskSignals {
    /// Count signals over the parts of `text` the rewriter can change:
    /// vocabulary outside fenced code, triplets in prose only.
    pub fn collect(text: &str) -> Self {
        let blocks = split_blocks(text);
        let readable = blocks
            .iter()
            .filter(|block| block.kind != BlockKind::Code)
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let triplets = blocks
            .iter()
            .filter(|block| block.is_prose())
            .map(|block| find_triplets(&block.text).len())
            .sum();
        let conclusion_phrases = CONCLUSION_PHRASES
            .iter()
            .filter(|(_, re)| re.is_match(&readable))
            .map(|(phrase, _)| *phrase)
            .collect();
        Self {
            flagged_occurrences: FLAGGED_TABLE.count(&readable),
            coefficient_of_variation: BurstinessReport::analyze(text).coefficient_of_variation,
            triplets,
            negations: NEGATIONS.find_iter(&readable).count(),
            conclusion_phrases,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    weights: ScoringWeights,
}

impl RiskScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn band(&self, score: u32) -> RiskLevel {
        if score >= self.weights.low_risk_floor {
            RiskLevel::Low
        } else if score >= self.weights.medium_risk_floor {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn assess(&self, text: &str) -> RiskAssessment {
        self.assess_signals(&RiskSignals::collect(text))
    }

    pub fn assess_signals(&self, signals: &RiskSignals) -> RiskAssessment {
        let w = &self.weights;
        let mut penalty: u32 = 0;
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        if signals.flagged_occurrences > 0 {
            let count = u32::try_from(signals.flagged_occurrences).unwrap_or(u32::MAX);
            penalty += count.saturating_mul(w.flagged_penalty).min(w.flagged_cap);
            issues.push(format!(
                "{} flagged vocabulary occurrence(s)",
                signals.flagged_occurrences
            ));
            recommendations.push("Replace stock AI vocabulary with plainer words".to_string());
        }

        if signals.coefficient_of_variation <= w.burstiness_cv_threshold {
            penalty += w.burstiness_penalty;
            issues.push(format!(
                "Low sentence-length variation (CV {:.1}%)",
                signals.coefficient_of_variation
            ));
            recommendations.push("Mix short fragments with longer sentences".to_string());
        }

        if signals.triplets > w.max_triplets {
            penalty += w.triplet_penalty;
            issues.push(format!("{} three-item lists", signals.triplets));
            recommendations.push("Use two or four items instead of three".to_string());
        }

        if signals.negations > w.max_negations {
            penalty += w.negation_penalty;
            issues.push(format!("{} uncontracted negations", signals.negations));
            recommendations.push("Contract negations (don't, isn't, can't)".to_string());
        }

        if !signals.conclusion_phrases.is_empty() {
            let distinct = u32::try_from(signals.conclusion_phrases.len()).unwrap_or(u32::MAX);
            penalty += distinct.saturating_mul(w.conclusion_penalty);
            issues.push(format!(
                "Summary phrases: {}",
                signals.conclusion_phrases.join(", ")
            ));
            recommendations.push("End on a concrete takeaway instead of a summary".to_string());
        }

        let score = 100u32.saturating_sub(penalty);
        RiskAssessment {
            score,
            risk_level: self.band(score),
            issues,
            recommendations,
        }
    }
}
