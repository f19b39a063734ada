use serde::Serialize;

use super::blocks::split_blocks;
use super::sentences::split_sentences;
use super::word_count;

/// Coefficient of variation (percent) above which sentence rhythm reads as human.
pub const HUMAN_LIKE_CV_PERCENT: f64 = 40.0;

/// Sentence-length statistics for one body of text.
///
/// Always recomputed from the text it describes; a report is never reused
/// after the text changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurstinessReport {
    pub sentence_lengths: Vec<usize>,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// Standard deviation over mean, in percent.
    pub coefficient_of_variation: f64,
    pub is_human_like: bool,
}

impl BurstinessReport {
    /// Analyze every prose sentence in `text`. Headings, lists and code are
    /// excluded because their "sentences" are not sentences.
    pub fn analyze(text: &str) -> Self {
        let lengths: Vec<usize> = split_blocks(text)
            .iter()
            .filter(|block| block.is_prose())
            .flat_map(|block| split_sentences(&block.text))
            .map(|sentence| word_count(&sentence))
            .filter(|&len| len > 0)
            .collect();
        Self::from_lengths(lengths)
    }

    /// Analyze an already-split list of sentences.
    pub fn from_sentences(sentences: &[String]) -> Self {
        Self::from_lengths(
            sentences
                .iter()
                .map(|s| word_count(s))
                .filter(|&len| len > 0)
                .collect(),
        )
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn from_lengths(sentence_lengths: Vec<usize>) -> Self {
        if sentence_lengths.is_empty() {
            return Self {
                sentence_lengths,
                mean: 0.0,
                variance: 0.0,
                std_dev: 0.0,
                coefficient_of_variation: 0.0,
                is_human_like: false,
            };
        }

        let n = sentence_lengths.len() as f64;
        let mean = sentence_lengths.iter().sum::<usize>() as f64 / n;
        let variance = sentence_lengths
            .iter()
            .map(|&len| {
                let delta = len as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();
        let coefficient_of_variation = if mean > 0.0 {
            std_dev / mean * 100.0
        } else {
            0.0
        };

        Self {
            sentence_lengths,
            mean,
            variance,
            std_dev,
            coefficient_of_variation,
            is_human_like: coefficient_of_variation > HUMAN_LIKE_CV_PERCENT,
        }
    }
}
