use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::rng::RandomSource;
use crate::text::{join_sentences, map_prose, split_sentences, word_count};

/// Minimum words a sentence needs before it may trail off into an ellipsis.
const ELLIPSIS_MIN_WORDS: usize = 6;

static WHICH_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i), which (?:is|are|was|were) (?P<aside>[^,.;:!?\n]{1,80}),")
        .expect("which-clause pattern is valid")
});

/// Turn some ", which is X," clauses into " — X — " asides, and some plain
/// sentence-final periods into ellipses. Prose blocks only.
pub fn add_friction(
    text: &str,
    aside_probability: f64,
    ellipsis_probability: f64,
    rng: &mut dyn RandomSource,
) -> String {
    map_prose(text, |block| {
        let with_asides = em_dash_asides(block, aside_probability, rng);
        trailing_ellipses(&with_asides, ellipsis_probability, rng)
    })
}

pub fn em_dash_asides(text: &str, probability: f64, rng: &mut dyn RandomSource) -> String {
    WHICH_CLAUSE
        .replace_all(text, |caps: &Captures<'_>| {
            if rng.chance(probability) {
                format!(" — {} — ", caps["aside"].trim())
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

fn ellipsis_eligible(sentence: &str) -> bool {
    sentence.ends_with('.')
        && !sentence.ends_with("..")
        && word_count(sentence) >= ELLIPSIS_MIN_WORDS
}

pub fn trailing_ellipses(text: &str, probability: f64, rng: &mut dyn RandomSource) -> String {
    let sentences = split_sentences(text);
    if !sentences.iter().any(|s| ellipsis_eligible(s)) {
        return text.to_string();
    }

    let mut changed = false;
    let rewritten: Vec<String> = sentences
        .into_iter()
        .map(|sentence| {
            if ellipsis_eligible(&sentence) && rng.chance(probability) {
                changed = true;
                format!("{}...", sentence.trim_end_matches('.'))
            } else {
                sentence
            }
        })
        .collect();

    if changed {
        join_sentences(&rewritten)
    } else {
        text.to_string()
    }
}
