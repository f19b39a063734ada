//! Static lexical tables. Compiled once, read concurrently, never mutated.

pub mod contractions;
pub mod phrases;
pub mod rules;
pub mod substitutions;

use std::sync::LazyLock;

use regex::Regex;

pub use rules::{RuleEntry, RuleMatch, RuleTable, match_case};

pub static FLAGGED_TABLE: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(substitutions::FLAGGED_VOCABULARY).expect("flagged vocabulary compiles")
});

pub static CONTRACTION_TABLE: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::new(contractions::CONTRACTIONS).expect("contraction table compiles")
});

pub static NEGATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(contractions::NEGATION_PATTERN).expect("negation pattern compiles")
});

pub static CONCLUSION_PHRASES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    phrases::AI_CONCLUSION_PHRASES
        .iter()
        .map(|phrase| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase)))
                .expect("conclusion phrase compiles");
            (*phrase, re)
        })
        .collect()
});

pub static HEDGE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = phrases::HEDGE_MARKERS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("hedge markers compile")
});

/// Flagged vocabulary keys, sorted, for prompt composition.
pub fn flagged_terms() -> Vec<&'static str> {
    let mut terms: Vec<&'static str> = substitutions::FLAGGED_VOCABULARY
        .iter()
        .map(|(key, _)| *key)
        .collect();
    terms.sort_unstable();
    terms.dedup();
    terms
}
