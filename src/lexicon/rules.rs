use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::rng::{RandomSource, choose};

/// A static `pattern → alternatives` entry.
pub type RuleEntry = (&'static str, &'static [&'static str]);

/// Compiled rule table with a fixed matching discipline:
///
/// * longest pattern wins where several start at the same position;
/// * matches are anchored on word boundaries, so `robust` never matches
///   inside `robustness`;
/// * matching is case-insensitive and the replacement inherits the case of
///   the matched span's first letter.
pub struct RuleTable {
    pattern: Regex,
    alternatives: HashMap<String, &'static [&'static str]>,
}

/// One located occurrence of a rule pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub start: usize,
    pub end: usize,
    pub matched: String,
}

impl RuleTable {
    pub fn new(entries: &[RuleEntry]) -> Result<Self, regex::Error> {
        let mut keys: Vec<&'static str> = entries.iter().map(|(key, _)| *key).collect();
        // Leftmost-first alternation: put longer patterns first so
        // "delve into" beats "delve".
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys.dedup();

        let alternation = keys
            .iter()
            .map(|key| regex::escape(key).replace('\'', "['’]"))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?;

        let alternatives = entries
            .iter()
            .map(|(key, alts)| (normalize_key(key), *alts))
            .collect();

        Ok(Self {
            pattern,
            alternatives,
        })
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn find_all(&self, text: &str) -> Vec<RuleMatch> {
        self.pattern
            .find_iter(text)
            .map(|m| RuleMatch {
                start: m.start(),
                end: m.end(),
                matched: m.as_str().to_string(),
            })
            .collect()
    }

    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// Replace every match with one of its alternatives.
    pub fn apply(&self, text: &str, rng: &mut dyn RandomSource) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                let matched = &caps[0];
                let Some(alts) = self.alternatives.get(&normalize_key(matched)) else {
                    return matched.to_string();
                };
                match choose(rng, alts) {
                    Some(replacement) => match_case(matched, replacement),
                    None => matched.to_string(),
                }
            })
            .into_owned()
    }
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace('’', "'")
}

/// Give `replacement` the case of `matched`'s first letter.
///
/// All-caps spans longer than one letter produce all-caps replacements.
pub fn match_case(matched: &str, replacement: &str) -> String {
    let letters: Vec<char> = matched.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    let first_upper = letters.first().is_some_and(|c| c.is_uppercase());
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if first_upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
