use serde::{Deserialize, Serialize};

use crate::lexicon::HEDGE_MARKERS;
use crate::lexicon::phrases::{HEDGES, RHETORICAL_QUESTIONS, VOICE_OPENERS};
use crate::rng::{RandomSource, choose};
use crate::text::{decapitalize_first, join_sentences, map_prose, split_sentences, word_count};

/// Paragraphs shorter than this get no injections at all.
pub const MIN_PARAGRAPH_WORDS: usize = 12;
/// Sentences shorter than this never receive a hedge.
pub const MIN_HEDGE_SENTENCE_WORDS: usize = 8;

/// Bernoulli rates for voice injection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InjectionRates {
    /// Per paragraph: prepend a voice opener to the first sentence.
    pub opener: f64,
    /// Per sentence: splice a hedge in at a random offset.
    pub hedge: f64,
    /// Per paragraph: append a rhetorical question.
    pub question: f64,
}

impl Default for InjectionRates {
    fn default() -> Self {
        Self {
            opener: 0.15,
            hedge: 0.08,
            question: 0.06,
        }
    }
}

impl InjectionRates {
    /// Scale every rate by `factor`, capped at 1.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            opener: (self.opener * factor).clamp(0.0, 1.0),
            hedge: (self.hedge * factor).clamp(0.0, 1.0),
            question: (self.question * factor).clamp(0.0, 1.0),
        }
    }
}

pub fn inject_voice(text: &str, rates: InjectionRates, rng: &mut dyn RandomSource) -> String {
    map_prose(text, |paragraph| inject_paragraph(paragraph, rates, rng))
}

fn starts_with_opener(sentence: &str) -> bool {
    VOICE_OPENERS
        .iter()
        .any(|opener| sentence.starts_with(opener))
}

fn hedge_eligible(sentence: &str) -> bool {
    word_count(sentence) >= MIN_HEDGE_SENTENCE_WORDS
        && !sentence.contains('?')
        && !HEDGE_MARKERS.is_match(sentence)
}

/// Insert `hedge` after a word that carries no trailing punctuation, keeping
/// at least two words on either side.
fn splice_hedge(sentence: &str, hedge: &str, rng: &mut dyn RandomSource) -> Option<String> {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() < 4 {
        return None;
    }
    // A hedge right before "and"/"or" would read as an extra list item.
    let offsets: Vec<usize> = (2..=words.len() - 2)
        .filter(|&k| {
            words[k - 1]
                .chars()
                .last()
                .is_some_and(char::is_alphanumeric)
                && !matches!(words[k].to_ascii_lowercase().as_str(), "and" | "or")
        })
        .collect();
    let &k = choose(rng, &offsets)?;
    Some(format!(
        "{}, {hedge}, {}",
        words[..k].join(" "),
        words[k..].join(" ")
    ))
}

pub fn inject_paragraph(
    paragraph: &str,
    rates: InjectionRates,
    rng: &mut dyn RandomSource,
) -> String {
    if word_count(paragraph) < MIN_PARAGRAPH_WORDS {
        return paragraph.to_string();
    }
    let mut sentences = split_sentences(paragraph);
    let Some(first) = sentences.first() else {
        return paragraph.to_string();
    };
    let mut changed = false;

    if rng.chance(rates.opener)
        && !starts_with_opener(first)
        && let Some(opener) = choose(rng, VOICE_OPENERS)
    {
        sentences[0] = format!("{opener} {}", decapitalize_first(first));
        changed = true;
    }

    for sentence in &mut sentences {
        if rng.chance(rates.hedge)
            && hedge_eligible(sentence)
            && let Some(hedge) = choose(rng, HEDGES)
            && let Some(hedged) = splice_hedge(sentence, hedge, rng)
        {
            *sentence = hedged;
            changed = true;
        }
    }

    let ends_with_question = sentences.last().is_some_and(|s| s.ends_with('?'));
    if rng.chance(rates.question)
        && !ends_with_question
        && let Some(question) = choose(rng, RHETORICAL_QUESTIONS)
    {
        sentences.push((*question).to_string());
        changed = true;
    }

    if changed {
        join_sentences(&sentences)
    } else {
        paragraph.to_string()
    }
}
