//! Sentence-length rebalancing for paragraphs with a flat rhythm.

use std::ops::Range;

use super::lists::find_enumerations;
use crate::text::{
    BurstinessReport, capitalize_first, join_sentences, map_prose, split_sentences, word_count,
};

/// Paragraphs shorter than this are never rebalanced.
pub const MIN_SENTENCES: usize = 3;
/// Adjacent sentences closer than this (in words) are split candidates.
pub const LENGTH_GAP: usize = 5;
/// A clause-boundary split needs at least this many words in the lead...
pub const MIN_FRAGMENT_WORDS: usize = 2;
/// ...and this many in the remainder.
pub const MIN_REMAINDER_WORDS: usize = 2;
/// One-word leads that read as a sentence on their own.
const STANDALONE_LEADS: &[&str] = &[
    "anyway", "exactly", "fine", "granted", "honestly", "look", "no", "okay", "plus",
    "seriously", "sure", "true", "yes",
];
/// A conjunction split needs at least this many words on each side.
const MIN_CONJUNCTION_SIDE_WORDS: usize = 3;

const CLAUSE_SEPARATORS: &[&str] = &[", ", "; ", ": ", " — "];
const CONJUNCTIONS: &[&str] = &[" but ", " and ", " so ", " because "];

/// Rebalance every prose paragraph of `text`.
pub fn rebalance(text: &str) -> String {
    map_prose(text, rebalance_paragraph)
}

/// Split flat-rhythm sentences until the paragraph reads as human-like.
///
/// A paragraph that is already human-like is returned unchanged.
pub fn rebalance_paragraph(paragraph: &str) -> String {
    let mut sentences = split_sentences(paragraph);
    if sentences.len() < MIN_SENTENCES
        || BurstinessReport::from_sentences(&sentences).is_human_like
    {
        return paragraph.to_string();
    }

    let mut changed = false;
    let mut i = 0;
    while i + 1 < sentences.len() {
        let current = word_count(&sentences[i]);
        let next = word_count(&sentences[i + 1]);
        if current.abs_diff(next) < LENGTH_GAP {
            let target = if current > next { i } else { i + 1 };
            if let Some((lead, rest)) = split_sentence(&sentences[target]) {
                sentences.splice(target..=target, [lead, rest]);
                changed = true;
                if BurstinessReport::from_sentences(&sentences).is_human_like {
                    break;
                }
                i = target + 2;
                continue;
            }
        }
        i += 1;
    }

    if changed {
        join_sentences(&sentences)
    } else {
        paragraph.to_string()
    }
}

fn split_terminal(sentence: &str) -> (&str, &str) {
    let body = sentence.trim_end_matches(['.', '!', '?', '…', '"', '\'', ')', '”', '’']);
    (body, &sentence[body.len()..])
}

fn lead_stands_alone(lead: &str) -> bool {
    match word_count(lead) {
        0 => false,
        1 => STANDALONE_LEADS.contains(&lead.to_lowercase().as_str()),
        n => n >= MIN_FRAGMENT_WORDS,
    }
}

fn split_at(body: &str, terminal: &str, lead_end: usize, rest_start: usize) -> (String, String) {
    (
        format!("{}.", capitalize_first(body[..lead_end].trim())),
        format!("{}{terminal}", capitalize_first(body[rest_start..].trim())),
    )
}

/// Split one sentence into a short lead and a remainder, or `None` when no
/// split keeps both halves plausible. Commas and conjunctions inside an
/// enumeration are never split points.
pub fn split_sentence(sentence: &str) -> Option<(String, String)> {
    let (body, terminal) = split_terminal(sentence);
    let terminal = if terminal.is_empty() { "." } else { terminal };
    let enumerations: Vec<Range<usize>> = find_enumerations(body)
        .into_iter()
        .map(|list| list.range)
        .collect();
    let in_enumeration = |pos: usize| enumerations.iter().any(|range| range.contains(&pos));

    let mut boundaries: Vec<(usize, &str)> = CLAUSE_SEPARATORS
        .iter()
        .flat_map(|sep| body.match_indices(sep).map(move |(pos, _)| (pos, *sep)))
        .filter(|&(pos, _)| !in_enumeration(pos))
        .collect();
    boundaries.sort_unstable_by_key(|(pos, _)| *pos);

    for (pos, sep) in boundaries {
        let rest_start = pos + sep.len();
        if lead_stands_alone(body[..pos].trim())
            && word_count(&body[rest_start..]) >= MIN_REMAINDER_WORDS
        {
            return Some(split_at(body, terminal, pos, rest_start));
        }
    }

    for conj in CONJUNCTIONS {
        for (pos, _) in body.match_indices(conj) {
            if in_enumeration(pos) {
                continue;
            }
            if word_count(&body[..pos]) >= MIN_CONJUNCTION_SIDE_WORDS
                && word_count(&body[pos + 1..]) >= MIN_CONJUNCTION_SIDE_WORDS
            {
                return Some(split_at(body, terminal, pos, pos + 1));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_clause_boundary() {
        assert_eq!(
            split_sentence("Plus, it's important."),
            Some(("Plus.".into(), "It's important.".into()))
        );
    }

    #[test]
    fn splits_before_conjunction_keeping_question_mark() {
        assert_eq!(
            split_sentence("We tried the patch but nothing changed at all?"),
            Some(("We tried the patch.".into(), "But nothing changed at all?".into()))
        );
    }

    #[test]
    fn refuses_implausible_splits() {
        assert_eq!(split_sentence("Too short."), None);
        assert_eq!(split_sentence("Yes, ok."), None);
    }

    #[test]
    fn one_word_leads_must_stand_alone() {
        assert_eq!(split_sentence("Still, the users were not happy."), None);
        assert_eq!(split_sentence("However, the team shipped it today."), None);
        assert_eq!(
            split_sentence("Honestly, the users were not happy."),
            Some(("Honestly.".into(), "The users were not happy.".into()))
        );
    }

    #[test]
    fn enumerations_are_never_cut_apart() {
        assert_eq!(
            split_sentence("We care about speed, cost, safety, and uptime in every release."),
            None
        );
        assert_eq!(
            split_sentence("After the launch, we tracked speed, cost, safety, and uptime daily."),
            Some((
                "After the launch.".into(),
                "We tracked speed, cost, safety, and uptime daily.".into()
            ))
        );
    }

    #[test]
    fn transition_led_paragraph_keeps_whole_sentences() {
        let text = "However, the team shipped it today. Still, the users were not happy. Again, the fix took a while.";
        let out = rebalance_paragraph(text);
        assert_eq!(out, text);
        assert!(split_sentences(&out).iter().all(|s| word_count(s) > 1));
    }

    #[test]
    fn flat_paragraph_gains_a_fragment() {
        let out = rebalance_paragraph("This is important. Plus, it's important. Also, it remains important.");
        assert_eq!(
            out,
            "This is important. Plus. It's important. Also, it remains important."
        );
        let report = BurstinessReport::analyze(&out);
        assert!(report.is_human_like);
    }

    #[test]
    fn human_like_paragraph_is_untouched() {
        let text = "Short. This one runs on for quite a few more words than the first. Done, mostly.";
        assert!(BurstinessReport::analyze(text).is_human_like);
        assert_eq!(rebalance_paragraph(text), text);
    }

    #[test]
    fn two_sentence_paragraphs_are_skipped() {
        let text = "First, we plan it well. Then, we build it fast.";
        assert_eq!(rebalance_paragraph(text), text);
    }
}
