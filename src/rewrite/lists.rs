//! Never leave an enumeration at exactly three items.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::lexicon::match_case;
use crate::lexicon::phrases::LIST_EXTENDERS;
use crate::rng::{RandomSource, choose};
use crate::text::map_prose;

const ITEM: &str = r"[\p{L}\p{N}'’-]+(?: [\p{L}\p{N}'’-]+){0,2}";
const LAST_ITEM: &str = r"[\p{L}\p{N}'’-]+(?: [\p{L}\p{N}'’-]+){0,2}?";

/// A run of comma-joined items closed by "and"/"or": `A, B, [C, ...,] and Z`.
static RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?P<head>{ITEM}(?:, {ITEM})+),? (?P<conj>and|or) (?P<last>{LAST_ITEM})\b"
    ))
    .expect("enumeration pattern is valid")
});

static THREE_NOUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<num>three|3) (?P<noun>\p{L}+s)\b").expect("three-noun pattern is valid")
});

/// One-word sentence openers that are never list items.
const SENTENCE_ADVERBS: &[&str] = &[
    "additionally", "admittedly", "again", "also", "anyway", "basically", "besides",
    "clearly", "consequently", "eventually", "finally", "first", "fortunately", "frankly",
    "furthermore", "hence", "honestly", "however", "indeed", "instead", "interestingly",
    "later", "likewise", "look", "luckily", "meanwhile", "moreover", "naturally", "notably",
    "now", "obviously", "ok", "okay", "otherwise", "overall", "personally", "plus",
    "recently", "sadly", "similarly", "so", "still", "sure", "then", "therefore", "thus",
    "today", "typically", "ultimately", "unfortunately", "usually", "well", "yes",
    "yesterday",
];

/// First words of a multi-word introductory phrase ("In most cases,").
const PHRASE_OPENERS: &[&str] = &[
    "after", "although", "as", "at", "because", "before", "by", "despite", "during", "for",
    "from", "given", "if", "in", "last", "next", "of", "on", "once", "since", "this", "though",
    "throughout", "to", "unless", "unlike", "until", "when", "whenever", "while", "with",
    "within", "without",
];

/// Whole introductory phrases the opener rules above do not catch.
const INTRO_PHRASES: &[&str] = &[
    "all in all", "even so", "funny enough", "here's the thing", "real talk", "that said",
    "that's why", "truth be told", "what's more",
];

/// A comma-joined enumeration closed by a conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration<'a> {
    /// From the first item to the end of the last one.
    pub range: Range<usize>,
    /// Every item in order, the one after the conjunction included.
    pub items: Vec<&'a str>,
    pub conj: &'a str,
}

impl Enumeration<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn first_word(item: &str) -> String {
    item.split(' ').next().unwrap_or_default().to_lowercase()
}

/// Text from the start of the sentence holding `item` through its end.
fn sentence_lead<'a>(text: &'a str, start: usize, item: &str) -> &'a str {
    let sentence_start = text[..start]
        .rfind(['.', '!', '?', ':', ';', '\n'])
        .map_or(0, |i| i + 1);
    text[sentence_start..start + item.len()]
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '“' | '(' | '*'))
}

/// A sentence-initial "However," or "In most cases," leads into the list
/// rather than belonging to it.
fn is_introduction(text: &str, start: usize, item: &str) -> bool {
    let lead = sentence_lead(text, start, item);
    if lead.contains(',') {
        return false;
    }
    let lower = lead.to_lowercase();
    if INTRO_PHRASES.contains(&lower.as_str()) {
        return true;
    }
    let mut words = lower.split_whitespace();
    let first = words.next().unwrap_or_default();
    if words.next().is_none() {
        SENTENCE_ADVERBS.contains(&first)
    } else {
        PHRASE_OPENERS.contains(&first)
    }
}

fn enumeration<'a>(text: &'a str, caps: &Captures<'a>) -> Option<Enumeration<'a>> {
    let head = caps.name("head")?;
    let conj = caps.name("conj")?;
    let last = caps.name("last")?;

    let mut items: Vec<(usize, &'a str)> = Vec::new();
    let mut offset = head.start();
    for piece in head.as_str().split(", ") {
        items.push((offset, piece));
        offset += piece.len() + 2;
    }

    // "we left, and then apples, pears" restarts the list after the "and".
    if let Some(restart) = (1..items.len())
        .rev()
        .find(|&i| matches!(first_word(items[i].1).as_str(), "and" | "or"))
    {
        items.drain(..restart);
        let (start, item) = items[0];
        let skip = item.find(' ').map_or(item.len(), |i| i + 1);
        items[0] = (start + skip, &item[skip..]);
        if items[0].1.is_empty() {
            items.remove(0);
        }
    }

    if let Some(&(start, item)) = items.first()
        && is_introduction(text, start, item)
    {
        items.remove(0);
    }

    let &(start, _) = items.first()?;
    let mut all: Vec<&'a str> = items.into_iter().map(|(_, item)| item).collect();
    all.push(last.as_str());
    Some(Enumeration {
        range: start..last.end(),
        items: all,
        conj: conj.as_str(),
    })
}

/// Every comma-joined enumeration in `text`, with introductory clauses
/// ("However,", "In most cases,") left out of the item count.
pub fn find_enumerations(text: &str) -> Vec<Enumeration<'_>> {
    RUN.captures_iter(text)
        .filter_map(|caps| enumeration(text, &caps))
        .collect()
}

/// Byte ranges of every "A, B, and C" enumeration of exactly three items.
pub fn find_triplets(text: &str) -> Vec<Range<usize>> {
    find_enumerations(text)
        .into_iter()
        .filter(|list| list.len() == 3)
        .map(|list| list.range)
        .collect()
}

/// Convert each three-item enumeration to two or four items, and "three
/// reasons" phrasing to "two reasons" / "four reasons". Prose blocks only.
///
/// One Bernoulli draw per match: `true` shrinks to two, `false` grows to four.
pub fn normalize_lists(text: &str, rng: &mut dyn RandomSource) -> String {
    map_prose(text, |block| normalize_block(block, rng))
}

fn normalize_block(block: &str, rng: &mut dyn RandomSource) -> String {
    let mut rewritten = String::with_capacity(block.len());
    let mut cursor = 0;
    for list in find_enumerations(block) {
        let &[a, b, c] = list.items.as_slice() else {
            continue;
        };
        rewritten.push_str(&block[cursor..list.range.start]);
        let conj = list.conj;
        if rng.chance(0.5) {
            rewritten.push_str(&format!("{a} {conj} {c}"));
        } else {
            let extra = choose(rng, LIST_EXTENDERS).copied().unwrap_or("more");
            rewritten.push_str(&format!("{a}, {b}, {c}, {conj} {extra}"));
        }
        cursor = list.range.end;
    }
    rewritten.push_str(&block[cursor..]);

    THREE_NOUN
        .replace_all(&rewritten, |caps: &Captures<'_>| {
            let num = &caps["num"];
            let noun = &caps["noun"];
            let two = rng.chance(0.5);
            let replacement = match (num, two) {
                ("3", true) => "2".to_string(),
                ("3", false) => "4".to_string(),
                (_, true) => match_case(num, "two"),
                (_, false) => match_case(num, "four"),
            };
            format!("{replacement} {noun}")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ForcedRandom, SeededRandom};

    #[test]
    fn triplet_shrinks_to_two_dropping_the_middle() {
        let out = normalize_lists(
            "I bought apples, pears, and plums for dinner.",
            &mut ForcedRandom::always(),
        );
        assert_eq!(out, "I bought apples and plums for dinner.");
    }

    #[test]
    fn triplet_grows_to_four() {
        let out = normalize_lists(
            "We care about speed, cost, and safety.",
            &mut ForcedRandom::never(),
        );
        assert_eq!(out, "We care about speed, cost, safety, and a few other things.");
    }

    #[test]
    fn four_item_lists_are_left_alone() {
        let text = "Bring a tent, a stove, a lamp, and a map.";
        assert_eq!(normalize_lists(text, &mut ForcedRandom::always()), text);
        assert!(find_triplets(text).is_empty());
    }

    #[test]
    fn three_noun_phrasing_changes_count() {
        let out = normalize_lists("Here are three reasons. 3 tips follow.", &mut ForcedRandom::always());
        assert_eq!(out, "Here are two reasons. 2 tips follow.");
        let out = normalize_lists("Three mistakes hurt.", &mut ForcedRandom::never());
        assert_eq!(out, "Four mistakes hurt.");
    }

    #[test]
    fn no_exact_triplet_survives() {
        let samples = [
            "It is fast, cheap, and simple.",
            "Pick red, green or blue.",
            "Teams want clear goals, honest feedback, and real ownership.",
            "Plan it, build it, and ship it. Then test, measure, and repeat.",
            "Lists like oats, rice, beans, and lentils stay put.",
        ];
        for seed in 0..20 {
            for sample in samples {
                let out = normalize_lists(sample, &mut SeededRandom::from_seed(seed));
                assert!(find_triplets(&out).is_empty(), "triplet left in {out:?}");
            }
        }
    }

    #[test]
    fn triplet_after_an_introductory_phrase_is_rewritten() {
        let text = "In most cases, speed, cost, and safety matter.";
        let triplets = find_triplets(text);
        assert_eq!(triplets.len(), 1);
        assert_eq!(&text[triplets[0].clone()], "speed, cost, and safety");
        assert_eq!(
            normalize_lists(text, &mut ForcedRandom::always()),
            "In most cases, speed and safety matter."
        );
    }

    #[test]
    fn triplet_after_a_sentence_adverb_is_rewritten() {
        let text = "However, we hired Ann, Bob, and Cy.";
        assert_eq!(find_triplets(text).len(), 1);
        assert_eq!(
            normalize_lists(text, &mut ForcedRandom::always()),
            "However, we hired Ann and Cy."
        );
        assert_eq!(
            normalize_lists(text, &mut ForcedRandom::never()),
            "However, we hired Ann, Bob, Cy, and a few other things."
        );
    }

    #[test]
    fn leading_clause_that_is_an_item_still_counts() {
        let lists = find_enumerations("We tried rice, beans, lentils, and oats.");
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].len(), 4);
        assert_eq!(find_triplets("Then test, measure, and repeat.").len(), 1);
    }

    #[test]
    fn list_restarts_after_an_inner_conjunction() {
        let text = "We packed up, and then apples, pears, and plums went in the car.";
        let lists = find_enumerations(text);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].items, vec!["then apples", "pears", "plums"]);
    }

    #[test]
    fn headings_and_lists_are_untouched() {
        let text = "## Speed, cost, and safety\n\n- red, green, and blue";
        assert_eq!(normalize_lists(text, &mut ForcedRandom::always()), text);
    }
}
