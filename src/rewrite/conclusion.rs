use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::lexicon::phrases::{
    AI_CONCLUSION_HEADINGS, AI_CONCLUSION_PHRASES, ALTERNATE_CLOSING_HEADINGS,
};
use crate::rng::{RandomSource, choose};
use crate::text::capitalize_first;

fn alternation(items: &[&str]) -> String {
    let mut sorted: Vec<&str> = items.to_vec();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.len()));
    sorted
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|")
}

static MARKDOWN_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?im)^(?P<marker>[ \t]*#{{1,6}}[ \t]+)(?:\d+\.[ \t]*)?(?:{})[ \t]*[:.!]?[ \t]*$",
        alternation(AI_CONCLUSION_HEADINGS)
    ))
    .expect("markdown conclusion heading pattern is valid")
});

static HTML_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<open><h[1-6][^>]*>)\s*(?:{})\s*[:.!]?\s*(?P<close></h[1-6]>)",
        alternation(AI_CONCLUSION_HEADINGS)
    ))
    .expect("html conclusion heading pattern is valid")
});

static INLINE_TRANSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{}),[ \t]*(?P<next>\p{{L}})",
        alternation(AI_CONCLUSION_PHRASES)
    ))
    .expect("inline transition pattern is valid")
});

fn opens_sentence(haystack: &str, start: usize) -> bool {
    let before = haystack[..start].trim_end_matches([' ', '\t']);
    before.is_empty()
        || before.ends_with(['.', '!', '?', ':', '\n', '"', '>', '*'])
        || before.ends_with("...")
}

/// Rename summary-style headings and strip "In conclusion,"-style openers.
pub fn rewrite_conclusions(text: &str, rng: &mut dyn RandomSource) -> String {
    let renamed = MARKDOWN_HEADING
        .replace_all(text, |caps: &Captures<'_>| {
            let title = choose(rng, ALTERNATE_CLOSING_HEADINGS).copied().unwrap_or("The Bottom Line");
            format!("{}{title}", &caps["marker"])
        })
        .into_owned();

    let renamed = HTML_HEADING
        .replace_all(&renamed, |caps: &Captures<'_>| {
            let title = choose(rng, ALTERNATE_CLOSING_HEADINGS).copied().unwrap_or("The Bottom Line");
            format!("{}{title}{}", &caps["open"], &caps["close"])
        })
        .into_owned();

    strip_transitions(&renamed)
}

/// Remove inline summary transitions. When the phrase opened a sentence the
/// following word is capitalized; mid-sentence it keeps its case.
pub fn strip_transitions(text: &str) -> String {
    INLINE_TRANSITION
        .replace_all(text, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let next = &caps["next"];
            if opens_sentence(text, start) {
                capitalize_first(next)
            } else {
                next.to_string()
            }
        })
        .into_owned()
}
