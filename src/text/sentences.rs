//! Sentence segmentation over a single prose block.

const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "mr", "mrs", "ms", "dr", "vs", "etc", "approx", "inc", "st",
];

fn ends_with_abbreviation(before: &str) -> bool {
    let last_word = before
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .trim_end_matches('.')
        .to_ascii_lowercase();
    // `etc.` at the very end of a clause still ends the sentence when the next
    // word is capitalized; the caller checks that.
    ABBREVIATIONS.contains(&last_word.as_str())
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '”' | '’' | '*' | '_')
}

/// Split prose into sentences, keeping terminal punctuation.
///
/// A sentence ends at `.`, `!`, `?` or `…` (runs included) followed by
/// whitespace or end of text, unless the period closes a known abbreviation
/// and the next word starts in lowercase. Whitespace between sentences is
/// dropped; newlines inside a sentence collapse to spaces.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (_, c) = chars[i];
        if matches!(c, '.' | '!' | '?' | '…') {
            let mut j = i;
            while j + 1 < chars.len() && matches!(chars[j + 1].1, '.' | '!' | '?' | '…') {
                j += 1;
            }
            while j + 1 < chars.len() && is_closing(chars[j + 1].1) {
                j += 1;
            }
            let end = chars.get(j + 1).map_or(text.len(), |(idx, _)| *idx);
            let at_boundary = chars.get(j + 1).is_none_or(|(_, next)| next.is_whitespace());

            if at_boundary {
                let candidate = &text[start..end];
                let next_word_lower = text[end..]
                    .trim_start()
                    .chars()
                    .next()
                    .is_some_and(char::is_lowercase);
                let abbreviation =
                    c == '.' && i == j && ends_with_abbreviation(&text[start..chars[i].0]);
                if !(abbreviation && next_word_lower) {
                    push_sentence(&mut sentences, candidate);
                    start = end;
                }
            }
            i = j + 1;
            continue;
        }
        i += 1;
    }
    if start < text.len() {
        push_sentence(&mut sentences, &text[start..]);
    }
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.is_empty() {
        sentences.push(normalized);
    }
}

pub fn join_sentences(sentences: &[String]) -> String {
    sentences.join(" ")
}
