//! Structural views of a document: blocks, sentences, words.

pub mod blocks;
pub mod burstiness;
pub mod sentences;

pub use blocks::{Block, BlockKind, is_heading_line, is_list_item_line, join_blocks, map_blocks, map_prose, split_blocks};
pub use burstiness::BurstinessReport;
pub use sentences::{join_sentences, split_sentences};

/// Count words: whitespace-separated tokens containing at least one
/// alphanumeric character. Markdown markers (`#`, `-`, `*`) are not words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .count()
}

/// Uppercase the first alphabetic character, leaving everything else alone.
pub fn capitalize_first(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut done = false;
    for c in text.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Lowercase the first character when it starts an ordinary word.
///
/// Leaves `I`, `I'm`-style pronouns and acronyms (`API`, `SEO`) as they are.
pub fn decapitalize_first(text: &str) -> String {
    let first_word = text.split_whitespace().next().unwrap_or_default();
    let letters: Vec<char> = first_word.chars().filter(|c| c.is_alphabetic()).collect();
    let is_pronoun_i = letters.first() == Some(&'I')
        && (letters.len() == 1 || first_word.starts_with("I'") || first_word.starts_with("I’"));
    let is_acronym = letters.len() > 1 && letters.iter().take(2).all(|c| c.is_uppercase());
    if is_pronoun_i || is_acronym {
        return text.to_string();
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keep `original`'s leading and trailing whitespace around `replacement`.
///
/// Remote services and transforms tend to trim; reassembly relies on the
/// separators between segments surviving.
pub fn reattach_whitespace(original: &str, replacement: &str) -> String {
    let leading_len = original.len() - original.trim_start().len();
    let trailing_len = original.len() - original.trim_end().len();
    let leading = &original[..leading_len];
    let trailing = if trailing_len == original.len() {
        ""
    } else {
        &original[original.len() - trailing_len..]
    };
    format!("{leading}{}{trailing}", replacement.trim())
}
