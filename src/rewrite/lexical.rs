use crate::lexicon::{CONTRACTION_TABLE, FLAGGED_TABLE};
use crate::rng::{ForcedRandom, RandomSource};
use crate::text::{BlockKind, map_blocks};

fn is_text_block(kind: BlockKind) -> bool {
    kind != BlockKind::Code
}

/// Replace flagged vocabulary everywhere except fenced code.
pub fn substitute_flagged(text: &str, rng: &mut dyn RandomSource) -> String {
    map_blocks(text, is_text_block, |block| FLAGGED_TABLE.apply(block, rng))
}

/// Contract formal auxiliaries ("do not" → "don't") everywhere except code.
pub fn apply_contractions(text: &str) -> String {
    // Every contraction has exactly one form; the random source is never consulted.
    let mut rng = ForcedRandom::never();
    map_blocks(text, is_text_block, |block| {
        CONTRACTION_TABLE.apply(block, &mut rng)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_replaced_with_first_alternative() {
        let out = substitute_flagged(
            "Furthermore, it works. Additionally, it scales.",
            &mut ForcedRandom::never(),
        );
        assert_eq!(out, "Plus, it works. Also, it scales.");
    }

    #[test]
    fn code_blocks_are_left_alone() {
        let text = "We utilize caching.\n\n```\nfn utilize() {}\n```";
        let out = substitute_flagged(text, &mut ForcedRandom::never());
        assert_eq!(out, "We use caching.\n\n```\nfn utilize() {}\n```");
    }

    #[test]
    fn contractions_apply_across_headings_and_prose() {
        let out = apply_contractions("## Why it is hard\n\nYou do not need much.");
        assert_eq!(out, "## Why it's hard\n\nYou don't need much.");
    }
}
