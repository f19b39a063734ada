use quillshift::rewrite::LocalRewriter;
use quillshift::rewrite::lists::find_triplets;
use quillshift::rng::{ForcedRandom, SeededRandom};
use quillshift::scoring::{RiskLevel, RiskScorer};
use quillshift::text::BurstinessReport;

const FLAT: &str =
    "This is important. Furthermore, it is important. Additionally, it remains important.";

const ARTICLE: &str = "## Why caching matters\n\n\
It is important to leverage caching for speed, cost, and scale. \
Moreover, we do not need to utilize a database for every read. \
The cache is warm. The cache is fast. The cache is cheap.\n\n\
- first item\n- second item\n\n\
```rust\nlet tiers = [hot, warm, and_cold];\n```\n\n\
## Conclusion\n\n\
In conclusion, a seamless cache layer will not let you down.";

#[test]
fn flat_transitions_become_a_fragment_and_the_score_rises() {
    let scorer = RiskScorer::default();
    let before = scorer.assess(FLAT);

    let after_text = LocalRewriter::default().rewrite(FLAT, &mut ForcedRandom::never());
    let after = scorer.assess(&after_text);

    assert!(!after_text.contains("Furthermore"));
    assert!(!after_text.contains("Additionally"));
    assert!(after_text.contains("Plus."));
    assert!(after.score > before.score);
    assert_eq!(after.risk_level, RiskLevel::Low);
}

#[test]
fn fixed_seed_is_byte_identical_across_runs() {
    let rewriter = LocalRewriter::default();
    for seed in [1, 7, 42, 1234] {
        let a = rewriter.rewrite(ARTICLE, &mut SeededRandom::from_seed(seed));
        let b = rewriter.rewrite(ARTICLE, &mut SeededRandom::from_seed(seed));
        assert_eq!(a, b, "seed {seed} diverged");
    }
}

#[test]
fn no_three_item_enumerations_survive_in_prose() {
    let rewriter = LocalRewriter::default();
    for seed in 0..16 {
        let out = rewriter.rewrite(ARTICLE, &mut SeededRandom::from_seed(seed));
        let prose_end = out.find("```").unwrap_or(out.len());
        assert!(
            find_triplets(&out[..prose_end]).is_empty(),
            "seed {seed} left a triplet: {out}"
        );
    }
}

#[test]
fn structure_survives_rewriting() {
    let out = LocalRewriter::default().rewrite(ARTICLE, &mut ForcedRandom::always());
    assert!(out.starts_with("## Why caching matters"));
    assert!(out.contains("- first item\n- second item"));
    assert!(out.contains("```rust\nlet tiers = [hot, warm, and_cold];\n```"));
    assert!(!out.contains("## Conclusion"));
    assert!(!out.contains("In conclusion"));
}

#[test]
fn burstiness_is_stable_under_reanalysis() {
    let out = LocalRewriter::default().rewrite(ARTICLE, &mut SeededRandom::from_seed(3));
    let first = BurstinessReport::analyze(&out);
    let second = BurstinessReport::analyze(&out);
    assert_eq!(first, second);
}
