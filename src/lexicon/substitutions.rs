//! Vocabulary that automated classifiers associate with machine-written text,
//! mapped to plainer alternatives. The first alternative is the default pick.

use super::rules::RuleEntry;

pub const FLAGGED_VOCABULARY: &[RuleEntry] = &[
    // ── Transitions ─────────────────────────────────────────────────────
    ("furthermore", &["plus", "also", "what's more"]),
    ("additionally", &["also", "plus", "on top of that"]),
    ("moreover", &["besides", "and", "what's more"]),
    ("consequently", &["so", "as a result"]),
    ("subsequently", &["later", "then", "after that"]),
    ("nevertheless", &["still", "even so"]),
    ("nonetheless", &["still", "even so"]),
    ("thus", &["so"]),
    ("hence", &["so", "that's why"]),
    ("notably", &["in particular", "especially"]),
    ("indeed", &["in fact", "really"]),
    ("ultimately", &["in the end", "eventually"]),
    ("firstly", &["first"]),
    ("secondly", &["second"]),
    ("lastly", &["finally", "last"]),
    // ── Verbs ───────────────────────────────────────────────────────────
    ("delve", &["dig", "look"]),
    ("delve into", &["dig into", "look at"]),
    ("delves into", &["digs into", "looks at"]),
    ("delving into", &["digging into", "looking at"]),
    ("dive into", &["get into", "look at"]),
    ("utilize", &["use"]),
    ("utilizes", &["uses"]),
    ("utilizing", &["using"]),
    ("leverage", &["use", "draw on"]),
    ("leveraging", &["using", "drawing on"]),
    ("harness", &["use", "put to work"]),
    ("facilitate", &["help", "make easier"]),
    ("facilitates", &["helps"]),
    ("streamline", &["simplify", "speed up"]),
    ("optimize", &["tune", "improve"]),
    ("elevate", &["raise", "lift"]),
    ("unleash", &["release", "let loose"]),
    ("unlock", &["open up", "get"]),
    ("embark", &["start", "set out"]),
    ("embark on", &["start", "take on"]),
    ("foster", &["build", "encourage"]),
    ("navigate", &["handle", "work through"]),
    ("navigating", &["handling", "working through"]),
    ("underscore", &["highlight", "show"]),
    ("underscores", &["highlights", "shows"]),
    ("showcase", &["show", "show off"]),
    ("showcases", &["shows"]),
    ("empower", &["help", "let"]),
    ("revolutionize", &["change", "reshape"]),
    ("bolster", &["support", "strengthen"]),
    ("resonate", &["land", "connect"]),
    // ── Adjectives ──────────────────────────────────────────────────────
    ("robust", &["solid", "sturdy", "reliable"]),
    ("seamless", &["smooth", "easy"]),
    ("seamlessly", &["smoothly", "easily"]),
    ("comprehensive", &["thorough", "full", "complete"]),
    ("crucial", &["key", "vital", "important"]),
    ("pivotal", &["key", "central"]),
    ("paramount", &["critical", "top priority"]),
    ("meticulous", &["careful", "detailed"]),
    ("meticulously", &["carefully"]),
    ("vibrant", &["lively", "busy"]),
    ("bustling", &["busy", "crowded"]),
    ("intricate", &["complex", "detailed"]),
    ("nuanced", &["subtle", "layered"]),
    ("holistic", &["whole-picture", "all-round"]),
    ("innovative", &["new", "fresh"]),
    ("cutting-edge", &["latest", "newest"]),
    ("ever-evolving", &["changing", "shifting"]),
    ("transformative", &["big", "major"]),
    ("multifaceted", &["varied", "many-sided"]),
    ("invaluable", &["very useful", "priceless"]),
    ("commendable", &["good", "solid"]),
    // ── Nouns ───────────────────────────────────────────────────────────
    ("tapestry", &["mix", "blend"]),
    ("landscape", &["scene", "field", "space"]),
    ("realm", &["area", "world", "field"]),
    ("testament", &["proof", "sign"]),
    ("game-changer", &["big shift", "real difference"]),
    ("plethora", &["lot", "pile"]),
    ("myriad", &["many", "countless"]),
    ("endeavor", &["effort", "project"]),
    ("synergy", &["teamwork", "fit"]),
    ("paradigm", &["model", "approach"]),
    ("journey", &["process", "path"]),
    // ── Stock phrases ───────────────────────────────────────────────────
    ("a plethora of", &["lots of", "plenty of"]),
    ("a myriad of", &["plenty of", "loads of"]),
    ("in order to", &["to"]),
    ("in today's fast-paced world", &["these days", "right now"]),
    ("in today's digital age", &["these days", "now"]),
    ("it's important to note that", &["note that", "keep in mind that"]),
    ("it is important to note that", &["note that", "keep in mind that"]),
    ("it's worth noting that", &["note that", "by the way,"]),
    ("it is worth noting that", &["note that", "by the way,"]),
    ("plays a crucial role", &["matters a lot", "counts"]),
    ("plays a vital role", &["matters a lot", "counts"]),
    ("when it comes to", &["with", "for"]),
    ("at the end of the day", &["in the end", "really"]),
    ("a testament to", &["proof of", "a sign of"]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::rules::RuleTable;
    use crate::rng::ForcedRandom;

    #[test]
    fn every_entry_has_an_alternative() {
        for (key, alts) in FLAGGED_VOCABULARY {
            assert!(!alts.is_empty(), "{key} has no alternatives");
            assert_eq!(*key, key.to_lowercase(), "{key} must be lowercase");
        }
    }

    #[test]
    fn no_single_word_entry_matches_inside_an_unlisted_word() {
        let table = RuleTable::new(FLAGGED_VOCABULARY).unwrap();
        for (key, _) in FLAGGED_VOCABULARY.iter().filter(|(k, _)| !k.contains(' ')) {
            for affix in ["ness", "ing", "ed", "s", "ly"] {
                for word in [format!("{key}{affix}"), format!("un{key}")] {
                    for found in table.find_all(&word) {
                        assert_eq!(
                            (found.start, found.end),
                            (0, word.len()),
                            "{key} matched inside {word}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn robustness_survives_substitution() {
        let table = RuleTable::new(FLAGGED_VOCABULARY).unwrap();
        let out = table.apply("The robustness test passed.", &mut ForcedRandom::never());
        assert_eq!(out, "The robustness test passed.");
    }
}
