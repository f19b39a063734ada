use super::rules::RuleEntry;

/// Formal expansions and the contraction a person would actually write.
pub const CONTRACTIONS: &[RuleEntry] = &[
    ("do not", &["don't"]),
    ("does not", &["doesn't"]),
    ("did not", &["didn't"]),
    ("is not", &["isn't"]),
    ("are not", &["aren't"]),
    ("was not", &["wasn't"]),
    ("were not", &["weren't"]),
    ("have not", &["haven't"]),
    ("has not", &["hasn't"]),
    ("had not", &["hadn't"]),
    ("will not", &["won't"]),
    ("would not", &["wouldn't"]),
    ("should not", &["shouldn't"]),
    ("could not", &["couldn't"]),
    ("cannot", &["can't"]),
    ("can not", &["can't"]),
    ("it is", &["it's"]),
    ("that is", &["that's"]),
    ("there is", &["there's"]),
    ("here is", &["here's"]),
    ("what is", &["what's"]),
    ("let us", &["let's"]),
    ("i am", &["I'm"]),
    ("you are", &["you're"]),
    ("we are", &["we're"]),
    ("they are", &["they're"]),
    ("i have", &["I've"]),
    ("you have", &["you've"]),
    ("we have", &["we've"]),
    ("they have", &["they've"]),
    ("i will", &["I'll"]),
    ("you will", &["you'll"]),
    ("we will", &["we'll"]),
    ("it will", &["it'll"]),
    ("i would", &["I'd"]),
    ("you would", &["you'd"]),
];

/// Uncontracted negations counted by the risk scorer.
pub const NEGATION_PATTERN: &str =
    r"(?i)\b(?:(?:do|does|did|is|are|was|were|have|has|had|will|would|should|could|can)\s+not|cannot)\b";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::rules::RuleTable;
    use crate::rng::ForcedRandom;

    #[test]
    fn contractions_preserve_sentence_case() {
        let table = RuleTable::new(CONTRACTIONS).unwrap();
        let out = table.apply(
            "It is late. We do not stop. I am here.",
            &mut ForcedRandom::never(),
        );
        assert_eq!(out, "It's late. We don't stop. I'm here.");
    }

    #[test]
    fn negation_pattern_matches_uncontracted_forms_only() {
        let re = regex::Regex::new(NEGATION_PATTERN).unwrap();
        assert_eq!(re.find_iter("We do not know. It cannot be. Don't.").count(), 2);
    }
}
