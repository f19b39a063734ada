//! Phrase banks shared by the rewriting engine, the scorer and the prompt.

/// Sentence openers that give a paragraph a speaking voice.
pub const VOICE_OPENERS: &[&str] = &[
    "Honestly,",
    "Look,",
    "Here's the thing:",
    "In my experience,",
    "Truth be told,",
    "Funny enough,",
    "For what it's worth,",
    "Real talk:",
];

/// Hedges spliced into the middle of a sentence, comma-delimited.
pub const HEDGES: &[&str] = &[
    "as far as I can tell",
    "in most cases",
    "broadly speaking",
    "at least in my experience",
    "if memory serves",
    "for the most part",
];

/// Words and phrases that mean a sentence already hedges.
pub const HEDGE_MARKERS: &[&str] = &[
    "probably",
    "perhaps",
    "maybe",
    "might",
    "likely",
    "seems",
    "arguably",
    "i think",
    "i suspect",
    "in most cases",
    "as far as",
    "more or less",
    "for the most part",
    "sort of",
    "kind of",
];

/// Bridges between paragraphs, offered to the model in the prompt.
pub const BRIDGES: &[&str] = &[
    "That said,",
    "Which brings me to",
    "Here's where it gets messy.",
    "Now, the catch.",
    "The flip side?",
    "So where does that leave us?",
];

/// Rhetorical questions appended to the end of a paragraph.
pub const RHETORICAL_QUESTIONS: &[&str] = &[
    "Sound familiar?",
    "Make sense?",
    "Why does that matter?",
    "So what does that mean for you?",
    "Surprised?",
    "Worth it? Usually.",
];

/// Heading text that reads as a machine-written summary section.
pub const AI_CONCLUSION_HEADINGS: &[&str] = &[
    "conclusion",
    "in conclusion",
    "summary",
    "in summary",
    "final thoughts",
    "wrapping up",
    "key takeaways",
    "closing thoughts",
];

/// Replacement titles for the terminal section.
pub const ALTERNATE_CLOSING_HEADINGS: &[&str] = &[
    "Where This Leaves You",
    "The Bottom Line",
    "Before You Go",
    "What I'd Do Next",
    "One Last Thing",
];

/// Inline transitions that announce a summary.
pub const AI_CONCLUSION_PHRASES: &[&str] = &[
    "in conclusion",
    "to summarize",
    "in summary",
    "to sum up",
    "all in all",
    "in a nutshell",
    "to wrap things up",
];

/// Fourth items appended when a three-item list is stretched.
pub const LIST_EXTENDERS: &[&str] = &[
    "a few other things",
    "a handful more",
    "a couple of others",
    "the odd surprise",
];

/// Short rhythm exemplars for the prompt.
pub const SHORT_SENTENCE_EXAMPLES: &[&str] = &[
    "It broke.",
    "Not even close.",
    "That's it.",
    "Big mistake.",
    "Worth it.",
];

pub const LONG_SENTENCE_EXAMPLES: &[&str] = &[
    "I spent the better part of a week convinced the bug lived in the parser, only to find a single misplaced config flag that had been quietly overriding everything since the last release.",
    "When the numbers finally came back, the change we almost skipped turned out to cut response times by nearly a third, which nobody on the team had predicted and which still surprises me.",
    "The first version worked well enough on my laptop, but the moment real traffic hit it the whole thing fell over in ways that no amount of local testing had prepared us for.",
];

/// Endings the model must avoid, and the kinds it may use instead.
pub const FORBIDDEN_ENDINGS: &[&str] = &[
    "In conclusion, ...",
    "To sum up, ...",
    "Ultimately, the choice is yours.",
    "By following these tips, you can ...",
    "The future of X is bright.",
];

pub const ALLOWED_ENDINGS: &[&str] = &[
    "a specific next step the reader can take today",
    "an honest open question you are still chewing on",
    "a short personal admission",
    "a blunt one-line verdict",
];
