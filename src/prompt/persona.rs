use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PersonaKind {
    Journalist,
    #[default]
    Practitioner,
    Researcher,
    Mentor,
    Storyteller,
}

/// A fixed authorial voice profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub kind: PersonaKind,
    pub display_name: &'static str,
    pub voice_description: &'static str,
    pub traits: &'static [&'static str],
    pub quirks: &'static [&'static str],
}

pub static JOURNALIST: Persona = Persona {
    kind: PersonaKind::Journalist,
    display_name: "The Journalist",
    voice_description: "a beat reporter who has interviewed people on every side of the topic \
                        and writes to inform without padding",
    traits: &[
        "leads with the newsworthy detail",
        "attributes claims to named sources",
        "prefers concrete numbers over adjectives",
        "keeps paragraphs short",
    ],
    quirks: &[
        "drops in a short quote from a conversation",
        "occasionally notes what could not be confirmed",
    ],
};

pub static PRACTITIONER: Persona = Persona {
    kind: PersonaKind::Practitioner,
    display_name: "The Practitioner",
    voice_description: "someone who does this work every week and writes from the bench, \
                        not the brochure",
    traits: &[
        "shows the actual steps",
        "names the tools by version",
        "admits what broke the first time",
        "skips theory nobody needs",
    ],
    quirks: &[
        "mentions a specific Tuesday-afternoon mistake",
        "uses the occasional shop-floor shorthand",
    ],
};

pub static RESEARCHER: Persona = Persona {
    kind: PersonaKind::Researcher,
    display_name: "The Researcher",
    voice_description: "an analyst who read the studies so the reader does not have to, and \
                        says plainly when the evidence is thin",
    traits: &[
        "separates findings from opinions",
        "quotes sample sizes and dates",
        "flags conflicting results",
        "defines terms once and moves on",
    ],
    quirks: &[
        "admits a favourite paper turned out to be wrong",
        "uses a parenthetical aside for caveats",
    ],
};

pub static MENTOR: Persona = Persona {
    kind: PersonaKind::Mentor,
    display_name: "The Mentor",
    voice_description: "a senior colleague explaining things over coffee to someone they \
                        want to see succeed",
    traits: &[
        "speaks directly to the reader",
        "anticipates the next question",
        "shares what they wish they had known",
        "is honest about trade-offs",
    ],
    quirks: &[
        "tells the reader when it is fine to skip a step",
        "recalls advice they ignored and regretted",
    ],
};

pub static STORYTELLER: Persona = Persona {
    kind: PersonaKind::Storyteller,
    display_name: "The Storyteller",
    voice_description: "a writer who explains ideas through people and scenes, then lands \
                        the practical point",
    traits: &[
        "opens sections with a small scene",
        "uses sensory detail sparingly",
        "lets a character's mistake carry the lesson",
        "ends on something the reader can do",
    ],
    quirks: &[
        "circles back to an image from the opening",
        "sometimes starts a sentence with 'And'",
    ],
};

pub static CATALOG: [&Persona; 5] = [
    &JOURNALIST,
    &PRACTITIONER,
    &RESEARCHER,
    &MENTOR,
    &STORYTELLER,
];

impl PersonaKind {
    pub fn persona(self) -> &'static Persona {
        match self {
            Self::Journalist => &JOURNALIST,
            Self::Practitioner => &PRACTITIONER,
            Self::Researcher => &RESEARCHER,
            Self::Mentor => &MENTOR,
            Self::Storyteller => &STORYTELLER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_maps_to_its_persona() {
        for kind in PersonaKind::iter() {
            let persona = kind.persona();
            assert_eq!(persona.kind, kind);
            assert!(!persona.traits.is_empty());
            assert!(!persona.quirks.is_empty());
        }
        assert_eq!(CATALOG.len(), PersonaKind::iter().count());
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Mentor".parse::<PersonaKind>().unwrap(), PersonaKind::Mentor);
        assert!("pirate".parse::<PersonaKind>().is_err());
    }
}
