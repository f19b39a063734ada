use chrono::{Local, NaiveDate};
use tera::Context;

use super::engine::TeraEngine;
use super::persona::Persona;
use super::pools::draw_exemplars;
use crate::error::PipelineError;
use crate::lexicon::flagged_terms;
use crate::lexicon::phrases::{
    ALLOWED_ENDINGS, BRIDGES, FORBIDDEN_ENDINGS, HEDGES, LONG_SENTENCE_EXAMPLES,
    SHORT_SENTENCE_EXAMPLES, VOICE_OPENERS,
};
use crate::pipeline::ContentRequest;
use crate::rng::{RandomSource, sample};

/// Upper bound on forbidden-vocabulary entries listed in one prompt.
pub const MAX_FORBIDDEN_TERMS: usize = 50;

const ARTICLE_PROMPT_NAME: &str = "article_prompt";

const ARTICLE_PROMPT_TEMPLATE: &str = "\
## Identity
You are {{ persona.display_name }}: {{ persona.voice_description }}.
Traits:
{% for t in persona.traits %}- {{ t }}
{% endfor %}Quirks:
{% for q in persona.quirks %}- {{ q }}
{% endfor %}
## Forbidden Vocabulary
Never use any of these words or phrases: {{ forbidden | join(sep=\", \") }}.

## Sentence Rhythm
Vary sentence length hard. Mix short ones like:
{% for s in short_examples %}- \"{{ s }}\"
{% endfor %}with long ones like:
{% for s in long_examples %}- \"{{ s }}\"
{% endfor %}
## Lists
Never write a list of exactly three items. Use two, or four or more.

## Voice
Openers you may use: {{ openers | join(sep=\" / \") }}
Hedges you may use: {{ hedges | join(sep=\" / \") }}
Bridges between sections: {{ bridges | join(sep=\" / \") }}

## Imperfection
Write like a person, not a press release. Allow a sentence fragment now and then, \
one aside in parentheses, and a contraction wherever speech would use one.
Touches of physical detail to draw on: {{ exemplars.sensory_details | join(sep=\"; \") }}.

## Evidence (E-E-A-T)
Show first-hand experience. Mention real dates such as {{ exemplars.dates | join(sep=\" and \") }}, \
name tools such as {{ exemplars.tools | join(sep=\", \") }}, and quantify claims with specific numbers.
Include one anecdote about {{ exemplars.anecdote }}.
{% if eeat_hints %}Author notes to weave in: {{ eeat_hints }}
{% endif %}{% if references %}Cite or draw on these references: {{ references }}
{% endif %}
## Section Template
For every section: answer first, then evidence, then a short anecdote, then a contrarian take, \
then how to apply it, then common pitfalls.

## Endings
Do not end with: {{ forbidden_endings | join(sep=\" / \") }}.
End instead with one of: {{ allowed_endings | join(sep=\" / \") }}.

## Assignment
Topic: {{ topic }}
{% if keywords %}Keywords: {{ keywords }}
{% endif %}{% if audience %}Audience: {{ audience }}
{% endif %}Tone: {{ tone }}
Length: at least {{ min_words }} words.
{% if headings %}Use exactly these headings, in this order:
{% for h in headings %}## {{ h }}
{% endfor %}{% else %}Create your own descriptive H2 headings.
{% endif %}";

/// Builds the single instruction document sent to the model.
pub struct PromptComposer {
    engine: TeraEngine,
    today: NaiveDate,
}

impl PromptComposer {
    pub fn new() -> anyhow::Result<Self> {
        let mut engine = TeraEngine::new()?;
        engine.add_template(ARTICLE_PROMPT_NAME, ARTICLE_PROMPT_TEMPLATE)?;
        Ok(Self {
            engine,
            today: Local::now().date_naive(),
        })
    }

    /// Pin the reference date used for exemplar dates.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn compose(
        &self,
        request: &ContentRequest,
        persona: &Persona,
        rng: &mut dyn RandomSource,
    ) -> Result<String, PipelineError> {
        let forbidden = sample(rng, &flagged_terms(), MAX_FORBIDDEN_TERMS);
        let short_examples = sample(rng, SHORT_SENTENCE_EXAMPLES, 3);
        let long_examples = sample(rng, LONG_SENTENCE_EXAMPLES, 2);
        let exemplars = draw_exemplars(self.today, rng);

        let mut ctx = Context::new();
        ctx.insert("persona", persona);
        ctx.insert("forbidden", &forbidden);
        ctx.insert("short_examples", &short_examples);
        ctx.insert("long_examples", &long_examples);
        ctx.insert("openers", VOICE_OPENERS);
        ctx.insert("hedges", HEDGES);
        ctx.insert("bridges", BRIDGES);
        ctx.insert("exemplars", &exemplars);
        ctx.insert("eeat_hints", &request.eeat_hints.as_deref().unwrap_or_default());
        ctx.insert("references", &request.references.as_deref().unwrap_or_default());
        ctx.insert("forbidden_endings", FORBIDDEN_ENDINGS);
        ctx.insert("allowed_endings", ALLOWED_ENDINGS);
        ctx.insert("topic", request.topic.trim());
        ctx.insert("keywords", request.keywords.trim());
        ctx.insert("audience", request.target_audience.trim());
        ctx.insert("tone", &request.tone.to_string());
        ctx.insert("min_words", &request.min_words);
        ctx.insert("headings", &request.clean_headings());

        self.engine
            .render(ARTICLE_PROMPT_NAME, &ctx)
            .map_err(|e| PipelineError::Prompt(format!("{e:#}")))
    }
}
