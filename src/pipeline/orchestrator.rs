use super::draft::{Draft, PipelineStage};
use super::request::{ContentRequest, HumanizerPreference, RunFlags};
use crate::config::Config;
use crate::error::PipelineError;
use crate::humanizer::{HumanizeOptions, HumanizerUsed, RemoteHumanizer, select_humanizer};
use crate::llm::{FallbackChain, create_fallback_chain};
use crate::prompt::PromptComposer;
use crate::rewrite::{LocalRewriter, RewriteOptions};
use crate::rng::{RandomSource, SeededRandom};
use crate::scoring::{RiskAssessment, RiskScorer};
use crate::text::word_count;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub final_content: String,
    pub word_count: usize,
    pub risk_assessment: RiskAssessment,
    pub provider_used: String,
    pub model_used: Option<String>,
    pub humanizer_used: HumanizerUsed,
    pub humanizer_cost: f64,
    /// Every assessment taken during the run, oldest first.
    pub assessment_history: Vec<RiskAssessment>,
    pub stages: Vec<PipelineStage>,
    pub extra_pass_applied: bool,
    /// Seed of the run's random source, when it was seeded here.
    pub seed: Option<u64>,
}

/// Drives one request from prompt to scored final text.
pub struct Pipeline {
    config: Config,
    composer: PromptComposer,
    chain: FallbackChain,
    humanizer: Option<Box<dyn RemoteHumanizer>>,
    stage_timeout: Duration,
}

struct RunState {
    stages: Vec<PipelineStage>,
    history: Vec<RiskAssessment>,
}

impl RunState {
    fn enter(&mut self, stage: PipelineStage) {
        tracing::info!(stage = %stage, "Entering stage");
        self.stages.push(stage);
    }

    fn record(&mut self, stage: PipelineStage, assessment: &RiskAssessment) {
        tracing::info!(
            stage = %stage,
            score = assessment.score,
            risk = %assessment.risk_level,
            issues = assessment.issues.len(),
            "Risk assessed"
        );
        self.history.push(assessment.clone());
    }
}

impl Pipeline {
    /// Build the provider chain and prompt composer from `config`.
    pub fn from_config(config: Config) -> Result<Self, PipelineError> {
        let chain = create_fallback_chain(&config.providers, &config.reliability);
        Self::new(config, chain)
    }

    pub fn new(config: Config, chain: FallbackChain) -> Result<Self, PipelineError> {
        config.validate()?;
        if !chain.has_configured_provider() {
            tracing::warn!(
                providers = ?chain.provider_names(),
                "No generation provider has credentials; runs will fail"
            );
        }
        let stage_timeout = Duration::from_secs(config.pipeline.humanizer_stage_timeout_secs);
        Ok(Self {
            composer: PromptComposer::new()?,
            config,
            chain,
            humanizer: None,
            stage_timeout,
        })
    }

    /// Use `humanizer` instead of the configured remote services.
    pub fn with_humanizer(mut self, humanizer: Box<dyn RemoteHumanizer>) -> Self {
        self.humanizer = Some(humanizer);
        self
    }

    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    /// Pin the composer's calendar, which feeds dated exemplars.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.composer = self.composer.with_today(today);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rewrite options after per-run overrides.
    fn rewrite_options(&self, flags: &RunFlags) -> RewriteOptions {
        let mut options = self.config.rewrite;
        if let Some(rate) = flags.opener_rate {
            options.opener_rate = rate;
        }
        if let Some(rate) = flags.hedge_rate {
            options.hedge_rate = rate;
        }
        if let Some(rate) = flags.question_rate {
            options.question_rate = rate;
        }
        options
    }

    /// Compose the prompt alone, without calling any provider.
    pub fn compose_prompt(
        &self,
        request: &ContentRequest,
        rng: &mut dyn RandomSource,
    ) -> Result<String, PipelineError> {
        request.validate()?;
        self.composer.compose(request, request.persona.persona(), rng)
    }

    pub async fn run(
        &self,
        request: &ContentRequest,
        flags: &RunFlags,
    ) -> Result<PipelineResult, PipelineError> {
        let mut rng = match flags.seed.or(self.config.pipeline.seed) {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        let seed = rng.seed();
        tracing::debug!(seed, "Seeded run");
        let mut result = self.run_with(request, flags, &mut rng).await?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Like [`Pipeline::run`] with a caller-supplied random source.
    pub async fn run_with(
        &self,
        request: &ContentRequest,
        flags: &RunFlags,
        rng: &mut dyn RandomSource,
    ) -> Result<PipelineResult, PipelineError> {
        request.validate()?;
        flags.validate()?;

        let options = self.rewrite_options(flags);
        let local_passes = flags
            .local_passes
            .unwrap_or(self.config.pipeline.local_passes)
            .max(1);
        let threshold = flags
            .extra_pass_threshold
            .unwrap_or(self.config.pipeline.extra_pass_threshold);
        let scorer = RiskScorer::new(self.config.scoring.clone());
        let mut state = RunState {
            stages: Vec::new(),
            history: Vec::new(),
        };

        state.enter(PipelineStage::Composing);
        let prompt = self
            .composer
            .compose(request, request.persona.persona(), rng)?;

        state.enter(PipelineStage::Generating);
        let generation = self.chain.generate(&prompt).await?;
        tracing::info!(
            provider = generation.provider.as_str(),
            words = word_count(&generation.text),
            "Draft generated"
        );
        let mut draft = Draft::new(generation.text, PipelineStage::Generating);

        state.enter(PipelineStage::LocalPass);
        let rewriter = LocalRewriter::new(options);
        for pass in 1..=local_passes {
            tracing::debug!(pass, "Local rewrite pass");
            let candidate = rewriter.rewrite(&draft.text, rng);
            draft = draft.advance(candidate, PipelineStage::LocalPass);
        }

        state.enter(PipelineStage::RemoteOptional);
        let (draft, humanizer_used, humanizer_cost) = self.remote_stage(draft, flags).await;

        state.enter(PipelineStage::Scoring);
        let mut assessment = scorer.assess(&draft.text);
        state.record(PipelineStage::Scoring, &assessment);

        let mut draft = draft;
        let mut extra_pass_applied = false;
        if assessment.score < threshold {
            state.enter(PipelineStage::ExtraLocalPass);
            let boosted =
                LocalRewriter::new(options.boosted(self.config.pipeline.extra_pass_intensity));
            let candidate = boosted.rewrite(&draft.text, rng);
            draft = draft.advance(candidate, PipelineStage::ExtraLocalPass);
            extra_pass_applied = true;

            state.enter(PipelineStage::Rescoring);
            assessment = scorer.assess(&draft.text);
            state.record(PipelineStage::Rescoring, &assessment);
        }

        state.enter(PipelineStage::Finalizing);
        Ok(PipelineResult {
            word_count: word_count(&draft.text),
            final_content: draft.text,
            risk_assessment: assessment,
            provider_used: generation.provider,
            model_used: generation.model,
            humanizer_used,
            humanizer_cost,
            assessment_history: state.history,
            stages: state.stages,
            extra_pass_applied,
            seed: None,
        })
    }

    async fn remote_stage(&self, draft: Draft, flags: &RunFlags) -> (Draft, HumanizerUsed, f64) {
        let preference = flags
            .humanizer
            .unwrap_or(self.config.humanizer.preferred);
        if preference == HumanizerPreference::Local {
            return (draft, HumanizerUsed::LocalOnly, 0.0);
        }

        let selected;
        let humanizer: &dyn RemoteHumanizer = match &self.humanizer {
            Some(custom) => custom.as_ref(),
            None => match select_humanizer(preference, &self.config.humanizer) {
                Some(h) => {
                    selected = h;
                    selected.as_ref()
                }
                None => return (draft, HumanizerUsed::LocalOnly, 0.0),
            },
        };

        let kind = humanizer.kind();
        let options = HumanizeOptions::default();
        let outcome =
            tokio::time::timeout(self.stage_timeout, humanizer.humanize(&draft.text, &options))
                .await;
        match outcome {
            Ok(outcome) if outcome.success => {
                tracing::info!(
                    humanizer = %kind,
                    rewritten = outcome.rewritten,
                    attempted = outcome.attempted,
                    "Remote humanizer applied"
                );
                let draft = draft.advance(outcome.content, PipelineStage::RemoteOptional);
                (draft, kind, outcome.cost)
            }
            Ok(_) => {
                tracing::warn!(humanizer = %kind, "Remote humanizer returned nothing usable");
                (draft, HumanizerUsed::LocalOnly, 0.0)
            }
            Err(_) => {
                tracing::warn!(
                    humanizer = %kind,
                    timeout_secs = self.stage_timeout.as_secs(),
                    "Remote humanizer stage timed out"
                );
                (draft, HumanizerUsed::LocalOnly, 0.0)
            }
        }
    }
}
