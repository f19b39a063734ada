use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Orchestrator states, in the order a run visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PipelineStage {
    Composing,
    Generating,
    LocalPass,
    RemoteOptional,
    Scoring,
    ExtraLocalPass,
    Rescoring,
    Finalizing,
}

/// The current best text of a run and the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub stage: PipelineStage,
}

impl Draft {
    pub fn new(text: impl Into<String>, stage: PipelineStage) -> Self {
        Self {
            text: text.into(),
            stage,
        }
    }

    /// Replace the text with `candidate` unless it is blank.
    pub fn advance(self, candidate: String, stage: PipelineStage) -> Self {
        if candidate.trim().is_empty() {
            tracing::warn!(stage = %stage, "Stage produced no usable text; keeping previous draft");
            return self;
        }
        Self {
            text: candidate,
            stage,
        }
    }
}
