use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Errors a pipeline run can surface to its caller.
///
/// Only two of these ever escape [`crate::pipeline::Pipeline::run`] in normal
/// operation: [`PipelineError::InvalidInput`] (rejected before any network
/// call) and [`PipelineError::GenerationUnavailable`] (every provider failed).
/// Stage-local failures are recovered inside the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Input ───────────────────────────────────────────────────────────
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("generation unavailable: all providers failed. Attempts:\n{}", attempts.join("\n"))]
    GenerationUnavailable { attempts: Vec<String> },

    // ── Prompt / Template ───────────────────────────────────────────────
    #[error("prompt: {0}")]
    Prompt(String),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Remote humanizer errors ─────────────────────────────────────────────────

/// Failures inside a remote humanizer adapter.
///
/// These never abort a run; adapters log them and keep the original text of
/// the affected segment or chunk.
#[derive(Debug, Error)]
pub enum HumanizerError {
    #[error("segment {index} rewrite failed: {reason}")]
    SegmentRewriteFailed { index: usize, reason: String },

    #[error("document {document_id} not ready after {attempts} polls")]
    PollTimeout { document_id: String, attempts: u32 },

    #[error("humanizer {service} request failed: {message}")]
    Request { service: String, message: String },

    #[error("humanizer {service} rejected document {document_id}")]
    Rejected {
        service: String,
        document_id: String,
    },
}
