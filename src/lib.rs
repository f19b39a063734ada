#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod config;
pub mod error;
pub mod humanizer;
pub mod lexicon;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod retry;
pub mod rewrite;
pub mod rng;
pub mod scoring;
pub mod text;

pub use config::Config;
pub use error::{ConfigError, HumanizerError, PipelineError};
pub use pipeline::{ContentRequest, Pipeline, PipelineResult, RunFlags};
