mod draft;
mod orchestrator;
mod request;

pub use draft::{Draft, PipelineStage};
pub use orchestrator::{Pipeline, PipelineResult};
pub use request::{ContentRequest, HumanizerPreference, RunFlags, Tone};
