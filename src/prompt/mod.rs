mod composer;
mod engine;
mod persona;
mod pools;

pub use composer::{MAX_FORBIDDEN_TERMS, PromptComposer};
pub use engine::TeraEngine;
pub use persona::{CATALOG, Persona, PersonaKind};
pub use pools::{Exemplars, draw_exemplars, recent_dates};
