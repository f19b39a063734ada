// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Decorator layers ────────────────────────────────────────────────────────
pub mod factory;
pub mod fallback;

// ── Provider implementations ────────────────────────────────────────────────
pub mod compatible;
pub mod gemini;

// ── Infrastructure re-exports ───────────────────────────────────────────────
pub use http_client::{build_provider_client, build_provider_client_with_timeout};
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;
pub use types::{GenerationParams, ProviderResponse};

// ── Provider + factory re-exports ───────────────────────────────────────────
pub use compatible::OpenAiCompatibleProvider;
pub use factory::{compatible_provider_spec, create_fallback_chain, create_provider, resolve_api_key};
pub use fallback::{ChainEntry, FallbackChain, Generation, PRIMARY_TIMEOUT, SECONDARY_TIMEOUT};
pub use gemini::GeminiProvider;
