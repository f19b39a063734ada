pub mod schema;
#[cfg(test)]
pub(crate) mod test_env;

pub use schema::{
    Config, HumanizerConfig, PipelineConfig, ProviderConfig, ReliabilityConfig, RemoteAConfig,
    RemoteBConfig,
};
