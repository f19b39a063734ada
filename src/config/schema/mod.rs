mod env_overrides;
mod humanizer;
mod loader;
mod types;
mod validation;

pub use humanizer::{HumanizerConfig, RemoteAConfig, RemoteBConfig};
pub use types::{Config, PipelineConfig, ProviderConfig, ReliabilityConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_env::{ENV_LOCK, EnvVarGuard};
    use crate::error::ConfigError;
    use crate::pipeline::HumanizerPreference;
    use std::sync::PoisonError;
    use tempfile::TempDir;

    const OVERRIDE_VARS: [&str; 7] = [
        "QUILLSHIFT_PROVIDER",
        "QUILLSHIFT_MODEL",
        "QUILLSHIFT_TEMPERATURE",
        "QUILLSHIFT_HUMANIZER",
        "QUILLSHIFT_EXTRA_PASS_THRESHOLD",
        "QUILLSHIFT_REMOTE_A_KEY",
        "QUILLSHIFT_REMOTE_B_KEY",
    ];

    fn clear_overrides() -> Vec<EnvVarGuard> {
        OVERRIDE_VARS.iter().map(|k| EnvVarGuard::unset(k)).collect()
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.providers[0].name, "gemini");
        assert_eq!(config.providers[0].top_k, Some(40));
        assert_eq!(config.providers[1].name, "openai");
        assert_eq!(config.pipeline.extra_pass_threshold, 70);
        assert_eq!(config.humanizer.preferred, HumanizerPreference::Auto);
        assert!(!config.humanizer.remote_a.is_configured());
        assert!(!config.humanizer.remote_b.is_configured());
    }

    #[test]
    fn load_or_init_writes_then_reads_back() {
        let tmp = TempDir::new().unwrap();
        let first = Config::load_or_init_in(tmp.path()).unwrap();
        assert!(tmp.path().join("config.toml").exists());
        assert_eq!(first.config_path, tmp.path().join("config.toml"));

        let second = Config::load_or_init_in(tmp.path()).unwrap();
        assert_eq!(second.providers, first.providers);
        assert_eq!(second.humanizer, first.humanizer);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[[providers]]
name = "openrouter"
model = "anthropic/claude-sonnet"
timeout_secs = 90

[humanizer]
preferred = "remote_b"

[humanizer.remote_b]
base_url = "https://humanize.example.com/api"
api_key = "b-key"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].timeout_secs, Some(90));
        assert!((config.providers[0].temperature - 0.92).abs() < f64::EPSILON);
        assert_eq!(config.humanizer.preferred, HumanizerPreference::RemoteB);
        assert!(config.humanizer.remote_b.is_configured());
        assert_eq!(config.humanizer.remote_b.readability, "High School");
        assert_eq!(config.pipeline.local_passes, 1);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load_from(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn bad_remote_url_fails_validation() {
        let mut config = Config::default();
        config.humanizer.remote_a.base_url = Some("ftp://nowhere".into());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("remote_a"));
    }

    #[test]
    fn out_of_range_threshold_fails_validation() {
        let mut config = Config::default();
        config.pipeline.extra_pass_threshold = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_provider_is_promoted_to_front() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let _clear = clear_overrides();
        let _provider = EnvVarGuard::set("QUILLSHIFT_PROVIDER", "openai");
        let _model = EnvVarGuard::set("QUILLSHIFT_MODEL", "gpt-4.1");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.providers[0].name, "openai");
        assert_eq!(config.providers[0].model, "gpt-4.1");
        assert_eq!(config.providers[1].name, "gemini");
        assert_eq!(config.providers.len(), 2);
    }

    #[test]
    fn env_provider_absent_from_list_is_inserted() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let _clear = clear_overrides();
        let _provider = EnvVarGuard::set("QUILLSHIFT_PROVIDER", "groq");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.providers.len(), 3);
        assert_eq!(config.providers[0].name, "groq");
    }

    #[test]
    fn env_overrides_ignore_invalid_values() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let _clear = clear_overrides();
        let _temp = EnvVarGuard::set("QUILLSHIFT_TEMPERATURE", "7.5");
        let _pref = EnvVarGuard::set("QUILLSHIFT_HUMANIZER", "telepathy");
        let _threshold = EnvVarGuard::set("QUILLSHIFT_EXTRA_PASS_THRESHOLD", "150");
        let _key = EnvVarGuard::set("QUILLSHIFT_REMOTE_A_KEY", "a-key");

        let mut config = Config::default();
        config.apply_env_overrides();
        assert!((config.providers[0].temperature - 0.92).abs() < f64::EPSILON);
        assert_eq!(config.humanizer.preferred, HumanizerPreference::Auto);
        assert_eq!(config.pipeline.extra_pass_threshold, 70);
        assert_eq!(config.humanizer.remote_a.api_key.as_deref(), Some("a-key"));
    }
}
