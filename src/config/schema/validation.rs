use super::Config;
use crate::error::ConfigError;

fn check_url(field: &str, value: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(());
    };
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::Validation(format!("{field}: invalid URL {raw:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{field}: unsupported scheme {:?}",
            parsed.scheme()
        )));
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (idx, provider) in self.providers.iter().enumerate() {
            if provider.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "providers[{idx}]: name must not be empty"
                )));
            }
            if provider.model.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "providers[{idx}] ({}): model must not be empty",
                    provider.name
                )));
            }
            if !(0.0..=2.0).contains(&provider.temperature) {
                return Err(ConfigError::Validation(format!(
                    "providers[{idx}] ({}): temperature must be within [0, 2]",
                    provider.name
                )));
            }
            if let Some(top_p) = provider.top_p
                && !(0.0..=1.0).contains(&top_p)
            {
                return Err(ConfigError::Validation(format!(
                    "providers[{idx}] ({}): top_p must be within [0, 1]",
                    provider.name
                )));
            }
            if provider.timeout_secs == Some(0) {
                return Err(ConfigError::Validation(format!(
                    "providers[{idx}] ({}): timeout_secs must be positive",
                    provider.name
                )));
            }
            check_url(
                &format!("providers[{idx}].base_url"),
                provider.base_url.as_deref(),
            )?;
        }

        check_url(
            "humanizer.remote_a.base_url",
            self.humanizer.remote_a.base_url.as_deref(),
        )?;
        check_url(
            "humanizer.remote_b.base_url",
            self.humanizer.remote_b.base_url.as_deref(),
        )?;

        let remote_b = &self.humanizer.remote_b;
        if remote_b.max_chunk_chars == 0 {
            return Err(ConfigError::Validation(
                "humanizer.remote_b.max_chunk_chars must be positive".into(),
            ));
        }
        if remote_b.max_poll_attempts == 0 {
            return Err(ConfigError::Validation(
                "humanizer.remote_b.max_poll_attempts must be positive".into(),
            ));
        }

        if self.pipeline.extra_pass_threshold > 100 {
            return Err(ConfigError::Validation(
                "pipeline.extra_pass_threshold must be at most 100".into(),
            ));
        }
        if self.pipeline.local_passes == 0 {
            return Err(ConfigError::Validation(
                "pipeline.local_passes must be at least 1".into(),
            ));
        }
        if self.pipeline.extra_pass_intensity < 1.0 {
            return Err(ConfigError::Validation(
                "pipeline.extra_pass_intensity must be at least 1.0".into(),
            ));
        }

        self.rewrite
            .validate()
            .map_err(|e| ConfigError::Validation(format!("rewrite: {e}")))?;
        self.scoring
            .validate()
            .map_err(|e| ConfigError::Validation(format!("scoring: {e}")))?;
        Ok(())
    }
}
