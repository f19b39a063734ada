use super::{Config, ProviderConfig};
use crate::pipeline::HumanizerPreference;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(provider) = std::env::var("QUILLSHIFT_PROVIDER")
            && !provider.is_empty()
        {
            self.promote_provider(&provider);
        }

        if let Ok(model) = std::env::var("QUILLSHIFT_MODEL")
            && !model.is_empty()
            && let Some(first) = self.providers.first_mut()
        {
            first.model = model;
        }

        if let Ok(temp_str) = std::env::var("QUILLSHIFT_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            for provider in &mut self.providers {
                provider.temperature = temp;
            }
        }

        if let Ok(pref_str) = std::env::var("QUILLSHIFT_HUMANIZER")
            && let Ok(pref) = pref_str.parse::<HumanizerPreference>()
        {
            self.humanizer.preferred = pref;
        }

        if let Ok(threshold_str) = std::env::var("QUILLSHIFT_EXTRA_PASS_THRESHOLD")
            && let Ok(threshold) = threshold_str.parse::<u32>()
            && threshold <= 100
        {
            self.pipeline.extra_pass_threshold = threshold;
        }

        if let Ok(key) = std::env::var("QUILLSHIFT_REMOTE_A_KEY")
            && !key.is_empty()
        {
            self.humanizer.remote_a.api_key = Some(key);
        }

        if let Ok(key) = std::env::var("QUILLSHIFT_REMOTE_B_KEY")
            && !key.is_empty()
        {
            self.humanizer.remote_b.api_key = Some(key);
        }
    }

    /// Move `name` to the head of the chain, inserting it when absent.
    fn promote_provider(&mut self, name: &str) {
        let entry = match self.providers.iter().position(|p| p.name == name) {
            Some(idx) => self.providers.remove(idx),
            None => {
                let model = self
                    .providers
                    .first()
                    .map(|p| p.model.clone())
                    .unwrap_or_default();
                ProviderConfig::named(name, &model)
            }
        };
        self.providers.insert(0, entry);
    }
}
