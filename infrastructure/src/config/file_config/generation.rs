//! LLM generation configuration from TOML (`[generation]` section)

use campaign_application::GenerationParams;
use campaign_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generation configuration from TOML.
///
/// # Example
///
/// ```toml
/// [generation]
/// model = "gpt-4o"
/// temperature = 0.7
/// max_tokens = 600
/// timeout_secs = 30
/// brand_voice = "Plain-spoken and specific."
/// fallback_on_failure = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub brand_voice: String,
    pub fallback_on_failure: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            model: params.model,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            timeout_secs: params.timeout.as_secs(),
            brand_voice: params.brand_voice,
            fallback_on_failure: params.fallback_on_failure,
        }
    }
}

impl FileGenerationConfig {
    /// Convert to application `GenerationParams`, returning validation issues.
    ///
    /// A blank brand voice falls back to the built-in one with a warning.
    pub fn to_params(&self) -> (GenerationParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut params = GenerationParams::default()
            .with_model(self.model.trim())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_fallback_on_failure(self.fallback_on_failure);

        if self.brand_voice.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyBrandVoice,
                "generation.brand_voice is empty, using the built-in brand voice",
            ));
        } else {
            params = params.with_brand_voice(self.brand_voice.trim());
        }

        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_application::config::DEFAULT_BRAND_VOICE;

    #[test]
    fn test_generation_config_default() {
        let (params, issues) = FileGenerationConfig::default().to_params();
        assert!(issues.is_empty());
        assert_eq!(params, GenerationParams::default());
    }

    #[test]
    fn test_generation_config_blank_brand_voice_warns() {
        let config = FileGenerationConfig {
            brand_voice: "   ".to_string(),
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyBrandVoice);
        assert_eq!(params.brand_voice, DEFAULT_BRAND_VOICE);
    }

    #[test]
    fn test_generation_config_deserialize() {
        let toml_str = r#"
[generation]
model = "gpt-4o-mini"
timeout_secs = 10
fallback_on_failure = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let (params, _) = config.generation.to_params();
        assert_eq!(params.model, "gpt-4o-mini");
        assert_eq!(params.timeout, Duration::from_secs(10));
        assert!(!params.fallback_on_failure);
        assert_eq!(params.max_tokens, 600);
    }
}
