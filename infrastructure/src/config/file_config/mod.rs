//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`BrainConfig`] once validated.

mod generation;
mod memory;
mod output;
mod quality;

pub use generation::FileGenerationConfig;
pub use memory::{FileMemoryConfig, MemoryBackend};
pub use output::{FileDeliveryConfig, FileTraceConfig};
pub use quality::FileQualityConfig;

use campaign_application::{BrainConfig, ConfigurationError};
use campaign_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outer execution limits (`[execution]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub timeout_secs: u64,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: BrainConfig::default().execution_timeout.as_secs(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Quality gate thresholds
    pub quality: FileQualityConfig,
    /// LLM call parameters
    pub generation: FileGenerationConfig,
    /// Memory store selection
    pub memory: FileMemoryConfig,
    /// Whole-run limits
    pub execution: FileExecutionConfig,
    /// Per-execution trace log
    pub trace: FileTraceConfig,
    /// Delivery and manual-review queue files
    pub delivery: FileDeliveryConfig,
}

impl FileConfig {
    /// Validate the file-level configuration, returning all detected issues.
    ///
    /// Covers what `BrainConfig::validate` cannot see: backend names, file
    /// paths, and combinations of sections.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.memory.parse_backend().1);
        issues.extend(self.generation.to_params().1);

        if self.trace.enabled && self.trace.path.is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TraceWithoutPath,
                format!(
                    "trace.enabled is set without trace.path, writing to {}",
                    self.trace.resolved_path().display()
                ),
            ));
        }

        if self.generation.timeout_secs > self.execution.timeout_secs {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::GenerationTimeoutExceedsExecution,
                format!(
                    "generation.timeout_secs ({}) exceeds execution.timeout_secs ({}); \
                     a single slow LLM call will hit the execution timeout",
                    self.generation.timeout_secs, self.execution.timeout_secs
                ),
            ));
        }

        issues
    }

    /// Build and validate the immutable run configuration.
    pub fn to_brain_config(&self) -> Result<BrainConfig, ConfigurationError> {
        let (generation, _) = self.generation.to_params();
        let config = BrainConfig::default()
            .with_quality(self.quality.to_gate())
            .with_generation(generation)
            .with_memory_timeout(Duration::from_secs(self.memory.timeout_secs))
            .with_delivery_timeout(Duration::from_secs(self.delivery.timeout_secs))
            .with_execution_timeout(Duration::from_secs(self.execution.timeout_secs))
            .with_trace_enabled(self.trace.enabled);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_domain::Severity;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[quality]
pass_threshold = 85.0
max_retries = 3

[generation]
model = "gpt-4o-mini"
temperature = 0.4

[memory]
backend = "json_file"
path = "/tmp/memory.json"

[execution]
timeout_secs = 120

[trace]
enabled = true
path = "/tmp/trace.jsonl"

[delivery]
path = "/tmp/delivery.jsonl"
timeout_secs = 4
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.quality.pass_threshold, 85.0);
        assert_eq!(config.generation.model, "gpt-4o-mini");
        assert_eq!(config.memory.path, Some(PathBuf::from("/tmp/memory.json")));
        assert_eq!(config.execution.timeout_secs, 120);
        assert_eq!(
            config.delivery.path,
            Some(PathBuf::from("/tmp/delivery.jsonl"))
        );
        assert!(config.delivery.review_path.is_none());
        assert!(config.validate().is_empty());

        let brain = config.to_brain_config().unwrap();
        assert_eq!(brain.quality.max_retries, 3);
        assert_eq!(brain.generation.temperature, 0.4);
        assert_eq!(brain.execution_timeout, Duration::from_secs(120));
        assert_eq!(brain.delivery_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.memory.backend, "none");
        assert!(config.trace.enabled);
        assert_eq!(config.to_brain_config().unwrap(), BrainConfig::default());
    }

    #[test]
    fn test_validate_default_warns_about_trace_path() {
        let issues = FileConfig::default().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::TraceWithoutPath);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_validate_timeout_combination() {
        let mut config = FileConfig::default();
        config.trace.enabled = false;
        config.generation.timeout_secs = 600;
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::GenerationTimeoutExceedsExecution
        );
    }

    #[test]
    fn test_to_brain_config_rejects_invalid_values() {
        let mut config = FileConfig::default();
        config.quality.max_retries = 50;
        assert_eq!(
            config.to_brain_config(),
            Err(ConfigurationError::TooManyRetries(50))
        );

        let mut config = FileConfig::default();
        config.execution.timeout_secs = 0;
        assert_eq!(
            config.to_brain_config(),
            Err(ConfigurationError::InvalidTimeout("execution.timeout_secs"))
        );
    }
}
