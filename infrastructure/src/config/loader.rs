//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use campaign_application::{BrainConfig, ConfigurationError};
use campaign_domain::{ConfigIssue, Severity};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-level config file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "campaign-brain.toml";

/// Environment variable prefix; nested keys use `__`
pub const ENV_PREFIX: &str = "CAMPAIGN_BRAIN_";

/// A validated configuration together with its non-fatal warnings
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub file: FileConfig,
    pub brain: BrainConfig,
    pub warnings: Vec<ConfigIssue>,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Merge every source into a raw [`FileConfig`].
    ///
    /// Priority (highest to lowest):
    /// 1. `CAMPAIGN_BRAIN_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./campaign-brain.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/campaign-brain/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigurationError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!(path = %global_path.display(), "Merging global config");
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            debug!(path = %project_path.display(), "Merging project config");
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigurationError::Invalid(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .map_err(|e| ConfigurationError::Invalid(e.to_string()))
    }

    /// Load, validate and convert in one step.
    ///
    /// Error-severity issues and invalid values fail the load; warnings are
    /// logged and returned alongside the configuration.
    pub fn load_validated(config_path: Option<&Path>) -> Result<LoadedConfig, ConfigurationError> {
        let file = Self::load(config_path)?;
        Self::validate(file)
    }

    /// Validate an already-merged [`FileConfig`].
    pub fn validate(file: FileConfig) -> Result<LoadedConfig, ConfigurationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) = file
            .validate()
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);

        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            return Err(ConfigurationError::Invalid(messages.join("; ")));
        }

        for issue in &warnings {
            warn!("{}", issue);
        }

        let brain = file.to_brain_config()?;
        Ok(LoadedConfig {
            file,
            brain,
            warnings,
        })
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/campaign-brain/config.toml if set,
    /// otherwise the platform's config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("campaign-brain").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_domain::ConfigIssueCode;
    use figment::Jail;
    use std::time::Duration;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.quality.pass_threshold, 80.0);
        assert_eq!(config.memory.backend, "none");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("campaign-brain"));
    }

    #[test]
    fn test_project_file_and_env_merge() {
        Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
[quality]
pass_threshold = 75.0
max_retries = 1

[trace]
enabled = false
"#,
            )?;
            jail.set_env("CAMPAIGN_BRAIN_QUALITY__MAX_RETRIES", "3");
            jail.set_env("CAMPAIGN_BRAIN_GENERATION__MODEL", "gpt-4o-mini");

            let loaded = ConfigLoader::load_validated(None).unwrap();
            assert_eq!(loaded.brain.quality.pass_threshold, 75.0);
            assert_eq!(loaded.brain.quality.max_retries, 3);
            assert_eq!(loaded.brain.generation.model, "gpt-4o-mini");
            assert!(!loaded.brain.trace_enabled);
            assert!(loaded.warnings.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(PROJECT_CONFIG_FILE, "[execution]\ntimeout_secs = 100\n")?;
            jail.create_file("override.toml", "[execution]\ntimeout_secs = 200\n")?;

            let config = ConfigLoader::load(Some(Path::new("override.toml"))).unwrap();
            let brain = config.to_brain_config().unwrap();
            assert_eq!(brain.execution_timeout, Duration::from_secs(200));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        Jail::expect_with(|_jail| {
            let result = ConfigLoader::load(Some(Path::new("does-not-exist.toml")));
            assert!(matches!(result, Err(ConfigurationError::Invalid(_))));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        Jail::expect_with(|jail| {
            jail.create_file(PROJECT_CONFIG_FILE, "[quality]\npass_threshold = 150.0\n")?;
            let result = ConfigLoader::load_validated(None);
            assert_eq!(
                result.unwrap_err(),
                ConfigurationError::InvalidThreshold(150.0)
            );
            Ok(())
        });
    }

    #[test]
    fn test_error_issues_fail_and_warnings_pass_through() {
        Jail::expect_with(|jail| {
            jail.create_file(PROJECT_CONFIG_FILE, "[memory]\nbackend = \"json_file\"\n")?;
            let result = ConfigLoader::load_validated(None);
            assert!(
                matches!(result, Err(ConfigurationError::Invalid(ref msg)) if msg.contains("memory.path"))
            );

            jail.create_file(
                PROJECT_CONFIG_FILE,
                "[memory]\nbackend = \"redis\"\n\n[trace]\nenabled = false\n",
            )?;
            let loaded = ConfigLoader::load_validated(None).unwrap();
            assert_eq!(loaded.warnings.len(), 1);
            assert_eq!(
                loaded.warnings[0].code,
                ConfigIssueCode::UnknownMemoryBackend
            );
            Ok(())
        });
    }

    #[test]
    fn test_malformed_toml_is_error() {
        Jail::expect_with(|jail| {
            jail.create_file(PROJECT_CONFIG_FILE, "[quality\npass_threshold = \n")?;
            assert!(matches!(
                ConfigLoader::load(None),
                Err(ConfigurationError::Invalid(_))
            ));
            Ok(())
        });
    }
}
