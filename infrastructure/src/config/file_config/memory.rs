//! Memory store configuration from TOML (`[memory]` section)

use campaign_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which memory store backs the MemoryManager node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryBackend {
    /// No history; every lead looks new
    #[default]
    None,
    /// Process-local history, lost on exit
    InMemory,
    /// History persisted to a JSON file
    JsonFile,
}

impl MemoryBackend {
    pub fn as_str(&self) -> &str {
        match self {
            MemoryBackend::None => "none",
            MemoryBackend::InMemory => "memory",
            MemoryBackend::JsonFile => "json_file",
        }
    }
}

impl FromStr for MemoryBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "" | "none" | "disabled" => Ok(MemoryBackend::None),
            "memory" | "in_memory" => Ok(MemoryBackend::InMemory),
            "json_file" | "json" | "file" => Ok(MemoryBackend::JsonFile),
            other => Err(format!("unknown memory backend '{}'", other)),
        }
    }
}

impl std::fmt::Display for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Memory configuration from TOML.
///
/// # Example
///
/// ```toml
/// [memory]
/// backend = "json_file"
/// path = "/var/lib/campaign-brain/memory.json"
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemoryConfig {
    /// "none" | "memory" | "json_file"
    pub backend: String,
    pub path: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for FileMemoryConfig {
    fn default() -> Self {
        Self {
            backend: MemoryBackend::None.as_str().to_string(),
            path: None,
            timeout_secs: 5,
        }
    }
}

impl FileMemoryConfig {
    /// Parse the backend name.
    ///
    /// An unknown name falls back to `MemoryBackend::None` with a warning;
    /// `json_file` without a path is an error.
    pub fn parse_backend(&self) -> (MemoryBackend, Vec<ConfigIssue>) {
        let backend = match self.backend.parse::<MemoryBackend>() {
            Ok(backend) => backend,
            Err(e) => {
                return (
                    MemoryBackend::None,
                    vec![ConfigIssue::warning(
                        ConfigIssueCode::UnknownMemoryBackend,
                        format!("memory.backend: {}, memory is disabled", e),
                    )],
                );
            }
        };

        if backend == MemoryBackend::JsonFile && self.path.is_none() {
            return (
                backend,
                vec![ConfigIssue::error(
                    ConfigIssueCode::MissingMemoryPath,
                    "memory.backend = \"json_file\" requires memory.path",
                )],
            );
        }

        (backend, Vec::new())
    }
}
