//! Output sinks from TOML (`[trace]` and `[delivery]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name used under the data directory when no explicit path is set
pub const DEFAULT_TRACE_FILE: &str = "campaign-trace.jsonl";
pub const DEFAULT_DELIVERY_FILE: &str = "delivery-queue.jsonl";
pub const DEFAULT_REVIEW_FILE: &str = "manual-review.jsonl";

/// Trace log configuration.
///
/// ```toml
/// [trace]
/// enabled = true
/// path = "/var/log/campaign-brain/trace.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTraceConfig {
    pub enabled: bool,
    pub path: Option<PathBuf>,
}

impl Default for FileTraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

/// Delivery and manual-review queue files.
///
/// ```toml
/// [delivery]
/// path = "queue/delivery.jsonl"
/// review_path = "queue/review.jsonl"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeliveryConfig {
    pub path: Option<PathBuf>,
    pub review_path: Option<PathBuf>,
    /// Deadline for one enqueue or review submit
    pub timeout_secs: u64,
}

impl Default for FileDeliveryConfig {
    fn default() -> Self {
        Self {
            path: None,
            review_path: None,
            timeout_secs: 10,
        }
    }
}

/// `$XDG_DATA_HOME/campaign-brain/<file>`, or the file name alone when the
/// platform has no data directory.
pub(crate) fn default_data_path(file: &str) -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("campaign-brain").join(file))
        .unwrap_or_else(|| PathBuf::from(file))
}

impl FileTraceConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| default_data_path(DEFAULT_TRACE_FILE))
    }
}

impl FileDeliveryConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| default_data_path(DEFAULT_DELIVERY_FILE))
    }

    pub fn resolved_review_path(&self) -> PathBuf {
        self.review_path
            .clone()
            .unwrap_or_else(|| default_data_path(DEFAULT_REVIEW_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_paths_win() {
        let trace = FileTraceConfig {
            enabled: true,
            path: Some(PathBuf::from("/tmp/t.jsonl")),
        };
        assert_eq!(trace.resolved_path(), PathBuf::from("/tmp/t.jsonl"));

        let delivery = FileDeliveryConfig::default();
        assert!(delivery.resolved_path().ends_with(DEFAULT_DELIVERY_FILE));
        assert!(delivery.resolved_review_path().ends_with(DEFAULT_REVIEW_FILE));
    }
}
