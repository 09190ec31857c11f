//! Review findings.

use super::dimension::QualityDimension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Minor,
    Major,
    Critical,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &str {
        match self {
            IssueSeverity::Minor => "minor",
            IssueSeverity::Major => "major",
            IssueSeverity::Critical => "critical",
        }
    }
}

/// A single problem the reviewer found in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub dimension: QualityDimension,
    pub severity: IssueSeverity,
    pub detail: String,
}

impl QualityIssue {
    pub fn new(
        dimension: QualityDimension,
        severity: IssueSeverity,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            dimension,
            severity,
            detail: detail.into(),
        }
    }

    pub fn minor(dimension: QualityDimension, detail: impl Into<String>) -> Self {
        Self::new(dimension, IssueSeverity::Minor, detail)
    }

    pub fn major(dimension: QualityDimension, detail: impl Into<String>) -> Self {
        Self::new(dimension, IssueSeverity::Major, detail)
    }

    pub fn critical(dimension: QualityDimension, detail: impl Into<String>) -> Self {
        Self::new(dimension, IssueSeverity::Critical, detail)
    }
}

impl std::fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.severity.as_str(),
            self.dimension,
            self.detail
        )
    }
}
