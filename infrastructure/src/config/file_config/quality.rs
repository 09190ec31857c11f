//! Quality gate configuration from TOML (`[quality]` section)

use campaign_domain::QualityGate;
use serde::{Deserialize, Serialize};

/// Quality gate configuration from TOML.
///
/// # Example
///
/// ```toml
/// [quality]
/// pass_threshold = 80.0
/// max_retries = 2
/// escalation_floor = 30.0
/// max_critical_brand_issues = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQualityConfig {
    pub pass_threshold: f64,
    pub max_retries: u32,
    /// Any single message below this score escalates immediately.
    pub escalation_floor: f64,
    /// Escalate immediately when critical brand issues exceed this count.
    pub max_critical_brand_issues: usize,
}

impl Default for FileQualityConfig {
    fn default() -> Self {
        let gate = QualityGate::default();
        Self {
            pass_threshold: gate.pass_threshold,
            max_retries: gate.max_retries,
            escalation_floor: gate.escalation_floor,
            max_critical_brand_issues: gate.max_critical_brand_issues,
        }
    }
}

impl FileQualityConfig {
    /// Convert to the domain gate. Range checks happen in `BrainConfig::validate`.
    pub fn to_gate(&self) -> QualityGate {
        QualityGate::new(self.pass_threshold, self.max_retries)
            .with_escalation_floor(self.escalation_floor)
            .with_max_critical_brand_issues(self.max_critical_brand_issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_config_default_matches_gate() {
        let config = FileQualityConfig::default();
        assert_eq!(config.pass_threshold, 80.0);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.to_gate(), QualityGate::default());
    }

    #[test]
    fn test_quality_config_deserialize() {
        let toml_str = r#"
[quality]
pass_threshold = 75.0
max_retries = 1
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let gate = config.quality.to_gate();
        assert_eq!(gate.pass_threshold, 75.0);
        assert_eq!(gate.max_retries, 1);
        assert_eq!(gate.escalation_floor, 30.0);
    }
}
