//! Messaging angles.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The narrative hook of a campaign.
///
/// Declaration order is the tie-break priority used by the planner:
/// technical angles outrank generic ones, and the generic
/// [`MessagingAngle::OperationalEfficiency`] comes last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagingAngle {
    TechnicalInnovation,
    AutomationRoi,
    GrowthScaling,
    RevenueConversion,
    ClientResults,
    OperationalEfficiency,
}

impl MessagingAngle {
    pub const ALL: [MessagingAngle; 6] = [
        MessagingAngle::TechnicalInnovation,
        MessagingAngle::AutomationRoi,
        MessagingAngle::GrowthScaling,
        MessagingAngle::RevenueConversion,
        MessagingAngle::ClientResults,
        MessagingAngle::OperationalEfficiency,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MessagingAngle::TechnicalInnovation => "technical_innovation",
            MessagingAngle::AutomationRoi => "automation_roi",
            MessagingAngle::GrowthScaling => "growth_scaling",
            MessagingAngle::RevenueConversion => "revenue_conversion",
            MessagingAngle::ClientResults => "client_results",
            MessagingAngle::OperationalEfficiency => "operational_efficiency",
        }
    }

    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            MessagingAngle::TechnicalInnovation | MessagingAngle::AutomationRoi
        )
    }

    /// Fallback angle when nothing else applies.
    pub fn generic() -> Self {
        MessagingAngle::OperationalEfficiency
    }

    /// One-sentence narrative the messages should develop.
    pub fn pitch(&self) -> &str {
        match self {
            MessagingAngle::TechnicalInnovation => {
                "a leaner engineering stack ships features faster"
            }
            MessagingAngle::AutomationRoi => {
                "automation of repetitive workflow steps pays back within a quarter"
            }
            MessagingAngle::GrowthScaling => {
                "growth stalls when the sales pipeline cannot scale with the team"
            }
            MessagingAngle::RevenueConversion => {
                "small conversion gains compound into serious revenue"
            }
            MessagingAngle::ClientResults => {
                "measurable client results are what keep clients renewing"
            }
            MessagingAngle::OperationalEfficiency => {
                "removing process friction gives the team time back"
            }
        }
    }

    /// Vocabulary a message on this angle is expected to use.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            MessagingAngle::TechnicalInnovation => &[
                "engineering",
                "technical",
                "stack",
                "architecture",
                "integration",
                "api",
                "ship",
            ],
            MessagingAngle::AutomationRoi => {
                &["automation", "automate", "automating", "manual", "workflow", "roi", "hours"]
            }
            MessagingAngle::GrowthScaling => {
                &["growth", "grow", "scale", "scaling", "pipeline", "hiring"]
            }
            MessagingAngle::RevenueConversion => {
                &["conversion", "revenue", "checkout", "cart", "sales", "customers"]
            }
            MessagingAngle::ClientResults => {
                &["clients", "client", "results", "retention", "renewals", "case"]
            }
            MessagingAngle::OperationalEfficiency => {
                &["time", "efficiency", "process", "friction", "cost", "team"]
            }
        }
    }
}

impl std::fmt::Display for MessagingAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessagingAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        MessagingAngle::ALL
            .into_iter()
            .find(|a| a.as_str() == needle)
            .ok_or_else(|| format!("unknown messaging angle '{}'", s))
    }
}
