//! Campaign status.
//!
//! One enum spans two related spaces:
//!
//! | Space     | States                                         | Owner          |
//! |-----------|------------------------------------------------|----------------|
//! | Decision  | Pending, Approved, Retry, ManualReview, Error  | campaign graph |
//! | Lifecycle | Active, Paused, Completed, Responded           | delivery       |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    /// Execution has not reached a decision yet
    #[default]
    Pending,
    /// Quality gate passed; campaign handed to delivery
    Approved,
    /// Quality gate failed with retry budget left; messages are regenerated
    Retry,
    /// A human has to decide
    ManualReview,
    /// A node failed without a fallback
    Error,
    /// Delivery is sending the sequence
    Active,
    /// Delivery paused the sequence
    Paused,
    /// Every message was sent
    Completed,
    /// The lead answered
    Responded,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CampaignStatus::Pending => "PENDING",
            CampaignStatus::Approved => "APPROVED",
            CampaignStatus::Retry => "RETRY",
            CampaignStatus::ManualReview => "MANUAL_REVIEW",
            CampaignStatus::Error => "ERROR",
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Paused => "PAUSED",
            CampaignStatus::Completed => "COMPLETED",
            CampaignStatus::Responded => "RESPONDED",
        }
    }

    /// Brain-decision states (pre-approval)
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            CampaignStatus::Pending
                | CampaignStatus::Approved
                | CampaignStatus::Retry
                | CampaignStatus::ManualReview
                | CampaignStatus::Error
        )
    }

    /// Lifecycle states (post-approval, owned by delivery)
    pub fn is_lifecycle(&self) -> bool {
        !self.is_decision()
    }

    /// Check if the campaign graph stops at this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CampaignStatus::Approved | CampaignStatus::ManualReview | CampaignStatus::Error
        )
    }

    /// Lifecycle transitions permitted after approval.
    pub fn can_transition_to(&self, next: CampaignStatus) -> bool {
        use CampaignStatus::*;
        matches!(
            (self, next),
            (Approved, Active)
                | (Active, Paused)
                | (Active, Completed)
                | (Active, Responded)
                | (Paused, Active)
                | (Paused, Completed)
                | (Completed, Responded)
        )
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PENDING" => Ok(CampaignStatus::Pending),
            "APPROVED" => Ok(CampaignStatus::Approved),
            "RETRY" => Ok(CampaignStatus::Retry),
            "MANUAL_REVIEW" => Ok(CampaignStatus::ManualReview),
            "ERROR" => Ok(CampaignStatus::Error),
            "ACTIVE" => Ok(CampaignStatus::Active),
            "PAUSED" => Ok(CampaignStatus::Paused),
            "COMPLETED" => Ok(CampaignStatus::Completed),
            "RESPONDED" => Ok(CampaignStatus::Responded),
            other => Err(format!("unknown campaign status '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(CampaignStatus::Approved.is_terminal());
        assert!(CampaignStatus::ManualReview.is_terminal());
        assert!(CampaignStatus::Error.is_terminal());
        assert!(!CampaignStatus::Retry.is_terminal());
        assert!(!CampaignStatus::Pending.is_terminal());
    }

    #[test]
    fn test_status_spaces_are_disjoint() {
        for status in [
            CampaignStatus::Active,
            CampaignStatus::Paused,
            CampaignStatus::Completed,
            CampaignStatus::Responded,
        ] {
            assert!(status.is_lifecycle());
            assert!(!status.is_decision());
        }
        assert!(CampaignStatus::Retry.is_decision());
    }

    #[test]
    fn test_lifecycle_transitions() {
        assert!(CampaignStatus::Approved.can_transition_to(CampaignStatus::Active));
        assert!(CampaignStatus::Active.can_transition_to(CampaignStatus::Responded));
        assert!(!CampaignStatus::ManualReview.can_transition_to(CampaignStatus::Active));
        assert!(!CampaignStatus::Completed.can_transition_to(CampaignStatus::Active));
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            "manual-review".parse::<CampaignStatus>().unwrap(),
            CampaignStatus::ManualReview
        );
        assert_eq!(
            "approved".parse::<CampaignStatus>().unwrap(),
            CampaignStatus::Approved
        );
        assert!("shipped".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_screaming_case() {
        let json = serde_json::to_string(&CampaignStatus::ManualReview).unwrap();
        assert_eq!(json, "\"MANUAL_REVIEW\"");
    }
}
