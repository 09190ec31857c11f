//! Domain error types

use crate::campaign::CampaignStatus;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Campaign has no messages to evaluate")]
    NoMessages,

    #[error("Overall quality score is missing")]
    MissingQualityScore,

    #[error("Message {0} has not been reviewed")]
    UnscoredMessage(u32),

    #[error("Malformed LLM output: {0}")]
    MalformedOutput(String),

    #[error("Campaign plan is empty")]
    EmptyPlan,

    #[error("Campaign status is {actual}, expected {expected}")]
    UnexpectedStatus {
        expected: CampaignStatus,
        actual: CampaignStatus,
    },
}

impl DomainError {
    /// Check if this error means the quality gate refused to run
    pub fn is_gate_precondition(&self) -> bool {
        matches!(
            self,
            DomainError::NoMessages
                | DomainError::MissingQualityScore
                | DomainError::UnscoredMessage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::UnscoredMessage(2).to_string(),
            "Message 2 has not been reviewed"
        );
        assert_eq!(
            DomainError::MalformedOutput("no subject".to_string()).to_string(),
            "Malformed LLM output: no subject"
        );
    }

    #[test]
    fn test_is_gate_precondition() {
        assert!(DomainError::NoMessages.is_gate_precondition());
        assert!(DomainError::MissingQualityScore.is_gate_precondition());
        assert!(DomainError::UnscoredMessage(1).is_gate_precondition());
        assert!(!DomainError::EmptyPlan.is_gate_precondition());
        assert!(
            !DomainError::UnexpectedStatus {
                expected: CampaignStatus::Approved,
                actual: CampaignStatus::Error,
            }
            .is_gate_precondition()
        );
        assert!(!DomainError::MalformedOutput(String::new()).is_gate_precondition());
    }
}
