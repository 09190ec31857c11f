//! The quality gate: turns review results into PASS / RETRY / MANUAL_REVIEW.
//!
//! The gate is a pure function. [`QualityGate::decide`] depends only on the
//! overall score, the retry count and the configured limits;
//! [`QualityGate::evaluate`] adds the immediate-escalation safety valve on
//! top. Reading the inputs from a [`CampaignState`] is fail-closed: missing
//! messages or scores are an error, never an implicit pass.

use super::dimension::QualityDimension;
use crate::campaign::{CampaignState, CampaignStatus};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateDecision {
    Pass,
    Retry,
    ManualReview,
}

impl GateDecision {
    pub fn as_str(&self) -> &str {
        match self {
            GateDecision::Pass => "PASS",
            GateDecision::Retry => "RETRY",
            GateDecision::ManualReview => "MANUAL_REVIEW",
        }
    }

    /// Status the campaign takes after this decision.
    pub fn status(&self) -> CampaignStatus {
        match self {
            GateDecision::Pass => CampaignStatus::Approved,
            GateDecision::Retry => CampaignStatus::Retry,
            GateDecision::ManualReview => CampaignStatus::ManualReview,
        }
    }
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a campaign was escalated to a human
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EscalationTrigger {
    /// Score still below threshold with the retry budget spent
    RetriesExhausted { retry_count: u32 },
    /// A single message scored below the absolute floor
    ScoreBelowFloor { message_number: u32, score: f64 },
    /// Too many critical brand-compliance issues across messages
    CriticalBrandIssues { count: usize },
}

impl EscalationTrigger {
    pub fn is_safety_valve(&self) -> bool {
        !matches!(self, EscalationTrigger::RetriesExhausted { .. })
    }
}

impl std::fmt::Display for EscalationTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscalationTrigger::RetriesExhausted { retry_count } => {
                write!(f, "retry budget exhausted after {} retries", retry_count)
            }
            EscalationTrigger::ScoreBelowFloor {
                message_number,
                score,
            } => write!(
                f,
                "message {} scored {:.1}, below the escalation floor",
                message_number, score
            ),
            EscalationTrigger::CriticalBrandIssues { count } => {
                write!(f, "{} critical brand-compliance issues", count)
            }
        }
    }
}

/// Everything the gate reads, extracted from the state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateInput {
    pub overall_score: f64,
    /// `(message_number, score)` of the weakest message
    pub lowest_message: (u32, f64),
    pub critical_brand_issues: usize,
    pub retry_count: u32,
}

impl GateInput {
    /// Fail-closed extraction: every message must be scored and the overall
    /// score must have been recomputed for the current message set.
    pub fn from_state(state: &CampaignState) -> Result<Self, DomainError> {
        if state.messages().is_empty() {
            return Err(DomainError::NoMessages);
        }
        if let Some(unscored) = state.messages().iter().find(|m| !m.is_reviewed()) {
            return Err(DomainError::UnscoredMessage(unscored.message_number));
        }
        let overall_score = state
            .overall_quality_score()
            .ok_or(DomainError::MissingQualityScore)?;
        let lowest_message = state
            .lowest_message_score()
            .ok_or(DomainError::MissingQualityScore)?;

        Ok(Self {
            overall_score,
            lowest_message,
            critical_brand_issues: state.critical_issue_count(QualityDimension::BrandCompliance),
            retry_count: state.retry_count(),
        })
    }
}

/// Outcome of one gate evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct GateVerdict {
    pub decision: GateDecision,
    pub trigger: Option<EscalationTrigger>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityGate {
    pub pass_threshold: f64,
    pub max_retries: u32,
    /// Any message below this escalates immediately
    pub escalation_floor: f64,
    /// Escalate when critical brand issues exceed this count
    pub max_critical_brand_issues: usize,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            pass_threshold: 80.0,
            max_retries: 2,
            escalation_floor: 30.0,
            max_critical_brand_issues: 2,
        }
    }
}

impl QualityGate {
    pub fn new(pass_threshold: f64, max_retries: u32) -> Self {
        Self {
            pass_threshold,
            max_retries,
            ..Self::default()
        }
    }

    pub fn with_escalation_floor(mut self, floor: f64) -> Self {
        self.escalation_floor = floor;
        self
    }

    pub fn with_max_critical_brand_issues(mut self, max: usize) -> Self {
        self.max_critical_brand_issues = max;
        self
    }

    /// The core transition rule.
    pub fn decide(&self, score: f64, retry_count: u32) -> GateDecision {
        if score >= self.pass_threshold {
            GateDecision::Pass
        } else if retry_count < self.max_retries {
            GateDecision::Retry
        } else {
            GateDecision::ManualReview
        }
    }

    /// The transition rule with the safety valve checked first.
    pub fn evaluate(&self, input: &GateInput) -> GateVerdict {
        if let Some(trigger) = self.safety_valve(input) {
            return GateVerdict {
                decision: GateDecision::ManualReview,
                reason: format!("immediate escalation: {}", trigger),
                trigger: Some(trigger),
            };
        }

        let decision = self.decide(input.overall_score, input.retry_count);
        let (trigger, reason) = match decision {
            GateDecision::Pass => (
                None,
                format!(
                    "score {:.1} meets threshold {:.1}",
                    input.overall_score, self.pass_threshold
                ),
            ),
            GateDecision::Retry => (
                None,
                format!(
                    "score {:.1} below threshold {:.1}; retry {} of {}",
                    input.overall_score,
                    self.pass_threshold,
                    input.retry_count + 1,
                    self.max_retries
                ),
            ),
            GateDecision::ManualReview => {
                let trigger = EscalationTrigger::RetriesExhausted {
                    retry_count: input.retry_count,
                };
                (
                    Some(trigger),
                    format!(
                        "score {:.1} below threshold {:.1}; {}",
                        input.overall_score, self.pass_threshold, trigger
                    ),
                )
            }
        };

        GateVerdict {
            decision,
            trigger,
            reason,
        }
    }

    fn safety_valve(&self, input: &GateInput) -> Option<EscalationTrigger> {
        let (message_number, score) = input.lowest_message;
        if score < self.escalation_floor {
            return Some(EscalationTrigger::ScoreBelowFloor {
                message_number,
                score,
            });
        }
        if input.critical_brand_issues > self.max_critical_brand_issues {
            return Some(EscalationTrigger::CriticalBrandIssues {
                count: input.critical_brand_issues,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{CampaignMessage, MessageType};
    use crate::lead::{CompanyRecord, LeadRecord};

    fn input(overall: f64, lowest: f64, retry_count: u32) -> GateInput {
        GateInput {
            overall_score: overall,
            lowest_message: (1, lowest),
            critical_brand_issues: 0,
            retry_count,
        }
    }

    #[test]
    fn test_threshold_boundary_passes() {
        let gate = QualityGate::default();
        assert_eq!(gate.decide(80.0, 0), GateDecision::Pass);
        assert_eq!(gate.decide(79.99, 0), GateDecision::Retry);
    }

    #[test]
    fn test_retry_budget_boundaries() {
        let gate = QualityGate::default();
        assert_eq!(gate.decide(65.0, 1), GateDecision::Retry);
        assert_eq!(gate.decide(65.0, 2), GateDecision::ManualReview);
        assert_eq!(gate.decide(95.0, 2), GateDecision::Pass);
    }

    #[test]
    fn test_decide_is_deterministic() {
        let gate = QualityGate::new(75.0, 3);
        for retry in 0..=3 {
            assert_eq!(gate.decide(70.0, retry), gate.decide(70.0, retry));
        }
    }

    #[test]
    fn test_floor_escalates_on_first_pass() {
        let verdict = QualityGate::default().evaluate(&input(78.0, 25.0, 0));
        assert_eq!(verdict.decision, GateDecision::ManualReview);
        assert_eq!(
            verdict.trigger,
            Some(EscalationTrigger::ScoreBelowFloor {
                message_number: 1,
                score: 25.0
            })
        );
        assert!(verdict.reason.starts_with("immediate escalation"));
    }

    #[test]
    fn test_floor_wins_over_pass() {
        let verdict = QualityGate::default().evaluate(&input(85.0, 29.0, 0));
        assert_eq!(verdict.decision, GateDecision::ManualReview);
    }

    #[test]
    fn test_critical_brand_issues_escalate() {
        let gate = QualityGate::default();
        let mut at_limit = input(90.0, 85.0, 0);
        at_limit.critical_brand_issues = 2;
        assert_eq!(gate.evaluate(&at_limit).decision, GateDecision::Pass);

        at_limit.critical_brand_issues = 3;
        let verdict = gate.evaluate(&at_limit);
        assert_eq!(verdict.decision, GateDecision::ManualReview);
        assert_eq!(
            verdict.trigger,
            Some(EscalationTrigger::CriticalBrandIssues { count: 3 })
        );
    }

    #[test]
    fn test_exhausted_retries_carry_trigger() {
        let verdict = QualityGate::default().evaluate(&input(70.0, 65.0, 2));
        assert_eq!(verdict.decision, GateDecision::ManualReview);
        assert!(!verdict.trigger.is_some_and(|t| t.is_safety_valve()));
    }

    #[test]
    fn test_gate_input_is_fail_closed() {
        let mut state = CampaignState::new(LeadRecord::new("l1"), CompanyRecord::new(), None);
        assert_eq!(GateInput::from_state(&state), Err(DomainError::NoMessages));

        state.replace_messages(vec![CampaignMessage::new(1, MessageType::Hook, "s", "b")]);
        assert_eq!(
            GateInput::from_state(&state),
            Err(DomainError::UnscoredMessage(1))
        );

        state.messages_mut()[0].set_score(90.0, vec![]);
        assert_eq!(
            GateInput::from_state(&state),
            Err(DomainError::MissingQualityScore)
        );

        state.recompute_overall_score().unwrap();
        let input = GateInput::from_state(&state).unwrap();
        assert_eq!(input.overall_score, 90.0);
        assert_eq!(input.lowest_message, (1, 90.0));
    }
}
