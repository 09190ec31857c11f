//! Records handed to collaborators once a run is over.
//!
//! - [`TraceRecord`] - write-once audit blob, any terminal status
//! - [`DeliveryRecord`] - approved campaigns only, with send offsets
//! - [`ManualReviewRecord`] - escalated campaigns only, with a state snapshot

use super::message::{CampaignMessage, MessageType};
use super::state::CampaignState;
use super::status::CampaignStatus;
use super::value_objects::{DecisionEntry, NodeFailure};
use crate::core::error::DomainError;
use crate::core::time::current_timestamp;
use crate::persona::LeadTrait;
use crate::planning::{CampaignTone, MessagingAngle};
use crate::quality::EscalationDetails;
use serde::{Deserialize, Serialize};

/// Send offsets in days by position in the sequence
pub const SEND_OFFSETS_DAYS: [u32; 3] = [0, 3, 7];

fn send_offset(position: usize) -> u32 {
    SEND_OFFSETS_DAYS
        .get(position)
        .copied()
        .unwrap_or_else(|| {
            let last = SEND_OFFSETS_DAYS[SEND_OFFSETS_DAYS.len() - 1];
            last + 4 * (position + 1 - SEND_OFFSETS_DAYS.len()) as u32
        })
}

fn require_status(state: &CampaignState, expected: CampaignStatus) -> Result<(), DomainError> {
    if state.final_status() == expected {
        Ok(())
    } else {
        Err(DomainError::UnexpectedStatus {
            expected,
            actual: state.final_status(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub execution_id: String,
    pub lead_id: String,
    pub final_status: CampaignStatus,
    pub status_reason: Option<String>,
    pub overall_quality_score: Option<f64>,
    pub retry_count: u32,
    pub traits: Vec<LeadTrait>,
    pub messaging_angle: Option<MessagingAngle>,
    pub campaign_tone: CampaignTone,
    pub campaign_sequence: Vec<MessageType>,
    pub decision_path: Vec<DecisionEntry>,
    pub messages: Vec<CampaignMessage>,
    pub errors: Vec<NodeFailure>,
    pub started_at: u64,
    pub finished_at: Option<u64>,
}

impl TraceRecord {
    pub fn from_state(state: &CampaignState) -> Self {
        Self {
            execution_id: state.execution_id().to_string(),
            lead_id: state.lead().id.clone(),
            final_status: state.final_status(),
            status_reason: state.status_reason().map(str::to_string),
            overall_quality_score: state.overall_quality_score(),
            retry_count: state.retry_count(),
            traits: state.traits.clone(),
            messaging_angle: state.messaging_angle,
            campaign_tone: state.campaign_tone,
            campaign_sequence: state.campaign_sequence.clone(),
            decision_path: state.decision_path().to_vec(),
            messages: state.messages().to_vec(),
            errors: state.errors().to_vec(),
            started_at: state.started_at(),
            finished_at: state.finished_at(),
        }
    }
}

/// One message with its scheduling metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMessage {
    pub message_number: u32,
    pub message_type: MessageType,
    pub subject: String,
    pub body: String,
    /// Days after the campaign goes active
    pub send_offset_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Idempotency key
    pub execution_id: String,
    pub lead_id: String,
    pub email: Option<String>,
    pub overall_quality_score: Option<f64>,
    pub messages: Vec<ScheduledMessage>,
    pub created_at: u64,
}

impl DeliveryRecord {
    /// Only APPROVED campaigns with messages can be delivered.
    pub fn from_state(state: &CampaignState) -> Result<Self, DomainError> {
        require_status(state, CampaignStatus::Approved)?;
        if state.messages().is_empty() {
            return Err(DomainError::NoMessages);
        }

        Ok(Self {
            execution_id: state.execution_id().to_string(),
            lead_id: state.lead().id.clone(),
            email: state.lead().email.clone(),
            overall_quality_score: state.overall_quality_score(),
            messages: state
                .messages()
                .iter()
                .enumerate()
                .map(|(position, m)| ScheduledMessage {
                    message_number: m.message_number,
                    message_type: m.message_type,
                    subject: m.subject.clone(),
                    body: m.body.clone(),
                    send_offset_days: send_offset(position),
                })
                .collect(),
            created_at: current_timestamp(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualReviewRecord {
    pub execution_id: String,
    pub lead_id: String,
    pub escalation_details: String,
    pub escalation: Option<EscalationDetails>,
    pub state: CampaignState,
    pub created_at: u64,
}

impl ManualReviewRecord {
    pub fn from_state(state: &CampaignState) -> Result<Self, DomainError> {
        require_status(state, CampaignStatus::ManualReview)?;

        let escalation_details = state
            .quality_feedback
            .escalation_details
            .clone()
            .or_else(|| state.status_reason().map(str::to_string))
            .unwrap_or_default();

        Ok(Self {
            execution_id: state.execution_id().to_string(),
            lead_id: state.lead().id.clone(),
            escalation_details,
            escalation: state.quality_feedback.escalation.clone(),
            state: state.clone(),
            created_at: current_timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::{CompanyRecord, LeadRecord};

    fn approved_state(count: u32) -> CampaignState {
        let types = [MessageType::Hook, MessageType::Proof, MessageType::Fomo];
        let mut state = CampaignState::new(
            LeadRecord::new("lead-1").with_email("ada@acme.test"),
            CompanyRecord::new(),
            None,
        );
        state.replace_messages(
            (0..count)
                .map(|i| {
                    let mut m = CampaignMessage::new(i + 1, types[i as usize % 3], "s", "b");
                    m.set_score(90.0, vec![]);
                    m
                })
                .collect(),
        );
        state.recompute_overall_score().unwrap();
        state.set_status(CampaignStatus::Approved, "score 90.0 meets threshold 80.0");
        state
    }

    #[test]
    fn test_delivery_offsets_by_position() {
        let record = DeliveryRecord::from_state(&approved_state(3)).unwrap();
        let offsets: Vec<_> = record.messages.iter().map(|m| m.send_offset_days).collect();
        assert_eq!(offsets, vec![0, 3, 7]);
        assert_eq!(record.email.as_deref(), Some("ada@acme.test"));
        assert_eq!(send_offset(4), 15);
    }

    #[test]
    fn test_delivery_requires_approval() {
        let mut state = approved_state(1);
        state.set_status(CampaignStatus::ManualReview, "escalated");
        assert_eq!(
            DeliveryRecord::from_state(&state),
            Err(DomainError::UnexpectedStatus {
                expected: CampaignStatus::Approved,
                actual: CampaignStatus::ManualReview,
            })
        );
        assert!(ManualReviewRecord::from_state(&state).is_ok());
    }

    #[test]
    fn test_trace_captures_audit_trail() {
        let mut state = approved_state(2);
        state.record_error(crate::campaign::PipelineNode::MemoryManager, "offline");
        let trace = TraceRecord::from_state(&state);
        assert_eq!(trace.final_status, CampaignStatus::Approved);
        assert_eq!(trace.messages.len(), 2);
        assert_eq!(trace.errors.len(), 1);
        assert!(trace.finished_at.is_some());
    }
}
