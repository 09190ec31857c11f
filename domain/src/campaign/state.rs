//! The campaign state threaded through every graph node.
//!
//! Inputs (`lead`, `company`, `scraped_content`) and the execution id are
//! private and exposed read-only. The audit trail (`decision_path`, `errors`)
//! only grows through [`CampaignState::record_decision`] and
//! [`CampaignState::record_error`]. The message list can be read, re-scored
//! in place, or replaced wholesale, but never resized piecemeal.

use super::message::{CampaignMessage, MessageType};
use super::node::PipelineNode;
use super::status::CampaignStatus;
use super::value_objects::{DecisionEntry, ExecutionId, NodeFailure, QualityFeedback};
use crate::core::error::DomainError;
use crate::core::time::current_timestamp;
use crate::lead::{CompanyRecord, LeadRecord};
use crate::memory::MemoryContext;
use crate::persona::LeadTrait;
use crate::planning::{CampaignTone, MessagingAngle};
use crate::quality::dimension::QualityDimension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignState {
    execution_id: ExecutionId,
    lead: LeadRecord,
    company: CompanyRecord,
    scraped_content: Option<String>,

    /// Ordered, de-duplicated trait labels
    pub traits: Vec<LeadTrait>,
    /// Prior-campaign context from the memory store
    pub memory: MemoryContext,
    pub messaging_angle: Option<MessagingAngle>,
    pub campaign_tone: CampaignTone,
    pub campaign_sequence: Vec<MessageType>,
    pub quality_feedback: QualityFeedback,

    messages: Vec<CampaignMessage>,
    overall_quality_score: Option<f64>,
    retry_count: u32,
    final_status: CampaignStatus,
    status_reason: Option<String>,
    decision_path: Vec<DecisionEntry>,
    errors: Vec<NodeFailure>,
    started_at: u64,
    finished_at: Option<u64>,
}

impl CampaignState {
    pub fn new(lead: LeadRecord, company: CompanyRecord, scraped_content: Option<String>) -> Self {
        Self::with_execution_id(ExecutionId::generate(), lead, company, scraped_content)
    }

    pub fn with_execution_id(
        execution_id: ExecutionId,
        lead: LeadRecord,
        company: CompanyRecord,
        scraped_content: Option<String>,
    ) -> Self {
        Self {
            execution_id,
            lead,
            company,
            scraped_content,
            traits: Vec::new(),
            memory: MemoryContext::default(),
            messaging_angle: None,
            campaign_tone: CampaignTone::default(),
            campaign_sequence: Vec::new(),
            quality_feedback: QualityFeedback::default(),
            messages: Vec::new(),
            overall_quality_score: None,
            retry_count: 0,
            final_status: CampaignStatus::Pending,
            status_reason: None,
            decision_path: Vec::new(),
            errors: Vec::new(),
            started_at: current_timestamp(),
            finished_at: None,
        }
    }

    // ==================== Inputs ====================

    pub fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    pub fn lead(&self) -> &LeadRecord {
        &self.lead
    }

    pub fn company(&self) -> &CompanyRecord {
        &self.company
    }

    pub fn scraped_content(&self) -> Option<&str> {
        self.scraped_content.as_deref()
    }

    // ==================== Audit trail ====================

    pub fn record_decision(&mut self, node: PipelineNode, summary: impl Into<String>) {
        self.decision_path.push(DecisionEntry::new(node, summary));
    }

    pub fn record_error(&mut self, node: PipelineNode, exception: impl Into<String>) {
        self.errors.push(NodeFailure::new(node, exception));
    }

    pub fn decision_path(&self) -> &[DecisionEntry] {
        &self.decision_path
    }

    pub fn errors(&self) -> &[NodeFailure] {
        &self.errors
    }

    pub fn errors_for(&self, node: PipelineNode) -> impl Iterator<Item = &NodeFailure> {
        self.errors.iter().filter(move |e| e.node == node)
    }

    // ==================== Messages ====================

    pub fn messages(&self) -> &[CampaignMessage] {
        &self.messages
    }

    /// Mutable view for re-scoring; the length cannot change through it.
    pub fn messages_mut(&mut self) -> &mut [CampaignMessage] {
        &mut self.messages
    }

    /// Replace the whole message set with a freshly generated one.
    ///
    /// Invalidates the overall score and the per-message diagnostics of the
    /// previous pass.
    pub fn replace_messages(&mut self, messages: Vec<CampaignMessage>) {
        self.messages = messages;
        self.overall_quality_score = None;
        self.quality_feedback.clear_review();
    }

    /// Recompute `overall_quality_score` from the current messages.
    ///
    /// The overall score is the arithmetic mean of message scores. Fails
    /// when there are no messages or any message is unreviewed; the stored
    /// score is cleared in that case.
    pub fn recompute_overall_score(&mut self) -> Result<f64, DomainError> {
        self.overall_quality_score = None;
        if self.messages.is_empty() {
            return Err(DomainError::NoMessages);
        }
        let mut total = 0.0;
        for message in &self.messages {
            let score = message
                .quality_score
                .ok_or(DomainError::UnscoredMessage(message.message_number))?;
            total += score;
        }
        let overall = total / self.messages.len() as f64;
        self.overall_quality_score = Some(overall);
        Ok(overall)
    }

    pub fn overall_quality_score(&self) -> Option<f64> {
        self.overall_quality_score
    }

    /// Lowest scored message as `(message_number, score)`.
    pub fn lowest_message_score(&self) -> Option<(u32, f64)> {
        self.messages
            .iter()
            .filter_map(|m| m.quality_score.map(|s| (m.message_number, s)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Critical issues of one dimension across all messages.
    pub fn critical_issue_count(&self, dimension: QualityDimension) -> usize {
        self.messages
            .iter()
            .map(|m| m.critical_issues(dimension))
            .sum()
    }

    // ==================== Retry budget ====================

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Consume one retry. Returns `false` (and changes nothing) when the
    /// budget is already spent.
    pub fn try_begin_retry(&mut self, max_retries: u32) -> bool {
        if self.retry_count >= max_retries {
            return false;
        }
        self.retry_count += 1;
        true
    }

    // ==================== Status ====================

    pub fn final_status(&self) -> CampaignStatus {
        self.final_status
    }

    pub fn status_reason(&self) -> Option<&str> {
        self.status_reason.as_deref()
    }

    /// Set the status; terminal statuses also stamp `finished_at`.
    pub fn set_status(&mut self, status: CampaignStatus, reason: impl Into<String>) {
        self.final_status = status;
        self.status_reason = Some(reason.into());
        if status.is_terminal() {
            self.finished_at = Some(current_timestamp());
        }
    }

    /// Terminate with ERROR and record the failure in one step.
    pub fn fail(&mut self, node: PipelineNode, exception: impl Into<String>) {
        let exception = exception.into();
        self.record_error(node, exception.clone());
        self.set_status(
            CampaignStatus::Error,
            format!("{} failed: {}", node, exception),
        );
    }

    pub fn is_terminal(&self) -> bool {
        self.final_status.is_terminal()
    }

    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<u64> {
        self.finished_at
    }
}
