//! Domain layer for campaign-brain
//!
//! This crate contains the business logic of the campaign brain: the state
//! threaded through the campaign graph, the rules each node applies, and the
//! records handed to collaborators. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Campaign state
//!
//! One [`CampaignState`] per execution. Inputs are read-only, the audit trail
//! (`decision_path`, `errors`) only grows, and the message list is replaced
//! wholesale on every generation pass.
//!
//! ## Quality gate
//!
//! Messages are scored on five weighted dimensions. The [`QualityGate`]
//! turns the mean score into PASS / RETRY / MANUAL_REVIEW, with an
//! immediate-escalation safety valve and a bounded retry budget.

pub mod campaign;
pub mod core;
pub mod lead;
pub mod memory;
pub mod persona;
pub mod planning;
pub mod prompt;
pub mod quality;

// Re-export commonly used types
pub use campaign::{
    CampaignMessage, CampaignState, CampaignStatus, DecisionEntry, DeliveryRecord, ExecutionId,
    ManualReviewRecord, MessageType, NodeFailure, PipelineNode, QualityFeedback,
    ScheduledMessage, TraceRecord, fallback::fallback_message,
};
pub use core::{
    error::DomainError,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use lead::{CompanyRecord, LeadRecord};
pub use memory::{MemoryContext, MemoryKey, PriorCampaign, ResponseSignal};
pub use persona::{LeadTrait, TraitDetector, TraitReport};
pub use planning::{AngleCandidate, CampaignPlan, CampaignPlanner, CampaignTone, MessagingAngle};
pub use prompt::{
    CampaignPromptTemplate, GeneratedMessage, GenerationContext, parse_generated_message,
};
pub use quality::{
    DimensionScores, EscalationDetails, EscalationTrigger, GateDecision, GateInput, GateVerdict,
    IssueSeverity, MessageReview, MessageScorer, QualityDimension, QualityGate, QualityIssue,
    ReviewContext, RubricScorer, synthesize_retry_guidance,
};
