//! Campaign value objects
//!
//! # Identifiers
//! - [`ExecutionId`] - Unique identifier for one campaign-brain execution
//!
//! # Audit trail
//! - [`DecisionEntry`] - One step recorded in `decision_path`
//! - [`NodeFailure`] - One failure recorded in `errors`
//!
//! # Review output
//! - [`QualityFeedback`] - Diagnostics per message type plus retry/escalation text

use super::message::MessageType;
use super::node::PipelineNode;
use crate::core::time::current_timestamp;
use crate::quality::EscalationDetails;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for one execution.
///
/// Assigned when the state is created and never changed afterwards; the
/// delivery queue uses it as its idempotency key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(String);

impl ExecutionId {
    /// Creates an ExecutionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new random ExecutionId.
    pub fn generate() -> Self {
        Self(format!("exec-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the append-only decision path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub node: PipelineNode,
    pub summary: String,
    /// Milliseconds since epoch
    pub timestamp: u64,
}

impl DecisionEntry {
    pub fn new(node: PipelineNode, summary: impl Into<String>) -> Self {
        Self {
            node,
            summary: summary.into(),
            timestamp: current_timestamp(),
        }
    }
}

/// A node failure captured by the graph's fault boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFailure {
    pub node: PipelineNode,
    pub exception: String,
    pub timestamp: u64,
}

impl NodeFailure {
    pub fn new(node: PipelineNode, exception: impl Into<String>) -> Self {
        Self {
            node,
            exception: exception.into(),
            timestamp: current_timestamp(),
        }
    }
}

/// Reviewer and gatekeeper diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityFeedback {
    /// Rendered issues per message type from the latest review pass
    pub by_message_type: BTreeMap<MessageType, Vec<String>>,
    /// Corrective instructions for the next generation pass
    pub retry_guidance: Option<String>,
    /// Human-facing summary when the run is escalated
    pub escalation_details: Option<String>,
    /// Structured form of `escalation_details`
    #[serde(default)]
    pub escalation: Option<EscalationDetails>,
}

impl QualityFeedback {
    pub fn set_for(&mut self, message_type: MessageType, diagnostics: Vec<String>) {
        self.by_message_type.insert(message_type, diagnostics);
    }

    pub fn for_type(&self, message_type: MessageType) -> &[String] {
        self.by_message_type
            .get(&message_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set_escalation(&mut self, details: EscalationDetails) {
        self.escalation_details = Some(details.render());
        self.escalation = Some(details);
    }

    /// Drop per-message diagnostics; retry guidance survives so the next
    /// generation pass can read it.
    pub fn clear_review(&mut self) {
        self.by_message_type.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ExecutionId::generate();
        let b = ExecutionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("exec-"));
    }

    #[test]
    fn test_feedback_for_missing_type_is_empty() {
        let mut feedback = QualityFeedback::default();
        assert!(feedback.for_type(MessageType::Proof).is_empty());

        feedback.set_for(MessageType::Proof, vec!["too long".to_string()]);
        assert_eq!(feedback.for_type(MessageType::Proof), ["too long"]);

        feedback.retry_guidance = Some("fix it".to_string());
        feedback.clear_review();
        assert!(feedback.for_type(MessageType::Proof).is_empty());
        assert_eq!(feedback.retry_guidance.as_deref(), Some("fix it"));
    }

    #[test]
    fn test_feedback_serializes_type_keys() {
        let mut feedback = QualityFeedback::default();
        feedback.set_for(MessageType::Hook, vec!["x".to_string()]);
        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(json["by_message_type"]["hook"][0], "x");
    }
}
