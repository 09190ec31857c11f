use super::super::types::{CampaignNode, FailurePolicy, NodeError};
use async_trait::async_trait;
use campaign_domain::{
    CampaignState, DomainError, MessageScorer, MessageType, PipelineNode, ReviewContext,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Scores every message independently and refreshes the overall score.
pub struct MessageReviewerNode {
    scorer: Arc<dyn MessageScorer>,
}

impl MessageReviewerNode {
    pub fn new(scorer: Arc<dyn MessageScorer>) -> Self {
        Self { scorer }
    }
}

#[async_trait]
impl CampaignNode for MessageReviewerNode {
    fn id(&self) -> PipelineNode {
        PipelineNode::MessageReviewer
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Terminate
    }

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError> {
        if state.messages().is_empty() {
            return Err(DomainError::NoMessages.into());
        }

        let context = ReviewContext::from_state(state);
        let mut diagnostics: BTreeMap<MessageType, Vec<String>> = BTreeMap::new();

        for message in state.messages_mut() {
            let review = self.scorer.score(message, &context);
            diagnostics
                .entry(message.message_type)
                .or_default()
                .extend(review.issues.iter().map(|i| i.to_string()));
            message.apply_review(review.scores, review.issues);
            debug!(number = message.message_number, score = ?message.quality_score, "Message reviewed");
        }

        for (message_type, lines) in diagnostics {
            state.quality_feedback.set_for(message_type, lines);
        }

        let overall = state.recompute_overall_score()?;
        let scores = state
            .messages()
            .iter()
            .map(|m| format!("{:.1}", m.quality_score.unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(", ");
        state.record_decision(
            PipelineNode::MessageReviewer,
            format!("scores [{}], overall {:.1}", scores, overall),
        );
        Ok(())
    }
}
