use super::super::types::{CampaignNode, FailurePolicy, NodeError};
use super::memory_key;
use crate::ports::delivery_queue::{DeliveryQueue, EnqueueOutcome};
use crate::ports::memory_store::MemoryStore;
use crate::use_cases::shared::{CallOutcome, call_with_timeout};
use async_trait::async_trait;
use campaign_domain::core::time::current_timestamp;
use campaign_domain::{CampaignState, DeliveryRecord, PipelineNode, PriorCampaign};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Hands an approved campaign to the delivery queue and remembers the angle
/// for future runs against the same lead.
pub struct InjectorNode {
    delivery: Arc<dyn DeliveryQueue>,
    memory: Arc<dyn MemoryStore>,
    delivery_timeout: Duration,
    memory_timeout: Duration,
}

impl InjectorNode {
    pub fn new(
        delivery: Arc<dyn DeliveryQueue>,
        memory: Arc<dyn MemoryStore>,
        delivery_timeout: Duration,
        memory_timeout: Duration,
    ) -> Self {
        Self {
            delivery,
            memory,
            delivery_timeout,
            memory_timeout,
        }
    }

    /// Best effort: a failure here is recorded but does not undo delivery.
    async fn remember(&self, state: &mut CampaignState) {
        let key = memory_key(state);
        let mut campaign = PriorCampaign::new(state.execution_id().as_str());
        campaign.angle = state.messaging_angle;
        campaign.sent_at = Some(current_timestamp());

        let error = match call_with_timeout(self.memory_timeout, self.memory.record(&key, campaign))
            .await
        {
            CallOutcome::Success(()) => return,
            CallOutcome::Timeout(after) => NodeError::Timeout {
                operation: "memory record",
                after,
            },
            CallOutcome::Failed(e) => NodeError::from(e),
        };
        warn!(key = %key, error = %error, "Failed to record campaign in memory");
        state.record_error(
            PipelineNode::Injector,
            format!("memory record failed: {}", error),
        );
    }
}

#[async_trait]
impl CampaignNode for InjectorNode {
    fn id(&self) -> PipelineNode {
        PipelineNode::Injector
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Terminate
    }

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError> {
        let record = DeliveryRecord::from_state(state)?;

        let outcome =
            match call_with_timeout(self.delivery_timeout, self.delivery.enqueue(&record)).await {
                CallOutcome::Success(outcome) => outcome,
                CallOutcome::Timeout(after) => {
                    return Err(NodeError::Timeout {
                        operation: "delivery enqueue",
                        after,
                    });
                }
                CallOutcome::Failed(e) => return Err(e.into()),
            };

        match outcome {
            EnqueueOutcome::Enqueued => {
                info!(execution_id = %record.execution_id, messages = record.messages.len(), "Campaign enqueued for delivery");
                state.record_decision(
                    PipelineNode::Injector,
                    format!("enqueued {} message(s) for delivery", record.messages.len()),
                );
                self.remember(state).await;
            }
            EnqueueOutcome::AlreadyQueued => {
                info!(execution_id = %record.execution_id, "Campaign already queued, skipping");
                state.record_decision(
                    PipelineNode::Injector,
                    "execution already queued; delivery skipped",
                );
            }
        }
        Ok(())
    }
}
