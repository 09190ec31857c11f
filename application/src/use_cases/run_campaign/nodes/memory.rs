use super::super::types::{CampaignNode, FailurePolicy, NodeError};
use super::memory_key;
use crate::ports::memory_store::MemoryStore;
use crate::use_cases::shared::{CallOutcome, call_with_timeout};
use async_trait::async_trait;
use campaign_domain::{CampaignState, MemoryContext, PipelineNode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Looks up prior campaigns. The store is optional infrastructure: any
/// failure degrades to an empty memory and the run continues.
pub struct MemoryManagerNode {
    store: Arc<dyn MemoryStore>,
    timeout: Duration,
}

impl MemoryManagerNode {
    pub fn new(store: Arc<dyn MemoryStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    fn continue_without_memory(&self, state: &mut CampaignState, reason: String) {
        warn!(error = %reason, "Memory lookup failed, continuing without history");
        state.record_error(PipelineNode::MemoryManager, reason);
        self.degrade(state);
        state.record_decision(
            PipelineNode::MemoryManager,
            "memory unavailable; continuing without history",
        );
    }
}

#[async_trait]
impl CampaignNode for MemoryManagerNode {
    fn id(&self) -> PipelineNode {
        PipelineNode::MemoryManager
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Continue
    }

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError> {
        let key = memory_key(state);

        match call_with_timeout(self.timeout, self.store.lookup(&key)).await {
            CallOutcome::Success(history) => {
                debug!(key = %key, prior = history.len(), "Memory lookup finished");
                state.memory = MemoryContext::from_history(&history);
                let summary = state.memory.summary();
                state.record_decision(PipelineNode::MemoryManager, summary);
            }
            CallOutcome::Timeout(after) => {
                let error = NodeError::Timeout {
                    operation: "memory lookup",
                    after,
                };
                self.continue_without_memory(state, error.to_string());
            }
            CallOutcome::Failed(e) => {
                self.continue_without_memory(state, NodeError::from(e).to_string());
            }
        }
        Ok(())
    }

    fn degrade(&self, state: &mut CampaignState) {
        state.memory = MemoryContext::default();
    }
}
