//! Type definitions for the RunCampaign use case.

use crate::ports::delivery_queue::DeliveryError;
use crate::ports::llm_gateway::GatewayError;
use crate::ports::memory_store::MemoryStoreError;
use async_trait::async_trait;
use campaign_domain::{
    CampaignState, CompanyRecord, DomainError, ExecutionId, LeadRecord, PipelineNode,
};
use std::time::Duration;
use thiserror::Error;

/// Errors a node can fail with
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("{operation} timed out after {}s", .after.as_secs_f64())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Memory store error: {0}")]
    MemoryStore(#[from] MemoryStoreError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("cancelled")]
    Cancelled,

    #[error("panicked: {0}")]
    Panicked(String),
}

impl NodeError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, NodeError::Cancelled)
    }
}

/// What the graph does when a node fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the error, apply the node's degraded result, keep going
    Continue,
    /// Record the error and end the run with ERROR
    Terminate,
}

/// One step of the campaign graph
#[async_trait]
pub trait CampaignNode: Send + Sync {
    fn id(&self) -> PipelineNode;

    fn failure_policy(&self) -> FailurePolicy;

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError>;

    /// Leave the state usable after a failure under [`FailurePolicy::Continue`].
    fn degrade(&self, _state: &mut CampaignState) {}
}

/// Input for the RunCampaign use case
#[derive(Debug, Clone)]
pub struct RunCampaignInput {
    pub lead: LeadRecord,
    pub company: CompanyRecord,
    pub scraped_content: Option<String>,
    /// Reuse an id to make re-invocation idempotent downstream
    pub execution_id: Option<ExecutionId>,
}

impl RunCampaignInput {
    pub fn new(lead: LeadRecord, company: CompanyRecord) -> Self {
        Self {
            lead,
            company,
            scraped_content: None,
            execution_id: None,
        }
    }

    pub fn with_scraped_content(mut self, content: impl Into<String>) -> Self {
        self.scraped_content = Some(content.into());
        self
    }

    pub fn with_execution_id(mut self, id: ExecutionId) -> Self {
        self.execution_id = Some(id);
        self
    }

    pub(super) fn into_state(self) -> CampaignState {
        match self.execution_id {
            Some(id) => {
                CampaignState::with_execution_id(id, self.lead, self.company, self.scraped_content)
            }
            None => CampaignState::new(self.lead, self.company, self.scraped_content),
        }
    }
}
