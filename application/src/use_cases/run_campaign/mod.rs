//! Run Campaign use case
//!
//! Drives one execution of the campaign brain for one lead:
//!
//! | Step | Node              | Reads                     | Writes                         |
//! |------|-------------------|---------------------------|--------------------------------|
//! | 1    | TraitDetector     | lead, company, scraped    | traits                         |
//! | 2    | MemoryManager     | lead id, company          | memory                         |
//! | 3    | CampaignPlanner   | traits, memory, tone hint | angle, tone, sequence          |
//! | 4    | MessageGenerator  | plan, retry guidance      | messages (replaced)            |
//! | 5    | MessageReviewer   | messages                  | scores, issues, feedback       |
//! | 6    | QualityGatekeeper | scores, retry count       | status, guidance / escalation  |
//! | 7    | Injector          | approved campaign         | delivery queue, memory         |
//!
//! Steps 4-6 repeat while the gatekeeper says RETRY. After the graph ends the
//! driver hands escalated campaigns to the review queue and writes exactly one
//! trace record. The caller always gets a terminal [`CampaignState`] back.

mod graph;
mod nodes;
mod types;


pub use nodes::{
    CampaignPlannerNode, InjectorNode, MemoryManagerNode, MessageGeneratorNode,
    MessageReviewerNode, QualityGatekeeperNode, TraitDetectorNode,
};
pub use types::{CampaignNode, FailurePolicy, NodeError, RunCampaignInput};

use crate::config::{BrainConfig, ConfigurationError};
use crate::ports::delivery_queue::DeliveryQueue;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::memory_store::{MemoryStore, NoMemoryStore};
use crate::ports::progress::{CampaignProgressNotifier, NoCampaignProgress};
use crate::ports::review_queue::{NoReviewQueue, ReviewQueue};
use crate::ports::trace_sink::{NoTraceSink, TraceSink};
use crate::use_cases::shared::{CallOutcome, call_with_timeout};
use campaign_domain::{
    CampaignState, CampaignStatus, ManualReviewRecord, MessageScorer, PipelineNode, RubricScorer,
    TraceRecord,
};
use graph::CampaignGraph;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Use case for running the campaign brain on one lead
#[derive(Clone)]
pub struct RunCampaignUseCase {
    config: Arc<BrainConfig>,
    gateway: Arc<dyn LlmGateway>,
    delivery: Arc<dyn DeliveryQueue>,
    memory_store: Arc<dyn MemoryStore>,
    scorer: Arc<dyn MessageScorer>,
    review_queue: Arc<dyn ReviewQueue>,
    trace_sink: Arc<dyn TraceSink>,
    cancellation_token: Option<CancellationToken>,
}

impl RunCampaignUseCase {
    /// Validates `config`; an invalid configuration never reaches a run.
    pub fn new(
        config: BrainConfig,
        gateway: Arc<dyn LlmGateway>,
        delivery: Arc<dyn DeliveryQueue>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            gateway,
            delivery,
            memory_store: Arc::new(NoMemoryStore),
            scorer: Arc::new(RubricScorer),
            review_queue: Arc::new(NoReviewQueue),
            trace_sink: Arc::new(NoTraceSink),
            cancellation_token: None,
        })
    }

    pub fn with_memory_store(mut self, store: Arc<dyn MemoryStore>) -> Self {
        self.memory_store = store;
        self
    }

    /// Replace the default rubric scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn MessageScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_review_queue(mut self, queue: Arc<dyn ReviewQueue>) -> Self {
        self.review_queue = queue;
        self
    }

    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = sink;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    fn graph(&self) -> CampaignGraph {
        let config = &self.config;
        CampaignGraph {
            trait_detector: TraitDetectorNode,
            memory_manager: MemoryManagerNode::new(
                self.memory_store.clone(),
                config.memory.timeout,
            ),
            planner: CampaignPlannerNode,
            generator: MessageGeneratorNode::new(
                self.gateway.clone(),
                config.generation.clone(),
                self.cancellation_token.clone(),
            ),
            reviewer: MessageReviewerNode::new(self.scorer.clone()),
            gatekeeper: QualityGatekeeperNode::new(config.quality),
            injector: InjectorNode::new(
                self.delivery.clone(),
                self.memory_store.clone(),
                config.delivery_timeout,
                config.memory.timeout,
            ),
            step_budget: config.step_budget(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }

    pub async fn execute(&self, input: RunCampaignInput) -> CampaignState {
        self.execute_with_progress(input, &NoCampaignProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunCampaignInput,
        progress: &dyn CampaignProgressNotifier,
    ) -> CampaignState {
        let mut state = input.into_state();
        info!(
            execution_id = %state.execution_id(),
            lead_id = %state.lead().id,
            "Starting campaign run"
        );

        let graph = self.graph();
        let timeout = self.config.execution_timeout;
        if tokio::time::timeout(timeout, graph.run(&mut state, progress))
            .await
            .is_err()
        {
            warn!(timeout_secs = timeout.as_secs(), "Campaign run timed out");
            state.fail(
                PipelineNode::CampaignGraph,
                format!("execution timed out after {}s", timeout.as_secs()),
            );
        }

        if !state.is_terminal() {
            let status = state.final_status();
            state.fail(
                PipelineNode::CampaignGraph,
                format!("graph stopped with non-terminal status {}", status),
            );
        }

        self.finalize(&mut state).await;

        info!(
            execution_id = %state.execution_id(),
            status = %state.final_status(),
            retries = state.retry_count(),
            "Campaign run finished"
        );
        progress.on_finished(state.final_status());
        state
    }

    /// Manual-review hand-off and the trace record. Failures here are
    /// recorded but never change the final status.
    async fn finalize(&self, state: &mut CampaignState) {
        if state.final_status() == CampaignStatus::ManualReview {
            let submitted = match ManualReviewRecord::from_state(state) {
                Ok(record) => {
                    let timeout = self.config.delivery_timeout;
                    match call_with_timeout(timeout, self.review_queue.submit(&record)).await {
                        CallOutcome::Success(_) => Ok(()),
                        CallOutcome::Timeout(after) => {
                            Err(format!("timed out after {}s", after.as_secs()))
                        }
                        CallOutcome::Failed(e) => Err(e.to_string()),
                    }
                }
                Err(e) => Err(e.to_string()),
            };
            if let Err(e) = submitted {
                warn!(error = %e, "Manual review hand-off failed");
                state.record_error(
                    PipelineNode::CampaignGraph,
                    format!("manual review hand-off failed: {}", e),
                );
            }
        }

        if self.config.trace_enabled
            && let Err(e) = self.trace_sink.write(&TraceRecord::from_state(state))
        {
            warn!(error = %e, "Failed to write trace record");
            state.record_error(
                PipelineNode::CampaignGraph,
                format!("trace write failed: {}", e),
            );
        }
    }
}
