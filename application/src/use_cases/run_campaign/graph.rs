//! The campaign graph interpreter.
//!
//! A fixed node table plus one transition function. The only conditional
//! edge leaves the gatekeeper: RETRY loops back to the generator, APPROVED
//! continues to the injector, anything else ends the run. Every node runs
//! inside a fault boundary that turns errors and panics into entries in
//! `state.errors`.

use super::nodes::{
    CampaignPlannerNode, InjectorNode, MemoryManagerNode, MessageGeneratorNode,
    MessageReviewerNode, QualityGatekeeperNode, TraitDetectorNode,
};
use super::types::{CampaignNode, FailurePolicy, NodeError};
use crate::ports::progress::CampaignProgressNotifier;
use crate::use_cases::shared::check_cancelled;
use campaign_domain::{CampaignState, CampaignStatus, GateDecision, PipelineNode};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

pub(crate) const ENTRY_NODE: PipelineNode = PipelineNode::TraitDetector;

/// The node that runs after `current`, or `None` when the run is over.
pub(crate) fn next_node(current: PipelineNode, state: &CampaignState) -> Option<PipelineNode> {
    if state.final_status() == CampaignStatus::Error {
        return None;
    }
    match current {
        PipelineNode::TraitDetector => Some(PipelineNode::MemoryManager),
        PipelineNode::MemoryManager => Some(PipelineNode::CampaignPlanner),
        PipelineNode::CampaignPlanner => Some(PipelineNode::MessageGenerator),
        PipelineNode::MessageGenerator => Some(PipelineNode::MessageReviewer),
        PipelineNode::MessageReviewer => Some(PipelineNode::QualityGatekeeper),
        PipelineNode::QualityGatekeeper => match state.final_status() {
            CampaignStatus::Retry => Some(PipelineNode::MessageGenerator),
            CampaignStatus::Approved => Some(PipelineNode::Injector),
            _ => None,
        },
        PipelineNode::Injector | PipelineNode::CampaignGraph => None,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub(crate) struct CampaignGraph {
    pub(crate) trait_detector: TraitDetectorNode,
    pub(crate) memory_manager: MemoryManagerNode,
    pub(crate) planner: CampaignPlannerNode,
    pub(crate) generator: MessageGeneratorNode,
    pub(crate) reviewer: MessageReviewerNode,
    pub(crate) gatekeeper: QualityGatekeeperNode,
    pub(crate) injector: InjectorNode,
    pub(crate) step_budget: usize,
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl CampaignGraph {
    fn node(&self, id: PipelineNode) -> Option<&dyn CampaignNode> {
        match id {
            PipelineNode::TraitDetector => Some(&self.trait_detector),
            PipelineNode::MemoryManager => Some(&self.memory_manager),
            PipelineNode::CampaignPlanner => Some(&self.planner),
            PipelineNode::MessageGenerator => Some(&self.generator),
            PipelineNode::MessageReviewer => Some(&self.reviewer),
            PipelineNode::QualityGatekeeper => Some(&self.gatekeeper),
            PipelineNode::Injector => Some(&self.injector),
            PipelineNode::CampaignGraph => None,
        }
    }

    /// Walk the graph from the entry node until a transition ends the run.
    pub(crate) async fn run(
        &self,
        state: &mut CampaignState,
        progress: &dyn CampaignProgressNotifier,
    ) {
        let mut current = Some(ENTRY_NODE);
        let mut steps = 0;

        while let Some(id) = current {
            if check_cancelled(&self.cancellation_token).is_err() {
                Self::cancel(state, PipelineNode::CampaignGraph);
                return;
            }
            if steps >= self.step_budget {
                error!(steps, "Campaign graph exceeded its step budget");
                state.fail(
                    PipelineNode::CampaignGraph,
                    format!("step budget of {} exceeded", self.step_budget),
                );
                return;
            }
            steps += 1;

            let Some(node) = self.node(id) else {
                state.fail(
                    PipelineNode::CampaignGraph,
                    format!("no node registered for {}", id),
                );
                return;
            };
            self.run_node(node, state, progress).await;

            if id == PipelineNode::QualityGatekeeper {
                Self::notify_gate(state, progress, self.gatekeeper.max_retries());
            }

            current = next_node(id, state);
        }
    }

    fn notify_gate(
        state: &CampaignState,
        progress: &dyn CampaignProgressNotifier,
        max_retries: u32,
    ) {
        let decision = match state.final_status() {
            CampaignStatus::Approved => GateDecision::Pass,
            CampaignStatus::Retry => GateDecision::Retry,
            CampaignStatus::ManualReview => GateDecision::ManualReview,
            _ => return,
        };
        progress.on_gate_decision(
            decision,
            state.overall_quality_score().unwrap_or_default(),
            state.retry_count(),
        );
        if decision == GateDecision::Retry {
            progress.on_retry(state.retry_count(), max_retries);
        }
    }

    fn cancel(state: &mut CampaignState, node: PipelineNode) {
        warn!(node = %node, "Campaign run cancelled");
        state.record_error(node, "cancelled");
        state.set_status(CampaignStatus::Error, "cancelled");
    }

    /// Fault boundary around one node.
    async fn run_node(
        &self,
        node: &dyn CampaignNode,
        state: &mut CampaignState,
        progress: &dyn CampaignProgressNotifier,
    ) {
        let id = node.id();
        debug!(node = %id, "Node started");
        progress.on_node_start(id);

        let result = match AssertUnwindSafe(node.execute(state)).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(NodeError::Panicked(panic_message(payload.as_ref()))),
        };

        let error = match result {
            Ok(()) => {
                debug!(node = %id, "Node finished");
                progress.on_node_complete(id);
                return;
            }
            Err(error) => error,
        };

        progress.on_node_failed(id, &error.to_string());
        if error.is_cancelled() {
            Self::cancel(state, id);
            return;
        }

        match node.failure_policy() {
            FailurePolicy::Continue => {
                warn!(node = %id, error = %error, "Node failed, continuing with degraded result");
                state.record_error(id, error.to_string());
                node.degrade(state);
            }
            FailurePolicy::Terminate => {
                error!(node = %id, error = %error, "Node failed, terminating run");
                state.fail(id, error.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_domain::{CompanyRecord, LeadRecord};

    fn state() -> CampaignState {
        CampaignState::new(LeadRecord::new("l1"), CompanyRecord::new(), None)
    }

    #[test]
    fn test_linear_edges() {
        let state = state();
        assert_eq!(
            next_node(PipelineNode::TraitDetector, &state),
            Some(PipelineNode::MemoryManager)
        );
        assert_eq!(
            next_node(PipelineNode::MessageReviewer, &state),
            Some(PipelineNode::QualityGatekeeper)
        );
        assert_eq!(next_node(PipelineNode::Injector, &state), None);
    }

    #[test]
    fn test_gatekeeper_edges_follow_status() {
        let mut state = state();
        state.set_status(CampaignStatus::Retry, "retry");
        assert_eq!(
            next_node(PipelineNode::QualityGatekeeper, &state),
            Some(PipelineNode::MessageGenerator)
        );
        state.set_status(CampaignStatus::Approved, "pass");
        assert_eq!(
            next_node(PipelineNode::QualityGatekeeper, &state),
            Some(PipelineNode::Injector)
        );
        state.set_status(CampaignStatus::ManualReview, "escalate");
        assert_eq!(next_node(PipelineNode::QualityGatekeeper, &state), None);
    }

    #[test]
    fn test_error_ends_run_from_any_node() {
        let mut state = state();
        state.fail(PipelineNode::MessageGenerator, "boom");
        assert_eq!(next_node(PipelineNode::MessageGenerator, &state), None);
        assert_eq!(next_node(PipelineNode::TraitDetector, &state), None);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("bad index");
        assert_eq!(panic_message(payload.as_ref()), "bad index");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
    }
}
