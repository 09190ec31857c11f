use super::super::types::{CampaignNode, FailurePolicy, NodeError};
use async_trait::async_trait;
use campaign_domain::{
    CampaignState, CampaignStatus, EscalationDetails, EscalationTrigger, GateDecision, GateInput,
    GateVerdict, PipelineNode, QualityGate, synthesize_retry_guidance,
};
use tracing::{info, warn};

/// Applies the quality gate and drives the retry loop.
///
/// Fail-closed: the overall score is recomputed from the current messages
/// before every read, and missing scores or messages fail the node instead
/// of passing.
pub struct QualityGatekeeperNode {
    gate: QualityGate,
}

impl QualityGatekeeperNode {
    pub fn new(gate: QualityGate) -> Self {
        Self { gate }
    }

    pub fn max_retries(&self) -> u32 {
        self.gate.max_retries
    }

    fn escalate(&self, state: &mut CampaignState, verdict: &GateVerdict) {
        warn!(reason = %verdict.reason, "Campaign escalated to manual review");
        let details = EscalationDetails::from_state(state, verdict);
        state.quality_feedback.set_escalation(details);
        state.set_status(CampaignStatus::ManualReview, verdict.reason.clone());
    }
}

#[async_trait]
impl CampaignNode for QualityGatekeeperNode {
    fn id(&self) -> PipelineNode {
        PipelineNode::QualityGatekeeper
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Terminate
    }

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError> {
        state.recompute_overall_score()?;
        let input = GateInput::from_state(state)?;
        let mut verdict = self.gate.evaluate(&input);

        match verdict.decision {
            GateDecision::Pass => {
                info!(score = input.overall_score, "Campaign approved");
                state.set_status(CampaignStatus::Approved, verdict.reason.clone());
            }
            GateDecision::Retry if state.try_begin_retry(self.gate.max_retries) => {
                let retry_number = state.retry_count();
                info!(
                    score = input.overall_score,
                    retry_number,
                    max_retries = self.gate.max_retries,
                    "Campaign below threshold, retrying"
                );
                let guidance =
                    synthesize_retry_guidance(state.messages(), retry_number, self.gate.max_retries);
                state.quality_feedback.retry_guidance = Some(guidance);
                state.set_status(CampaignStatus::Retry, verdict.reason.clone());
            }
            GateDecision::Retry => {
                verdict = GateVerdict {
                    decision: GateDecision::ManualReview,
                    trigger: Some(EscalationTrigger::RetriesExhausted {
                        retry_count: state.retry_count(),
                    }),
                    reason: format!("{}; retry budget already spent", verdict.reason),
                };
                self.escalate(state, &verdict);
            }
            GateDecision::ManualReview => self.escalate(state, &verdict),
        }

        state.record_decision(
            PipelineNode::QualityGatekeeper,
            format!("{}: {}", verdict.decision, verdict.reason),
        );
        Ok(())
    }
}
