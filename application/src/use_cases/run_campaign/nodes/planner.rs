use super::super::types::{CampaignNode, FailurePolicy, NodeError};
use async_trait::async_trait;
use campaign_domain::{CampaignPlan, CampaignPlanner, CampaignState, PipelineNode};
use tracing::debug;

pub struct CampaignPlannerNode;

impl CampaignPlannerNode {
    fn apply(state: &mut CampaignState, plan: CampaignPlan) {
        state.messaging_angle = Some(plan.angle);
        state.campaign_tone = plan.tone;
        state.campaign_sequence = plan.sequence;
    }
}

#[async_trait]
impl CampaignNode for CampaignPlannerNode {
    fn id(&self) -> PipelineNode {
        PipelineNode::CampaignPlanner
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Continue
    }

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError> {
        let plan = CampaignPlanner::plan(&state.traits, state.company(), &state.memory);
        debug!(angle = %plan.angle, tone = %plan.tone, steps = plan.sequence.len(), "Campaign planned");

        let summary = plan.summary();
        Self::apply(state, plan);
        state.record_decision(PipelineNode::CampaignPlanner, summary);
        Ok(())
    }

    fn degrade(&self, state: &mut CampaignState) {
        Self::apply(state, CampaignPlan::fallback());
        state.record_decision(
            PipelineNode::CampaignPlanner,
            "planning failed; using a single generic hook",
        );
    }
}
