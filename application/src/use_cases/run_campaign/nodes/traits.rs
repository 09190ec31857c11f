use super::super::types::{CampaignNode, FailurePolicy, NodeError};
use async_trait::async_trait;
use campaign_domain::{CampaignState, PipelineNode, TraitDetector};
use tracing::debug;

pub struct TraitDetectorNode;

#[async_trait]
impl CampaignNode for TraitDetectorNode {
    fn id(&self) -> PipelineNode {
        PipelineNode::TraitDetector
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Continue
    }

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError> {
        let report = TraitDetector::detect(state.lead(), state.company(), state.scraped_content());
        debug!(traits = ?report.traits, "Trait detection finished");

        let summary = report.summary();
        state.traits = report.traits;
        state.record_decision(PipelineNode::TraitDetector, summary);
        Ok(())
    }

    fn degrade(&self, state: &mut CampaignState) {
        state.traits.clear();
    }
}
