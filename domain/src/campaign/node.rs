//! Names of the campaign graph nodes, as they appear in the audit trail.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineNode {
    TraitDetector,
    MemoryManager,
    CampaignPlanner,
    MessageGenerator,
    MessageReviewer,
    QualityGatekeeper,
    Injector,
    /// The graph interpreter itself (timeouts, cancellation, step budget)
    CampaignGraph,
}

impl PipelineNode {
    pub fn as_str(&self) -> &str {
        match self {
            PipelineNode::TraitDetector => "trait_detector",
            PipelineNode::MemoryManager => "memory_manager",
            PipelineNode::CampaignPlanner => "campaign_planner",
            PipelineNode::MessageGenerator => "message_generator",
            PipelineNode::MessageReviewer => "message_reviewer",
            PipelineNode::QualityGatekeeper => "quality_gatekeeper",
            PipelineNode::Injector => "injector",
            PipelineNode::CampaignGraph => "campaign_graph",
        }
    }
}

impl std::fmt::Display for PipelineNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
