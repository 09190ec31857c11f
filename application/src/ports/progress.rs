//! Progress notification port
//!
//! Defines the interface for observing a campaign run node by node.
//! Every callback has a no-op default, so implementations override only
//! what they display.

use campaign_domain::{CampaignStatus, GateDecision, PipelineNode};

pub trait CampaignProgressNotifier: Send + Sync {
    fn on_node_start(&self, _node: PipelineNode) {}

    fn on_node_complete(&self, _node: PipelineNode) {}

    fn on_node_failed(&self, _node: PipelineNode, _error: &str) {}

    /// Called after each gate evaluation.
    fn on_gate_decision(&self, _decision: GateDecision, _score: f64, _retry_count: u32) {}

    /// Called when a retry pass begins (`retry_number` is 1-based).
    fn on_retry(&self, _retry_number: u32, _max_retries: u32) {}

    fn on_finished(&self, _status: CampaignStatus) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoCampaignProgress;

impl CampaignProgressNotifier for NoCampaignProgress {}
