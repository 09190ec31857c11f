//! The seven campaign graph nodes.
//!
//! | Node               | Suspends on     | On failure          |
//! |--------------------|-----------------|---------------------|
//! | TraitDetector      | -               | continue, no traits |
//! | MemoryManager      | memory lookup   | continue, no memory |
//! | CampaignPlanner    | -               | continue, fallback  |
//! | MessageGenerator   | LLM call        | fallback or ERROR   |
//! | MessageReviewer    | -               | ERROR               |
//! | QualityGatekeeper  | -               | ERROR               |
//! | Injector           | delivery queue  | ERROR               |
//!
//! Every suspension point runs under its own deadline. After a successful
//! enqueue the Injector also records the campaign in memory; that write is
//! best effort and a failure is logged without changing the status.

mod gatekeeper;
mod generator;
mod injector;
mod memory;
mod planner;
mod reviewer;
mod traits;

pub use gatekeeper::QualityGatekeeperNode;
pub use generator::MessageGeneratorNode;
pub use injector::InjectorNode;
pub use memory::MemoryManagerNode;
pub use planner::CampaignPlannerNode;
pub use reviewer::MessageReviewerNode;
pub use traits::TraitDetectorNode;

use campaign_domain::{CampaignState, MemoryKey};

pub(crate) fn memory_key(state: &CampaignState) -> MemoryKey {
    MemoryKey::new(
        state.lead().id.clone(),
        state.lead().company_name().map(str::to_string),
    )
}
