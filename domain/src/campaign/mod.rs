//! Campaign state model: the record threaded through the campaign graph,
//! its messages and statuses, and the records produced for collaborators.

pub mod fallback;
pub mod message;
pub mod node;
pub mod records;
pub mod state;
pub mod status;
pub mod value_objects;

pub use message::{CampaignMessage, MessageType};
pub use node::PipelineNode;
pub use records::{DeliveryRecord, ManualReviewRecord, ScheduledMessage, TraceRecord};
pub use state::CampaignState;
pub use status::CampaignStatus;
pub use value_objects::{DecisionEntry, ExecutionId, NodeFailure, QualityFeedback};
