//! Campaign planning: messaging angle, tone and message sequence.

pub mod angle;
pub mod planner;
pub mod tone;

pub use angle::MessagingAngle;
pub use planner::{AngleCandidate, CampaignPlan, CampaignPlanner};
pub use tone::CampaignTone;
