//! Prompt domain
//!
//! Prompt text for the message generator and parsing of what comes back.

pub mod parsing;
mod template;

pub use parsing::{GeneratedMessage, parse_generated_message};
pub use template::{CampaignPromptTemplate, GenerationContext};
