//! Prompt templates for message generation

use crate::campaign::{CampaignState, MessageType};
use crate::lead::{CompanyRecord, LeadRecord};
use crate::persona::LeadTrait;
use crate::planning::{CampaignTone, MessagingAngle};

/// What the generator knows when writing one message
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub lead: &'a LeadRecord,
    pub company: &'a CompanyRecord,
    pub traits: &'a [LeadTrait],
    pub angle: MessagingAngle,
    pub tone: CampaignTone,
    pub message_type: MessageType,
    /// 1-based
    pub message_number: u32,
    pub sequence_len: usize,
    pub retry_guidance: Option<&'a str>,
}

impl<'a> GenerationContext<'a> {
    pub fn from_state(state: &'a CampaignState, message_type: MessageType, message_number: u32) -> Self {
        Self {
            lead: state.lead(),
            company: state.company(),
            traits: &state.traits,
            angle: state
                .messaging_angle
                .unwrap_or_else(MessagingAngle::generic),
            tone: state.campaign_tone,
            message_type,
            message_number,
            sequence_len: state.campaign_sequence.len(),
            retry_guidance: state.quality_feedback.retry_guidance.as_deref(),
        }
    }
}

/// Templates for generating campaign prompts
pub struct CampaignPromptTemplate;

impl CampaignPromptTemplate {
    /// System prompt carrying the brand voice
    pub fn system(brand_voice: &str) -> String {
        format!(
            r#"You write short, personal B2B outreach emails on behalf of a small consultancy.

Brand voice: {}

Rules:
- Address the recipient by first name and mention their company.
- One idea per email, backed by a concrete number where possible.
- Explain why the idea matters to them, not what we sell.
- End with a single low-pressure question as the call to action.
- Never use hype or pressure phrases ("guaranteed", "act now", "limited time", "click here").
- Never leave placeholders such as [name] or {{company}} in the text.
- Keep the body between 60 and 150 words.

Respond with JSON only: {{"subject": "...", "body": "..."}}"#,
            brand_voice.trim()
        )
    }

    /// User prompt for one message of the sequence
    pub fn message_generation(context: &GenerationContext<'_>) -> String {
        let lead = context.lead;
        let traits = if context.traits.is_empty() {
            "none detected".to_string()
        } else {
            context
                .traits
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut prompt = format!(
            r#"Write message {} of {} in the sequence ({}).
Purpose: {}

## Lead
Name: {}
Title: {}
Company: {}
Traits: {}

## Company
{}

## Strategy
Angle: {} - {}
Tone: {} - {}
"#,
            context.message_number,
            context.sequence_len.max(1),
            context.message_type,
            context.message_type.purpose(),
            lead.full_name.as_deref().unwrap_or("unknown"),
            lead.title.as_deref().unwrap_or("unknown"),
            lead.company_name().unwrap_or("unknown"),
            traits,
            context.company.to_prompt_context(),
            context.angle,
            context.angle.pitch(),
            context.tone,
            context.tone.guidance(),
        );

        if let Some(guidance) = context.retry_guidance {
            prompt.push_str(&format!(
                r#"
## Reviewer feedback on the previous draft
{}
"#,
                guidance
            ));
        }

        prompt
    }
}
