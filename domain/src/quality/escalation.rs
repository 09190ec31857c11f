//! Escalation details for manual review.

use super::gate::{EscalationTrigger, GateVerdict};
use crate::campaign::{CampaignState, MessageType};
use crate::persona::LeadTrait;
use crate::planning::{CampaignTone, MessagingAngle};
use serde::{Deserialize, Serialize};

const MAX_TOP_ISSUES: usize = 5;

/// Score line for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageScoreLine {
    pub message_number: u32,
    pub message_type: MessageType,
    pub score: Option<f64>,
    pub subject: String,
    pub is_fallback: bool,
}

/// Enough context for a reviewer to act without re-running the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationDetails {
    pub reason: String,
    pub trigger: Option<EscalationTrigger>,
    pub lead_identity: String,
    pub traits: Vec<LeadTrait>,
    pub angle: Option<MessagingAngle>,
    pub tone: CampaignTone,
    pub overall_score: Option<f64>,
    pub retry_count: u32,
    pub messages: Vec<MessageScoreLine>,
    /// Most severe issues first
    pub top_issues: Vec<String>,
}

impl EscalationDetails {
    pub fn from_state(state: &CampaignState, verdict: &GateVerdict) -> Self {
        let mut issues: Vec<_> = state
            .messages()
            .iter()
            .flat_map(|m| m.quality_issues.iter().map(move |i| (m.message_number, i)))
            .collect();
        // stable: equal severities keep message order
        issues.sort_by(|a, b| b.1.severity.cmp(&a.1.severity));

        Self {
            reason: verdict.reason.clone(),
            trigger: verdict.trigger,
            lead_identity: state.lead().identity(),
            traits: state.traits.clone(),
            angle: state.messaging_angle,
            tone: state.campaign_tone,
            overall_score: state.overall_quality_score(),
            retry_count: state.retry_count(),
            messages: state
                .messages()
                .iter()
                .map(|m| MessageScoreLine {
                    message_number: m.message_number,
                    message_type: m.message_type,
                    score: m.quality_score,
                    subject: m.subject.clone(),
                    is_fallback: m.is_fallback,
                })
                .collect(),
            top_issues: issues
                .into_iter()
                .take(MAX_TOP_ISSUES)
                .map(|(number, issue)| format!("#{} {}", number, issue))
                .collect(),
        }
    }

    /// Multi-line text stored in `quality_feedback.escalation_details`.
    pub fn render(&self) -> String {
        let traits = if self.traits.is_empty() {
            "none".to_string()
        } else {
            self.traits
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let angle = self.angle.map(|a| a.as_str().to_string());

        let mut out = vec![
            format!("Escalated to manual review: {}", self.reason),
            format!("Lead: {}", self.lead_identity),
            format!("Traits: {}", traits),
            format!(
                "Angle: {} | Tone: {}",
                angle.as_deref().unwrap_or("none"),
                self.tone
            ),
            format!(
                "Overall score: {} after {} retr{}",
                format_score(self.overall_score),
                self.retry_count,
                if self.retry_count == 1 { "y" } else { "ies" }
            ),
            "Messages:".to_string(),
        ];
        for line in &self.messages {
            out.push(format!(
                "  #{} {}: {} - {}{}",
                line.message_number,
                line.message_type,
                format_score(line.score),
                line.subject,
                if line.is_fallback { " (fallback)" } else { "" }
            ));
        }
        if !self.top_issues.is_empty() {
            out.push("Top issues:".to_string());
            out.extend(self.top_issues.iter().map(|i| format!("  {}", i)));
        }
        out.join("\n")
    }
}

fn format_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "unscored".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignMessage;
    use crate::lead::{CompanyRecord, LeadRecord};
    use crate::quality::dimension::QualityDimension;
    use crate::quality::gate::{GateInput, QualityGate};
    use crate::quality::issue::QualityIssue;

    #[test]
    fn test_render_contains_per_message_scores() {
        let lead = LeadRecord::new("lead-7")
            .with_name("Grace Hopper")
            .with_company("Navy Labs");
        let mut state = CampaignState::new(lead, CompanyRecord::new(), None);
        state.traits = vec![LeadTrait::TechnicalLeader];
        state.messaging_angle = Some(MessagingAngle::TechnicalInnovation);

        let mut hook = CampaignMessage::new(1, MessageType::Hook, "Compilers", "b");
        hook.set_score(
            72.0,
            vec![
                QualityIssue::minor(QualityDimension::Clarity, "sentences are too long"),
                QualityIssue::critical(QualityDimension::BrandCompliance, "banned phrase 'urgent'"),
            ],
        );
        let mut proof = CampaignMessage::new(2, MessageType::Proof, "Results", "b");
        proof.set_score(68.0, vec![]);
        state.replace_messages(vec![hook, proof]);
        state.recompute_overall_score().unwrap();

        let gate = QualityGate::new(80.0, 0);
        let verdict = gate.evaluate(&GateInput::from_state(&state).unwrap());
        let details = EscalationDetails::from_state(&state, &verdict);
        let text = details.render();

        assert!(text.contains("Lead: Grace Hopper"));
        assert!(text.contains("Traits: technical_leader"));
        assert!(text.contains("Angle: technical_innovation"));
        assert!(text.contains("#1 hook: 72.0 - Compilers"));
        assert!(text.contains("#2 proof: 68.0 - Results"));
        assert!(text.contains("Overall score: 70.0 after 0 retries"));
        // critical issue sorts first
        assert_eq!(
            details.top_issues[0],
            "#1 [critical] brand_compliance: banned phrase 'urgent'"
        );
    }
}
