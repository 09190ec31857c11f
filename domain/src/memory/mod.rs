//! Prior-interaction memory: what earlier campaigns to the same lead or
//! company used, and how the lead responded.

use crate::planning::MessagingAngle;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lookup key for the memory store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryKey {
    pub lead_id: String,
    pub company: Option<String>,
}

impl MemoryKey {
    pub fn new(lead_id: impl Into<String>, company: Option<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            company,
        }
    }
}

impl std::fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.company {
            Some(company) => write!(f, "{}@{}", self.lead_id, company),
            None => write!(f, "{}", self.lead_id),
        }
    }
}

/// How a lead reacted to an earlier campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSignal {
    Replied,
    Interested,
    NotInterested,
    Bounced,
    NoResponse,
    Unsubscribed,
}

impl ResponseSignal {
    pub fn as_str(&self) -> &str {
        match self {
            ResponseSignal::Replied => "replied",
            ResponseSignal::Interested => "interested",
            ResponseSignal::NotInterested => "not_interested",
            ResponseSignal::Bounced => "bounced",
            ResponseSignal::NoResponse => "no_response",
            ResponseSignal::Unsubscribed => "unsubscribed",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, ResponseSignal::Replied | ResponseSignal::Interested)
    }

    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            ResponseSignal::NotInterested | ResponseSignal::Unsubscribed
        )
    }
}

impl std::fmt::Display for ResponseSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResponseSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "replied" => Ok(ResponseSignal::Replied),
            "interested" => Ok(ResponseSignal::Interested),
            "not_interested" => Ok(ResponseSignal::NotInterested),
            "bounced" => Ok(ResponseSignal::Bounced),
            "no_response" => Ok(ResponseSignal::NoResponse),
            "unsubscribed" => Ok(ResponseSignal::Unsubscribed),
            other => Err(format!("unknown response signal '{}'", other)),
        }
    }
}

/// Summary of one earlier campaign as kept by the memory store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorCampaign {
    pub execution_id: String,
    pub angle: Option<MessagingAngle>,
    /// Milliseconds since epoch
    pub sent_at: Option<u64>,
    pub response: Option<ResponseSignal>,
}

impl PriorCampaign {
    pub fn new(execution_id: impl Into<String>) -> Self {
        Self {
            execution_id: execution_id.into(),
            angle: None,
            sent_at: None,
            response: None,
        }
    }

    pub fn with_angle(mut self, angle: MessagingAngle) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_response(mut self, response: ResponseSignal) -> Self {
        self.response = Some(response);
        self
    }
}

/// Memory annotations placed on the campaign state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryContext {
    pub prior_campaigns: usize,
    /// Angles already tried without a positive response
    pub angles_to_avoid: Vec<MessagingAngle>,
    pub response_signals: Vec<ResponseSignal>,
}

impl MemoryContext {
    pub fn from_history(history: &[PriorCampaign]) -> Self {
        let mut angles_to_avoid = Vec::new();
        let mut response_signals = Vec::new();

        for campaign in history {
            if let Some(signal) = campaign.response
                && !response_signals.contains(&signal)
            {
                response_signals.push(signal);
            }
            let positive = campaign.response.is_some_and(|r| r.is_positive());
            if let Some(angle) = campaign.angle
                && !positive
                && !angles_to_avoid.contains(&angle)
            {
                angles_to_avoid.push(angle);
            }
        }

        Self {
            prior_campaigns: history.len(),
            angles_to_avoid,
            response_signals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prior_campaigns == 0
    }

    pub fn has_negative_signal(&self) -> bool {
        self.response_signals.iter().any(ResponseSignal::is_negative)
    }

    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no prior campaigns".to_string();
        }
        let avoid = self
            .angles_to_avoid
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let signals = self
            .response_signals
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} prior campaign(s); avoid [{}]; signals [{}]",
            self.prior_campaigns, avoid, signals
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let memory = MemoryContext::from_history(&[]);
        assert!(memory.is_empty());
        assert!(!memory.has_negative_signal());
        assert_eq!(memory.summary(), "no prior campaigns");
    }

    #[test]
    fn test_unanswered_angles_are_avoided() {
        let history = vec![
            PriorCampaign::new("e1")
                .with_angle(MessagingAngle::AutomationRoi)
                .with_response(ResponseSignal::NoResponse),
            PriorCampaign::new("e2")
                .with_angle(MessagingAngle::GrowthScaling)
                .with_response(ResponseSignal::Interested),
            PriorCampaign::new("e3").with_angle(MessagingAngle::AutomationRoi),
        ];
        let memory = MemoryContext::from_history(&history);
        assert_eq!(memory.prior_campaigns, 3);
        assert_eq!(memory.angles_to_avoid, vec![MessagingAngle::AutomationRoi]);
        assert_eq!(
            memory.response_signals,
            vec![ResponseSignal::NoResponse, ResponseSignal::Interested]
        );
    }

    #[test]
    fn test_negative_signal() {
        let history = vec![PriorCampaign::new("e1").with_response(ResponseSignal::Unsubscribed)];
        assert!(MemoryContext::from_history(&history).has_negative_signal());
    }

    #[test]
    fn test_memory_key_display() {
        assert_eq!(
            MemoryKey::new("l1", Some("Acme".to_string())).to_string(),
            "l1@Acme"
        );
        assert_eq!(MemoryKey::new("l1", None).to_string(), "l1");
    }
}
