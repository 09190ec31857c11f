//! Campaign messages.

use crate::quality::dimension::{DimensionScores, QualityDimension, bounded_score};
use crate::quality::issue::{IssueSeverity, QualityIssue};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role of a message within the outreach sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Opens the conversation around the chosen angle
    Hook,
    /// Backs the angle with evidence (results, case study)
    Proof,
    /// Closes with urgency / fear of missing out
    Fomo,
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Hook => "hook",
            MessageType::Proof => "proof",
            MessageType::Fomo => "fomo",
        }
    }

    /// What the message has to achieve, phrased for the LLM.
    pub fn purpose(&self) -> &str {
        match self {
            MessageType::Hook => {
                "Open the conversation: show you understand their business and raise one sharp idea."
            }
            MessageType::Proof => {
                "Follow up with evidence: a concrete, quantified result from a similar company."
            }
            MessageType::Fomo => {
                "Close the sequence: explain what peers are already doing and what waiting costs them."
            }
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hook" => Ok(MessageType::Hook),
            "proof" => Ok(MessageType::Proof),
            "fomo" => Ok(MessageType::Fomo),
            other => Err(format!("unknown message type '{}'", other)),
        }
    }
}

/// One generated outreach message and its review outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMessage {
    /// 1-based position in the sequence
    pub message_number: u32,
    pub message_type: MessageType,
    pub subject: String,
    pub body: String,
    /// 0..=100, `None` until reviewed
    pub quality_score: Option<f64>,
    pub quality_issues: Vec<QualityIssue>,
    /// Per-dimension breakdown behind `quality_score`
    pub dimension_scores: Option<DimensionScores>,
    /// Produced by the deterministic fallback instead of the LLM
    pub is_fallback: bool,
}

impl CampaignMessage {
    pub fn new(
        message_number: u32,
        message_type: MessageType,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            message_number,
            message_type,
            subject: subject.into(),
            body: body.into(),
            quality_score: None,
            quality_issues: Vec::new(),
            dimension_scores: None,
            is_fallback: false,
        }
    }

    pub fn as_fallback(mut self) -> Self {
        self.is_fallback = true;
        self
    }

    pub fn is_reviewed(&self) -> bool {
        self.quality_score.is_some()
    }

    /// Record a review outcome on this message.
    pub fn apply_review(&mut self, scores: DimensionScores, issues: Vec<QualityIssue>) {
        self.quality_score = Some(scores.weighted_score());
        self.dimension_scores = Some(scores);
        self.quality_issues = issues;
    }

    /// Record a bare score without a dimension breakdown.
    pub fn set_score(&mut self, score: f64, issues: Vec<QualityIssue>) {
        self.quality_score = Some(bounded_score(score));
        self.dimension_scores = None;
        self.quality_issues = issues;
    }

    /// Count issues of the given dimension at critical severity.
    pub fn critical_issues(&self, dimension: QualityDimension) -> usize {
        self.quality_issues
            .iter()
            .filter(|i| i.dimension == dimension && i.severity == IssueSeverity::Critical)
            .count()
    }

    /// Word count of the body.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}
