//! Campaign tone.

use crate::core::string::words;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CampaignTone {
    #[default]
    Professional,
    Technical,
    Conversational,
    Executive,
}

impl CampaignTone {
    pub fn as_str(&self) -> &str {
        match self {
            CampaignTone::Professional => "Professional",
            CampaignTone::Technical => "Technical",
            CampaignTone::Conversational => "Conversational",
            CampaignTone::Executive => "Executive",
        }
    }

    /// Writing instructions for the generator.
    pub fn guidance(&self) -> &str {
        match self {
            CampaignTone::Professional => {
                "Polite, confident and concise. No slang, at most one exclamation mark."
            }
            CampaignTone::Technical => {
                "Precise and concrete. Name the technical mechanism; skip marketing superlatives."
            }
            CampaignTone::Conversational => {
                "Warm and plain-spoken, like a note to a peer. Avoid stiff formal phrasing."
            }
            CampaignTone::Executive => {
                "Brief and outcome-first. Lead with business impact; no small talk."
            }
        }
    }

    /// Phrases that break this tone.
    pub fn discouraged_phrases(&self) -> &'static [&'static str] {
        match self {
            CampaignTone::Professional => &["hey there", "gonna", "wanna", "lol", "super excited"],
            CampaignTone::Technical => &["revolutionary", "magic", "game-changer", "synergy"],
            CampaignTone::Conversational => &[
                "dear sir",
                "dear madam",
                "to whom it may concern",
                "pursuant",
                "herewith",
            ],
            CampaignTone::Executive => &[
                "hey there",
                "gonna",
                "lol",
                "just checking in",
                "quick question",
            ],
        }
    }

    /// Map a free-text tone hint from enrichment to a tone, if it names one.
    pub fn from_hint(hint: &str) -> Option<Self> {
        let tokens = words(hint);
        let has = |candidates: &[&str]| tokens.iter().any(|t| candidates.contains(&t.as_str()));

        if has(&["casual", "friendly", "playful", "conversational", "informal", "warm"]) {
            Some(CampaignTone::Conversational)
        } else if has(&["technical", "engineering", "developer", "precise"]) {
            Some(CampaignTone::Technical)
        } else if has(&["executive", "corporate", "formal", "boardroom"]) {
            Some(CampaignTone::Executive)
        } else if has(&["professional", "polished"]) {
            Some(CampaignTone::Professional)
        } else {
            None
        }
    }
}

impl std::fmt::Display for CampaignTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampaignTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "professional" => Ok(CampaignTone::Professional),
            "technical" => Ok(CampaignTone::Technical),
            "conversational" => Ok(CampaignTone::Conversational),
            "executive" => Ok(CampaignTone::Executive),
            other => Err(format!("unknown campaign tone '{}'", other)),
        }
    }
}
