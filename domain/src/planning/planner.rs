//! Campaign planner.
//!
//! Every trait votes for one or more angles with a fixed weight. Angles the
//! memory says to avoid are dropped, the rest are ranked by total weight and
//! ties fall back to [`MessagingAngle`] priority order. The plan is never
//! empty: with no usable signal it degrades to a single generic hook.

use super::angle::MessagingAngle;
use super::tone::CampaignTone;
use crate::campaign::MessageType;
use crate::lead::CompanyRecord;
use crate::memory::MemoryContext;
use crate::persona::LeadTrait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Angle votes cast by a trait.
fn angle_weights(lead_trait: LeadTrait) -> &'static [(MessagingAngle, u32)] {
    use MessagingAngle::*;
    match lead_trait {
        LeadTrait::AiFocused => &[(AutomationRoi, 3), (TechnicalInnovation, 2)],
        LeadTrait::TechnicalLeader => &[(TechnicalInnovation, 3)],
        LeadTrait::SoftwareProduct => &[(TechnicalInnovation, 2), (GrowthScaling, 1)],
        LeadTrait::Founder => &[(GrowthScaling, 2), (OperationalEfficiency, 1)],
        LeadTrait::Scaling => &[(GrowthScaling, 3)],
        LeadTrait::Ecommerce => &[(RevenueConversion, 3)],
        LeadTrait::Agency => &[(ClientResults, 3)],
        LeadTrait::Enterprise => &[(OperationalEfficiency, 2), (AutomationRoi, 1)],
        LeadTrait::ContentDriven => &[(ClientResults, 1), (GrowthScaling, 1)],
    }
}

/// A weighted angle considered by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleCandidate {
    pub angle: MessagingAngle,
    pub weight: u32,
}

/// Output of planning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPlan {
    pub angle: MessagingAngle,
    pub tone: CampaignTone,
    /// 1..=3 message types, never empty
    pub sequence: Vec<MessageType>,
    /// Ranked candidates after memory filtering
    pub candidates: Vec<AngleCandidate>,
    /// Candidates removed because memory said so
    pub avoided: Vec<MessagingAngle>,
}

impl CampaignPlan {
    /// The plan used when planning has nothing to go on.
    pub fn fallback() -> Self {
        Self {
            angle: MessagingAngle::generic(),
            tone: CampaignTone::default(),
            sequence: vec![MessageType::Hook],
            candidates: Vec::new(),
            avoided: Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        let sequence = self
            .sequence
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        let mut summary = format!(
            "angle {} ({} candidate(s)), tone {}, sequence [{}]",
            self.angle,
            self.candidates.len(),
            self.tone,
            sequence
        );
        if !self.avoided.is_empty() {
            let avoided = self
                .avoided
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            summary.push_str(&format!("; avoided {}", avoided));
        }
        summary
    }
}

pub struct CampaignPlanner;

impl CampaignPlanner {
    pub fn plan(
        traits: &[LeadTrait],
        company: &CompanyRecord,
        memory: &MemoryContext,
    ) -> CampaignPlan {
        let mut totals: BTreeMap<MessagingAngle, u32> = BTreeMap::new();
        for lead_trait in traits {
            for (angle, weight) in angle_weights(*lead_trait) {
                *totals.entry(*angle).or_default() += weight;
            }
        }

        let (avoided, kept): (Vec<_>, Vec<_>) = totals
            .into_iter()
            .map(|(angle, weight)| AngleCandidate { angle, weight })
            .partition(|c| memory.angles_to_avoid.contains(&c.angle));

        let mut candidates = kept;
        // BTreeMap iteration is in priority order and the sort is stable,
        // so equal weights keep priority order.
        candidates.sort_by(|a, b| b.weight.cmp(&a.weight));

        let angle = candidates
            .first()
            .map(|c| c.angle)
            .unwrap_or_else(MessagingAngle::generic);

        CampaignPlan {
            angle,
            tone: Self::select_tone(traits, company),
            sequence: Self::select_sequence(traits, memory),
            candidates,
            avoided: avoided.into_iter().map(|c| c.angle).collect(),
        }
    }

    /// Explicit tone hint wins; otherwise traits decide; otherwise Professional.
    fn select_tone(traits: &[LeadTrait], company: &CompanyRecord) -> CampaignTone {
        if let Some(tone) = company.tone_hint.as_deref().and_then(CampaignTone::from_hint) {
            return tone;
        }
        if traits.contains(&LeadTrait::TechnicalLeader) {
            CampaignTone::Technical
        } else if traits.contains(&LeadTrait::Enterprise) && traits.contains(&LeadTrait::Founder)
        {
            CampaignTone::Executive
        } else {
            CampaignTone::default()
        }
    }

    fn select_sequence(traits: &[LeadTrait], memory: &MemoryContext) -> Vec<MessageType> {
        if memory.has_negative_signal() {
            return vec![MessageType::Hook];
        }
        match traits.len() {
            0 => vec![MessageType::Hook],
            1 | 2 => vec![MessageType::Hook, MessageType::Proof],
            _ => vec![MessageType::Hook, MessageType::Proof, MessageType::Fomo],
        }
    }
}
