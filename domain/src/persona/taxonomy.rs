//! Trait taxonomy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Qualitative label steering the campaign.
///
/// Declaration order is priority order: technical traits first. Trait lists
/// on the state are kept sorted in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTrait {
    /// Company builds with or sells AI / ML
    AiFocused,
    /// Lead holds an engineering or technical role
    TechnicalLeader,
    /// Company ships a software product or platform
    SoftwareProduct,
    /// Lead owns the business (founder, CEO, owner)
    Founder,
    /// Company is hiring, raising, or expanding
    Scaling,
    /// Company sells online
    Ecommerce,
    /// Company sells services to clients
    Agency,
    /// Company operates at enterprise scale
    Enterprise,
    /// Company publishes content regularly
    ContentDriven,
}

impl LeadTrait {
    pub const ALL: [LeadTrait; 9] = [
        LeadTrait::AiFocused,
        LeadTrait::TechnicalLeader,
        LeadTrait::SoftwareProduct,
        LeadTrait::Founder,
        LeadTrait::Scaling,
        LeadTrait::Ecommerce,
        LeadTrait::Agency,
        LeadTrait::Enterprise,
        LeadTrait::ContentDriven,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            LeadTrait::AiFocused => "ai_focused",
            LeadTrait::TechnicalLeader => "technical_leader",
            LeadTrait::SoftwareProduct => "software_product",
            LeadTrait::Founder => "founder",
            LeadTrait::Scaling => "scaling",
            LeadTrait::Ecommerce => "ecommerce",
            LeadTrait::Agency => "agency",
            LeadTrait::Enterprise => "enterprise",
            LeadTrait::ContentDriven => "content_driven",
        }
    }

    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            LeadTrait::AiFocused | LeadTrait::TechnicalLeader | LeadTrait::SoftwareProduct
        )
    }
}

impl std::fmt::Display for LeadTrait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadTrait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        LeadTrait::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("unknown lead trait '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technical_traits_sort_first() {
        let mut traits = vec![LeadTrait::Agency, LeadTrait::SoftwareProduct, LeadTrait::Founder];
        traits.sort();
        assert!(traits[0].is_technical());
        assert_eq!(traits.last(), Some(&LeadTrait::Agency));
    }

    #[test]
    fn test_parse_round_trip() {
        for t in LeadTrait::ALL {
            assert_eq!(t.as_str().parse::<LeadTrait>().unwrap(), t);
        }
        assert_eq!(
            "content-driven".parse::<LeadTrait>().unwrap(),
            LeadTrait::ContentDriven
        );
    }
}
