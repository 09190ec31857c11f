//! Lead and company records.
//!
//! Both records come from upstream scraping/enrichment and may be sparse.
//! Every field except the lead id is optional so a partially enriched lead
//! still flows through the pipeline.

use serde::{Deserialize, Serialize};

/// A prospect as delivered by lead acquisition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadRecord {
    pub id: String,
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
}

impl LeadRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// First token of the full name, if any.
    pub fn first_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .filter(|n| !n.is_empty())
    }

    /// Company name, falling back to the website host.
    pub fn company_name(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .or_else(|| self.website.as_deref().and_then(website_host))
    }

    /// Human-readable identity line for reviewers.
    pub fn identity(&self) -> String {
        let name = self.full_name.as_deref().unwrap_or("Unknown lead");
        let mut parts = vec![name.to_string()];
        if let Some(title) = &self.title {
            parts.push(title.clone());
        }
        if let Some(company) = self.company_name() {
            parts.push(company.to_string());
        }
        let mut identity = parts.join(", ");
        if let Some(email) = &self.email {
            identity.push_str(&format!(" <{}>", email));
        }
        format!("{} [{}]", identity, self.id)
    }
}

fn website_host(website: &str) -> Option<&str> {
    let without_scheme = website
        .strip_prefix("https://")
        .or_else(|| website.strip_prefix("http://"))
        .unwrap_or(website);
    let host = without_scheme.split('/').next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then_some(host)
}

/// Company enrichment produced by the enrichment collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyRecord {
    pub description: Option<String>,
    pub services: Vec<String>,
    pub tone_hint: Option<String>,
    pub website_insight: Option<String>,
}

impl CompanyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.services.push(service.into());
        self
    }

    pub fn with_tone_hint(mut self, hint: impl Into<String>) -> Self {
        self.tone_hint = Some(hint.into());
        self
    }

    pub fn with_website_insight(mut self, insight: impl Into<String>) -> Self {
        self.website_insight = Some(insight.into());
        self
    }

    /// True when enrichment produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.description.as_deref().is_none_or(|d| d.trim().is_empty())
            && self.services.iter().all(|s| s.trim().is_empty())
            && self
                .website_insight
                .as_deref()
                .is_none_or(|i| i.trim().is_empty())
    }

    /// Formats the enrichment for use in LLM prompts.
    pub fn to_prompt_context(&self) -> String {
        let mut parts = Vec::new();
        if let Some(description) = &self.description {
            parts.push(format!("Description: {}", description));
        }
        if !self.services.is_empty() {
            parts.push(format!("Services: {}", self.services.join(", ")));
        }
        if let Some(insight) = &self.website_insight {
            parts.push(format!("Website insight: {}", insight));
        }
        if parts.is_empty() {
            "No company enrichment available.".to_string()
        } else {
            parts.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name() {
        let lead = LeadRecord::new("l1").with_name("Ada Lovelace");
        assert_eq!(lead.first_name(), Some("Ada"));
        assert_eq!(LeadRecord::new("l2").first_name(), None);
    }

    #[test]
    fn test_company_name_falls_back_to_website() {
        let lead = LeadRecord::new("l1").with_website("https://www.acme.io/about");
        assert_eq!(lead.company_name(), Some("acme.io"));

        let lead = lead.with_company("Acme");
        assert_eq!(lead.company_name(), Some("Acme"));
    }

    #[test]
    fn test_identity_includes_id_and_email() {
        let lead = LeadRecord::new("rec42")
            .with_name("Ada Lovelace")
            .with_title("CTO")
            .with_company("Acme")
            .with_email("ada@acme.io");
        assert_eq!(lead.identity(), "Ada Lovelace, CTO, Acme <ada@acme.io> [rec42]");
    }

    #[test]
    fn test_company_is_empty() {
        assert!(CompanyRecord::new().is_empty());
        assert!(CompanyRecord::new().with_description("  ").is_empty());
        assert!(!CompanyRecord::new().with_service("SEO").is_empty());
    }

    #[test]
    fn test_deserialize_sparse_lead() {
        let lead: LeadRecord = serde_json::from_str(r#"{"id": "x1"}"#).unwrap();
        assert_eq!(lead.id, "x1");
        assert!(lead.full_name.is_none());
    }
}
