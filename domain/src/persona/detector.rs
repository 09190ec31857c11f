//! Keyword-driven trait detection.
//!
//! Each rule names the trait it fires, the text sources it inspects, and the
//! single words / multi-word phrases that count as a hit. Words match whole
//! tokens (so "ai" does not fire on "email"); phrases match the normalized
//! text. Missing sources are simply empty, which keeps detection total.

use super::taxonomy::LeadTrait;
use crate::core::string::{normalize, words};
use crate::lead::{CompanyRecord, LeadRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Scraped pages longer than this count as a content signal on their own.
const CONTENT_WORD_THRESHOLD: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Title,
    Company,
    Scraped,
}

impl Source {
    fn as_str(&self) -> &str {
        match self {
            Source::Title => "title",
            Source::Company => "company",
            Source::Scraped => "scraped",
        }
    }
}

struct Rule {
    lead_trait: LeadTrait,
    sources: &'static [Source],
    words: &'static [&'static str],
    phrases: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        lead_trait: LeadTrait::AiFocused,
        sources: &[Source::Company, Source::Scraped],
        words: &["ai", "ml", "llm", "llms", "gpt", "genai"],
        phrases: &[
            "artificial intelligence",
            "machine learning",
            "computer vision",
            "generative",
        ],
    },
    Rule {
        lead_trait: LeadTrait::TechnicalLeader,
        sources: &[Source::Title],
        words: &[
            "cto",
            "engineer",
            "engineering",
            "developer",
            "architect",
            "technical",
            "devops",
            "technology",
        ],
        phrases: &[],
    },
    Rule {
        lead_trait: LeadTrait::SoftwareProduct,
        sources: &[Source::Company],
        words: &["saas", "software", "platform", "api", "cloud", "app"],
        phrases: &[],
    },
    Rule {
        lead_trait: LeadTrait::Founder,
        sources: &[Source::Title],
        words: &["founder", "cofounder", "ceo", "owner", "president"],
        phrases: &[],
    },
    Rule {
        lead_trait: LeadTrait::Scaling,
        sources: &[Source::Company, Source::Scraped],
        words: &["hiring", "growing", "expansion", "expanding", "scaling", "raised"],
        phrases: &["series a", "series b", "series c", "fast-growing", "fast growing"],
    },
    Rule {
        lead_trait: LeadTrait::Ecommerce,
        sources: &[Source::Company, Source::Scraped],
        words: &["ecommerce", "shopify", "retail", "dtc", "d2c", "storefront"],
        phrases: &["e-commerce", "online store", "online shop"],
    },
    Rule {
        lead_trait: LeadTrait::Agency,
        sources: &[Source::Company],
        words: &["agency", "consultancy", "consulting", "studio"],
        phrases: &["marketing services", "digital marketing"],
    },
    Rule {
        lead_trait: LeadTrait::Enterprise,
        sources: &[Source::Company, Source::Scraped],
        words: &["enterprise", "enterprises", "fortune", "multinational", "global"],
        phrases: &[],
    },
    Rule {
        lead_trait: LeadTrait::ContentDriven,
        sources: &[Source::Company, Source::Scraped],
        words: &["blog", "podcast", "newsletter", "webinar", "webinars"],
        phrases: &[],
    },
];

/// Tokenized view of one text source
struct SourceText {
    tokens: HashSet<String>,
    normalized: String,
}

impl SourceText {
    fn new(text: &str) -> Self {
        Self {
            tokens: words(text).into_iter().collect(),
            normalized: normalize(text),
        }
    }

    fn first_hit(&self, rule: &Rule) -> Option<&'static str> {
        rule.words
            .iter()
            .find(|w| self.tokens.contains(**w))
            .or_else(|| rule.phrases.iter().find(|p| self.normalized.contains(**p)))
            .copied()
    }
}

/// Output of trait detection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitReport {
    /// Ordered (taxonomy priority) and de-duplicated
    pub traits: Vec<LeadTrait>,
    /// One human-readable line per fired signal
    pub signals: Vec<String>,
}

impl TraitReport {
    /// One-line summary for the decision path.
    pub fn summary(&self) -> String {
        if self.traits.is_empty() {
            return "no trait signals fired".to_string();
        }
        format!(
            "detected {} trait(s): {}",
            self.traits.len(),
            self.signals.join("; ")
        )
    }
}

/// Classifies a lead into [`LeadTrait`]s.
pub struct TraitDetector;

impl TraitDetector {
    pub fn detect(
        lead: &LeadRecord,
        company: &CompanyRecord,
        scraped_content: Option<&str>,
    ) -> TraitReport {
        let title = SourceText::new(lead.title.as_deref().unwrap_or_default());
        let company_text = SourceText::new(&company_text(lead, company));
        let scraped_raw = scraped_content.unwrap_or_default();
        let scraped = SourceText::new(scraped_raw);

        let mut traits = BTreeSet::new();
        let mut signals = Vec::new();

        for rule in RULES {
            for source in rule.sources {
                let text = match source {
                    Source::Title => &title,
                    Source::Company => &company_text,
                    Source::Scraped => &scraped,
                };
                if let Some(hit) = text.first_hit(rule) {
                    if traits.insert(rule.lead_trait) {
                        signals.push(format!(
                            "{} <- {} '{}'",
                            rule.lead_trait,
                            source.as_str(),
                            hit
                        ));
                    }
                    break;
                }
            }
        }

        let scraped_words = scraped_raw.split_whitespace().count();
        if scraped_words >= CONTENT_WORD_THRESHOLD && traits.insert(LeadTrait::ContentDriven) {
            signals.push(format!(
                "{} <- scraped {} words",
                LeadTrait::ContentDriven,
                scraped_words
            ));
        }

        TraitReport {
            traits: traits.into_iter().collect(),
            signals,
        }
    }
}

fn company_text(lead: &LeadRecord, company: &CompanyRecord) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(name) = lead.company.as_deref() {
        parts.push(name);
    }
    if let Some(description) = company.description.as_deref() {
        parts.push(description);
    }
    parts.extend(company.services.iter().map(String::as_str));
    if let Some(insight) = company.website_insight.as_deref() {
        parts.push(insight);
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_lead() -> (LeadRecord, CompanyRecord) {
        let lead = LeadRecord::new("l1")
            .with_name("Grace Hopper")
            .with_title("Co-Founder & CTO")
            .with_company("Compilerly");
        let company = CompanyRecord::new()
            .with_description("A SaaS platform that uses machine learning to review code")
            .with_service("Automated code review")
            .with_website_insight("Currently hiring senior engineers after their Series A");
        (lead, company)
    }

    #[test]
    fn test_rich_profile_fires_ordered_traits() {
        let (lead, company) = rich_lead();
        let report = TraitDetector::detect(&lead, &company, None);
        assert_eq!(
            report.traits,
            vec![
                LeadTrait::AiFocused,
                LeadTrait::TechnicalLeader,
                LeadTrait::SoftwareProduct,
                LeadTrait::Founder,
                LeadTrait::Scaling,
            ]
        );
        assert_eq!(report.signals.len(), report.traits.len());
        assert!(report.summary().contains("ai_focused <- company 'machine learning'"));
    }

    #[test]
    fn test_missing_company_data_degrades_to_title_traits() {
        let lead = LeadRecord::new("l2").with_title("Owner");
        let report = TraitDetector::detect(&lead, &CompanyRecord::default(), None);
        assert_eq!(report.traits, vec![LeadTrait::Founder]);
    }

    #[test]
    fn test_empty_inputs_yield_empty_report() {
        let report = TraitDetector::detect(&LeadRecord::new("l3"), &CompanyRecord::default(), None);
        assert!(report.traits.is_empty());
        assert_eq!(report.summary(), "no trait signals fired");
    }

    #[test]
    fn test_words_match_whole_tokens_only() {
        let company = CompanyRecord::new().with_description("We send email campaigns");
        let report = TraitDetector::detect(&LeadRecord::new("l4"), &company, None);
        assert!(!report.traits.contains(&LeadTrait::AiFocused));
    }

    #[test]
    fn test_traits_are_deduplicated_across_sources() {
        let company = CompanyRecord::new().with_description("Our blog covers retail");
        let scraped = "Listen to our podcast and read the blog";
        let report = TraitDetector::detect(&LeadRecord::new("l5"), &company, Some(scraped));
        let content = report
            .traits
            .iter()
            .filter(|t| **t == LeadTrait::ContentDriven)
            .count();
        assert_eq!(content, 1);
        assert!(report.traits.contains(&LeadTrait::Ecommerce));
    }

    #[test]
    fn test_long_scraped_content_is_a_content_signal() {
        let scraped = "word ".repeat(CONTENT_WORD_THRESHOLD);
        let report = TraitDetector::detect(
            &LeadRecord::new("l6"),
            &CompanyRecord::default(),
            Some(&scraped),
        );
        assert_eq!(report.traits, vec![LeadTrait::ContentDriven]);
    }
}
