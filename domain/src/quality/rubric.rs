//! Message scoring.
//!
//! [`MessageScorer`] is the seam the reviewer scores through; [`RubricScorer`]
//! is the built-in deterministic heuristic. Each dimension starts from a base
//! and gains or loses points for observable properties of the text, so the
//! same message always gets the same score.

use super::dimension::{DimensionScores, QualityDimension};
use super::issue::QualityIssue;
use crate::campaign::{CampaignMessage, CampaignState};
use crate::core::string::{normalize, words};
use crate::planning::{CampaignTone, MessagingAngle};

/// Everything a scorer may look at besides the message itself
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewContext {
    pub first_name: Option<String>,
    pub company: Option<String>,
    pub services: Vec<String>,
    pub angle: MessagingAngle,
    pub tone: CampaignTone,
    /// Zero-based generation pass (equals `retry_count`)
    pub attempt: u32,
}

impl ReviewContext {
    pub fn from_state(state: &CampaignState) -> Self {
        Self {
            first_name: state.lead().first_name().map(str::to_string),
            company: state.lead().company_name().map(str::to_string),
            services: state
                .company()
                .services
                .iter()
                .filter(|s| !s.trim().is_empty())
                .cloned()
                .collect(),
            angle: state
                .messaging_angle
                .unwrap_or_else(MessagingAngle::generic),
            tone: state.campaign_tone,
            attempt: state.retry_count(),
        }
    }
}

/// Outcome of scoring one message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageReview {
    pub scores: DimensionScores,
    pub issues: Vec<QualityIssue>,
}

pub trait MessageScorer: Send + Sync {
    fn score(&self, message: &CampaignMessage, context: &ReviewContext) -> MessageReview;
}

const BANNED_PHRASES: &[&str] = &[
    "guarantee",
    "guaranteed",
    "act now",
    "100% free",
    "click here",
    "limited time",
    "risk-free",
    "no obligation",
    "buy now",
    "urgent",
];

const PLACEHOLDERS: &[&str] = &["{", "}", "[name]", "[company]", "[first name]", "<name>"];

const REASONING_MARKERS: &[&str] = &["because", "so that", "which means"];

const CTA_MARKERS: &[&str] = &["let me know", "reply", "book a", "schedule a", "worth a call"];

const TECH_TERMS: &[&str] = &[
    "api",
    "integration",
    "pipeline",
    "pipelines",
    "stack",
    "automation",
    "engineering",
    "data",
    "infrastructure",
    "model",
    "models",
    "workflow",
    "workflows",
];

const MAX_SUBJECT_CHARS: usize = 70;
const MIN_BODY_WORDS: usize = 40;
const MAX_BODY_WORDS: usize = 180;
const MAX_AVG_SENTENCE_WORDS: f64 = 25.0;

/// Default heuristic scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct RubricScorer;

impl RubricScorer {
    fn personalization(
        text: &str,
        context: &ReviewContext,
        issues: &mut Vec<QualityIssue>,
    ) -> f64 {
        let dim = QualityDimension::Personalization;
        let mut score = 40.0;

        match &context.first_name {
            Some(name) if text.contains(&name.to_lowercase()) => score += 25.0,
            Some(name) => issues.push(QualityIssue::major(
                dim,
                format!("does not address the lead by name ({})", name),
            )),
            None => score += 15.0,
        }

        match &context.company {
            Some(company) if text.contains(&normalize(company)) => score += 25.0,
            Some(company) => issues.push(QualityIssue::major(
                dim,
                format!("does not mention the company ({})", company),
            )),
            None => score += 15.0,
        }

        if context.services.is_empty() {
            score += 10.0;
        } else if context
            .services
            .iter()
            .any(|s| text.contains(&normalize(s)))
        {
            score += 10.0;
        } else {
            issues.push(QualityIssue::minor(dim, "no reference to a specific service"));
        }

        score
    }

    fn strategic_insight(
        text: &str,
        tokens: &[String],
        context: &ReviewContext,
        issues: &mut Vec<QualityIssue>,
    ) -> f64 {
        let dim = QualityDimension::StrategicInsight;
        let mut score = 40.0;

        if context
            .angle
            .keywords()
            .iter()
            .any(|k| tokens.iter().any(|t| t == k))
        {
            score += 30.0;
        } else {
            issues.push(QualityIssue::major(
                dim,
                format!("does not develop the {} angle", context.angle),
            ));
        }

        if text.chars().any(|c| c.is_ascii_digit()) {
            score += 15.0;
        } else {
            issues.push(QualityIssue::minor(dim, "no concrete number or outcome"));
        }

        if REASONING_MARKERS.iter().any(|m| text.contains(m)) {
            score += 15.0;
        } else {
            issues.push(QualityIssue::minor(dim, "claims are not explained"));
        }

        score
    }

    fn tone_fit(
        raw: &str,
        text: &str,
        tokens: &[String],
        context: &ReviewContext,
        issues: &mut Vec<QualityIssue>,
    ) -> f64 {
        let dim = QualityDimension::ToneFit;
        let mut score = 100.0;

        let exclamations = raw.matches('!').count();
        if exclamations > 1 {
            score -= 15.0;
            issues.push(QualityIssue::minor(
                dim,
                format!("{} exclamation marks", exclamations),
            ));
        }

        for phrase in context.tone.discouraged_phrases() {
            if contains_phrase(text, phrase) {
                score -= 20.0;
                issues.push(QualityIssue::major(
                    dim,
                    format!("'{}' does not fit a {} tone", phrase, context.tone),
                ));
            }
        }

        if context.tone == CampaignTone::Technical
            && !tokens.iter().any(|t| TECH_TERMS.contains(&t.as_str()))
        {
            score -= 15.0;
            issues.push(QualityIssue::minor(dim, "technical tone without technical detail"));
        }

        score
    }

    fn clarity(message: &CampaignMessage, body: &str, issues: &mut Vec<QualityIssue>) -> f64 {
        let dim = QualityDimension::Clarity;
        let mut score = 100.0;

        let subject = message.subject.trim();
        if subject.is_empty() {
            score -= 40.0;
            issues.push(QualityIssue::critical(dim, "empty subject line"));
        } else if subject.chars().count() > MAX_SUBJECT_CHARS {
            score -= 15.0;
            issues.push(QualityIssue::minor(dim, "subject line is too long"));
        }

        let word_count = message.word_count();
        if !(MIN_BODY_WORDS..=MAX_BODY_WORDS).contains(&word_count) {
            score -= 25.0;
            issues.push(QualityIssue::major(
                dim,
                format!(
                    "body has {} words (expected {}-{})",
                    word_count, MIN_BODY_WORDS, MAX_BODY_WORDS
                ),
            ));
        }

        let sentences: Vec<usize> = message
            .body
            .split(['.', '!', '?'])
            .map(|s| s.split_whitespace().count())
            .filter(|n| *n > 0)
            .collect();
        if !sentences.is_empty() {
            let average = sentences.iter().sum::<usize>() as f64 / sentences.len() as f64;
            if average > MAX_AVG_SENTENCE_WORDS {
                score -= 15.0;
                issues.push(QualityIssue::minor(dim, "sentences are too long"));
            }
        }

        if !message.body.contains('?') && !CTA_MARKERS.iter().any(|m| body.contains(m)) {
            score -= 20.0;
            issues.push(QualityIssue::major(dim, "no call to action"));
        }

        score
    }

    fn brand_compliance(
        message: &CampaignMessage,
        text: &str,
        issues: &mut Vec<QualityIssue>,
    ) -> f64 {
        let dim = QualityDimension::BrandCompliance;
        let mut score = 100.0;

        for phrase in BANNED_PHRASES {
            if contains_phrase(text, phrase) {
                score -= 35.0;
                issues.push(QualityIssue::critical(
                    dim,
                    format!("banned phrase '{}'", phrase),
                ));
            }
        }

        if PLACEHOLDERS.iter().any(|p| text.contains(p)) {
            score -= 35.0;
            issues.push(QualityIssue::critical(dim, "unfilled template placeholder"));
        }

        let letters: Vec<char> = message
            .subject
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect();
        if letters.len() > 3 && letters.iter().all(|c| c.is_uppercase()) {
            score -= 15.0;
            issues.push(QualityIssue::major(dim, "subject line in all caps"));
        }

        score
    }
}

/// Phrase match on word boundaries, so "guarantee" does not also fire
/// inside "guaranteed".
fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.match_indices(phrase).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

impl MessageScorer for RubricScorer {
    fn score(&self, message: &CampaignMessage, context: &ReviewContext) -> MessageReview {
        let body = normalize(&message.body);
        let text = normalize(&format!("{} {}", message.subject, message.body));
        let tokens = words(&text);
        let mut issues = Vec::new();

        let mut scores = DimensionScores::uniform(0.0);
        scores.set(
            QualityDimension::Personalization,
            Self::personalization(&text, context, &mut issues),
        );
        scores.set(
            QualityDimension::StrategicInsight,
            Self::strategic_insight(&text, &tokens, context, &mut issues),
        );
        scores.set(
            QualityDimension::ToneFit,
            Self::tone_fit(&message.body, &text, &tokens, context, &mut issues),
        );
        scores.set(
            QualityDimension::Clarity,
            Self::clarity(message, &body, &mut issues),
        );
        scores.set(
            QualityDimension::BrandCompliance,
            Self::brand_compliance(message, &text, &mut issues),
        );

        MessageReview { scores, issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::MessageType;
    use crate::quality::issue::IssueSeverity;

    fn context() -> ReviewContext {
        ReviewContext {
            first_name: Some("Ada".to_string()),
            company: Some("Acme Analytics".to_string()),
            services: vec!["data pipelines".to_string()],
            angle: MessagingAngle::AutomationRoi,
            tone: CampaignTone::Professional,
            attempt: 0,
        }
    }

    fn good_message() -> CampaignMessage {
        CampaignMessage::new(
            1,
            MessageType::Hook,
            "Automating the data pipelines at Acme Analytics",
            "Hi Ada,\n\nI noticed Acme Analytics has been expanding its data pipelines. \
             Most teams at that stage still run a few manual hand-offs between steps, \
             because nobody owns the glue work. Automating those steps typically saves \
             about 6 hours per week for each engineer involved.\n\n\
             Would you be open to a short call next week to compare notes?\n\nBest regards",
        )
    }

    #[test]
    fn test_good_message_passes() {
        let review = RubricScorer.score(&good_message(), &context());
        assert!(review.issues.is_empty(), "{:?}", review.issues);
        assert!((review.scores.weighted_score() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_generic_message_loses_personalization() {
        let message = CampaignMessage::new(
            1,
            MessageType::Hook,
            "Quick idea",
            "Hello,\n\nWe help companies improve. Let me know if that is interesting.",
        );
        let review = RubricScorer.score(&message, &context());
        assert_eq!(review.scores.personalization, 40.0);
        assert!(review.scores.weighted_score() < 80.0);
        assert!(
            review
                .issues
                .iter()
                .any(|i| i.dimension == QualityDimension::Clarity)
        );
    }

    #[test]
    fn test_banned_phrases_are_critical() {
        let mut message = good_message();
        message.body.push_str("\n\nAct now, results guaranteed. Click here: {link}");
        let review = RubricScorer.score(&message, &context());
        let critical = review
            .issues
            .iter()
            .filter(|i| {
                i.dimension == QualityDimension::BrandCompliance
                    && i.severity == IssueSeverity::Critical
            })
            .count();
        // act now, guaranteed, click here, placeholder
        assert_eq!(critical, 4);
        assert_eq!(review.scores.brand_compliance, 0.0);
    }

    #[test]
    fn test_banned_phrase_matches_whole_words() {
        assert!(contains_phrase("results guaranteed.", "guaranteed"));
        assert!(!contains_phrase("results guaranteed.", "guarantee"));
        assert!(contains_phrase("this is urgent", "urgent"));
    }

    #[test]
    fn test_all_caps_subject() {
        let mut message = good_message();
        message.subject = "SAVE HOURS EVERY WEEK".to_string();
        let review = RubricScorer.score(&message, &context());
        assert_eq!(review.scores.brand_compliance, 85.0);
    }

    #[test]
    fn test_technical_tone_requires_technical_detail() {
        let mut ctx = context();
        ctx.tone = CampaignTone::Technical;
        let message = CampaignMessage::new(
            1,
            MessageType::Hook,
            "Hello Ada",
            "Great to see Acme Analytics growing so quickly! Really great!",
        );
        let review = RubricScorer.score(&message, &ctx);
        // two exclamation marks and no technical vocabulary
        assert_eq!(review.scores.tone_fit, 70.0);
    }

    #[test]
    fn test_unknown_lead_data_is_not_penalized_fully() {
        let ctx = ReviewContext {
            first_name: None,
            company: None,
            services: vec![],
            ..context()
        };
        let review = RubricScorer.score(&good_message(), &ctx);
        assert_eq!(review.scores.personalization, 80.0);
    }
}
