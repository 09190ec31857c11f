//! Rubric dimensions and their weights.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityDimension {
    Personalization,
    StrategicInsight,
    ToneFit,
    Clarity,
    BrandCompliance,
}

impl QualityDimension {
    pub const ALL: [QualityDimension; 5] = [
        QualityDimension::Personalization,
        QualityDimension::StrategicInsight,
        QualityDimension::ToneFit,
        QualityDimension::Clarity,
        QualityDimension::BrandCompliance,
    ];

    /// Share of the message score in percent; the weights sum to 100.
    pub fn weight_percent(&self) -> u32 {
        match self {
            QualityDimension::Personalization => 25,
            QualityDimension::StrategicInsight => 25,
            QualityDimension::ToneFit => 15,
            QualityDimension::Clarity => 15,
            QualityDimension::BrandCompliance => 20,
        }
    }

    pub fn weight(&self) -> f64 {
        f64::from(self.weight_percent()) / 100.0
    }

    pub fn as_str(&self) -> &str {
        match self {
            QualityDimension::Personalization => "personalization",
            QualityDimension::StrategicInsight => "strategic_insight",
            QualityDimension::ToneFit => "tone_fit",
            QualityDimension::Clarity => "clarity",
            QualityDimension::BrandCompliance => "brand_compliance",
        }
    }

    /// What the generator should do differently when this dimension fails.
    pub fn corrective_instruction(&self) -> &str {
        match self {
            QualityDimension::Personalization => {
                "Address the lead by first name and reference their company and a specific service."
            }
            QualityDimension::StrategicInsight => {
                "Tie the message to the chosen angle with a concrete, quantified outcome and explain why it matters."
            }
            QualityDimension::ToneFit => {
                "Match the campaign tone: drop discouraged phrases and keep punctuation restrained."
            }
            QualityDimension::Clarity => {
                "Keep the subject short, the body between 40 and 180 words, sentences short, and end with one clear call to action."
            }
            QualityDimension::BrandCompliance => {
                "Remove banned sales phrases and unfilled placeholders; never write the subject in all caps."
            }
        }
    }
}

impl std::fmt::Display for QualityDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clamp a score into 0..=100. NaN and infinities count as 0.
pub fn bounded_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Per-dimension scores for one message, each 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub personalization: f64,
    pub strategic_insight: f64,
    pub tone_fit: f64,
    pub clarity: f64,
    pub brand_compliance: f64,
}

impl DimensionScores {
    pub fn uniform(score: f64) -> Self {
        Self {
            personalization: score,
            strategic_insight: score,
            tone_fit: score,
            clarity: score,
            brand_compliance: score,
        }
    }

    pub fn get(&self, dimension: QualityDimension) -> f64 {
        match dimension {
            QualityDimension::Personalization => self.personalization,
            QualityDimension::StrategicInsight => self.strategic_insight,
            QualityDimension::ToneFit => self.tone_fit,
            QualityDimension::Clarity => self.clarity,
            QualityDimension::BrandCompliance => self.brand_compliance,
        }
    }

    pub fn set(&mut self, dimension: QualityDimension, score: f64) {
        let score = bounded_score(score);
        match dimension {
            QualityDimension::Personalization => self.personalization = score,
            QualityDimension::StrategicInsight => self.strategic_insight = score,
            QualityDimension::ToneFit => self.tone_fit = score,
            QualityDimension::Clarity => self.clarity = score,
            QualityDimension::BrandCompliance => self.brand_compliance = score,
        }
    }

    /// Weighted message score, clamped to 0..=100.
    ///
    /// Sums in percent before dividing so whole-number inputs give exact
    /// results (a uniform 80 is exactly 80, not 79.99...).
    pub fn weighted_score(&self) -> f64 {
        let total: f64 = QualityDimension::ALL
            .iter()
            .map(|d| bounded_score(self.get(*d)) * f64::from(d.weight_percent()))
            .sum();
        (total / 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_hundred() {
        let total: u32 = QualityDimension::ALL.iter().map(|d| d.weight_percent()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_weighted_score() {
        let mut scores = DimensionScores::uniform(100.0);
        scores.set(QualityDimension::BrandCompliance, 0.0);
        assert_eq!(scores.weighted_score(), 80.0);
        assert_eq!(DimensionScores::uniform(85.0).weighted_score(), 85.0);

        scores.set(QualityDimension::Clarity, 250.0);
        assert_eq!(scores.clarity, 100.0);
    }

    #[test]
    fn test_non_finite_scores_count_as_zero() {
        let mut scores = DimensionScores::uniform(100.0);
        scores.set(QualityDimension::Personalization, f64::NAN);
        assert_eq!(scores.personalization, 0.0);
        assert_eq!(scores.weighted_score(), 75.0);

        let scores = DimensionScores::uniform(f64::NAN);
        assert_eq!(scores.weighted_score(), 0.0);
        let scores = DimensionScores::uniform(f64::INFINITY);
        assert_eq!(scores.weighted_score(), 0.0);
    }
}
