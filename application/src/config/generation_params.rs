//! Generation parameters: LLM call control for the message generator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BRAND_VOICE: &str =
    "Helpful, specific and calm. We sound like a peer who did their homework, never like a salesperson.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    /// 0.0..=2.0
    pub temperature: f64,
    pub max_tokens: u32,
    /// Deadline for a single LLM call
    pub timeout: Duration,
    pub brand_voice: String,
    /// Substitute a deterministic message when a step fails (timeouts excluded)
    pub fallback_on_failure: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 600,
            timeout: Duration::from_secs(30),
            brand_voice: DEFAULT_BRAND_VOICE.to_string(),
            fallback_on_failure: true,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_brand_voice(mut self, voice: impl Into<String>) -> Self {
        self.brand_voice = voice.into();
        self
    }

    pub fn with_fallback_on_failure(mut self, enabled: bool) -> Self {
        self.fallback_on_failure = enabled;
        self
    }
}
