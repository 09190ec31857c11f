//! The immutable configuration of the campaign brain.
//!
//! Built once (usually by the infrastructure loader), validated, then shared
//! read-only by every run.

use super::generation_params::GenerationParams;
use campaign_domain::QualityGate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Upper bound on `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Invalid configuration; fatal at startup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("quality.pass_threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f64),

    #[error("quality.max_retries must be at most 10, got {0}")]
    TooManyRetries(u32),

    #[error("quality.escalation_floor ({floor}) must be within 0 and below pass_threshold ({threshold})")]
    InvalidEscalationFloor { floor: f64, threshold: f64 },

    #[error("generation.model must not be empty")]
    EmptyModel,

    #[error("generation.temperature must be within 0..=2, got {0}")]
    InvalidTemperature(f64),

    #[error("generation.max_tokens must be greater than 0")]
    InvalidMaxTokens,

    #[error("{0} must be greater than 0")]
    InvalidTimeout(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryParams {
    /// Deadline for one memory lookup
    pub timeout: Duration,
}

impl Default for MemoryParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainConfig {
    pub quality: QualityGate,
    pub generation: GenerationParams,
    pub memory: MemoryParams,
    /// Deadline for one delivery enqueue or manual-review submit
    pub delivery_timeout: Duration,
    /// Outer deadline for one whole execution
    pub execution_timeout: Duration,
    pub trace_enabled: bool,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            quality: QualityGate::default(),
            generation: GenerationParams::default(),
            memory: MemoryParams::default(),
            delivery_timeout: Duration::from_secs(10),
            execution_timeout: Duration::from_secs(300),
            trace_enabled: true,
        }
    }
}

impl BrainConfig {
    // ==================== Builder Methods ====================

    pub fn with_quality(mut self, quality: QualityGate) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_memory_timeout(mut self, timeout: Duration) -> Self {
        self.memory.timeout = timeout;
        self
    }

    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = timeout;
        self
    }

    pub fn with_trace_enabled(mut self, enabled: bool) -> Self {
        self.trace_enabled = enabled;
        self
    }

    /// Node executions allowed in one run: the fixed nodes plus one
    /// generate/review/gate cycle per attempt.
    pub fn step_budget(&self) -> usize {
        7 + 3 * (self.quality.max_retries as usize + 1)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let q = &self.quality;
        if !(0.0..=100.0).contains(&q.pass_threshold) {
            return Err(ConfigurationError::InvalidThreshold(q.pass_threshold));
        }
        if q.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigurationError::TooManyRetries(q.max_retries));
        }
        if !(q.escalation_floor >= 0.0 && q.escalation_floor < q.pass_threshold) {
            return Err(ConfigurationError::InvalidEscalationFloor {
                floor: q.escalation_floor,
                threshold: q.pass_threshold,
            });
        }

        let g = &self.generation;
        if g.model.trim().is_empty() {
            return Err(ConfigurationError::EmptyModel);
        }
        if !(0.0..=2.0).contains(&g.temperature) {
            return Err(ConfigurationError::InvalidTemperature(g.temperature));
        }
        if g.max_tokens == 0 {
            return Err(ConfigurationError::InvalidMaxTokens);
        }
        if g.timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout("generation.timeout_secs"));
        }
        if self.memory.timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout("memory.timeout_secs"));
        }
        if self.delivery_timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout("delivery.timeout_secs"));
        }
        if self.execution_timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout("execution.timeout_secs"));
        }
        Ok(())
    }
}
