//! Application-level configuration.
//!
//! - [`BrainConfig`]: everything one campaign run reads, fixed at startup
//! - [`GenerationParams`]: LLM call parameters for the message generator
//! - [`MemoryParams`]: memory lookup limits

pub mod brain_config;
pub mod generation_params;

pub use brain_config::{BrainConfig, ConfigurationError, MAX_RETRIES_LIMIT, MemoryParams};
pub use generation_params::{DEFAULT_BRAND_VOICE, GenerationParams};
