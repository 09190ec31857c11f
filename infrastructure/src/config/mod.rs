//! Configuration file loading for campaign-brain
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `CAMPAIGN_BRAIN_<SECTION>__<KEY>`
//! 2. Explicitly passed path
//! 3. Project root: `./campaign-brain.toml`
//! 4. Global: `$XDG_CONFIG_HOME/campaign-brain/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDeliveryConfig, FileExecutionConfig, FileGenerationConfig, FileMemoryConfig,
    FileQualityConfig, FileTraceConfig, MemoryBackend,
};
pub use loader::{ConfigLoader, LoadedConfig};
