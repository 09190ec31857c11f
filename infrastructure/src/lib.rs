//! Infrastructure layer for campaign-brain
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration loading, the JSONL trace log, file-backed
//! delivery and manual-review queues, and memory stores.

pub mod config;
pub mod delivery;
pub mod logging;
pub mod memory;
pub mod runtime;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, LoadedConfig, MemoryBackend};
pub use delivery::{JsonlDeliveryQueue, JsonlReviewQueue};
pub use logging::JsonlTraceSink;
pub use memory::{InMemoryMemoryStore, JsonFileMemoryStore, build_memory_store};
pub use runtime::{RuntimeError, build_use_case};
