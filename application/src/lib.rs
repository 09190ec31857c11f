//! Application layer for campaign-brain
//!
//! This crate contains the campaign graph, its nodes, the port definitions
//! they talk through, and the run configuration. It depends only on the
//! domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BrainConfig, ConfigurationError, GenerationParams, MemoryParams};
pub use ports::{
    delivery_queue::{DeliveryError, DeliveryQueue, EnqueueOutcome},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    memory_store::{MemoryStore, MemoryStoreError, NoMemoryStore},
    progress::{CampaignProgressNotifier, NoCampaignProgress},
    review_queue::{NoReviewQueue, ReviewQueue},
    trace_sink::{NoTraceSink, TraceError, TraceSink},
};
pub use use_cases::run_campaign::{
    CampaignNode, FailurePolicy, NodeError, RunCampaignInput, RunCampaignUseCase,
};
