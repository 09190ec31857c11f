//! Wiring: turn a loaded configuration into a ready-to-run use case.

use crate::config::LoadedConfig;
use crate::delivery::{JsonlDeliveryQueue, JsonlReviewQueue};
use crate::logging::JsonlTraceSink;
use crate::memory::build_memory_store;
use campaign_application::ports::delivery_queue::DeliveryError;
use campaign_application::ports::trace_sink::TraceError;
use campaign_application::{ConfigurationError, LlmGateway, RunCampaignUseCase};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Failed to open queue: {0}")]
    Queue(#[from] DeliveryError),

    #[error("Failed to open trace log: {0}")]
    Trace(#[from] TraceError),
}

/// Build a [`RunCampaignUseCase`] with the file-backed adapters named in
/// `loaded`. The LLM gateway is supplied by the caller.
pub async fn build_use_case(
    loaded: &LoadedConfig,
    gateway: Arc<dyn LlmGateway>,
) -> Result<RunCampaignUseCase, RuntimeError> {
    let file = &loaded.file;

    let delivery = JsonlDeliveryQueue::open(file.delivery.resolved_path()).await?;
    let review = JsonlReviewQueue::open(file.delivery.resolved_review_path()).await?;
    let memory = build_memory_store(&file.memory);

    let mut use_case = RunCampaignUseCase::new(loaded.brain.clone(), gateway, Arc::new(delivery))?
        .with_review_queue(Arc::new(review))
        .with_memory_store(memory);

    if file.trace.enabled {
        let sink = JsonlTraceSink::open(file.trace.resolved_path())?;
        info!(path = %sink.path().display(), "Writing campaign traces");
        use_case = use_case.with_trace_sink(Arc::new(sink));
    }

    Ok(use_case)
}
