//! Memory store port
//!
//! Prior-campaign history keyed by lead and company. The store is an
//! external multi-writer resource; the brain only looks up by key and
//! appends one summary per approved campaign.

use async_trait::async_trait;
use campaign_domain::{MemoryKey, PriorCampaign};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemoryStoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt memory data: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Prior campaigns for `key`, oldest first; empty when none are known
    async fn lookup(&self, key: &MemoryKey) -> Result<Vec<PriorCampaign>, MemoryStoreError>;

    /// Append a campaign summary under `key`
    async fn record(&self, key: &MemoryKey, campaign: PriorCampaign)
    -> Result<(), MemoryStoreError>;
}

/// Store with no history, used when memory is disabled
pub struct NoMemoryStore;

#[async_trait]
impl MemoryStore for NoMemoryStore {
    async fn lookup(&self, _key: &MemoryKey) -> Result<Vec<PriorCampaign>, MemoryStoreError> {
        Ok(Vec::new())
    }

    async fn record(
        &self,
        _key: &MemoryKey,
        _campaign: PriorCampaign,
    ) -> Result<(), MemoryStoreError> {
        Ok(())
    }
}
