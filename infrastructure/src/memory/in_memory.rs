use super::{MemoryEntry, key_matches};
use async_trait::async_trait;
use campaign_application::ports::memory_store::{MemoryStore, MemoryStoreError};
use campaign_domain::{MemoryKey, PriorCampaign};
use tokio::sync::RwLock;

/// Process-local history
#[derive(Default)]
pub struct InMemoryMemoryStore {
    entries: RwLock<Vec<MemoryEntry>>,
}

impl InMemoryMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryStore for InMemoryMemoryStore {
    async fn lookup(&self, key: &MemoryKey) -> Result<Vec<PriorCampaign>, MemoryStoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| key_matches(&e.key, key))
            .map(|e| e.campaign.clone())
            .collect())
    }

    async fn record(&self, key: &MemoryKey, campaign: PriorCampaign) -> Result<(), MemoryStoreError> {
        self.entries.write().await.push(MemoryEntry {
            key: key.clone(),
            campaign,
        });
        Ok(())
    }
}
