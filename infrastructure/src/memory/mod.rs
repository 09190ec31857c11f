//! Memory store adapters.
//!
//! History is matched by lead id, or by company name when both sides carry
//! one, so a new contact at a company that was already approached still sees
//! the angles used before.

mod in_memory;
mod json_file;

pub use in_memory::InMemoryMemoryStore;
pub use json_file::JsonFileMemoryStore;

use crate::config::{FileMemoryConfig, MemoryBackend};
use campaign_application::ports::memory_store::{MemoryStore, NoMemoryStore};
use campaign_domain::MemoryKey;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// One stored campaign summary with the key it was recorded under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MemoryEntry {
    pub key: MemoryKey,
    pub campaign: campaign_domain::PriorCampaign,
}

/// Whether an entry recorded under `stored` is history for `query`.
pub(crate) fn key_matches(stored: &MemoryKey, query: &MemoryKey) -> bool {
    if stored.lead_id == query.lead_id {
        return true;
    }
    match (&stored.company, &query.company) {
        (Some(a), Some(b)) => {
            let (a, b) = (a.trim(), b.trim());
            !a.is_empty() && a.eq_ignore_ascii_case(b)
        }
        _ => false,
    }
}

/// Build the store selected by `[memory]`.
///
/// Unknown backends and a `json_file` backend without a path yield
/// [`NoMemoryStore`]; `FileConfig::validate` reports both.
pub fn build_memory_store(config: &FileMemoryConfig) -> Arc<dyn MemoryStore> {
    let (backend, _) = config.parse_backend();
    match (backend, &config.path) {
        (MemoryBackend::InMemory, _) => {
            info!("Using in-memory campaign history");
            Arc::new(InMemoryMemoryStore::new())
        }
        (MemoryBackend::JsonFile, Some(path)) => {
            info!(path = %path.display(), "Using JSON file campaign history");
            Arc::new(JsonFileMemoryStore::new(path))
        }
        _ => Arc::new(NoMemoryStore),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_domain::PriorCampaign;

    #[test]
    fn test_key_matches_lead_or_company() {
        let stored = MemoryKey::new("lead-1", Some("Acme".to_string()));
        assert!(key_matches(&stored, &MemoryKey::new("lead-1", None)));
        assert!(key_matches(
            &stored,
            &MemoryKey::new("lead-2", Some("ACME ".to_string()))
        ));
        assert!(!key_matches(
            &stored,
            &MemoryKey::new("lead-2", Some("Globex".to_string()))
        ));
        assert!(!key_matches(&MemoryKey::new("a", None), &MemoryKey::new("b", None)));
    }

    #[tokio::test]
    async fn test_build_memory_store_selects_backend() {
        let key = MemoryKey::new("lead-1", None);

        let store = build_memory_store(&FileMemoryConfig {
            backend: "memory".to_string(),
            ..Default::default()
        });
        store.record(&key, PriorCampaign::new("e1")).await.unwrap();
        assert_eq!(store.lookup(&key).await.unwrap().len(), 1);

        let store = build_memory_store(&FileMemoryConfig::default());
        store.record(&key, PriorCampaign::new("e1")).await.unwrap();
        assert!(store.lookup(&key).await.unwrap().is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let store = build_memory_store(&FileMemoryConfig {
            backend: "json_file".to_string(),
            path: Some(path.clone()),
            ..Default::default()
        });
        store.record(&key, PriorCampaign::new("e1")).await.unwrap();
        assert!(path.exists());
    }
}
