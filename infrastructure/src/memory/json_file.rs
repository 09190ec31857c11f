//! History persisted as a single JSON array.
//!
//! Each `record` rewrites the file through a temporary sibling and a rename,
//! so readers never observe a half-written file.

use super::{MemoryEntry, key_matches};
use async_trait::async_trait;
use campaign_application::ports::memory_store::{MemoryStore, MemoryStoreError};
use campaign_domain::{MemoryKey, PriorCampaign};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

pub struct JsonFileMemoryStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileMemoryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<MemoryEntry>, MemoryStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MemoryStoreError::Io(e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            MemoryStoreError::Corrupt(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn write_entries(&self, entries: &[MemoryEntry]) -> Result<(), MemoryStoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| MemoryStoreError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MemoryStoreError::Io(e.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| MemoryStoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| MemoryStoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl MemoryStore for JsonFileMemoryStore {
    async fn lookup(&self, key: &MemoryKey) -> Result<Vec<PriorCampaign>, MemoryStoreError> {
        let entries = self.read_entries().await?;
        let history: Vec<_> = entries
            .into_iter()
            .filter(|e| key_matches(&e.key, key))
            .map(|e| e.campaign)
            .collect();
        debug!(key = %key, prior = history.len(), "Read campaign history");
        Ok(history)
    }

    async fn record(&self, key: &MemoryKey, campaign: PriorCampaign) -> Result<(), MemoryStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.push(MemoryEntry {
            key: key.clone(),
            campaign,
        });
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_domain::{MessagingAngle, ResponseSignal};

    #[tokio::test]
    async fn test_record_then_lookup_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("memory.json");
        let key = MemoryKey::new("lead-1", Some("Acme".to_string()));

        let store = JsonFileMemoryStore::new(&path);
        assert!(store.lookup(&key).await.unwrap().is_empty());
        store
            .record(
                &key,
                PriorCampaign::new("e1")
                    .with_angle(MessagingAngle::TechnicalInnovation)
                    .with_response(ResponseSignal::NoResponse),
            )
            .await
            .unwrap();

        let reopened = JsonFileMemoryStore::new(&path);
        let history = reopened.lookup(&key).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].angle, Some(MessagingAngle::TechnicalInnovation));
        assert_eq!(history[0].response, Some(ResponseSignal::NoResponse));
        assert!(
            reopened
                .lookup(&MemoryKey::new("lead-2", None))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = JsonFileMemoryStore::new(&path);
        let err = store
            .lookup(&MemoryKey::new("lead-1", None))
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryStoreError::Corrupt(_)));
    }
}
