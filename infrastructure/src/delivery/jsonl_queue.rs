//! Append-only JSONL file with an execution-id index.

use campaign_application::ports::delivery_queue::{DeliveryError, EnqueueOutcome};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub(crate) struct JsonlQueue {
    path: PathBuf,
    record_type: &'static str,
    /// Execution ids already in the file. The lock also serializes appends.
    seen: Mutex<HashSet<String>>,
}

impl JsonlQueue {
    /// Open the queue, indexing the execution ids already written.
    ///
    /// A missing file is an empty queue. Lines that do not parse are
    /// skipped with a warning.
    pub(crate) async fn open(path: &Path, record_type: &'static str) -> Result<Self, DeliveryError> {
        let mut seen = HashSet::new();

        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                for (index, line) in content.lines().enumerate() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let id = serde_json::from_str::<serde_json::Value>(line)
                        .ok()
                        .and_then(|v| v.get("execution_id")?.as_str().map(str::to_string));
                    match id {
                        Some(id) => {
                            seen.insert(id);
                        }
                        None => warn!(
                            path = %path.display(),
                            line = index + 1,
                            "Skipping unreadable queue line"
                        ),
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(DeliveryError::Io(e.to_string())),
        }

        debug!(path = %path.display(), records = seen.len(), "Opened queue");
        Ok(Self {
            path: path.to_path_buf(),
            record_type,
            seen: Mutex::new(seen),
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) async fn len(&self) -> usize {
        self.seen.lock().await.len()
    }

    /// Append `record` unless `execution_id` is already queued.
    pub(crate) async fn append<T: Serialize + Sync>(
        &self,
        execution_id: &str,
        record: &T,
    ) -> Result<EnqueueOutcome, DeliveryError> {
        let mut seen = self.seen.lock().await;
        if seen.contains(execution_id) {
            debug!(execution_id, path = %self.path.display(), "Execution already queued");
            return Ok(EnqueueOutcome::AlreadyQueued);
        }

        let line = self.encode(record)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DeliveryError::Io(e.to_string()))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| DeliveryError::Io(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| DeliveryError::Io(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| DeliveryError::Io(e.to_string()))?;

        seen.insert(execution_id.to_string());
        Ok(EnqueueOutcome::Enqueued)
    }

    fn encode<T: Serialize>(&self, record: &T) -> Result<String, DeliveryError> {
        let mut value =
            serde_json::to_value(record).map_err(|e| DeliveryError::Serialization(e.to_string()))?;
        let serde_json::Value::Object(map) = &mut value else {
            return Err(DeliveryError::Serialization(
                "queue records must serialize to JSON objects".to_string(),
            ));
        };
        map.insert(
            "type".to_string(),
            serde_json::Value::String(self.record_type.to_string()),
        );
        map.insert(
            "enqueued_at".to_string(),
            serde_json::Value::String(
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ),
        );
        let mut line =
            serde_json::to_string(&value).map_err(|e| DeliveryError::Serialization(e.to_string()))?;
        line.push('\n');
        Ok(line)
    }
}
