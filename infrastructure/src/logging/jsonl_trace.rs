//! JSONL file writer for campaign trace records.
//!
//! Each [`TraceRecord`] is serialized as a single JSON line with a `type`
//! field and a `written_at` timestamp, appended through a buffered writer.

use campaign_application::ports::trace_sink::{TraceError, TraceSink};
use campaign_domain::TraceRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

pub const TRACE_RECORD_TYPE: &str = "campaign_trace";

/// Append-only trace log, one JSON object per execution.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and
/// on `Drop`.
pub struct JsonlTraceSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTraceSink {
    /// Open (or create) the log at `path`, appending to existing content.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path = %path.display(), "Opened trace log");

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceSink for JsonlTraceSink {
    fn write(&self, record: &TraceRecord) -> Result<(), TraceError> {
        let written_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut value = serde_json::to_value(record)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(TRACE_RECORD_TYPE.to_string()),
            );
            map.insert(
                "written_at".to_string(),
                serde_json::Value::String(written_at),
            );
        }
        let line = serde_json::to_string(&value)?;

        let mut writer = self.writer.lock().map_err(|_| {
            std::io::Error::other(format!("trace log {} is poisoned", self.path.display()))
        })?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlTraceSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock()
            && let Err(e) = writer.flush()
        {
            warn!(path = %self.path.display(), error = %e, "Failed to flush trace log");
        }
    }
}
