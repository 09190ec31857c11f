//! Port for the per-execution trace record.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while the trace sink receives the full
//! execution record in a machine-readable format (JSONL). Write failures are
//! reported to the caller, which logs them and carries on.

use campaign_domain::TraceRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub trait TraceSink: Send + Sync {
    /// Write one trace record.
    fn write(&self, record: &TraceRecord) -> Result<(), TraceError>;
}

/// No-op implementation for tests and when tracing is disabled.
pub struct NoTraceSink;

impl TraceSink for NoTraceSink {
    fn write(&self, _record: &TraceRecord) -> Result<(), TraceError> {
        Ok(())
    }
}
