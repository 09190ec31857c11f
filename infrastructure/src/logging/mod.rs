//! Logging infrastructure: the per-execution trace log.
//!
//! Provides [`JsonlTraceSink`], a JSONL file writer that implements the
//! [`TraceSink`](campaign_application::TraceSink) port.

mod jsonl_trace;

pub use jsonl_trace::{JsonlTraceSink, TRACE_RECORD_TYPE};
