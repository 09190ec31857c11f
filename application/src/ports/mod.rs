//! Ports (interfaces) for the campaign brain
//!
//! The graph reaches everything outside the process through these traits.
//! Adapters live in the infrastructure layer; tests use hand-written doubles.

pub mod delivery_queue;
pub mod llm_gateway;
pub mod memory_store;
pub mod progress;
pub mod review_queue;
pub mod trace_sink;
