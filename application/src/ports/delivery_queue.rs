//! Delivery queue port
//!
//! Approved campaigns are handed to the delivery collaborator as
//! [`DeliveryRecord`]s. Enqueueing is idempotent per execution id: a second
//! enqueue of the same execution is reported, not duplicated.

use async_trait::async_trait;
use campaign_domain::DeliveryRecord;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Queue rejected record: {0}")]
    Rejected(String),
}

/// Result of a successful enqueue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Enqueued,
    /// A record with the same execution id was already queued
    AlreadyQueued,
}

impl EnqueueOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            EnqueueOutcome::Enqueued => "enqueued",
            EnqueueOutcome::AlreadyQueued => "already queued",
        }
    }
}

#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    async fn enqueue(&self, record: &DeliveryRecord) -> Result<EnqueueOutcome, DeliveryError>;
}
