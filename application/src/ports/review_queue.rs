//! Manual review queue port
//!
//! Escalated campaigns go to a human-facing queue. Same idempotency contract
//! as the delivery queue.

use super::delivery_queue::{DeliveryError, EnqueueOutcome};
use async_trait::async_trait;
use campaign_domain::ManualReviewRecord;

#[async_trait]
pub trait ReviewQueue: Send + Sync {
    async fn submit(&self, record: &ManualReviewRecord) -> Result<EnqueueOutcome, DeliveryError>;
}

/// Discards submissions, for callers that read `escalation_details` directly
pub struct NoReviewQueue;

#[async_trait]
impl ReviewQueue for NoReviewQueue {
    async fn submit(&self, _record: &ManualReviewRecord) -> Result<EnqueueOutcome, DeliveryError> {
        Ok(EnqueueOutcome::Enqueued)
    }
}
