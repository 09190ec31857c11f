//! File-backed delivery and manual-review queues.
//!
//! Both queues append one JSON line per execution and refuse a second line
//! for the same `execution_id`, which makes re-invoking a run safe.

mod jsonl_queue;

use async_trait::async_trait;
use campaign_application::ports::delivery_queue::{DeliveryError, DeliveryQueue, EnqueueOutcome};
use campaign_application::ports::review_queue::ReviewQueue;
use campaign_domain::{DeliveryRecord, ManualReviewRecord};
use jsonl_queue::JsonlQueue;
use std::path::Path;

pub const DELIVERY_RECORD_TYPE: &str = "campaign_delivery";
pub const REVIEW_RECORD_TYPE: &str = "manual_review";

/// Delivery queue stored as a JSONL file
pub struct JsonlDeliveryQueue {
    queue: JsonlQueue,
}

impl JsonlDeliveryQueue {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DeliveryError> {
        Ok(Self {
            queue: JsonlQueue::open(path.as_ref(), DELIVERY_RECORD_TYPE).await?,
        })
    }

    pub fn path(&self) -> &Path {
        self.queue.path()
    }

    /// Number of executions queued so far
    pub async fn len(&self) -> usize {
        self.queue.len().await
    }
}

#[async_trait]
impl DeliveryQueue for JsonlDeliveryQueue {
    async fn enqueue(&self, record: &DeliveryRecord) -> Result<EnqueueOutcome, DeliveryError> {
        self.queue.append(&record.execution_id, record).await
    }
}

/// Manual-review queue stored as a JSONL file
pub struct JsonlReviewQueue {
    queue: JsonlQueue,
}

impl JsonlReviewQueue {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DeliveryError> {
        Ok(Self {
            queue: JsonlQueue::open(path.as_ref(), REVIEW_RECORD_TYPE).await?,
        })
    }

    pub fn path(&self) -> &Path {
        self.queue.path()
    }

    pub async fn len(&self) -> usize {
        self.queue.len().await
    }
}

#[async_trait]
impl ReviewQueue for JsonlReviewQueue {
    async fn submit(&self, record: &ManualReviewRecord) -> Result<EnqueueOutcome, DeliveryError> {
        self.queue.append(&record.execution_id, record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_domain::{
        CampaignMessage, CampaignState, CampaignStatus, CompanyRecord, ExecutionId, LeadRecord,
        MessageType,
    };

    fn approved_state(id: &str) -> CampaignState {
        let mut state = CampaignState::with_execution_id(
            ExecutionId::new(id),
            LeadRecord::new("lead-1").with_email("ada@acme.test"),
            CompanyRecord::new(),
            None,
        );
        let mut hook = CampaignMessage::new(1, MessageType::Hook, "Subject", "Body");
        hook.set_score(90.0, Vec::new());
        state.replace_messages(vec![hook]);
        state.recompute_overall_score().unwrap();
        state.set_status(CampaignStatus::Approved, "score 90.0 meets threshold 80.0");
        state
    }

    #[tokio::test]
    async fn test_delivery_queue_is_idempotent_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delivery.jsonl");
        let record = DeliveryRecord::from_state(&approved_state("exec-1")).unwrap();

        let queue = JsonlDeliveryQueue::open(&path).await.unwrap();
        assert_eq!(queue.enqueue(&record).await, Ok(EnqueueOutcome::Enqueued));
        assert_eq!(
            queue.enqueue(&record).await,
            Ok(EnqueueOutcome::AlreadyQueued)
        );
        drop(queue);

        let reopened = JsonlDeliveryQueue::open(&path).await.unwrap();
        assert_eq!(reopened.len().await, 1);
        assert_eq!(
            reopened.enqueue(&record).await,
            Ok(EnqueueOutcome::AlreadyQueued)
        );

        let other = DeliveryRecord::from_state(&approved_state("exec-2")).unwrap();
        assert_eq!(reopened.enqueue(&other).await, Ok(EnqueueOutcome::Enqueued));

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], DELIVERY_RECORD_TYPE);
        assert_eq!(first["execution_id"], "exec-1");
        assert_eq!(first["messages"][0]["send_offset_days"], 0);
        assert!(first.get("enqueued_at").is_some());
    }

    #[tokio::test]
    async fn test_review_queue_round_trips_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.jsonl");

        let mut state = approved_state("exec-9");
        state.quality_feedback.escalation_details = Some("Escalated to manual review".into());
        state.set_status(CampaignStatus::ManualReview, "retry budget exhausted");
        let record = ManualReviewRecord::from_state(&state).unwrap();

        let queue = JsonlReviewQueue::open(&path).await.unwrap();
        assert_eq!(queue.submit(&record).await, Ok(EnqueueOutcome::Enqueued));
        assert_eq!(queue.submit(&record).await, Ok(EnqueueOutcome::AlreadyQueued));

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: ManualReviewRecord = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed.execution_id, "exec-9");
        assert_eq!(parsed.state.final_status(), CampaignStatus::ManualReview);
    }
}
