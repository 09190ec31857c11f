//! Message quality: the five-dimension rubric, the quality gate, and the
//! retry guidance / escalation summaries derived from review results.

pub mod dimension;
pub mod escalation;
pub mod gate;
pub mod guidance;
pub mod issue;
pub mod rubric;

pub use dimension::{DimensionScores, QualityDimension};
pub use escalation::{EscalationDetails, MessageScoreLine};
pub use gate::{EscalationTrigger, GateDecision, GateInput, GateVerdict, QualityGate};
pub use guidance::synthesize_retry_guidance;
pub use issue::{IssueSeverity, QualityIssue};
pub use rubric::{MessageReview, MessageScorer, ReviewContext, RubricScorer};
