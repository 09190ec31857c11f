use super::super::types::{CampaignNode, FailurePolicy, NodeError};
use crate::config::GenerationParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::use_cases::shared::{CallOutcome, call_with_timeout, cancellable, check_cancelled};
use async_trait::async_trait;
use campaign_domain::{
    CampaignMessage, CampaignPromptTemplate, CampaignState, DomainError, GenerationContext,
    PipelineNode, fallback_message, parse_generated_message,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Writes one message per planned step, one LLM call at a time.
///
/// A failed or malformed step is replaced by a deterministic fallback when
/// `fallback_on_failure` is set. A timeout always fails the node.
pub struct MessageGeneratorNode {
    gateway: Arc<dyn LlmGateway>,
    params: GenerationParams,
    cancellation_token: Option<CancellationToken>,
}

impl MessageGeneratorNode {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        params: GenerationParams,
        cancellation_token: Option<CancellationToken>,
    ) -> Self {
        Self {
            gateway,
            params,
            cancellation_token,
        }
    }

    fn request(&self, system_prompt: &str, context: &GenerationContext<'_>) -> CompletionRequest {
        CompletionRequest {
            model: self.params.model.clone(),
            system_prompt: system_prompt.to_string(),
            prompt: CampaignPromptTemplate::message_generation(context),
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        }
    }
}

#[async_trait]
impl CampaignNode for MessageGeneratorNode {
    fn id(&self) -> PipelineNode {
        PipelineNode::MessageGenerator
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Terminate
    }

    async fn execute(&self, state: &mut CampaignState) -> Result<(), NodeError> {
        if state.campaign_sequence.is_empty() {
            return Err(DomainError::EmptyPlan.into());
        }

        let sequence = state.campaign_sequence.clone();
        let system_prompt = CampaignPromptTemplate::system(&self.params.brand_voice);
        let attempt = state.retry_count() + 1;
        let mut messages = Vec::with_capacity(sequence.len());
        let mut fallbacks = 0;

        info!(steps = sequence.len(), attempt, "Generating campaign messages");

        for (index, message_type) in sequence.iter().enumerate() {
            check_cancelled(&self.cancellation_token)?;

            let number = index as u32 + 1;
            let context = GenerationContext::from_state(state, *message_type, number);
            let request = self.request(&system_prompt, &context);

            let call = call_with_timeout(self.params.timeout, self.gateway.complete(&request));
            let failure = match cancellable(&self.cancellation_token, call).await? {
                CallOutcome::Success(text) => match parse_generated_message(&text) {
                    Ok(generated) => {
                        debug!(number, message_type = %message_type, "Message generated");
                        messages.push(CampaignMessage::new(
                            number,
                            *message_type,
                            generated.subject,
                            generated.body,
                        ));
                        continue;
                    }
                    Err(e) => NodeError::from(e),
                },
                CallOutcome::Timeout(after) => {
                    return Err(NodeError::Timeout {
                        operation: "llm generation",
                        after,
                    });
                }
                CallOutcome::Failed(e) => NodeError::from(e),
            };

            if !self.params.fallback_on_failure {
                return Err(failure);
            }

            let fallback = fallback_message(&context);
            warn!(number, message_type = %message_type, error = %failure, "Generation failed, using fallback message");
            state.record_error(
                PipelineNode::MessageGenerator,
                format!(
                    "message {} ({}): {}; fallback used",
                    number, message_type, failure
                ),
            );
            messages.push(fallback);
            fallbacks += 1;
        }

        let count = messages.len();
        state.replace_messages(messages);

        let mut summary = format!("generated {} message(s) on attempt {}", count, attempt);
        if fallbacks > 0 {
            summary.push_str(&format!(" ({} fallback)", fallbacks));
        }
        state.record_decision(PipelineNode::MessageGenerator, summary);
        Ok(())
    }
}
