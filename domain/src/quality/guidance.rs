//! Retry guidance synthesis.
//!
//! Deterministic text built from the reviewer's issues alone: issues are
//! tallied per dimension, the three most frequent dimensions each get a
//! corrective instruction, and a closing line depends on which retry this is.

use super::dimension::QualityDimension;
use crate::campaign::CampaignMessage;

const TOP_DIMENSIONS: usize = 3;

/// Build the guidance for retry number `retry_number` (1-based) out of
/// `max_retries`.
pub fn synthesize_retry_guidance(
    messages: &[CampaignMessage],
    retry_number: u32,
    max_retries: u32,
) -> String {
    let mut lines = vec![format!(
        "Retry {} of {}: the previous draft was rejected by quality review.",
        retry_number, max_retries
    )];

    let ranked = rank_dimensions(messages);
    if ranked.is_empty() {
        lines.push(
            "No specific issues were recorded; raise quality across every dimension.".to_string(),
        );
    } else {
        for (rank, (dimension, count, example)) in ranked.iter().take(TOP_DIMENSIONS).enumerate() {
            lines.push(format!(
                "{}. {} ({} issue(s), e.g. \"{}\"): {}",
                rank + 1,
                dimension,
                count,
                example,
                dimension.corrective_instruction()
            ));
        }
    }

    lines.push(retry_instruction(retry_number, max_retries).to_string());
    lines.join("\n")
}

fn retry_instruction(retry_number: u32, max_retries: u32) -> &'static str {
    if retry_number >= max_retries {
        "Final retry: every dimension must pass. Resolve all issues listed above; \
         anything left unresolved goes to manual review."
    } else if retry_number <= 1 {
        "First retry: fix the top issues above and keep everything that already works."
    } else {
        "The previous retry did not clear the threshold: address every issue listed above, \
         not only the first."
    }
}

/// `(dimension, issue count, first issue detail)` ordered by count desc,
/// ties in dimension order.
fn rank_dimensions(messages: &[CampaignMessage]) -> Vec<(QualityDimension, usize, String)> {
    let mut ranked: Vec<(QualityDimension, usize, String)> = QualityDimension::ALL
        .iter()
        .filter_map(|dimension| {
            let mut issues = messages
                .iter()
                .flat_map(|m| m.quality_issues.iter())
                .filter(|i| i.dimension == *dimension);
            let first = issues.next()?;
            Some((*dimension, 1 + issues.count(), first.detail.clone()))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
