use crate::config::HALLUCINATION_MISSING_THRESHOLD;
use crate::nl::{token_set, tokenize};
use crate::structures::ContextEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HallucinationVerdict {
    pub hallucinated: bool,
    /// Answer tokens absent from every context, in answer order with duplicates
    pub missing: Vec<String>,
}

/// Flags an answer whose unsupported token count exceeds the threshold.
///
/// Grounding is plain token overlap against the concatenated context text:
/// no stemming, no synonyms.
pub fn detect_hallucination(answer: &str, contexts: &[ContextEntry]) -> HallucinationVerdict {
    let concat = contexts
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let ctx_tokens = token_set(&concat);

    let missing: Vec<String> = tokenize(answer)
        .into_iter()
        .filter(|t| !ctx_tokens.contains(t))
        .collect();

    HallucinationVerdict {
        hallucinated: missing.len() > HALLUCINATION_MISSING_THRESHOLD,
        missing,
    }
}
