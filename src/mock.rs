//! In-memory stand-in for a RAG QA service.
//!
//! Retrieval is keyword overlap over a small fixed corpus and the "generated"
//! answer is the text of the best document, which is enough to drive the
//! evaluator end to end without a live backend.

use crate::error::Result;
use crate::handler::QaHandler;
use crate::nl::{content_tokens, token_set};
use crate::structures::{ContextEntry, QaRequest, QaResponse};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

pub const FALLBACK_ANSWER: &str = "I don't have information about that.";

const DEFAULT_TOP_K: usize = 2;
const DEFAULT_MIN_OVERLAP: usize = 1;

pub struct MockRagServer {
    documents: Vec<ContextEntry>,
    top_k: usize,
    min_overlap: usize,
}

impl Default for MockRagServer {
    fn default() -> Self {
        Self::new(highlevel_corpus())
    }
}

pub fn highlevel_corpus() -> Vec<ContextEntry> {
    vec![
        ContextEntry::new("D1", "HighLevel is a sales and marketing platform built for agencies"),
        ContextEntry::new("D2", "HighLevel includes CRM pipelines, funnels, email and SMS campaigns"),
        ContextEntry::new("D3", "Marketing agencies, consultants and small businesses use HighLevel to run client accounts"),
        ContextEntry::new("D4", "Agencies can white-label the platform and resell it to their own clients"),
    ]
}

impl MockRagServer {
    pub fn new(documents: Vec<ContextEntry>) -> Self {
        Self {
            documents,
            top_k: DEFAULT_TOP_K,
            min_overlap: DEFAULT_MIN_OVERLAP,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_min_overlap(mut self, min_overlap: usize) -> Self {
        self.min_overlap = min_overlap;
        self
    }

    /// Documents sharing at least `min_overlap` content tokens with the
    /// question, best first. Ties keep corpus order.
    pub fn retrieve(&self, question: &str) -> Vec<ContextEntry> {
        let query: HashSet<String> = content_tokens(question).into_iter().collect();

        let mut scored: Vec<(usize, &ContextEntry)> = self
            .documents
            .iter()
            .map(|doc| {
                let doc_tokens = token_set(&doc.text);
                (query.intersection(&doc_tokens).count(), doc)
            })
            .filter(|(overlap, _)| *overlap >= self.min_overlap.max(1))
            .collect();

        // Stable sort keeps corpus order among equal overlaps
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, doc)| doc.clone())
            .collect()
    }

    pub fn answer(&self, request: &QaRequest) -> QaResponse {
        let contexts = self.retrieve(&request.question);
        let answer = contexts
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        debug!(
            "mock[{}] retrieved {:?}",
            request.conversation_id,
            contexts.iter().map(|c| c.doc_id.as_str()).collect::<Vec<_>>()
        );

        QaResponse { answer, contexts }
    }
}

impl QaHandler for MockRagServer {
    fn handle(&self, request: &QaRequest) -> Result<Value> {
        Ok(serde_json::to_value(self.answer(request))?)
    }
}
