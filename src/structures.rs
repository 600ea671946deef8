use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Suite Types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub conversation_id: String,
    pub question: String,
}

impl Question {
    pub fn new(conversation_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            question: question.into(),
        }
    }
}

/// Ground truth for a single question: the document that should back the
/// answer, or an explicit statement that nothing in the corpus supports it.
///
/// Encoded as `{ has_support = "D1" }` or `"no_support"` in suite files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoldSupport {
    HasSupport(String),
    NoSupport,
}

impl GoldSupport {
    pub fn doc(doc_id: impl Into<String>) -> Self {
        GoldSupport::HasSupport(doc_id.into())
    }
}

// =============================================================================
// Handler Wire Types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaRequest {
    pub conversation_id: String,
    pub question: String,
}

impl From<&Question> for QaRequest {
    fn from(q: &Question) -> Self {
        Self {
            conversation_id: q.conversation_id.clone(),
            question: q.question.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextEntry {
    pub doc_id: String,
    pub text: String,
}

impl ContextEntry {
    pub fn new(doc_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QaResponse {
    pub answer: String,
    pub contexts: Vec<ContextEntry>,
}

impl QaResponse {
    /// Validates a raw handler payload. Unknown fields are ignored; a missing
    /// or mistyped `answer`, `contexts`, `doc_id` or `text` is rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| EvalError::MalformedResponse(e.to_string()))
    }

    pub fn doc_ids(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.doc_id.as_str()).collect()
    }
}
