//! The QA handler seam and its HTTP implementation.

use crate::config::HttpConfig;
use crate::error::{EvalError, Result};
use crate::structures::QaRequest;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

/// A question-answering system under evaluation.
///
/// Returns the raw response payload; the evaluator validates its shape.
pub trait QaHandler {
    fn handle(&self, request: &QaRequest) -> Result<Value>;
}

impl<F> QaHandler for F
where
    F: Fn(&QaRequest) -> Result<Value>,
{
    fn handle(&self, request: &QaRequest) -> Result<Value> {
        self(request)
    }
}

/// Posts each request as JSON to a remote chat endpoint.
pub struct HttpQaHandler {
    client: Client,
    url: String,
    auth_token: String,
}

impl HttpQaHandler {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| EvalError::Handler(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: join_url(&config.base_url, &config.chat_endpoint),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QaHandler for HttpQaHandler {
    fn handle(&self, request: &QaRequest) -> Result<Value> {
        let mut builder = self.client.post(&self.url).json(request);
        if !self.auth_token.is_empty() {
            builder = builder.bearer_auth(&self.auth_token);
        }

        let response = builder
            .send()
            .map_err(|e| EvalError::Handler(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        debug!("POST {} -> {}", self.url, status);
        if !status.is_success() {
            return Err(EvalError::Handler(format!(
                "{} returned HTTP {}",
                self.url, status
            )));
        }

        response
            .json::<Value>()
            .map_err(|e| EvalError::MalformedResponse(format!("body is not JSON: {}", e)))
    }
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://localhost:8080", "/api/chat"), "http://localhost:8080/api/chat");
        assert_eq!(join_url("http://localhost:8080/", "api/chat"), "http://localhost:8080/api/chat");
        assert_eq!(join_url("http://h/", "/qa"), "http://h/qa");
    }

    #[test]
    fn test_closure_handler() {
        let handler = |req: &QaRequest| -> Result<Value> {
            Ok(json!({ "answer": req.question.clone(), "contexts": [] }))
        };
        let request = QaRequest {
            conversation_id: "c-1".to_string(),
            question: "echo".to_string(),
        };
        assert_eq!(handler.handle(&request).unwrap()["answer"], "echo");
    }
}
