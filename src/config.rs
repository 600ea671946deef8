//! Scoring and harness configuration for the evaluator

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Scoring configuration
// An answer is hallucinated when strictly more tokens than this are unsupported.
pub const HALLUCINATION_MISSING_THRESHOLD: usize = 3;

// Latency thresholds (ms)
pub const DEFAULT_ACCEPTABLE_LATENCY_MS: u64 = 500;
pub const DEFAULT_MAXIMUM_LATENCY_MS: u64 = 2000;

// HTTP handler defaults
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_CHAT_ENDPOINT: &str = "/api/chat";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    #[default]
    Mock,  // In-memory mock RAG server
    Http   // Remote chat endpoint
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_endpoint")]
    pub chat_endpoint: String,
    #[serde(default)]
    pub auth_token: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chat_endpoint() -> String {
    DEFAULT_CHAT_ENDPOINT.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_endpoint: default_chat_endpoint(),
            auth_token: String::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LatencyConfig {
    #[serde(default = "default_acceptable_ms")]
    pub acceptable_ms: u64,
    #[serde(default = "default_maximum_ms")]
    pub maximum_ms: u64,
}

fn default_acceptable_ms() -> u64 {
    DEFAULT_ACCEPTABLE_LATENCY_MS
}

fn default_maximum_ms() -> u64 {
    DEFAULT_MAXIMUM_LATENCY_MS
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            acceptable_ms: DEFAULT_ACCEPTABLE_LATENCY_MS,
            maximum_ms: DEFAULT_MAXIMUM_LATENCY_MS,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HarnessConfig {
    #[serde(default)]
    pub handler: HandlerKind,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

/// Settings given on the command line; each one present replaces the
/// value from the config file.
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub handler: Option<HandlerKind>,
    pub base_url: Option<String>,
    pub report_dir: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| EvalError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(kind) = overrides.handler {
            self.handler = kind;
        }
        if let Some(url) = overrides.base_url {
            self.http.base_url = url;
        }
        if let Some(dir) = overrides.report_dir {
            self.report_dir = Some(dir);
        }
        self
    }
}
