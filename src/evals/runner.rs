use crate::config::LatencyConfig;
use crate::error::Result;
use crate::evals::context_accuracy::score_context_accuracy;
use crate::evals::hallucination::detect_hallucination;
use crate::handler::QaHandler;
use crate::metrics::{LatencyResult, MetricsAccumulator};
use crate::structures::{QaRequest, QaResponse};
use crate::suite::EvalSuite;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionOutcome {
    pub index: usize,
    pub conversation_id: String,
    pub question: String,
    pub doc_ids: Vec<String>,
    pub answer: String,
    pub hallucinated: bool,
    pub missing_tokens: Vec<String>,
    pub context_accurate: bool,
    pub latency: LatencyResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalSummary {
    pub suite_name: String,
    pub total: usize,
    pub hallucinated: usize,
    pub context_correct: usize,
    pub hallucination_pct: f64,
    pub context_accuracy_pct: f64,
    pub avg_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub outcomes: Vec<QuestionOutcome>,
}

pub struct Evaluator {
    suite: EvalSuite,
    latency: LatencyConfig,
}

impl Evaluator {
    pub fn new(suite: EvalSuite) -> Self {
        Self {
            suite,
            latency: LatencyConfig::default(),
        }
    }

    pub fn with_latency_thresholds(mut self, latency: LatencyConfig) -> Self {
        self.latency = latency;
        self
    }

    /// Runs every question through `handler` in order, writing the report to `out`.
    ///
    /// The first failure (handler error, malformed response, missing gold
    /// label) ends the run before the metrics block is written.
    pub fn run<W: Write>(&self, handler: &dyn QaHandler, out: &mut W) -> Result<EvalSummary> {
        info!(
            "Evaluating {} questions from suite '{}'",
            self.suite.len(),
            self.suite.name
        );

        let mut metrics = MetricsAccumulator::new();
        let mut outcomes = Vec::with_capacity(self.suite.len());

        writeln!(out, "Running evaluator...\n")?;

        for (idx, q) in self.suite.questions.iter().enumerate() {
            let request = QaRequest::from(q);

            let started = Instant::now();
            let raw = handler.handle(&request)?;
            let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

            let resp = QaResponse::from_value(raw)?;

            let verdict = detect_hallucination(&resp.answer, &resp.contexts);
            let ctx_score = score_context_accuracy(&resp.contexts, self.suite.gold_for(idx)?);

            metrics.record(verdict.hallucinated, ctx_score);
            metrics.record_latency(latency_ms);

            let latency = LatencyResult::classify(latency_ms, &self.latency);
            if !latency.within_threshold {
                warn!(
                    "[{}] handler took {:.1}ms (max {}ms)",
                    q.conversation_id, latency_ms, self.latency.maximum_ms
                );
            }
            debug!(
                "[{}] missing tokens {:?}, latency {:.1}ms ({})",
                q.conversation_id,
                verdict.missing,
                latency_ms,
                latency.status()
            );

            let doc_ids = resp.doc_ids();
            writeln!(out, "Question: {}", q.question)?;
            writeln!(out, "  Contexts: {:?}", doc_ids)?;
            writeln!(out, "  Answer: {}", resp.answer)?;
            writeln!(out, "  Hallucinated: {}", verdict.hallucinated)?;
            writeln!(out, "  Context Accurate: {}\n", ctx_score == 1)?;

            outcomes.push(QuestionOutcome {
                index: idx,
                conversation_id: q.conversation_id.clone(),
                question: q.question.clone(),
                doc_ids: doc_ids.into_iter().map(String::from).collect(),
                answer: resp.answer.clone(),
                hallucinated: verdict.hallucinated,
                missing_tokens: verdict.missing,
                context_accurate: ctx_score == 1,
                latency,
            });
        }

        let summary = EvalSummary {
            suite_name: self.suite.name.clone(),
            total: metrics.total,
            hallucinated: metrics.hallucinated,
            context_correct: metrics.context_correct,
            hallucination_pct: metrics.hallucination_rate(),
            context_accuracy_pct: metrics.context_accuracy_rate(),
            avg_latency_ms: metrics.get_avg_latency(),
            p99_latency_ms: metrics.get_p99_latency(),
            outcomes,
        };

        writeln!(out, "=== METRICS ===")?;
        writeln!(out, "Hallucination %: {:.2}", summary.hallucination_pct)?;
        writeln!(out, "Context Retrieval Accuracy %: {:.2}", summary.context_accuracy_pct)?;

        info!(
            "Suite '{}' done: hallucination {:.2}%, context accuracy {:.2}%, avg latency {:.1}ms",
            summary.suite_name,
            summary.hallucination_pct,
            summary.context_accuracy_pct,
            summary.avg_latency_ms
        );

        Ok(summary)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvalReport {
    pub eval_name: String,
    pub timestamp: u64,
    pub summary: EvalSummary,
}

/// Persists run summaries as timestamped JSON files.
pub struct ReportWriter {
    pub reports_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn save_report(&self, summary: &EvalSummary) -> Result<PathBuf> {
        fs::create_dir_all(&self.reports_dir)?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let report = EvalReport {
            eval_name: summary.suite_name.clone(),
            timestamp,
            summary: summary.clone(),
        };

        let filename = format!("{}_{}.json", file_stem(&report.eval_name), timestamp);
        let path = self.reports_dir.join(filename);

        let data = serde_json::to_string_pretty(&report)?;
        fs::write(&path, data)?;

        Ok(path)
    }
}

/// Suite names come from user files; keep only `[A-Za-z0-9_-]` so the
/// report always lands inside `reports_dir`.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() { "suite".to_string() } else { stem }
}
