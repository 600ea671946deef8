//! Metrics accumulation for a single evaluation pass.
//!
//! Tracks hallucination and context-accuracy counts plus every handler
//! latency of the run for the report.

use crate::config::LatencyConfig;
use serde::{Deserialize, Serialize};

/// Latency of one handler call classified against the configured thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatencyResult {
    pub latency_ms: f64,
    pub acceptable: bool,
    pub within_threshold: bool,
}

impl LatencyResult {
    pub fn classify(latency_ms: f64, thresholds: &LatencyConfig) -> Self {
        Self {
            latency_ms,
            acceptable: latency_ms <= thresholds.acceptable_ms as f64,
            within_threshold: latency_ms <= thresholds.maximum_ms as f64,
        }
    }

    pub fn status(&self) -> &'static str {
        if self.within_threshold { "PASS" } else { "FAIL" }
    }
}

/// Running totals, mutated once per question and read once at the end
pub struct MetricsAccumulator {
    /// Answers flagged as hallucinated
    pub hallucinated: usize,
    /// Questions whose retrieved context matched the gold label
    pub context_correct: usize,
    /// Questions scored so far
    pub total: usize,
    /// Handler latency of every scored question (ms)
    latencies: Vec<f64>,
}

impl Default for MetricsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsAccumulator {
    pub fn new() -> Self {
        Self {
            hallucinated: 0,
            context_correct: 0,
            total: 0,
            latencies: Vec::new(),
        }
    }

    /// Record the verdicts for one question
    pub fn record(&mut self, hallucinated: bool, context_score: u8) {
        self.total += 1;
        self.hallucinated += hallucinated as usize;
        self.context_correct += context_score as usize;
    }

    pub fn record_latency(&mut self, latency_ms: f64) {
        self.latencies.push(latency_ms);
    }

    pub fn hallucination_rate(&self) -> f64 {
        percentage(self.hallucinated, self.total)
    }

    pub fn context_accuracy_rate(&self) -> f64 {
        percentage(self.context_correct, self.total)
    }

    /// P99 over all latencies recorded in the run
    pub fn get_p99_latency(&self) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }

        let mut sorted = self.latencies.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let p99_index = ((sorted.len() as f64) * 0.99).ceil() as usize - 1;
        let p99_index = p99_index.min(sorted.len() - 1);
        sorted[p99_index]
    }

    pub fn get_avg_latency(&self) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }
        self.latencies.iter().sum::<f64>() / self.latencies.len() as f64
    }

    pub fn get_sample_count(&self) -> usize {
        self.latencies.len()
    }
}

/// `count / total * 100`, or 0 for an empty pass
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_rates() {
        let mut metrics = MetricsAccumulator::new();
        metrics.record(false, 1);
        metrics.record(false, 1);
        metrics.record(true, 0);

        assert_eq!(metrics.total, 3);
        assert_eq!(format!("{:.2}", metrics.hallucination_rate()), "33.33");
        assert_eq!(format!("{:.2}", metrics.context_accuracy_rate()), "66.67");
    }

    #[test]
    fn test_empty_pass() {
        let metrics = MetricsAccumulator::new();
        assert_eq!(metrics.hallucination_rate(), 0.0);
        assert_eq!(metrics.context_accuracy_rate(), 0.0);
        assert_eq!(metrics.get_p99_latency(), 0.0);
        assert_eq!(metrics.get_avg_latency(), 0.0);
        assert_eq!(metrics.get_sample_count(), 0);
    }

    #[test]
    fn test_latency_stats() {
        let mut metrics = MetricsAccumulator::new();
        metrics.record_latency(1.0);
        metrics.record_latency(2.0);
        metrics.record_latency(3.0);

        // With only 3 samples, P99 should be the max
        assert!((metrics.get_p99_latency() - 3.0).abs() < 0.01);
        assert!((metrics.get_avg_latency() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_latency_stats_cover_whole_run() {
        let mut metrics = MetricsAccumulator::new();
        // One slow call first, then many fast ones
        metrics.record_latency(5000.0);
        for _ in 0..1500 {
            metrics.record_latency(1.0);
        }

        assert_eq!(metrics.get_sample_count(), 1501);
        let expected_avg = (5000.0 + 1500.0) / 1501.0;
        assert!((metrics.get_avg_latency() - expected_avg).abs() < 1e-9);
        assert!((metrics.get_p99_latency() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_latency_classification() {
        let thresholds = LatencyConfig::default();

        let fast = LatencyResult::classify(120.0, &thresholds);
        assert!(fast.acceptable && fast.within_threshold);
        assert_eq!(fast.status(), "PASS");

        let slow = LatencyResult::classify(800.0, &thresholds);
        assert!(!slow.acceptable);
        assert!(slow.within_threshold);
        assert_eq!(slow.status(), "PASS");

        let edge = LatencyResult::classify(2000.0, &thresholds);
        assert!(edge.within_threshold);

        let timeout = LatencyResult::classify(2000.5, &thresholds);
        assert!(!timeout.within_threshold);
        assert_eq!(timeout.status(), "FAIL");
    }
}
