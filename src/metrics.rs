//! Per-request processing metrics
//!
//! A [`MetricsRecorder`] accumulates timing, token estimates, hallucination
//! flags, and validation errors for exactly one processing request. It holds
//! mutable state and must not be shared across concurrent requests: the
//! agent constructs a fresh recorder inside each request and hands the final
//! [`Metrics`] snapshot back in the response payload.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::validation::HallucinationFlag;

/// Which part of the exchange a token estimate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SystemPrompt,
    UserPrompt,
    Completion,
}

/// Token estimates per exchange part; zero when never recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenCounts {
    pub system_prompt: u64,
    pub user_prompt: u64,
    pub completion: u64,
}

/// Immutable snapshot of one processing run, included in the output payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub token_counts: TokenCounts,

    /// Wall-clock seconds between start() and stop()
    pub processing_time: f64,

    pub hallucination_flags: Vec<HallucinationFlag>,

    pub validation_errors: Vec<String>,

    pub completion_successful: bool,
}

/// Accumulates metrics for a single processing request
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    started: Option<Instant>,
    metrics: Metrics,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counters for a new run
    pub fn reset(&mut self) {
        self.started = None;
        self.metrics = Metrics::default();
    }

    /// Begin the timed region
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// End the timed region, recording elapsed seconds and the success flag
    pub fn stop(&mut self, success: bool) {
        if let Some(started) = self.started.take() {
            self.metrics.processing_time = started.elapsed().as_secs_f64();
        }
        self.metrics.completion_successful = success;
        log::info!(
            "Processing completed in {:.2}s (success: {})",
            self.metrics.processing_time,
            success
        );
    }

    /// Record a token estimate for one part of the exchange
    pub fn log_token_count(&mut self, kind: PromptKind, count: u64) {
        let counts = &mut self.metrics.token_counts;
        match kind {
            PromptKind::SystemPrompt => counts.system_prompt = count,
            PromptKind::UserPrompt => counts.user_prompt = count,
            PromptKind::Completion => counts.completion = count,
        }
    }

    /// Record an advisory hallucination flag
    pub fn log_hallucination(&mut self, flag: HallucinationFlag) {
        log::warn!(
            "Potential hallucination: {} (confidence: {})",
            flag.message,
            flag.confidence
        );
        self.metrics.hallucination_flags.push(flag);
    }

    /// Record a fatal validation failure message
    pub fn log_validation_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        log::error!("Validation error: {}", error);
        self.metrics.validation_errors.push(error);
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> Metrics {
        self.metrics.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(message: &str) -> HallucinationFlag {
        HallucinationFlag {
            message: message.to_string(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_new_recorder_is_clean() {
        let recorder = MetricsRecorder::new();
        let metrics = recorder.snapshot();
        assert_eq!(metrics.token_counts, TokenCounts::default());
        assert_eq!(metrics.processing_time, 0.0);
        assert!(metrics.hallucination_flags.is_empty());
        assert!(metrics.validation_errors.is_empty());
        assert!(!metrics.completion_successful);
    }

    #[test]
    fn test_start_stop_records_elapsed_and_success() {
        let mut recorder = MetricsRecorder::new();
        recorder.start();
        recorder.stop(true);
        let metrics = recorder.snapshot();
        assert!(metrics.processing_time >= 0.0);
        assert!(metrics.completion_successful);
    }

    #[test]
    fn test_stop_without_start_leaves_time_zero() {
        let mut recorder = MetricsRecorder::new();
        recorder.stop(false);
        let metrics = recorder.snapshot();
        assert_eq!(metrics.processing_time, 0.0);
        assert!(!metrics.completion_successful);
    }

    #[test]
    fn test_log_token_counts() {
        let mut recorder = MetricsRecorder::new();
        recorder.log_token_count(PromptKind::SystemPrompt, 120);
        recorder.log_token_count(PromptKind::UserPrompt, 45);
        recorder.log_token_count(PromptKind::Completion, 300);
        let counts = recorder.snapshot().token_counts;
        assert_eq!(counts.system_prompt, 120);
        assert_eq!(counts.user_prompt, 45);
        assert_eq!(counts.completion, 300);
    }

    #[test]
    fn test_log_hallucination_appends_in_order() {
        let mut recorder = MetricsRecorder::new();
        recorder.log_hallucination(flag("Creative c_1a may contain hallucinated features"));
        recorder.log_hallucination(flag("Creative c_2a may contain hallucinated features"));
        let flags = recorder.snapshot().hallucination_flags;
        assert_eq!(flags.len(), 2);
        assert!(flags[0].message.contains("c_1a"));
        assert!(flags[1].message.contains("c_2a"));
    }

    #[test]
    fn test_log_validation_error_appends() {
        let mut recorder = MetricsRecorder::new();
        recorder.log_validation_error("total_budget 4000 does not match brief budget 5000");
        assert_eq!(recorder.snapshot().validation_errors.len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut recorder = MetricsRecorder::new();
        recorder.start();
        recorder.log_token_count(PromptKind::Completion, 10);
        recorder.log_validation_error("boom");
        recorder.log_hallucination(flag("x"));
        recorder.stop(true);

        recorder.reset();
        let metrics = recorder.snapshot();
        assert_eq!(metrics.token_counts, TokenCounts::default());
        assert_eq!(metrics.processing_time, 0.0);
        assert!(metrics.hallucination_flags.is_empty());
        assert!(metrics.validation_errors.is_empty());
        assert!(!metrics.completion_successful);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut recorder = MetricsRecorder::new();
        let before = recorder.snapshot();
        recorder.log_validation_error("after snapshot");
        assert!(before.validation_errors.is_empty());
        assert_eq!(recorder.snapshot().validation_errors.len(), 1);
    }

    #[test]
    fn test_metrics_serialization_shape() {
        let mut recorder = MetricsRecorder::new();
        recorder.log_hallucination(flag("msg"));
        recorder.stop(true);

        let json = serde_json::to_value(recorder.snapshot()).unwrap();
        assert!(json["token_counts"]["system_prompt"].is_u64());
        assert!(json["processing_time"].is_number());
        assert_eq!(json["hallucination_flags"][0]["confidence"], 0.8);
        assert_eq!(json["completion_successful"], true);
    }
}
