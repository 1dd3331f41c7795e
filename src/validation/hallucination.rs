//! Feature hallucination detection
//!
//! A creative whose visible text omits a brief-specified feature is flagged.
//! This is a lexical proxy for unsupported or dropped claims, not a
//! factual-accuracy check. Features phrased differently in the copy will false-positive.
//! Flags are advisory: they accumulate in the request metrics and never fail
//! the request.

use serde::{Deserialize, Serialize};

use crate::domain::{Brief, Campaign, Creative};
use crate::validation::TextMatcher;

/// Default confidence attached to every flag
pub const DEFAULT_HALLUCINATION_CONFIDENCE: f64 = 0.8;

/// Detector settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HallucinationConfig {
    /// Confidence recorded on each flag
    pub confidence: f64,
}

impl Default for HallucinationConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_HALLUCINATION_CONFIDENCE,
        }
    }
}

/// One advisory finding, recorded in the request metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallucinationFlag {
    pub message: String,
    pub confidence: f64,
}

/// Flags creatives that omit brief features from their own text
#[derive(Debug, Clone, Copy, Default)]
pub struct HallucinationDetector {
    config: HallucinationConfig,
    matcher: TextMatcher,
}

impl HallucinationDetector {
    pub fn new(config: HallucinationConfig, matcher: TextMatcher) -> Self {
        Self { config, matcher }
    }

    /// One flag per offending creative: flagged iff at least one key feature
    /// is absent from both the headline and the body.
    pub fn inspect(&self, creative: &Creative, key_features: &[String]) -> Option<HallucinationFlag> {
        let missing = key_features.iter().any(|feature| {
            !self.matcher.matches(&creative.headline, feature)
                && !self.matcher.matches(&creative.body, feature)
        });
        missing.then(|| HallucinationFlag {
            message: format!("Creative {} may contain hallucinated features", creative.id),
            confidence: self.config.confidence,
        })
    }

    /// Inspect every creative in the campaign against the brief's features
    pub fn scan(&self, campaign: &Campaign, brief: &Brief) -> Vec<HallucinationFlag> {
        campaign
            .creatives()
            .filter_map(|creative| self.inspect(creative, &brief.product.key_features))
            .collect()
    }
}
