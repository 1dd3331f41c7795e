//! Heuristic creative scorer
//!
//! Each creative gets the unweighted mean of up to five sub-scores:
//!
//! - feature effectiveness: mean knowledge-base weight of the features the
//!   copy actually mentions (omitted when the product or any mention is
//!   unknown; a miss is silent degradation, not a penalty)
//! - headline length, body length: platform-limit heuristics
//! - CTA word count
//! - justification completeness
//!
//! Omitted sub-scores are excluded from the mean, never zero-filled. The
//! matching is intentionally lexical; false positives and negatives are
//! acceptable. Scoring is stateless per call and idempotent.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::Creative;
use crate::kb::KnowledgeBase;
use crate::validation::TextMatcher;

/// Every threshold and penalty used by the scorer, overridable via config.
/// Defaults preserve the platform-limit heuristics the scorer was tuned with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Headline length band scoring 1.0, in characters
    pub headline_min: usize,
    pub headline_max: usize,
    pub headline_short_score: f64,
    pub headline_long_score: f64,

    /// Body length band scoring 1.0, in characters
    pub body_min: usize,
    pub body_max: usize,
    pub body_short_score: f64,
    pub body_long_score: f64,

    /// CTA word-count band scoring 1.0
    pub cta_min_words: usize,
    pub cta_max_words: usize,
    pub cta_off_score: f64,

    /// Minimum words for a complete justification
    pub justification_min_words: usize,
    pub justification_sparse_score: f64,

    /// Returned when every sub-score is omitted
    pub neutral_score: f64,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            headline_min: 30,
            headline_max: 65,
            headline_short_score: 0.7,
            headline_long_score: 0.5,
            body_min: 60,
            body_max: 180,
            body_short_score: 0.7,
            body_long_score: 0.5,
            cta_min_words: 2,
            cta_max_words: 4,
            cta_off_score: 0.6,
            justification_min_words: 5,
            justification_sparse_score: 0.7,
            neutral_score: 0.5,
        }
    }
}

/// Scores creatives against the knowledge base and length heuristics
#[derive(Debug, Clone)]
pub struct CreativeScorer {
    kb: Arc<KnowledgeBase>,
    thresholds: ScoringThresholds,
    matcher: TextMatcher,
}

impl CreativeScorer {
    pub fn new(kb: Arc<KnowledgeBase>, thresholds: ScoringThresholds, matcher: TextMatcher) -> Self {
        Self {
            kb,
            thresholds,
            matcher,
        }
    }

    /// Score one creative for `product_name`. Always in [0, 1].
    pub fn score(&self, creative: &Creative, product_name: &str) -> f64 {
        let t = &self.thresholds;
        let mut scores = Vec::with_capacity(5);

        if let Some(effectiveness) = self.feature_effectiveness(creative, product_name) {
            scores.push(effectiveness);
        }

        scores.push(length_score(
            creative.headline.chars().count(),
            t.headline_min,
            t.headline_max,
            t.headline_short_score,
            t.headline_long_score,
        ));

        scores.push(length_score(
            creative.body.chars().count(),
            t.body_min,
            t.body_max,
            t.body_short_score,
            t.body_long_score,
        ));

        let cta_words = creative.cta.split_whitespace().count();
        scores.push(if (t.cta_min_words..=t.cta_max_words).contains(&cta_words) {
            1.0
        } else {
            t.cta_off_score
        });

        let justification_words = creative.justification.split_whitespace().count();
        scores.push(if justification_words >= t.justification_min_words {
            1.0
        } else {
            t.justification_sparse_score
        });

        if scores.is_empty() {
            return t.neutral_score;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(0.0, 1.0)
    }

    /// Mean effectiveness of the knowledge-base features the copy mentions.
    /// None when the product is unknown or no feature matches.
    fn feature_effectiveness(&self, creative: &Creative, product_name: &str) -> Option<f64> {
        let product = self.kb.product(product_name)?;
        let weights: Vec<f64> = product
            .features
            .iter()
            .filter(|(name, _)| {
                self.matcher.matches(&creative.headline, name)
                    || self.matcher.matches(&creative.body, name)
            })
            .map(|(_, weight)| weight.effectiveness)
            .collect();
        if weights.is_empty() {
            None
        } else {
            Some(weights.iter().sum::<f64>() / weights.len() as f64)
        }
    }
}

fn length_score(len: usize, min: usize, max: usize, short: f64, long: f64) -> f64 {
    if (min..=max).contains(&len) {
        1.0
    } else if len < min {
        short
    } else {
        long
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::{FeatureWeight, ProductEntry};
    use std::collections::HashMap;

    fn kb_with_focusflow() -> Arc<KnowledgeBase> {
        let mut features = HashMap::new();
        features.insert(
            "AI task prioritization".to_string(),
            FeatureWeight { effectiveness: 0.9 },
        );
        features.insert(
            "calendar sync".to_string(),
            FeatureWeight { effectiveness: 0.7 },
        );
        let mut products = HashMap::new();
        products.insert("FocusFlow".to_string(), ProductEntry { features });
        Arc::new(KnowledgeBase { products })
    }

    fn scorer(kb: Arc<KnowledgeBase>) -> CreativeScorer {
        CreativeScorer::new(kb, ScoringThresholds::default(), TextMatcher::default())
    }

    fn creative(headline: &str, body: &str, cta: &str, justification: &str) -> Creative {
        Creative {
            id: "c_1a".to_string(),
            headline: headline.to_string(),
            body: body.to_string(),
            cta: cta.to_string(),
            justification: justification.to_string(),
            score: None,
        }
    }

    // headline 16 chars (short), body/cta/justification in band
    fn short_headline_creative() -> Creative {
        creative(
            "Get Things Done!",
            "AI task prioritization that fits your calendar. Try FocusFlow free for two weeks.",
            "Start Free Trial",
            "Highlights trial and AI feature clearly",
        )
    }

    #[test]
    fn test_short_headline_subscore() {
        // feature 0.9, headline 0.7, body 1.0, cta 1.0, justification 1.0
        let score = scorer(kb_with_focusflow()).score(&short_headline_creative(), "FocusFlow");
        let expected = (0.9 + 0.7 + 1.0 + 1.0 + 1.0) / 5.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_product_omits_feature_subscore() {
        // headline 0.7, body 1.0, cta 1.0, justification 1.0 -> mean of four
        let score = scorer(kb_with_focusflow()).score(&short_headline_creative(), "OtherApp");
        let expected = (0.7 + 1.0 + 1.0 + 1.0) / 4.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_kb_stays_in_bounds() {
        let score = scorer(Arc::new(KnowledgeBase::empty()))
            .score(&short_headline_creative(), "FocusFlow");
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_no_feature_mention_omits_subscore() {
        let c = creative(
            "A headline long enough to land inside the band",
            "Copy that never names any knowledge base feature but still runs on long enough.",
            "Learn More",
            "Generic copy without any feature mention at all",
        );
        let score = scorer(kb_with_focusflow()).score(&c, "FocusFlow");
        // all four length/word sub-scores are 1.0; a KB penalty would show up here
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_feature_mean_over_mentioned_features_only() {
        let c = creative(
            "Calendar sync and AI task prioritization",
            "Both features named here, well inside the body limits for every major platform.",
            "Try It Now",
            "Names both flagship features for relevance",
        );
        let score = scorer(kb_with_focusflow()).score(&c, "FocusFlow");
        let feature_mean = (0.9 + 0.7) / 2.0;
        let expected = (feature_mean + 1.0 + 1.0 + 1.0 + 1.0) / 5.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_long_headline_and_body_penalties() {
        let c = creative(
            &"x".repeat(80),
            &"y".repeat(200),
            "Go",
            "ok",
        );
        let score = scorer(Arc::new(KnowledgeBase::empty())).score(&c, "FocusFlow");
        // headline 0.5, body 0.5, cta 0.6 (1 word), justification 0.7
        let expected = (0.5 + 0.5 + 0.6 + 0.7) / 4.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_cta_word_count_band() {
        let kb = Arc::new(KnowledgeBase::empty());
        let s = scorer(kb);
        let base = |cta: &str| {
            s.score(
                &creative(
                    "A headline long enough to land inside the band",
                    "Body copy that is comfortably inside the permitted range for body length here.",
                    cta,
                    "A justification with more than five words total",
                ),
                "FocusFlow",
            )
        };
        assert!((base("Start Free Trial") - 1.0).abs() < 1e-9);
        assert!(base("Go") < base("Start Free Trial"));
        assert!(base("Click here to start your free trial") < base("Start Free Trial"));
    }

    #[test]
    fn test_score_is_idempotent() {
        let s = scorer(kb_with_focusflow());
        let c = short_headline_creative();
        let first = s.score(&c, "FocusFlow");
        let second = s.score(&c, "FocusFlow");
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_always_in_bounds() {
        let s = scorer(kb_with_focusflow());
        let cases = [
            creative("", "", "", ""),
            creative(&"a".repeat(500), &"b".repeat(500), &"c ".repeat(50), ""),
            short_headline_creative(),
        ];
        for c in &cases {
            let score = s.score(c, "FocusFlow");
            assert!((0.0..=1.0).contains(&score), "out of bounds: {score}");
        }
    }

    #[test]
    fn test_unicode_headline_counts_chars_not_bytes() {
        // 30 chars incl. the em dash, which is multi-byte
        let headline = "Get More Done — 14 Days Free!!";
        assert_eq!(headline.chars().count(), 30);
        let c = creative(
            headline,
            "Body copy that is comfortably inside the permitted range for body length here.",
            "Start Free Trial",
            "A justification with more than five words total",
        );
        let score = scorer(Arc::new(KnowledgeBase::empty())).score(&c, "FocusFlow");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = ScoringThresholds {
            cta_off_score: 0.0,
            ..Default::default()
        };
        let s = CreativeScorer::new(
            Arc::new(KnowledgeBase::empty()),
            thresholds,
            TextMatcher::default(),
        );
        let c = creative(
            "A headline long enough to land inside the band",
            "Body copy that is comfortably inside the permitted range for body length here.",
            "Go",
            "A justification with more than five words total",
        );
        let expected = (1.0 + 1.0 + 0.0 + 1.0) / 4.0;
        assert!((s.score(&c, "FocusFlow") - expected).abs() < 1e-9);
    }
}
