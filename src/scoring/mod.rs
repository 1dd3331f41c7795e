//! Creative quality scoring
//!
//! Heuristic per-creative scores in [0, 1], combining knowledge-base feature
//! effectiveness with platform-length rules of thumb.

pub mod creative;

pub use creative::{CreativeScorer, ScoringThresholds};
