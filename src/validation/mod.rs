//! Post-generation validation
//!
//! Cross-checks a generated campaign against its brief (fatal) and scans
//! creatives for omitted features (advisory).

pub mod consistency;
pub mod hallucination;
pub mod matcher;

pub use consistency::{BUDGET_SUM_TOLERANCE, ConsistencyChecker, ConsistencyResult, Violation};
pub use hallucination::{
    DEFAULT_HALLUCINATION_CONFIDENCE, HallucinationConfig, HallucinationDetector, HallucinationFlag,
};
pub use matcher::{MatchMode, MatchOptions, TextMatcher};
