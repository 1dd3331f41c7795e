//! Brief/campaign consistency checking
//!
//! Six structural and numeric rules cross-validate a generated campaign
//! against its source brief. Rules are evaluated in a fixed order and every
//! violation is collected, so callers keep full rule-by-rule visibility; any
//! violation is fatal to the request. The checker never mutates its inputs;
//! the orchestrator sets the campaign's legacy `checks` flags, and only on
//! full success.

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::{Brief, Campaign, Channel};

/// Absolute tolerance for the budget breakdown sum
pub const BUDGET_SUM_TOLERANCE: f64 = 0.01;

/// One broken consistency rule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("campaign_id {actual:?} does not match brief campaign_id {expected:?}")]
    IdentityMismatch { expected: String, actual: String },

    #[error("total_budget {actual} does not match brief budget {expected}")]
    BudgetMismatch { expected: f64, actual: f64 },

    #[error("budget_breakdown sums to {sum} but total_budget is {total}")]
    BudgetSumMismatch { total: f64, sum: f64 },

    #[error("channel {0} from brief missing in budget_breakdown")]
    MissingChannel(Channel),

    #[error("duplicate ad group id {0:?}")]
    DuplicateAdGroupId(String),

    #[error("duplicate creative id {creative_id:?} in ad group {ad_group_id:?}")]
    DuplicateCreativeId {
        ad_group_id: String,
        creative_id: String,
    },
}

/// Outcome of a consistency check: pass/fail plus every broken rule, in rule
/// order
#[derive(Debug, Clone, Default)]
pub struct ConsistencyResult {
    pub ok: bool,
    pub violations: Vec<Violation>,
}

impl ConsistencyResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            ok: violations.is_empty(),
            violations,
        }
    }

    /// The highest-precedence violation, if any
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Consume the result, yielding the highest-precedence violation
    pub fn into_first(self) -> Option<Violation> {
        self.violations.into_iter().next()
    }
}

/// Cross-validates generated campaigns against their briefs
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate all six rules against `campaign`, in order:
    /// identity, total budget, breakdown sum, channel coverage, ad group id
    /// uniqueness, creative id uniqueness.
    pub fn check(&self, campaign: &Campaign, brief: &Brief) -> ConsistencyResult {
        let mut violations = Vec::new();

        if campaign.campaign_id != brief.campaign_id {
            violations.push(Violation::IdentityMismatch {
                expected: brief.campaign_id.clone(),
                actual: campaign.campaign_id.clone(),
            });
        }

        if campaign.total_budget != brief.budget {
            violations.push(Violation::BudgetMismatch {
                expected: brief.budget,
                actual: campaign.total_budget,
            });
        }

        let sum = campaign.budget_sum();
        if (sum - campaign.total_budget).abs() > BUDGET_SUM_TOLERANCE {
            violations.push(Violation::BudgetSumMismatch {
                total: campaign.total_budget,
                sum,
            });
        }

        for channel in &brief.channels {
            if !campaign.budget_breakdown.contains_key(channel) {
                violations.push(Violation::MissingChannel(*channel));
            }
        }

        let mut seen_groups = HashSet::new();
        let mut flagged_groups = HashSet::new();
        for ad_group in &campaign.ad_groups {
            if !seen_groups.insert(ad_group.id.as_str()) && flagged_groups.insert(ad_group.id.as_str()) {
                violations.push(Violation::DuplicateAdGroupId(ad_group.id.clone()));
            }
        }

        for ad_group in &campaign.ad_groups {
            let mut seen = HashSet::new();
            let mut flagged = HashSet::new();
            for creative in &ad_group.creatives {
                if !seen.insert(creative.id.as_str()) && flagged.insert(creative.id.as_str()) {
                    violations.push(Violation::DuplicateCreativeId {
                        ad_group_id: ad_group.id.clone(),
                        creative_id: creative.id.clone(),
                    });
                }
            }
        }

        ConsistencyResult::from_violations(violations)
    }
}
