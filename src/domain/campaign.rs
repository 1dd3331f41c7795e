//! Generated campaign types
//!
//! A Campaign is produced by the generation collaborator, one per request. It
//! must already be structurally valid JSON when it reaches the consistency
//! checker; the serde boundary in the agent enforces that. Creative scores
//! are not part of the model as generated; the scoring stage fills them in.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Channel;
use crate::error::Result;

/// Generated campaign plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// Must equal the brief's campaign_id
    pub campaign_id: String,

    pub campaign_name: String,

    pub objective: String,

    /// Must equal the brief's budget exactly
    pub total_budget: f64,

    /// Per-channel allocation; keys must cover every brief channel
    pub budget_breakdown: BTreeMap<Channel, f64>,

    pub ad_groups: Vec<AdGroup>,

    /// Legacy pass/fail record, set true only after a fully successful
    /// consistency check
    #[serde(default)]
    pub checks: CampaignChecks,
}

/// Binary outcome flags surfaced in the output payload.
///
/// Deliberately lossy: six distinct rules collapse into two flags that are
/// only ever set true on success. Rule-by-rule detail lives in
/// [`crate::validation::ConsistencyResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignChecks {
    pub budget_sum_ok: bool,
    pub required_fields_present: bool,
}

/// One targeting group within a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdGroup {
    /// Unique within the campaign
    pub id: String,

    pub target: TargetAudience,

    pub creatives: Vec<Creative>,
}

/// Who an ad group is aimed at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetAudience {
    /// Age range, e.g. "25-40"
    pub age: String,

    #[serde(default)]
    pub behaviors: Vec<String>,
}

/// One ad variant within an ad group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creative {
    /// Unique within its ad group (not across groups)
    pub id: String,

    pub headline: String,

    pub body: String,

    pub cta: String,

    pub justification: String,

    /// Quality score in [0, 1], assigned by the scoring stage after
    /// generation; absent until then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Campaign {
    /// Load a campaign from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Sum of the per-channel allocations
    pub fn budget_sum(&self) -> f64 {
        self.budget_breakdown.values().sum()
    }

    /// Iterate over every creative across all ad groups
    pub fn creatives(&self) -> impl Iterator<Item = &Creative> {
        self.ad_groups.iter().flat_map(|ag| ag.creatives.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campaign_json() -> &'static str {
        r#"{
            "campaign_id": "cmp_2025_09_01",
            "campaign_name": "FocusFlow Trial Push Sep2025",
            "objective": "trial_signups",
            "total_budget": 5000,
            "budget_breakdown": {"search": 3000, "social": 2000},
            "ad_groups": [
                {
                    "id": "ag_1",
                    "target": {"age": "25-40", "behaviors": ["remote work"]},
                    "creatives": [
                        {
                            "id": "c_1a",
                            "headline": "Get More Done",
                            "body": "AI task prioritization that fits your calendar.",
                            "cta": "Start Free Trial",
                            "justification": "Highlights trial and AI feature clearly"
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn test_campaign_deserializes_without_checks_or_scores() {
        let campaign: Campaign = serde_json::from_str(sample_campaign_json()).unwrap();
        assert_eq!(campaign.campaign_id, "cmp_2025_09_01");
        assert!(!campaign.checks.budget_sum_ok);
        assert!(!campaign.checks.required_fields_present);
        assert!(campaign.ad_groups[0].creatives[0].score.is_none());
    }

    #[test]
    fn test_budget_sum() {
        let campaign: Campaign = serde_json::from_str(sample_campaign_json()).unwrap();
        assert!((campaign.budget_sum() - 5000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_budget_breakdown_channel_keys() {
        let campaign: Campaign = serde_json::from_str(sample_campaign_json()).unwrap();
        assert_eq!(campaign.budget_breakdown.get(&Channel::Search), Some(&3000.0));
        assert_eq!(campaign.budget_breakdown.get(&Channel::Social), Some(&2000.0));
        assert_eq!(campaign.budget_breakdown.get(&Channel::Video), None);
    }

    #[test]
    fn test_unset_score_skipped_in_serialization() {
        let campaign: Campaign = serde_json::from_str(sample_campaign_json()).unwrap();
        let json = serde_json::to_string(&campaign).unwrap();
        assert!(!json.contains("\"score\""));
    }

    #[test]
    fn test_set_score_serialized() {
        let mut campaign: Campaign = serde_json::from_str(sample_campaign_json()).unwrap();
        campaign.ad_groups[0].creatives[0].score = Some(0.85);
        let json = serde_json::to_string(&campaign).unwrap();
        assert!(json.contains("\"score\":0.85"));
    }

    #[test]
    fn test_creatives_iterator() {
        let campaign: Campaign = serde_json::from_str(sample_campaign_json()).unwrap();
        let ids: Vec<&str> = campaign.creatives().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c_1a"]);
    }

    #[test]
    fn test_checks_roundtrip() {
        let mut campaign: Campaign = serde_json::from_str(sample_campaign_json()).unwrap();
        campaign.checks.budget_sum_ok = true;
        campaign.checks.required_fields_present = true;

        let json = serde_json::to_string(&campaign).unwrap();
        let restored: Campaign = serde_json::from_str(&json).unwrap();
        assert!(restored.checks.budget_sum_ok);
        assert!(restored.checks.required_fields_present);
    }
}
