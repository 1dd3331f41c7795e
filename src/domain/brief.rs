//! Campaign brief types
//!
//! A Brief is the input specification for a campaign to be generated. It is
//! parsed from JSON, validated once with [`Brief::validate`], and never
//! mutated afterwards.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanrError, Result};

/// Input specification of a campaign to be generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    /// Campaign identifier, `cmp_YYYY_MM_DD` format
    pub campaign_id: String,

    /// What the campaign is trying to achieve (e.g. "trial_signups")
    pub goal: String,

    /// The product being advertised
    pub product: Product,

    /// Total campaign budget, non-negative
    pub budget: f64,

    /// Channels the campaign must cover
    pub channels: Vec<Channel>,

    /// Ordered targeting hints for the generator
    #[serde(default)]
    pub audience_hints: Vec<String>,

    /// Desired voice for ad copy
    pub tone: String,
}

/// Product details carried by a brief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,

    /// Ordered list of features the generated copy should mention
    #[serde(default)]
    pub key_features: Vec<String>,

    pub price: f64,
}

/// Advertising channels a brief may target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Search,
    Social,
    Display,
    Video,
}

impl Channel {
    /// Lowercase wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Search => "search",
            Channel::Social => "social",
            Channel::Display => "display",
            Channel::Video => "video",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Brief {
    /// Load a brief from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Check the structural constraints a brief must satisfy.
    ///
    /// The serde layer already guarantees field presence and types; this
    /// covers the constraints serde cannot express: the campaign id pattern
    /// and the non-negative budget.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_campaign_id(&self.campaign_id) {
            return Err(PlanrError::Brief(format!(
                "campaign_id {:?} does not match cmp_YYYY_MM_DD",
                self.campaign_id
            )));
        }
        if self.budget < 0.0 {
            return Err(PlanrError::Brief(format!(
                "budget must be non-negative, got {}",
                self.budget
            )));
        }
        Ok(())
    }
}

/// Campaign ids follow `cmp_YYYY_MM_DD`, all-digit date segments
fn is_valid_campaign_id(id: &str) -> bool {
    let Some(rest) = id.strip_prefix("cmp_") else {
        return false;
    };
    let segments: Vec<&str> = rest.split('_').collect();
    let widths = [4, 2, 2];
    segments.len() == widths.len()
        && segments
            .iter()
            .zip(widths)
            .all(|(seg, width)| seg.len() == width && seg.chars().all(|c| c.is_ascii_digit()))
}
