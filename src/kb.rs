//! Product knowledge base
//!
//! Static mapping of product name -> feature name -> effectiveness weight,
//! loaded once at startup and read-only afterwards. Lookups that miss degrade
//! silently: scoring simply skips the feature-effectiveness sub-score.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Per-product feature effectiveness data used in scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub products: HashMap<String, ProductEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductEntry {
    #[serde(default)]
    pub features: HashMap<String, FeatureWeight>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureWeight {
    /// Historical effectiveness in [0, 1]
    pub effectiveness: f64,
}

impl KnowledgeBase {
    /// A knowledge base with no products; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from a JSON document of the form
    /// `{"products": {<name>: {"features": {<feature>: {"effectiveness": <0..1>}}}}}`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Look up a product by exact name
    pub fn product(&self, name: &str) -> Option<&ProductEntry> {
        self.products.get(name)
    }
}
