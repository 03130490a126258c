use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One entry of the portfolio document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    /// Image location, relative to the site root or an absolute URL.
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Id of the modal opened by the card's "View more" link.
    pub modal_id: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub items: Vec<PortfolioItem>,
}

impl PortfolioData {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Modal ids used by more than one item, in first-seen order.
    pub fn duplicate_modal_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for item in &self.items {
            if !seen.insert(item.modal_id.as_str()) && !dups.contains(&item.modal_id.as_str()) {
                dups.push(item.modal_id.as_str());
            }
        }
        dups
    }
}
