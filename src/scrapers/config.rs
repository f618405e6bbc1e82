//! Source configuration for listing scrapers.
//!
//! Each source names its base URL and the markup selectors that locate
//! listing items and their fields, so new federation sites can be added
//! from the config file without code changes.

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// One remote listing source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Short identifier used in logs and the scrape-run log.
    pub id: String,
    /// Base URL of the site.
    pub base_url: String,
    /// Path of the listing page, joined onto `base_url`.
    #[serde(default = "default_listing_path")]
    pub listing_path: String,
    /// Selector for one listing item.
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
    /// Selector for the tournament name within an item.
    #[serde(default = "default_name_selector")]
    pub name_selector: String,
    /// Selector for the date text within an item.
    #[serde(default = "default_date_selector")]
    pub date_selector: String,
    /// Selector for the location text within an item.
    #[serde(default = "default_location_selector")]
    pub location_selector: String,
    /// Category assigned to records from this source. Listings rarely
    /// state one; defaults to 一般 when unset.
    #[serde(default)]
    pub default_category: Option<Category>,
}

impl SourceConfig {
    /// Full URL of the listing page.
    pub fn listing_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.listing_path
        )
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            id: "minton.jp".to_string(),
            base_url: "https://minton.jp".to_string(),
            listing_path: default_listing_path(),
            item_selector: default_item_selector(),
            name_selector: default_name_selector(),
            date_selector: default_date_selector(),
            location_selector: default_location_selector(),
            default_category: None,
        }
    }
}

fn default_listing_path() -> String {
    "/tournament".to_string()
}

fn default_item_selector() -> String {
    ".tournament-item".to_string()
}

fn default_name_selector() -> String {
    ".tournament-name".to_string()
}

fn default_date_selector() -> String {
    ".tournament-date".to_string()
}

fn default_location_selector() -> String {
    ".tournament-location".to_string()
}
