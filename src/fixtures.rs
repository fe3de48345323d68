//! Shared scenario data.
//!
//! Defaults describe the reference storefront (a Colombian flower shop); a
//! JSON override points the same scenarios at another catalogue.

use serde::{Deserialize, Serialize};

/// Categories the scenarios browse.
pub const CATEGORIES: [&str; 2] = ["Amor", "Cumpleaños"];

/// Words one of which the empty-cart notice must carry.
pub const EMPTY_CART_WORDS: [&str; 4] = ["carrito", "vacío", "vacio", "empty"];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteData {
    /// Menu entries the home page must show.
    pub menu_entries: Vec<String>,
    /// Category used by the subtotal scenario.
    pub subtotal_category: String,
    /// Category used by the add/remove scenario.
    pub removal_category: String,
}

impl Default for SuiteData {
    fn default() -> Self {
        Self {
            menu_entries: CATEGORIES.iter().map(|s| s.to_string()).collect(),
            subtotal_category: "Amor".to_string(),
            removal_category: "Cumpleaños".to_string(),
        }
    }
}

impl SuiteData {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
