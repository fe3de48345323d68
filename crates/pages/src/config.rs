//! Site configuration: base URL, category routes, timeouts, selectors.

use std::collections::BTreeMap;
use std::path::Path;

use action_resilient::{slug, ActionTimeouts};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Everything the page objects need to know about the site under test.
///
/// Constructed explicitly and passed in, never read from globals; the YAML
/// form lets a run point the same flows at a staging host or a different
/// theme's selector catalogue.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: Url,

    /// Category display name → site path.
    pub category_paths: BTreeMap<String, String>,

    /// Cart URL paths, tried in order after the cart icon.
    pub cart_paths: Vec<String>,

    /// URL fragment identifying a single-product page.
    pub product_path_fragment: String,

    pub timeouts: ActionTimeouts,

    pub selectors: crate::selectors::SiteSelectors,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut category_paths = BTreeMap::new();
        category_paths.insert("Amor".to_string(), "/product-category/amor/".to_string());
        category_paths.insert(
            "Cumpleaños".to_string(),
            "/product-category/cumpleanos/".to_string(),
        );
        Self {
            base_url: Url::parse("https://www.floristeriamundoflor.com/")
                .expect("literal base URL"),
            category_paths,
            cart_paths: vec!["/cart/".to_string(), "/carrito/".to_string()],
            product_path_fragment: "/product/".to_string(),
            timeouts: ActionTimeouts::default(),
            selectors: crate::selectors::SiteSelectors::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    /// Absolute URL for a site path.
    pub fn url_for(&self, path: &str) -> String {
        self.base_url
            .join(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| {
                format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
            })
    }

    /// Site path of a category, by accent-insensitive display name; unknown
    /// names derive the conventional path from their slug.
    pub fn category_path(&self, name: &str) -> String {
        let wanted = slug(name);
        self.category_paths
            .iter()
            .find(|(key, _)| slug(key) == wanted)
            .map(|(_, path)| path.clone())
            .unwrap_or_else(|| format!("/product-category/{wanted}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_path_lookup_is_accent_insensitive() {
        let config = SiteConfig::default();
        assert_eq!(config.category_path("Cumpleaños"), "/product-category/cumpleanos/");
        assert_eq!(config.category_path("cumpleanos"), "/product-category/cumpleanos/");
        assert_eq!(config.category_path("Condolencias"), "/product-category/condolencias/");
    }

    #[test]
    fn test_url_for_joins_paths() {
        let config = SiteConfig::default();
        assert_eq!(
            config.url_for("/cart/"),
            "https://www.floristeriamundoflor.com/cart/"
        );
    }

    #[test]
    fn test_yaml_overrides() {
        let config = SiteConfig::from_yaml_str(
            r#"
base_url: "https://staging.example.test/"
timeouts:
  probe_ms: 1000
  interact_ms: 2000
  readiness_ms: 5000
  poll_interval_ms: 250
  navigation_ms: 10000
"#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://staging.example.test/");
        assert_eq!(config.timeouts.probe_ms, 1000);
        // Defaults still apply to what the file leaves out.
        assert_eq!(config.cart_paths, vec!["/cart/", "/carrito/"]);
    }
}
