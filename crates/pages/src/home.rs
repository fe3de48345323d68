//! Home page: primary menu, category navigation, mini-cart counter.

use std::sync::Arc;

use action_resilient::{
    titles_match, wait_for_any_visible, CandidateSet, Navigator, ProbeResolver, Route,
};
use floracart_core_types::Presence;
use floracart_driver::{Driver, LoadState, Target};
use tracing::instrument;

use crate::config::SiteConfig;
use crate::errors::PageError;
use crate::support::{read_text_with, set_from};

pub struct HomePage {
    driver: Arc<dyn Driver>,
    config: Arc<SiteConfig>,
    resolver: ProbeResolver,
    navigator: Navigator,
}

impl HomePage {
    pub fn new(driver: Arc<dyn Driver>, config: Arc<SiteConfig>) -> Self {
        let resolver = ProbeResolver::new(driver.clone(), config.timeouts.clone());
        let navigator = Navigator::new(driver.clone(), config.timeouts.clone());
        Self {
            driver,
            config,
            resolver,
            navigator,
        }
    }

    /// Load the storefront home and wait for the primary menu to render.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<(), PageError> {
        self.driver.navigate(self.config.base_url.as_str()).await?;
        self.driver
            .wait_for_load(LoadState::DomContentLoaded, self.config.timeouts.navigation())
            .await?;
        wait_for_any_visible(
            &self.driver,
            "primary menu",
            &[Target::css(self.config.selectors.home.primary_menu.as_str())],
            &self.config.timeouts,
        )
        .await?;
        Ok(())
    }

    /// Reach a category by display name.
    ///
    /// Routes, in preference order: the menu link scoped to the primary menu,
    /// any link on the page pointing at the category path, and finally the
    /// category URL itself. Arrival is confirmed by the browser URL.
    #[instrument(skip(self))]
    pub async fn navigate_to_category(&self, name: &str) -> Result<(), PageError> {
        let path = self.config.category_path(name);
        let menu_link = format!(
            "{} a[href*=\"{}\"]",
            self.config.selectors.home.primary_menu, path
        );
        let any_link = format!("a[href*=\"{path}\"]");
        let routes = vec![
            Route::Click(CandidateSet::new(format!("menu link to {name}"), menu_link).or(any_link)),
            Route::Goto(self.config.url_for(&path)),
        ];

        let segment = path
            .trim_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let driver = self.driver.clone();
        self.navigator
            .navigate(&format!("category {name}"), &routes, || {
                let driver = driver.clone();
                let segment = segment.clone();
                async move { Ok(driver.current_url().await?.contains(&segment)) }
            })
            .await?;
        Ok(())
    }

    /// Visible primary-menu entries, in document order, blank ones dropped.
    pub async fn menu_items(&self) -> Result<Vec<String>, PageError> {
        let links = Target::css(self.config.selectors.home.menu_links.as_str());
        let count = self.driver.count(&links).await?;
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let text = self.driver.text_content(&links.clone().nth(index)).await?;
            let text = text.unwrap_or_default().trim().to_string();
            if !text.is_empty() {
                items.push(text);
            }
        }
        Ok(items)
    }

    /// Check that every expected entry appears in the menu, accent- and
    /// case-insensitively.
    pub async fn assert_menu_contains(&self, expected: &[&str]) -> Result<(), PageError> {
        let items = self.menu_items().await?;
        for want in expected {
            if !items.iter().any(|item| titles_match(item, want)) {
                return Err(PageError::assertion(
                    "primary menu entries",
                    *want,
                    items.join(", "),
                ));
            }
        }
        Ok(())
    }

    /// Mini-cart item counter. Themes without one read as "0".
    pub async fn cart_counter_text(&self) -> Result<String, PageError> {
        let set = set_from("cart counter", &self.config.selectors.home.cart_counter);
        Ok(read_text_with(&self.resolver, &set, Presence::Optional, "0").await?)
    }
}
