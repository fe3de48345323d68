//! Category page: product listing, titles, tile summaries.

use std::sync::Arc;

use action_resilient::{
    normalize_price, slug, titles_match, wait_for_any_visible, CandidateResolver, InteractionGuard,
    ProbeResolver,
};
use floracart_core_types::Presence;
use floracart_driver::{Driver, LoadState, Target};
use tracing::{debug, instrument};

use crate::config::SiteConfig;
use crate::errors::PageError;
use crate::support::{children_set, read_text_with, set_from};

/// What a listing tile says about a product, before its page is opened.
#[derive(Clone, Debug)]
pub struct ProductSummary {
    /// Tile position in the listing (0-based).
    pub index: usize,
    pub name: String,
    /// Price as displayed, e.g. `$ 129.000`.
    pub price: String,
}

impl ProductSummary {
    /// Displayed price as an integer amount.
    pub fn price_value(&self) -> u64 {
        normalize_price(&self.price)
    }
}

pub struct CategoryPage {
    driver: Arc<dyn Driver>,
    config: Arc<SiteConfig>,
    resolver: ProbeResolver,
    guard: InteractionGuard,
}

impl CategoryPage {
    pub fn new(driver: Arc<dyn Driver>, config: Arc<SiteConfig>) -> Self {
        let resolver = ProbeResolver::new(driver.clone(), config.timeouts.clone());
        let guard = InteractionGuard::new(driver.clone(), config.timeouts.clone());
        Self {
            driver,
            config,
            resolver,
            guard,
        }
    }

    /// Wait until the listing grid (or the empty-category notice) is up.
    #[instrument(skip(self))]
    pub async fn wait_until_loaded(&self) -> Result<(), PageError> {
        self.driver
            .wait_for_load(LoadState::DomContentLoaded, self.config.timeouts.navigation())
            .await?;
        let selectors = &self.config.selectors.category;
        let mut targets: Vec<Target> = selectors
            .grid
            .iter()
            .map(|selector| Target::css(selector.as_str()))
            .collect();
        targets.push(Target::css(selectors.empty_notice.as_str()));
        wait_for_any_visible(&self.driver, "category listing", &targets, &self.config.timeouts)
            .await?;
        Ok(())
    }

    pub async fn title(&self) -> Result<String, PageError> {
        let set = set_from("category title", &self.config.selectors.category.title);
        Ok(self.resolver.read_text(&set).await?)
    }

    /// Check the page heading against the category name.
    ///
    /// Themes that restyle or drop the heading still pass when the browser
    /// URL carries the category slug.
    pub async fn assert_title(&self, expected: &str) -> Result<(), PageError> {
        let set = set_from("category title", &self.config.selectors.category.title);
        let actual = self.resolver.read_text_or(&set, "").await?;
        if titles_match(&actual, expected) {
            return Ok(());
        }
        let url = self.driver.current_url().await?;
        if url.contains(&slug(expected)) {
            return Ok(());
        }
        Err(PageError::assertion("category title", expected, actual))
    }

    pub async fn product_count(&self) -> Result<usize, PageError> {
        let items = Target::css(self.config.selectors.category.items.as_str());
        Ok(self.driver.count(&items).await?)
    }

    /// Fail on an empty listing; the first tile must also read as a sane
    /// product (name plus a priced tile). Reports how many tiles there are.
    pub async fn assert_has_products(&self) -> Result<usize, PageError> {
        let count = self.product_count().await?;
        if count == 0 {
            return Err(PageError::assertion("listed products", "at least one", "none"));
        }
        let first = self.product_summary(0).await?;
        if first.name.trim().is_empty() {
            return Err(PageError::assertion("first listed product", "a name", "blank"));
        }
        Ok(count)
    }

    /// Read one listing tile. Missing name and price cells degrade to
    /// placeholders instead of failing; a price without a currency sign is a
    /// broken tile and fails.
    pub async fn product_summary(&self, index: usize) -> Result<ProductSummary, PageError> {
        let selectors = &self.config.selectors.category;
        let item = Target::css(selectors.items.as_str()).nth(index);

        let name_set = children_set(&format!("listing item {index} name"), &item, &selectors.item_name);
        let fallback_name = format!("Producto {}", index + 1);
        let name =
            read_text_with(&self.resolver, &name_set, Presence::Optional, &fallback_name).await?;

        let price_set =
            children_set(&format!("listing item {index} price"), &item, &selectors.item_price);
        let price = read_text_with(&self.resolver, &price_set, Presence::Optional, "$0").await?;
        if !price.contains('$') {
            return Err(PageError::assertion(
                format!("price of listing item {index}"),
                "a $ amount",
                price,
            ));
        }

        Ok(ProductSummary { index, name, price })
    }

    /// First two tiles with distinct names. When the second tile repeats the
    /// first name, later tiles are scanned for a different one.
    pub async fn pick_two_distinct(&self) -> Result<(ProductSummary, ProductSummary), PageError> {
        let count = self.assert_has_products().await?;
        if count < 2 {
            return Err(PageError::assertion(
                "listed products",
                "at least two",
                count.to_string(),
            ));
        }
        let first = self.product_summary(0).await?;
        let mut second = self.product_summary(1).await?;
        if titles_match(&second.name, &first.name) {
            for index in 2..count {
                let candidate = self.product_summary(index).await?;
                if !titles_match(&candidate.name, &first.name) {
                    second = candidate;
                    break;
                }
            }
        }
        Ok((first, second))
    }

    /// Open a tile's product page, clicking its link when one resolves and
    /// the tile itself otherwise.
    #[instrument(skip(self))]
    pub async fn open_product(&self, index: usize) -> Result<(), PageError> {
        let selectors = &self.config.selectors.category;
        let item = Target::css(selectors.items.as_str()).nth(index);
        let link_set =
            children_set(&format!("listing item {index} link"), &item, &selectors.item_link);
        match self.resolver.resolve_optional(&link_set).await? {
            Some(resolution) => {
                let href = self.driver.attribute(&resolution.target, "href").await?;
                debug!(target = %resolution.target, href = href.as_deref().unwrap_or(""), "opening product");
                self.guard.click(&resolution.target).await?;
            }
            None => self.guard.click(&item).await?,
        }
        Ok(())
    }
}
