//! Product page: details, availability, add to cart, notices.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use action_resilient::{
    normalize_price, poll_until, CandidateResolver, CandidateSet, InteractionGuard, ProbeResolver,
};
use floracart_core_types::Presence;
use floracart_driver::{Driver, LoadState, Target};
use regex::Regex;
use tracing::{debug, instrument};

use crate::config::SiteConfig;
use crate::errors::PageError;
use crate::support::{read_text_with, set_from};

/// Wording a success banner must carry after an add to cart. Spanish themes
/// say "añadido" or "agregado", English ones "added".
fn added_notice_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)añadido|agregado|added").expect("static pattern"))
}

#[derive(Clone, Debug)]
pub struct ProductDetails {
    pub title: String,
    /// Price as displayed, e.g. `$ 129.000`.
    pub price: String,
    pub description: String,
}

impl ProductDetails {
    pub fn price_value(&self) -> u64 {
        normalize_price(&self.price)
    }
}

pub struct ProductPage {
    driver: Arc<dyn Driver>,
    config: Arc<SiteConfig>,
    resolver: ProbeResolver,
    guard: InteractionGuard,
}

impl ProductPage {
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

    /// Wait until title, price and the add button are all up, then confirm
    /// the URL is a single-product page. A network that never goes idle is
    /// tolerated; DOM readiness decides.
    #[instrument(skip(self))]
    pub async fn wait_until_loaded(&self) -> Result<(), PageError> {
        let timeouts = &self.config.timeouts;
        self.driver
            .wait_for_load(LoadState::DomContentLoaded, timeouts.navigation())
            .await?;
        if let Err(err) = self
            .driver
            .wait_for_load(LoadState::NetworkIdle, timeouts.navigation())
            .await
        {
            debug!(
                state = LoadState::NetworkIdle.name(),
                error = %err,
                "network never settled, continuing on DOM readiness"
            );
        }

        let selectors = &self.config.selectors.product;
        let targets = [
            Target::css(selectors.title.as_str()),
            Target::css(selectors.price.as_str()),
            Target::css(selectors.add_button.as_str()),
        ];
        let driver = self.driver.clone();
        poll_until(
            "product page",
            timeouts.readiness(),
            timeouts.poll_interval(),
            || {
                let driver = driver.clone();
                let targets = targets.clone();
                async move {
                    for target in &targets {
                        if !driver.is_visible(target, Duration::ZERO).await? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
            },
        )
        .await?;

        let url = self.driver.current_url().await?;
        if !url.contains(&self.config.product_path_fragment) {
            return Err(PageError::assertion(
                "product page URL",
                format!("contains {}", self.config.product_path_fragment),
                url,
            ));
        }
        Ok(())
    }

    /// Title and price are required; the short description degrades to empty.
    pub async fn details(&self) -> Result<ProductDetails, PageError> {
        let selectors = &self.config.selectors.product;
        let title = self
            .resolver
            .read_text(&CandidateSet::new("product title", selectors.title.as_str()))
            .await?;
        let price = self
            .resolver
            .read_text(&CandidateSet::new("product price", selectors.price.as_str()))
            .await?;
        let description_set =
            CandidateSet::new("product description", selectors.description.as_str());
        let description =
            read_text_with(&self.resolver, &description_set, Presence::Optional, "").await?;
        Ok(ProductDetails {
            title,
            price,
            description,
        })
    }

    /// Whether the add-to-cart button is both visible and enabled.
    pub async fn is_available(&self) -> Result<bool, PageError> {
        let button = Target::css(self.config.selectors.product.add_button.as_str());
        let probe = self.config.timeouts.probe();
        Ok(self.driver.is_visible(&button, probe).await?
            && self.driver.is_enabled(&button, probe).await?)
    }

    /// Set the quantity field when the theme renders one. Reports whether it
    /// did.
    pub async fn set_quantity(&self, quantity: u32) -> Result<bool, PageError> {
        let set = CandidateSet::new(
            "quantity field",
            self.config.selectors.product.quantity.as_str(),
        );
        match self.resolver.resolve_optional(&set).await? {
            Some(resolution) => {
                self.guard.fill(&resolution.target, &quantity.to_string()).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_to_cart(&self) -> Result<(), PageError> {
        let button = Target::css(self.config.selectors.product.add_button.as_str());
        self.guard.click(&button).await?;
        Ok(())
    }

    /// Look for the post-add banner.
    ///
    /// A banner with added wording returns its text; a banner saying anything
    /// else, or a visible error notice, fails. No banner at all is `None`:
    /// some themes redirect instead of confirming inline, and the cart page
    /// is the real arbiter.
    pub async fn confirm_added(&self) -> Result<Option<String>, PageError> {
        let selectors = &self.config.selectors.product;
        let notice = CandidateSet::new("add-to-cart notice", selectors.success_notice.as_str());
        if let Some(resolution) = self.resolver.resolve_optional(&notice).await? {
            let text = self.driver.text_content(&resolution.target).await?;
            let text = text.unwrap_or_default().trim().to_string();
            if added_notice_pattern().is_match(&text) {
                return Ok(Some(text));
            }
            return Err(PageError::assertion(
                "add-to-cart notice",
                "added/añadido/agregado wording",
                text,
            ));
        }

        let errors = set_from("add-to-cart errors", &selectors.error_notices);
        if let Some(resolution) = self.resolver.resolve_optional(&errors).await? {
            let text = self.driver.text_content(&resolution.target).await?;
            return Err(PageError::assertion(
                "add to cart",
                "success",
                text.unwrap_or_default().trim(),
            ));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_resilient::{ActionError, ActionTimeouts};
    use floracart_driver::stub::{StubDriver, StubElement};

    fn fast_config() -> Arc<SiteConfig> {
        let mut config = SiteConfig::default();
        config.timeouts = ActionTimeouts {
            probe_ms: 10,
            interact_ms: 10,
            readiness_ms: 50,
            poll_interval_ms: 10,
            navigation_ms: 10,
        };
        Arc::new(config)
    }

    fn seed_product(driver: &StubDriver, title: &str, price: &str) {
        driver.insert(
            &Target::css("h1.product_title.entry-title"),
            StubElement::visible().with_text(title),
        );
        driver.insert(
            &Target::css(".summary .price .woocommerce-Price-amount"),
            StubElement::visible().with_text(price),
        );
        driver.insert(
            &Target::css("button.single_add_to_cart_button"),
            StubElement::visible(),
        );
    }

    #[tokio::test]
    async fn test_wait_until_loaded_requires_product_url() {
        let driver = Arc::new(StubDriver::new());
        seed_product(&driver, "Ramo", "$ 10.000");
        driver.set_url("https://shop.test/cart/");

        let page = ProductPage::new(driver.clone(), fast_config());
        let err = page.wait_until_loaded().await.unwrap_err();
        assert!(err.is_assertion());

        driver.set_url("https://shop.test/product/ramo/");
        page.wait_until_loaded().await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_until_loaded_times_out_without_price() {
        let driver = Arc::new(StubDriver::new());
        driver.insert(
            &Target::css("h1.product_title.entry-title"),
            StubElement::visible(),
        );
        driver.insert(
            &Target::css("button.single_add_to_cart_button"),
            StubElement::visible(),
        );

        let page = ProductPage::new(driver, fast_config());
        let err = page.wait_until_loaded().await.unwrap_err();
        assert!(matches!(
            err,
            PageError::Action(ActionError::ReadinessTimeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_details_reads_title_price_and_optional_description() {
        let driver = Arc::new(StubDriver::new());
        seed_product(&driver, "Ramo Primavera", "$ 129.000");

        let page = ProductPage::new(driver, fast_config());
        let details = page.details().await.unwrap();
        assert_eq!(details.title, "Ramo Primavera");
        assert_eq!(details.price_value(), 129_000);
        assert_eq!(details.description, "");
    }

    #[tokio::test]
    async fn test_add_to_cart_refuses_disabled_button() {
        let driver = Arc::new(StubDriver::new());
        driver.insert(
            &Target::css("button.single_add_to_cart_button"),
            StubElement::visible().disabled(),
        );

        let page = ProductPage::new(driver, fast_config());
        let err = page.add_to_cart().await.unwrap_err();
        assert!(matches!(
            err,
            PageError::Action(ActionError::ElementNotInteractable { .. })
        ));
    }

    #[tokio::test]
    async fn test_confirm_added_accepts_spanish_wording() {
        let driver = Arc::new(StubDriver::new());
        driver.insert(
            &Target::css(".woocommerce-message"),
            StubElement::visible().with_text("\"Ramo\" ha sido añadido a tu carrito."),
        );

        let page = ProductPage::new(driver, fast_config());
        let notice = page.confirm_added().await.unwrap();
        assert!(notice.unwrap().contains("añadido"));
    }

    #[tokio::test]
    async fn test_confirm_added_without_banner_is_none() {
        let driver = Arc::new(StubDriver::new());
        let page = ProductPage::new(driver, fast_config());
        assert!(page.confirm_added().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_confirm_added_fails_on_error_notice() {
        let driver = Arc::new(StubDriver::new());
        driver.insert(
            &Target::css(".woocommerce-error"),
            StubElement::visible().with_text("No se pudo añadir al carrito."),
        );

        let page = ProductPage::new(driver, fast_config());
        let err = page.confirm_added().await.unwrap_err();
        assert!(err.is_assertion());
    }

    #[tokio::test]
    async fn test_set_quantity_reports_absence() {
        let driver = Arc::new(StubDriver::new());
        let page = ProductPage::new(driver.clone(), fast_config());
        assert!(!page.set_quantity(2).await.unwrap());

        driver.insert(
            &Target::css(".quantity input[type=\"number\"]"),
            StubElement::visible().with_value("1"),
        );
        assert!(page.set_quantity(2).await.unwrap());
        assert_eq!(
            driver.fills(),
            vec![(".quantity input[type=\"number\"]".to_string(), "2".to_string())]
        );
    }
}
