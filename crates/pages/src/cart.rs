//! Cart page: contents, totals, removal, the empty state.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use action_resilient::{
    normalize_price, poll_until, sum_prices, titles_match, wait_for_any_visible, wait_for_hidden,
    ActionError, CandidateResolver, CandidateSet, InteractionGuard, Navigator, ProbeResolver, Route,
};
use floracart_core_types::Presence;
use floracart_driver::{Driver, LoadState, Target};
use regex::Regex;
use tracing::{debug, instrument};

use crate::config::SiteConfig;
use crate::errors::PageError;
use crate::support::{children_set, read_text_with, set_from};

/// Wording the empty-cart notice must carry. Covers the Spanish notice
/// ("Tu carrito está actualmente vacío") and English fallbacks.
fn empty_notice_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)carrito|vac[íi]o|empty").expect("static pattern"))
}

/// One cart row.
#[derive(Clone, Debug)]
pub struct CartItem {
    pub name: String,
    /// Price as displayed, e.g. `$ 129.000`.
    pub price: String,
    pub quantity: String,
}

impl CartItem {
    pub fn price_value(&self) -> u64 {
        normalize_price(&self.price)
    }
}

pub struct CartPage {
    driver: Arc<dyn Driver>,
    config: Arc<SiteConfig>,
    resolver: ProbeResolver,
    guard: InteractionGuard,
    navigator: Navigator,
}

impl CartPage {
    pub fn new(driver: Arc<dyn Driver>, config: Arc<SiteConfig>) -> Self {
        let resolver = ProbeResolver::new(driver.clone(), config.timeouts.clone());
        let guard = InteractionGuard::new(driver.clone(), config.timeouts.clone());
        let navigator = Navigator::new(driver.clone(), config.timeouts.clone());
        Self {
            driver,
            config,
            resolver,
            guard,
            navigator,
        }
    }

    /// Cart table variants plus empty-notice variants: whichever shows up
    /// first means the cart page is rendered.
    fn arrival_targets(&self) -> Vec<Target> {
        let selectors = &self.config.selectors.cart;
        selectors
            .table
            .iter()
            .chain(selectors.empty_notice.iter())
            .map(|selector| Target::css(selector.as_str()))
            .collect()
    }

    /// Reach the cart: the mini-cart icon first, then each configured cart
    /// URL. Arrival means either the cart table or the empty notice rendered.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<(), PageError> {
        let mut routes = vec![Route::Click(CandidateSet::new(
            "cart icon",
            self.config.selectors.cart.icon.as_str(),
        ))];
        for path in &self.config.cart_paths {
            routes.push(Route::Goto(self.config.url_for(path)));
        }

        let targets = self.arrival_targets();
        let driver = self.driver.clone();
        self.navigator
            .navigate("cart page", &routes, || {
                let driver = driver.clone();
                let targets = targets.clone();
                async move {
                    for target in &targets {
                        if driver.is_visible(target, Duration::ZERO).await? {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
            })
            .await?;
        Ok(())
    }

    /// Wait until the cart contents (or the empty notice) are rendered. A
    /// load that never reaches `complete` is tolerated; visibility decides.
    pub async fn wait_until_loaded(&self) -> Result<(), PageError> {
        if let Err(err) = self
            .driver
            .wait_for_load(LoadState::Complete, self.config.timeouts.navigation())
            .await
        {
            debug!(
                state = LoadState::Complete.name(),
                error = %err,
                "load never completed, continuing on visibility"
            );
        }
        wait_for_any_visible(
            &self.driver,
            "cart contents",
            &self.arrival_targets(),
            &self.config.timeouts,
        )
        .await?;
        Ok(())
    }

    pub async fn item_count(&self) -> Result<usize, PageError> {
        let rows = Target::css(self.config.selectors.cart.items.as_str());
        Ok(self.driver.count(&rows).await?)
    }

    pub async fn is_empty(&self) -> Result<bool, PageError> {
        let notice = set_from("empty-cart notice", &self.config.selectors.cart.empty_notice);
        if self.resolver.resolve_optional(&notice).await?.is_some() {
            return Ok(true);
        }
        Ok(self.item_count().await? == 0)
    }

    async fn item_at(&self, index: usize) -> Result<CartItem, PageError> {
        let selectors = &self.config.selectors.cart;
        let row = Target::css(selectors.items.as_str()).nth(index);

        let name_set = children_set(&format!("cart row {index} name"), &row, &selectors.row_name);
        let name = self.resolver.read_text(&name_set).await?;

        let price_set =
            children_set(&format!("cart row {index} price"), &row, &selectors.row_price);
        let price = self.resolver.read_text(&price_set).await?;

        // Quantity lives in a form control; themes without one mean one unit.
        let quantity_set = children_set(
            &format!("cart row {index} quantity"),
            &row,
            &selectors.row_quantity,
        );
        let quantity = match self.resolver.resolve_optional(&quantity_set).await? {
            Some(resolution) => self
                .driver
                .input_value(&resolution.target)
                .await?
                .unwrap_or_default(),
            None => "1".to_string(),
        };

        Ok(CartItem {
            name,
            price,
            quantity,
        })
    }

    /// All cart rows, top to bottom.
    pub async fn items(&self) -> Result<Vec<CartItem>, PageError> {
        let count = self.item_count().await?;
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            items.push(self.item_at(index).await?);
        }
        Ok(items)
    }

    /// The row for a product, matched accent- and case-insensitively.
    pub async fn find_item(&self, name: &str) -> Result<CartItem, PageError> {
        let items = self.items().await?;
        let listed = if items.is_empty() {
            "no rows".to_string()
        } else {
            items
                .iter()
                .map(|item| item.name.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };
        items
            .into_iter()
            .find(|item| titles_match(&item.name, name))
            .ok_or_else(|| PageError::assertion("cart contents", name, listed))
    }

    /// Check a product is in the cart at the expected displayed price.
    /// Prices compare by normalized amount, so `$129.000` equals `$ 129.000`.
    pub async fn assert_item(&self, name: &str, expected_price: &str) -> Result<(), PageError> {
        let item = self.find_item(name).await?;
        if item.price_value() != normalize_price(expected_price) {
            return Err(PageError::assertion(
                format!("price of {name} in cart"),
                expected_price,
                item.price,
            ));
        }
        Ok(())
    }

    pub async fn subtotal_text(&self) -> Result<String, PageError> {
        let set = set_from("cart subtotal", &self.config.selectors.cart.subtotal);
        Ok(self.resolver.read_text(&set).await?)
    }

    pub async fn total_text(&self) -> Result<String, PageError> {
        let set = set_from("cart total", &self.config.selectors.cart.total);
        Ok(self.resolver.read_text(&set).await?)
    }

    /// Normalized sum of item prices, the amount the cart should display.
    pub fn expected_subtotal<S: AsRef<str>>(item_prices: &[S]) -> u64 {
        sum_prices(item_prices)
    }

    /// Check the displayed subtotal equals the sum of the given item prices,
    /// comparing normalized amounts.
    pub async fn assert_subtotal<S: AsRef<str>>(&self, item_prices: &[S]) -> Result<(), PageError> {
        let raw = self.subtotal_text().await?;
        let actual = normalize_price(&raw);
        let expected = Self::expected_subtotal(item_prices);
        if actual != expected {
            return Err(PageError::assertion(
                "cart subtotal",
                expected.to_string(),
                format!("{raw} ({actual})"),
            ));
        }
        Ok(())
    }

    /// Whether any row bears the name. Cheap single-pass scan used by the
    /// post-removal poll.
    async fn name_present(&self, name: &str) -> Result<bool, ActionError> {
        let selectors = &self.config.selectors.cart;
        let rows = Target::css(selectors.items.as_str());
        let count = self.driver.count(&rows).await?;
        for index in 0..count {
            let row = rows.clone().nth(index);
            let set = children_set("cart row name", &row, &selectors.row_name);
            if let Some(resolution) = self.resolver.resolve_optional(&set).await? {
                let text = self.driver.text_content(&resolution.target).await?;
                if titles_match(text.unwrap_or_default().trim(), name) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Remove a product's row and wait until it is gone.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, name: &str) -> Result<(), PageError> {
        let selectors = &self.config.selectors.cart;
        let count = self.item_count().await?;
        for index in 0..count {
            let item = self.item_at(index).await?;
            if !titles_match(&item.name, name) {
                continue;
            }
            let row = Target::css(selectors.items.as_str()).nth(index);
            let remove_set =
                children_set(&format!("remove control for {name}"), &row, &selectors.row_remove);
            let resolution = self.resolver.resolve(&remove_set).await?;
            self.guard.click(&resolution.target).await?;

            let timeouts = &self.config.timeouts;
            wait_for_hidden(
                &self.driver,
                "processing overlay",
                &Target::css(selectors.processing_overlay.as_str()),
                timeouts,
            )
            .await?;
            poll_until(
                "cart row removal",
                timeouts.readiness(),
                timeouts.poll_interval(),
                || async { Ok(!self.name_present(name).await?) },
            )
            .await?;
            return Ok(());
        }
        Err(PageError::assertion("cart contents", name, "no matching row"))
    }

    /// Check the cart is empty and says so: no rows, and an empty notice
    /// with the expected wording.
    pub async fn assert_empty(&self) -> Result<(), PageError> {
        let count = self.item_count().await?;
        if count != 0 {
            return Err(PageError::assertion("cart rows", "none", count.to_string()));
        }
        let notice = set_from("empty-cart notice", &self.config.selectors.cart.empty_notice);
        let text = self.resolver.read_text_or(&notice, "").await?;
        if !empty_notice_pattern().is_match(&text) {
            return Err(PageError::assertion(
                "empty-cart notice",
                "carrito/vacío/empty wording",
                text,
            ));
        }
        Ok(())
    }

    /// Check the cart visibly holds something: the table rendered, at least
    /// one row, and a positive subtotal. Reports the row count.
    pub async fn assert_not_empty(&self) -> Result<usize, PageError> {
        let table = set_from("cart table", &self.config.selectors.cart.table);
        self.resolver.resolve(&table).await?;
        let count = self.item_count().await?;
        if count == 0 {
            return Err(PageError::assertion("cart rows", "at least one", "none"));
        }
        let subtotal = self.subtotal_text().await?;
        if normalize_price(&subtotal) == 0 {
            return Err(PageError::assertion("cart subtotal", "a positive amount", subtotal));
        }
        Ok(count)
    }

    /// Raw empty-notice text; absent reads as "".
    pub async fn empty_notice_text(&self) -> Result<String, PageError> {
        let set = set_from("empty-cart notice", &self.config.selectors.cart.empty_notice);
        Ok(read_text_with(&self.resolver, &set, Presence::Optional, "").await?)
    }

    /// Cart counter near the icon. Themes without one read as "0".
    pub async fn counter_text(&self) -> Result<String, PageError> {
        let set = set_from("cart counter", &self.config.selectors.cart.counter);
        Ok(read_text_with(&self.resolver, &set, Presence::Optional, "0").await?)
    }

    /// Set a row's quantity and submit the update form.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, name: &str, quantity: u32) -> Result<(), PageError> {
        let selectors = &self.config.selectors.cart;
        let count = self.item_count().await?;
        for index in 0..count {
            let item = self.item_at(index).await?;
            if !titles_match(&item.name, name) {
                continue;
            }
            let row = Target::css(selectors.items.as_str()).nth(index);
            let quantity_set = children_set(
                &format!("quantity field for {name}"),
                &row,
                &selectors.row_quantity,
            );
            let resolution = self.resolver.resolve(&quantity_set).await?;
            self.guard.fill(&resolution.target, &quantity.to_string()).await?;
            self.guard
                .click(&Target::css(selectors.update_button.as_str()))
                .await?;
            wait_for_hidden(
                &self.driver,
                "processing overlay",
                &Target::css(selectors.processing_overlay.as_str()),
                &self.config.timeouts,
            )
            .await?;
            self.wait_until_loaded().await?;
            return Ok(());
        }
        Err(PageError::assertion("cart contents", name, "no matching row"))
    }

    #[instrument(skip(self))]
    pub async fn proceed_to_checkout(&self) -> Result<(), PageError> {
        let button = Target::css(self.config.selectors.cart.checkout_button.as_str());
        self.guard.click(&button).await?;
        self.driver
            .wait_for_load(LoadState::DomContentLoaded, self.config.timeouts.navigation())
            .await?;
        Ok(())
    }

    /// Full-page screenshot for failure triage.
    pub async fn capture(&self) -> Result<Vec<u8>, PageError> {
        Ok(self.driver.screenshot().await?)
    }
}
