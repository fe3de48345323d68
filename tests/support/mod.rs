//! Scripted storefront simulator for the scenario tests.
//!
//! Unlike the per-element stub driver, the simulator models the shop itself:
//! a catalogue of categories and products, the current page, and a stateful
//! cart. Driver calls are answered from that model, so a whole browse → add →
//! verify → remove flow runs against it without a browser.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use floracart_core_types::SessionId;
use floracart_driver::{Driver, DriverError, LoadState, Target};
use tracing::debug;
use url::Url;

#[derive(Clone, Copy, Debug)]
pub struct Product {
    pub name: &'static str,
    pub price: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Category {
    pub title: &'static str,
    pub slug: &'static str,
    pub products: &'static [Product],
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Location {
    Home,
    Category(usize),
    Product { category: usize, index: usize },
    Cart,
}

struct SimState {
    location: Location,
    history: Vec<Location>,
    cart: Vec<Product>,
    /// Inline banner on the product page after an add.
    notice: Option<String>,
    /// When set, clicking any category link fails at the driver level.
    broken_menu_links: bool,
}

/// What a simulated element answers with.
struct Node {
    text: Option<String>,
    value: Option<String>,
    enabled: bool,
}

impl Node {
    fn bare() -> Self {
        Self {
            text: None,
            value: None,
            enabled: true,
        }
    }

    fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            value: None,
            enabled: true,
        }
    }

    fn with_value(value: impl Into<String>) -> Self {
        Self {
            text: None,
            value: Some(value.into()),
            enabled: true,
        }
    }
}

const AMOR_PRODUCTS: &[Product] = &[
    Product {
        name: "Ramo de 24 Rosas",
        price: "$ 129.000",
    },
    Product {
        name: "Orquídea Premium",
        price: "$ 45.500",
    },
    Product {
        name: "Caja de Rosas y Lirios",
        price: "$ 98.000",
    },
];

const CUMPLE_PRODUCTS: &[Product] = &[
    Product {
        name: "Desayuno Sorpresa",
        price: "$ 85.000",
    },
    Product {
        name: "Ramo de Girasoles",
        price: "$ 65.000",
    },
];

const EMPTY_CART_NOTICE: &str = "Tu carrito está actualmente vacío.";

pub struct StorefrontSim {
    session: SessionId,
    catalog: Vec<Category>,
    state: Mutex<SimState>,
}

impl StorefrontSim {
    /// The reference flower shop: two categories, fixed catalogue.
    pub fn flower_shop() -> Self {
        Self::with_catalog(vec![
            Category {
                title: "Amor",
                slug: "amor",
                products: AMOR_PRODUCTS,
            },
            Category {
                title: "Cumpleaños",
                slug: "cumpleanos",
                products: CUMPLE_PRODUCTS,
            },
        ])
    }

    pub fn with_catalog(catalog: Vec<Category>) -> Self {
        let session = SessionId::new();
        debug!(%session, categories = catalog.len(), "storefront simulator up");
        Self {
            session,
            catalog,
            state: Mutex::new(SimState {
                location: Location::Home,
                history: Vec::new(),
                cart: Vec::new(),
                notice: None,
                broken_menu_links: false,
            }),
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Make every category-link click fail at the driver level, forcing the
    /// direct-URL navigation route.
    pub fn break_menu_links(&self) {
        self.lock().broken_menu_links = true;
    }

    pub fn cart_len(&self) -> usize {
        self.lock().cart.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().expect("simulator state poisoned")
    }

    fn category_by_slug(&self, slug: &str) -> Option<usize> {
        self.catalog.iter().position(|c| c.slug == slug)
    }

    /// The category slug a link selector points at, if it is one.
    fn linked_category(&self, selector: &str) -> Option<usize> {
        let start = selector.find("/product-category/")? + "/product-category/".len();
        let rest = &selector[start..];
        let end = rest.find('/').unwrap_or(rest.len());
        self.category_by_slug(&rest[..end])
    }

    fn go(&self, state: &mut SimState, location: Location) {
        state.history.push(state.location);
        state.location = location;
        state.notice = None;
    }

    fn url_of(&self, location: Location) -> String {
        const BASE: &str = "https://sim.floristeria.test";
        match location {
            Location::Home => format!("{BASE}/"),
            Location::Category(i) => {
                format!("{BASE}/product-category/{}/", self.catalog[i].slug)
            }
            Location::Product { category, index } => {
                let name = self.catalog[category].products[index].name;
                let slug: String = name
                    .to_lowercase()
                    .chars()
                    .map(|c| if c.is_alphanumeric() { c } else { '-' })
                    .collect();
                format!("{BASE}/product/{slug}/")
            }
            Location::Cart => format!("{BASE}/cart/"),
        }
    }

    fn formatted_subtotal(&self, state: &SimState) -> String {
        let amount: u64 = state
            .cart
            .iter()
            .map(|p| action_resilient::normalize_price(p.price))
            .sum();
        format_cop(amount)
    }

    /// Answer a query against the current page model.
    fn query(&self, state: &SimState, target: &Target) -> Option<Node> {
        let sel = target.selector.as_str();

        // Affordances present on every page.
        if sel == ".mini-cart" {
            return Some(Node::bare());
        }
        if sel.starts_with(".mini-cart-items") || sel == ".cart-contents-count" {
            return Some(Node::with_text(state.cart.len().to_string()));
        }
        if sel.contains("a[href*=") {
            return self.linked_category(sel).map(|_| Node::bare());
        }

        match state.location {
            Location::Home => match sel {
                "ul#primary-menu" => Some(Node::bare()),
                "ul#primary-menu a" => {
                    let index = target.index.unwrap_or(0);
                    self.catalog
                        .get(index)
                        .map(|c| Node::with_text(c.title))
                }
                _ => None,
            },
            Location::Category(ci) => {
                let category = &self.catalog[ci];
                if sel.starts_with("h1") {
                    return Some(Node::with_text(category.title));
                }
                match sel {
                    ".products" => (!category.products.is_empty()).then(Node::bare),
                    ".woocommerce-info" => category
                        .products
                        .is_empty()
                        .then(|| Node::with_text("No se encontraron productos.")),
                    ".product" => {
                        let index = target.index.unwrap_or(0);
                        let product = category.products.get(index)?;
                        match target.child.as_deref() {
                            None => Some(Node::bare()),
                            Some(child) if child.contains("title") => {
                                Some(Node::with_text(product.name))
                            }
                            Some(child) if child.contains("Price-amount") => {
                                Some(Node::with_text(product.price))
                            }
                            Some(child) if child.contains("product__link") => Some(Node::bare()),
                            Some(_) => None,
                        }
                    }
                    _ => None,
                }
            }
            Location::Product { category, index } => {
                let product = &self.catalog[category].products[index];
                match sel {
                    "h1.product_title.entry-title" => Some(Node::with_text(product.name)),
                    ".summary .price .woocommerce-Price-amount" => {
                        Some(Node::with_text(product.price))
                    }
                    "button.single_add_to_cart_button" => Some(Node::bare()),
                    ".woocommerce-product-details__short-description" => {
                        Some(Node::with_text("Arreglo floral preparado el mismo día."))
                    }
                    ".quantity input[type=\"number\"]" => Some(Node::with_value("1")),
                    ".woocommerce-message" => state.notice.as_deref().map(Node::with_text),
                    _ => None,
                }
            }
            Location::Cart => {
                if sel.contains("shop_table") || sel.contains("woocommerce-cart-form") {
                    return (!state.cart.is_empty()).then(Node::bare);
                }
                if sel.contains("cart-subtotal") || sel.contains("order-total") {
                    return (!state.cart.is_empty())
                        .then(|| Node::with_text(self.formatted_subtotal(state)));
                }
                match sel {
                    ".woocommerce-info" => state
                        .cart
                        .is_empty()
                        .then(|| Node::with_text(EMPTY_CART_NOTICE)),
                    "tr.cart_item" => {
                        let index = target.index.unwrap_or(0);
                        let product = state.cart.get(index)?;
                        match target.child.as_deref() {
                            None => Some(Node::bare()),
                            Some(child) if child.contains("product-name") => {
                                Some(Node::with_text(product.name))
                            }
                            Some(child) if child.contains("product-price") => {
                                Some(Node::with_text(product.price))
                            }
                            Some(child) if child.contains("product-quantity") => {
                                Some(Node::with_value("1"))
                            }
                            Some(child) if child.contains("remove") => Some(Node::bare()),
                            Some(_) => None,
                        }
                    }
                    "[name=\"update_cart\"]" | ".checkout-button" => {
                        (!state.cart.is_empty()).then(Node::bare)
                    }
                    _ => None,
                }
            }
        }
    }
}

fn format_cop(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("$ {grouped}")
}

#[async_trait]
impl Driver for StorefrontSim {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let parsed =
            Url::parse(url).map_err(|err| DriverError::Navigation(format!("{url}: {err}")))?;
        let path = parsed.path();
        let location = if path.contains("/product-category/") {
            let slug = path
                .trim_start_matches("/product-category/")
                .trim_end_matches('/');
            match self.category_by_slug(slug) {
                Some(index) => Location::Category(index),
                None => {
                    return Err(DriverError::Navigation(format!("unknown category {slug}")));
                }
            }
        } else if path.contains("/cart") || path.contains("/carrito") {
            Location::Cart
        } else if path == "/" || path.is_empty() {
            Location::Home
        } else {
            return Err(DriverError::Navigation(format!("no page at {path}")));
        };

        let mut state = self.lock();
        self.go(&mut state, location);
        debug!(url, ?location, "simulator navigated");
        Ok(())
    }

    async fn go_back(&self) -> Result<(), DriverError> {
        let mut state = self.lock();
        if let Some(previous) = state.history.pop() {
            state.location = previous;
            state.notice = None;
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        let location = self.lock().location;
        Ok(self.url_of(location))
    }

    async fn count(&self, target: &Target) -> Result<usize, DriverError> {
        let state = self.lock();
        let count = match (target.selector.as_str(), state.location) {
            ("ul#primary-menu a", Location::Home) => self.catalog.len(),
            (".product", Location::Category(ci)) => self.catalog[ci].products.len(),
            ("tr.cart_item", Location::Cart) => state.cart.len(),
            _ => usize::from(self.query(&state, target).is_some()),
        };
        Ok(count)
    }

    async fn is_visible(&self, target: &Target, _timeout: Duration) -> Result<bool, DriverError> {
        let state = self.lock();
        Ok(self.query(&state, target).is_some())
    }

    async fn is_enabled(&self, target: &Target, _timeout: Duration) -> Result<bool, DriverError> {
        let state = self.lock();
        Ok(self.query(&state, target).map(|n| n.enabled).unwrap_or(false))
    }

    async fn click(&self, target: &Target) -> Result<(), DriverError> {
        let mut state = self.lock();
        let sel = target.selector.clone();

        if sel.contains("a[href*=") {
            if let Some(index) = self.linked_category(&sel) {
                if state.broken_menu_links {
                    return Err(DriverError::Backend("link click intercepted".to_string()));
                }
                self.go(&mut state, Location::Category(index));
                return Ok(());
            }
        }
        if sel == ".mini-cart" {
            self.go(&mut state, Location::Cart);
            return Ok(());
        }

        match state.location {
            Location::Category(ci) if sel == ".product" => {
                let index = target.index.unwrap_or(0);
                if index >= self.catalog[ci].products.len() {
                    return Err(DriverError::NotFound(target.to_string()));
                }
                self.go(&mut state, Location::Product {
                    category: ci,
                    index,
                });
                Ok(())
            }
            Location::Product { category, index }
                if sel == "button.single_add_to_cart_button" =>
            {
                let product = self.catalog[category].products[index];
                state.cart.push(product);
                state.notice =
                    Some(format!("\"{}\" ha sido añadido a tu carrito.", product.name));
                debug!(product = product.name, in_cart = state.cart.len(), "added to cart");
                Ok(())
            }
            Location::Cart
                if sel == "tr.cart_item"
                    && target.child.as_deref().is_some_and(|c| c.contains("remove")) =>
            {
                let index = target.index.unwrap_or(0);
                if index >= state.cart.len() {
                    return Err(DriverError::NotFound(target.to_string()));
                }
                let removed = state.cart.remove(index);
                debug!(product = removed.name, left = state.cart.len(), "removed from cart");
                Ok(())
            }
            _ => {
                if self.query(&state, target).is_some() {
                    Ok(())
                } else {
                    Err(DriverError::NotFound(target.to_string()))
                }
            }
        }
    }

    async fn fill(&self, target: &Target, _text: &str) -> Result<(), DriverError> {
        let state = self.lock();
        if self.query(&state, target).is_some() {
            Ok(())
        } else {
            Err(DriverError::NotFound(target.to_string()))
        }
    }

    async fn text_content(&self, target: &Target) -> Result<Option<String>, DriverError> {
        let state = self.lock();
        Ok(self
            .query(&state, target)
            .map(|n| n.text.unwrap_or_default()))
    }

    async fn input_value(&self, target: &Target) -> Result<Option<String>, DriverError> {
        let state = self.lock();
        Ok(self
            .query(&state, target)
            .map(|n| n.value.unwrap_or_default()))
    }

    async fn attribute(
        &self,
        target: &Target,
        _name: &str,
    ) -> Result<Option<String>, DriverError> {
        let state = self.lock();
        Ok(self.query(&state, target).map(|_| String::new()))
    }

    async fn wait_for_load(
        &self,
        _state: LoadState,
        _timeout: Duration,
    ) -> Result<(), DriverError> {
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        Ok(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a])
    }
}
