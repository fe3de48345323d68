//! Selector catalogue for the storefront.
//!
//! Defaults target a WooCommerce theme; every alternative that used to live
//! in a comma-joined selector string is an explicit list entry here, ordered
//! most-specific first. All of it is serde-deserializable so a different
//! theme can ship its own catalogue.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub home: HomeSelectors,
    pub category: CategorySelectors,
    pub product: ProductSelectors,
    pub cart: CartSelectors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeSelectors {
    /// Primary navigation menu container.
    pub primary_menu: String,
    /// All links inside the primary menu.
    pub menu_links: String,
    pub cart_icon: String,
    pub cart_counter: Vec<String>,
}

impl Default for HomeSelectors {
    fn default() -> Self {
        Self {
            primary_menu: "ul#primary-menu".into(),
            menu_links: "ul#primary-menu a".into(),
            cart_icon: ".mini-cart".into(),
            cart_counter: vec![
                ".mini-cart-items:not(.cart-mobile)".into(),
                ".mini-cart-items".into(),
                ".cart-contents-count".into(),
            ],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySelectors {
    pub title: Vec<String>,
    pub grid: Vec<String>,
    /// One listing entry.
    pub items: String,
    pub item_name: Vec<String>,
    pub item_price: Vec<String>,
    pub item_link: Vec<String>,
    pub empty_notice: String,
    pub result_count: String,
}

impl Default for CategorySelectors {
    fn default() -> Self {
        Self {
            title: vec![
                "h1.page-title".into(),
                "h1.woocommerce-products-header__title".into(),
                "h1".into(),
            ],
            grid: vec![
                ".products".into(),
                "ul.products".into(),
                ".woocommerce-products-wrapper".into(),
            ],
            items: ".product".into(),
            item_name: vec![
                "h2.woocommerce-loop-product__title".into(),
                "h3.name a".into(),
                ".product-title".into(),
            ],
            item_price: vec![
                ".price .woocommerce-Price-amount".into(),
                ".woocommerce-Price-amount".into(),
                ".price bdi".into(),
            ],
            item_link: vec![
                ".woocommerce-loop-product__link".into(),
                ".product-image a".into(),
                "a[href*=\"/product/\"]".into(),
            ],
            empty_notice: ".woocommerce-info".into(),
            result_count: ".woocommerce-result-count".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSelectors {
    pub title: String,
    /// Price of the product itself, not of related-product tiles.
    pub price: String,
    pub add_button: String,
    pub description: String,
    pub quantity: String,
    pub success_notice: String,
    pub error_notices: Vec<String>,
}

impl Default for ProductSelectors {
    fn default() -> Self {
        Self {
            title: "h1.product_title.entry-title".into(),
            price: ".summary .price .woocommerce-Price-amount".into(),
            add_button: "button.single_add_to_cart_button".into(),
            description: ".woocommerce-product-details__short-description".into(),
            quantity: ".quantity input[type=\"number\"]".into(),
            success_notice: ".woocommerce-message".into(),
            error_notices: vec![
                ".woocommerce-error".into(),
                ".error".into(),
                "[role=\"alert\"]".into(),
            ],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CartSelectors {
    pub table: Vec<String>,
    /// One cart row.
    pub items: String,
    pub row_name: Vec<String>,
    pub row_price: Vec<String>,
    pub row_quantity: Vec<String>,
    pub row_remove: Vec<String>,
    pub subtotal: Vec<String>,
    pub total: Vec<String>,
    pub empty_notice: Vec<String>,
    pub counter: Vec<String>,
    pub update_button: String,
    pub checkout_button: String,
    pub icon: String,
    /// Overlay shown while the cart recalculates; waits key off its absence.
    pub processing_overlay: String,
}

impl Default for CartSelectors {
    fn default() -> Self {
        Self {
            table: vec![
                ".shop_table.cart.woocommerce-cart-form__contents".into(),
                ".woocommerce-cart-form__contents".into(),
                ".shop_table.cart".into(),
            ],
            items: "tr.cart_item".into(),
            row_name: vec![".product-name a".into(), "td.product-name a".into()],
            row_price: vec![
                ".product-price .woocommerce-Price-amount".into(),
                ".product-price".into(),
            ],
            row_quantity: vec![
                ".product-quantity input.input-text.qty.text".into(),
                ".product-quantity input".into(),
            ],
            row_remove: vec![".product-remove a.remove".into(), "a.remove".into()],
            subtotal: vec![
                ".cart-subtotal .woocommerce-Price-amount".into(),
                ".cart-subtotal".into(),
            ],
            total: vec![
                ".order-total .woocommerce-Price-amount".into(),
                ".cart-total".into(),
            ],
            empty_notice: vec![
                ".woocommerce-info".into(),
                ".cart-empty".into(),
                ".wc-empty-cart-message".into(),
            ],
            counter: vec![
                ".mini-cart-items:not(.cart-mobile)".into(),
                ".mini-cart-items".into(),
                ".cart-contents-count".into(),
            ],
            update_button: "[name=\"update_cart\"]".into(),
            checkout_button: ".checkout-button".into(),
            icon: ".mini-cart".into(),
            processing_overlay: ".blockUI.blockOverlay".into(),
        }
    }
}
