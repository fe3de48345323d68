//! Multi-page flow helpers shared by the scenario tests.
//!
//! Each helper strings page-object operations into one business step and adds
//! context to failures, so a scenario reads as a short list of steps.

use anyhow::Context;
use tracing::info;

use crate::Shop;
use floracart_pages::{ProductDetails, ProductSummary};

/// Open the storefront and browse into a category; leaves the listing loaded
/// and validated. Returns how many products it shows.
pub async fn browse_category(shop: &Shop, name: &str) -> anyhow::Result<usize> {
    shop.home.open().await.context("open storefront home")?;
    shop.home
        .navigate_to_category(name)
        .await
        .with_context(|| format!("navigate to category {name}"))?;
    shop.category
        .wait_until_loaded()
        .await
        .context("category listing readiness")?;
    shop.category
        .assert_title(name)
        .await
        .with_context(|| format!("category title for {name}"))?;
    let count = shop
        .category
        .assert_has_products()
        .await
        .context("category listing contents")?;
    info!(category = name, products = count, "category ready");
    Ok(count)
}

/// From a loaded listing: open the tile at `index`, add the product to the
/// cart, and confirm. Returns the product details as its page showed them.
pub async fn add_product_to_cart(shop: &Shop, index: usize) -> anyhow::Result<ProductDetails> {
    let summary = shop
        .category
        .product_summary(index)
        .await
        .with_context(|| format!("read listing tile {index}"))?;
    shop.category
        .open_product(index)
        .await
        .with_context(|| format!("open product from tile {index}"))?;
    shop.product
        .wait_until_loaded()
        .await
        .context("product page readiness")?;
    let details = shop.product.details().await.context("product details")?;
    shop.product.add_to_cart().await.with_context(|| {
        format!("add {} to cart", details.title)
    })?;
    match shop
        .product
        .confirm_added()
        .await
        .context("add-to-cart confirmation")?
    {
        Some(notice) => info!(product = %details.title, %notice, "added to cart"),
        None => info!(product = %details.title, "added to cart (no inline notice)"),
    }
    info!(listing = %summary.name, page = %details.title, "product opened from tile");
    Ok(details)
}

/// Pick two tiles with distinct names from the loaded listing.
pub async fn pick_two_distinct(shop: &Shop) -> anyhow::Result<(ProductSummary, ProductSummary)> {
    shop.category
        .pick_two_distinct()
        .await
        .context("pick two distinct listed products")
}

/// Open the cart page and wait for its contents (or empty state) to render.
pub async fn open_cart(shop: &Shop) -> anyhow::Result<()> {
    shop.cart.open().await.context("open cart page")?;
    shop.cart
        .wait_until_loaded()
        .await
        .context("cart readiness")?;
    Ok(())
}
