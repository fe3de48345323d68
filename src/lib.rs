//! End-to-end shopping-cart suite for a WooCommerce-style storefront.
//!
//! The workspace layers, bottom to top:
//! - `floracart-driver` — the abstract browser seam ([`Driver`], `Target`)
//! - `action-resilient` — candidate resolution, guarded interaction,
//!   readiness polling, multi-route navigation, price normalization
//! - `floracart-pages` — page objects built on the engine
//! - this crate — the [`Shop`] facade, shared fixtures and flow helpers the
//!   scenario tests under `tests/` drive.

pub mod fixtures;
pub mod flows;

use std::sync::Arc;
use std::sync::Once;

use floracart_driver::Driver;
use floracart_pages::{CartPage, CategoryPage, HomePage, ProductPage};
use tracing_subscriber::EnvFilter;

pub use floracart_pages::{
    CartItem, PageError, ProductDetails, ProductSummary, SiteConfig, SiteSelectors,
};

/// All four page objects over one driver session.
pub struct Shop {
    pub home: HomePage,
    pub category: CategoryPage,
    pub product: ProductPage,
    pub cart: CartPage,
    config: Arc<SiteConfig>,
}

impl Shop {
    pub fn new(driver: Arc<dyn Driver>, config: SiteConfig) -> Self {
        let config = Arc::new(config);
        Self {
            home: HomePage::new(driver.clone(), config.clone()),
            category: CategoryPage::new(driver.clone(), config.clone()),
            product: ProductPage::new(driver.clone(), config.clone()),
            cart: CartPage::new(driver, config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

static TRACING: Once = Once::new();

/// Install the suite's tracing subscriber. Safe to call from every test;
/// only the first call takes effect. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,action_resilient=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
