//! Page objects for the storefront flows.
//!
//! Each page object wraps the resilient-action engine around one logical page
//! of the shop: home (menu navigation), category (product listing), product
//! (detail + add to cart), cart (contents, totals, removal). Selectors and
//! site parameters are injected through [`SiteConfig`]; nothing reads global
//! state, so test doubles slot in at the driver seam.

pub mod cart;
pub mod category;
pub mod config;
pub mod errors;
pub mod home;
pub mod product;
pub mod selectors;

mod support;

pub use cart::*;
pub use category::*;
pub use config::*;
pub use errors::*;
pub use home::*;
pub use product::*;
pub use selectors::*;
