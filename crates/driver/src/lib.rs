//! Abstract browser driver seam.
//!
//! The suite never talks to a browser engine directly: page objects and the
//! resilient-action engine call through the [`Driver`] trait, which a real
//! Playwright/CDP-backed adapter implements in production and the scripted
//! [`stub::StubDriver`] implements in tests.

pub mod errors;
pub mod target;

#[cfg(feature = "stub")]
pub mod stub;

pub use errors::*;
pub use target::*;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Page load states a driver can wait for, in increasing strictness.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum LoadState {
    /// DOM parsed, subresources may still be loading.
    DomContentLoaded,
    /// No network activity for the driver's quiet window.
    NetworkIdle,
    /// `document.readyState === "complete"`.
    Complete,
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::DomContentLoaded => "domcontentloaded",
            LoadState::NetworkIdle => "networkidle",
            LoadState::Complete => "complete",
        }
    }
}

/// The browser capability set the suite consumes.
///
/// All element-addressed operations take a [`Target`]; scalar reads against a
/// target that matches several nodes act on the first match, the way the
/// original selectors were written to be used. Probes (`count`, `is_visible`,
/// `is_enabled`, reads) are side-effect free.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    async fn go_back(&self) -> Result<(), DriverError>;

    async fn current_url(&self) -> Result<String, DriverError>;

    /// Number of nodes matching the target (ignoring its index).
    async fn count(&self, target: &Target) -> Result<usize, DriverError>;

    /// Whether the target is visible, waiting up to `timeout` for it to
    /// become so. Not an error when it stays hidden: the answer is `false`.
    async fn is_visible(&self, target: &Target, timeout: Duration) -> Result<bool, DriverError>;

    /// Whether the target is enabled, waiting up to `timeout`.
    async fn is_enabled(&self, target: &Target, timeout: Duration) -> Result<bool, DriverError>;

    async fn click(&self, target: &Target) -> Result<(), DriverError>;

    async fn fill(&self, target: &Target, text: &str) -> Result<(), DriverError>;

    /// Text content of the target, `None` when it does not exist.
    async fn text_content(&self, target: &Target) -> Result<Option<String>, DriverError>;

    /// Current value of a form control, `None` when it does not exist.
    async fn input_value(&self, target: &Target) -> Result<Option<String>, DriverError>;

    async fn attribute(&self, target: &Target, name: &str)
        -> Result<Option<String>, DriverError>;

    async fn wait_for_load(&self, state: LoadState, timeout: Duration)
        -> Result<(), DriverError>;

    /// Full-page screenshot as encoded image bytes.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;
}
