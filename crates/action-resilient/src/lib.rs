//! Resilient UI action engine.
//!
//! The layer the page objects stand on:
//! - ordered candidate selector resolution with per-candidate diagnostics
//! - guarded (pre-condition checked) clicks and fills
//! - bounded readiness polling driven by a pure state machine
//! - multi-route navigation with per-route arrival confirmation
//! - display-string normalization for price comparison

pub mod errors;
pub mod guard;
pub mod navigate;
pub mod normalize;
pub mod policy;
pub mod readiness;
pub mod resolver;
pub mod types;

pub use errors::*;
pub use guard::*;
pub use navigate::*;
pub use normalize::*;
pub use policy::*;
pub use readiness::*;
pub use resolver::*;
pub use types::*;
