//! Locator value type for element-addressed driver operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One way of locating a logical UI element.
///
/// A target is a CSS selector, optionally narrowed to the n-th match and
/// optionally scoped to a child selector inside that match — the shape the
/// original page objects used (`locator(sel).nth(i).locator(child)`).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// CSS selector for the match set.
    pub selector: String,

    /// Narrow to the n-th match (0-based). `None` means the first match for
    /// scalar operations and the whole set for `count`.
    pub index: Option<usize>,

    /// Child selector evaluated inside the narrowed match.
    pub child: Option<String>,
}

impl Target {
    /// Target the match set of a CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            index: None,
            child: None,
        }
    }

    /// Narrow to the n-th match.
    pub fn nth(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Scope to a child selector inside the (narrowed) match.
    pub fn child(mut self, selector: impl Into<String>) -> Self {
        self.child = Some(selector.into());
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        if let Some(index) = self.index {
            write!(f, ":nth({})", index)?;
        }
        if let Some(child) = &self.child {
            write!(f, " >> {}", child)?;
        }
        Ok(())
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::css(selector)
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::css(selector)
    }
}
