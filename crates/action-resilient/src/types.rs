//! Core value types for the action engine.

use floracart_driver::Target;
use serde::{Deserialize, Serialize};

/// Ordered, non-empty list of candidate locators for one logical element.
///
/// Candidates are tried left-to-right; order encodes preference (most
/// specific first). Construction always starts from one candidate, so the
/// list cannot be empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CandidateSet {
    /// Human-readable name of the logical element, used in diagnostics.
    what: String,
    candidates: Vec<Target>,
}

impl CandidateSet {
    /// Create a set with its most preferred candidate.
    pub fn new(what: impl Into<String>, first: impl Into<Target>) -> Self {
        Self {
            what: what.into(),
            candidates: vec![first.into()],
        }
    }

    /// Append a lower-priority fallback candidate.
    pub fn or(mut self, target: impl Into<Target>) -> Self {
        self.candidates.push(target.into());
        self
    }

    /// Build a set from a slice of CSS selectors (must be non-empty).
    ///
    /// The comma-joined selector strings of the source material become one
    /// explicit candidate per alternative here.
    pub fn from_selectors(what: impl Into<String>, selectors: &[&str]) -> Self {
        assert!(!selectors.is_empty(), "candidate set needs >= 1 selector");
        let mut set = Self::new(what, selectors[0]);
        for selector in &selectors[1..] {
            set = set.or(*selector);
        }
        set
    }

    /// Derive a set of child targets inside a parent target, one per
    /// candidate child selector.
    pub fn children_of(what: impl Into<String>, parent: &Target, children: &[&str]) -> Self {
        assert!(!children.is_empty(), "candidate set needs >= 1 selector");
        let mut candidates = children
            .iter()
            .map(|child| parent.clone().child(*child))
            .collect::<Vec<_>>();
        let first = candidates.remove(0);
        let mut set = Self::new(what, first);
        for target in candidates {
            set = set.or(target);
        }
        set
    }

    pub fn what(&self) -> &str {
        &self.what
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always `false`: every constructor starts from one candidate, so a set
    /// cannot be empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.candidates.iter()
    }
}

/// One failed candidate probe, preserved for diagnostics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Attempt {
    /// Rendered target that was tried.
    pub target: String,
    /// Why it did not match.
    pub reason: String,
}

impl Attempt {
    pub fn new(target: &Target, reason: impl Into<String>) -> Self {
        Self {
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}

/// A successful candidate resolution.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// The candidate that matched.
    pub target: Target,
    /// Its position in the candidate set (0 = most preferred).
    pub position: usize,
}
