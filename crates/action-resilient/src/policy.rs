//! Timeout policy for the action engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-operation timeouts, independently configurable.
///
/// Probe timeouts are deliberately shorter than the overall action timeouts
/// they nest inside: a candidate that is going to match usually matches fast,
/// and a short probe keeps fallback chains cheap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionTimeouts {
    /// Per-candidate existence/visibility probe.
    pub probe_ms: u64,

    /// Pre-condition check before a mutating action.
    pub interact_ms: u64,

    /// Overall readiness polling deadline.
    pub readiness_ms: u64,

    /// Sleep between readiness polls.
    pub poll_interval_ms: u64,

    /// Driver-side load wait during navigation.
    pub navigation_ms: u64,
}

impl ActionTimeouts {
    pub fn probe(&self) -> Duration {
        Duration::from_millis(self.probe_ms)
    }

    pub fn interact(&self) -> Duration {
        Duration::from_millis(self.interact_ms)
    }

    pub fn readiness(&self) -> Duration {
        Duration::from_millis(self.readiness_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }
}

impl Default for ActionTimeouts {
    fn default() -> Self {
        Self {
            probe_ms: 3000,
            interact_ms: 5000,
            readiness_ms: 15000,
            poll_interval_ms: 500,
            navigation_ms: 30000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_nest_probe_inside_readiness() {
        let timeouts = ActionTimeouts::default();
        assert!(timeouts.probe() < timeouts.readiness());
        assert_eq!(timeouts.poll_interval(), Duration::from_millis(500));
    }
}
