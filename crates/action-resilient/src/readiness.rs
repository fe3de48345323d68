//! Bounded readiness polling.
//!
//! The decision logic lives in the pure [`ReadinessWatch`] state machine so it
//! can run under a fake clock; [`poll_until`] drives it with tokio sleeps.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use floracart_driver::{Driver, Target};
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::errors::ActionError;
use crate::policy::ActionTimeouts;

/// State of one readiness wait.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Readiness {
    Pending,
    Satisfied,
    TimedOut,
}

/// Pure polling state machine: deadline plus interval accounting.
///
/// `observe` records one predicate evaluation at the current logical elapsed
/// time; `advance` accounts for one interval sleep. The watch never sleeps
/// itself, which is what makes exact-timeout tests possible.
#[derive(Clone, Debug)]
pub struct ReadinessWatch {
    timeout: Duration,
    interval: Duration,
    elapsed: Duration,
}

impl ReadinessWatch {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self {
            timeout,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Record a predicate observation made now.
    pub fn observe(&self, satisfied: bool) -> Readiness {
        if satisfied {
            Readiness::Satisfied
        } else if self.elapsed >= self.timeout {
            Readiness::TimedOut
        } else {
            Readiness::Pending
        }
    }

    /// Account for one interval sleep between observations.
    pub fn advance(&mut self) {
        self.elapsed += self.interval;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Poll `check` until it returns true or `timeout` elapses.
///
/// The first check runs immediately; every subsequent check sleeps `interval`
/// first, so the loop never busy-spins. Returns the elapsed wall time on
/// success, `ReadinessTimeout` on deadline.
pub async fn poll_until<F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut check: F,
) -> Result<Duration, ActionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ActionError>>,
{
    let started = Instant::now();
    let mut watch = ReadinessWatch::new(timeout, interval);

    loop {
        let satisfied = check().await?;
        match watch.observe(satisfied) {
            Readiness::Satisfied => {
                debug!(what, elapsed_ms = started.elapsed().as_millis() as u64, "ready");
                return Ok(started.elapsed());
            }
            Readiness::TimedOut => {
                return Err(ActionError::ReadinessTimeout {
                    what: what.to_string(),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            Readiness::Pending => {
                trace!(what, "not ready yet");
                sleep(interval).await;
                watch.advance();
            }
        }
    }
}

/// Wait until any of the targets is visible (single immediate probe per poll).
///
/// The composite "page finished loading" predicates are all of this shape:
/// primary content container OR an alternative empty-state container.
pub async fn wait_for_any_visible(
    driver: &Arc<dyn Driver>,
    what: &str,
    targets: &[Target],
    timeouts: &ActionTimeouts,
) -> Result<Duration, ActionError> {
    poll_until(what, timeouts.readiness(), timeouts.poll_interval(), || async {
        for target in targets {
            if driver.is_visible(target, Duration::ZERO).await? {
                return Ok(true);
            }
        }
        Ok(false)
    })
    .await
}

/// Wait until the target is no longer visible (post-removal confirmation).
pub async fn wait_for_hidden(
    driver: &Arc<dyn Driver>,
    what: &str,
    target: &Target,
    timeouts: &ActionTimeouts,
) -> Result<Duration, ActionError> {
    poll_until(what, timeouts.readiness(), timeouts.poll_interval(), || async {
        Ok(!driver.is_visible(target, Duration::ZERO).await?)
    })
    .await
}
