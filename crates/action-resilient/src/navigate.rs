//! Multi-route navigation with arrival confirmation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use floracart_driver::{Driver, LoadState};
use tracing::{debug, info, instrument, warn};

use crate::errors::ActionError;
use crate::policy::ActionTimeouts;
use crate::readiness::poll_until;
use crate::resolver::{CandidateResolver, ProbeResolver};
use crate::types::CandidateSet;

/// One way of reaching a destination.
#[derive(Clone, Debug)]
pub enum Route {
    /// Click a UI affordance (itself resolved through a candidate set).
    Click(CandidateSet),
    /// Load a URL directly.
    Goto(String),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Click(set) => write!(f, "click '{}'", set.what()),
            Route::Goto(url) => write!(f, "goto {url}"),
        }
    }
}

/// Tries navigation routes in order, confirming each arrival with a
/// readiness predicate before declaring success.
pub struct Navigator {
    driver: Arc<dyn Driver>,
    resolver: ProbeResolver,
    timeouts: ActionTimeouts,
}

impl Navigator {
    pub fn new(driver: Arc<dyn Driver>, timeouts: ActionTimeouts) -> Self {
        let resolver = ProbeResolver::new(driver.clone(), timeouts.clone());
        Self {
            driver,
            resolver,
            timeouts,
        }
    }

    /// Attempt each route in order; after each attempt, poll `arrived` until
    /// ready. A route failure or an unconfirmed arrival advances to the next
    /// route; full exhaustion is `NavigationExhausted` naming every route.
    #[instrument(skip(self, routes, arrived))]
    pub async fn navigate<F, Fut>(
        &self,
        what: &str,
        routes: &[Route],
        mut arrived: F,
    ) -> Result<(), ActionError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, ActionError>>,
    {
        let mut tried = Vec::with_capacity(routes.len());

        for route in routes {
            match self.attempt(route).await {
                Ok(()) => {
                    match poll_until(
                        what,
                        self.timeouts.readiness(),
                        self.timeouts.poll_interval(),
                        &mut arrived,
                    )
                    .await
                    {
                        Ok(elapsed) => {
                            info!(%route, elapsed_ms = elapsed.as_millis() as u64, "arrived");
                            return Ok(());
                        }
                        Err(err) => {
                            warn!(%route, error = %err, "arrival not confirmed, trying next route");
                            tried.push(format!("{route} ({err})"));
                        }
                    }
                }
                Err(err) => {
                    warn!(%route, error = %err, "route attempt failed, trying next route");
                    tried.push(format!("{route} ({err})"));
                }
            }
        }

        Err(ActionError::NavigationExhausted {
            what: what.to_string(),
            routes: tried,
        })
    }

    async fn attempt(&self, route: &Route) -> Result<(), ActionError> {
        match route {
            Route::Click(set) => {
                let resolution = self.resolver.resolve(set).await?;
                debug!(target = %resolution.target, "navigation click");
                self.driver.click(&resolution.target).await?;
                Ok(())
            }
            Route::Goto(url) => {
                debug!(url, "direct navigation");
                self.driver.navigate(url).await?;
                self.driver
                    .wait_for_load(LoadState::DomContentLoaded, self.timeouts.navigation())
                    .await?;
                Ok(())
            }
        }
    }
}
