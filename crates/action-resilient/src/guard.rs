//! Guarded interaction: pre-condition checks before mutating actions.

use std::sync::Arc;

use floracart_core_types::ActionId;
use floracart_driver::{Driver, Target};
use tracing::{debug, instrument};

use crate::errors::ActionError;
use crate::policy::ActionTimeouts;

/// Wraps mutating driver actions with a visible + enabled pre-check.
///
/// The guard does not wait for post-action settling; callers apply readiness
/// polling afterwards.
pub struct InteractionGuard {
    driver: Arc<dyn Driver>,
    timeouts: ActionTimeouts,
}

impl InteractionGuard {
    pub fn new(driver: Arc<dyn Driver>, timeouts: ActionTimeouts) -> Self {
        Self { driver, timeouts }
    }

    #[instrument(skip(self), fields(target = %target))]
    pub async fn click(&self, target: &Target) -> Result<(), ActionError> {
        self.precheck(target).await?;
        debug!(action = %ActionId::new(), "dispatching click");
        self.driver.click(target).await?;
        Ok(())
    }

    #[instrument(skip(self, text), fields(target = %target))]
    pub async fn fill(&self, target: &Target, text: &str) -> Result<(), ActionError> {
        self.precheck(target).await?;
        debug!(action = %ActionId::new(), "dispatching fill");
        self.driver.fill(target, text).await?;
        Ok(())
    }

    async fn precheck(&self, target: &Target) -> Result<(), ActionError> {
        if !self.driver.is_visible(target, self.timeouts.interact()).await? {
            return Err(ActionError::ElementNotInteractable {
                target: target.to_string(),
                reason: "not visible".into(),
            });
        }
        if !self.driver.is_enabled(target, self.timeouts.interact()).await? {
            return Err(ActionError::ElementNotInteractable {
                target: target.to_string(),
                reason: "not enabled".into(),
            });
        }
        Ok(())
    }
}
