//! Candidate resolution with fallback-chain orchestration.

use std::sync::Arc;

use async_trait::async_trait;
use floracart_driver::Driver;
use tracing::{debug, instrument, warn};

use crate::errors::ActionError;
use crate::policy::ActionTimeouts;
use crate::types::{Attempt, CandidateSet, Resolution};

/// Candidate resolver trait.
#[async_trait]
pub trait CandidateResolver: Send + Sync {
    /// Resolve the first visible candidate; exhaustion is an error.
    async fn resolve(&self, set: &CandidateSet) -> Result<Resolution, ActionError>;

    /// Resolve, treating exhaustion as `None` (optional lookups).
    async fn resolve_optional(&self, set: &CandidateSet) -> Result<Option<Resolution>, ActionError>;
}

/// Default resolver: one short visibility probe per candidate, in order.
pub struct ProbeResolver {
    driver: Arc<dyn Driver>,
    timeouts: ActionTimeouts,
}

impl ProbeResolver {
    pub fn new(driver: Arc<dyn Driver>, timeouts: ActionTimeouts) -> Self {
        Self { driver, timeouts }
    }

    /// Resolve and read the matched candidate's text, trimmed. A matched
    /// element without text reads as the empty string.
    pub async fn read_text(&self, set: &CandidateSet) -> Result<String, ActionError> {
        let resolution = self.resolve(set).await?;
        let text = self.driver.text_content(&resolution.target).await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    /// Like `read_text`, but an exhausted set reads as `default` instead of
    /// failing. This is the optional-lookup degradation path.
    pub async fn read_text_or(
        &self,
        set: &CandidateSet,
        default: &str,
    ) -> Result<String, ActionError> {
        match self.resolve_optional(set).await? {
            Some(resolution) => {
                let text = self.driver.text_content(&resolution.target).await?;
                let text = text.unwrap_or_default().trim().to_string();
                Ok(if text.is_empty() {
                    default.to_string()
                } else {
                    text
                })
            }
            None => {
                debug!(what = set.what(), default, "optional lookup absent, using default");
                Ok(default.to_string())
            }
        }
    }

    async fn try_candidates(&self, set: &CandidateSet) -> Result<Resolution, Vec<Attempt>> {
        let mut attempts = Vec::with_capacity(set.len());

        for (position, target) in set.iter().enumerate() {
            match self.driver.is_visible(target, self.timeouts.probe()).await {
                Ok(true) => {
                    debug!(what = set.what(), %target, position, "candidate matched");
                    return Ok(Resolution {
                        target: target.clone(),
                        position,
                    });
                }
                Ok(false) => {
                    attempts.push(Attempt::new(target, "not visible within probe timeout"));
                }
                Err(err) => {
                    warn!(
                        what = set.what(),
                        %target,
                        retryable = err.is_retryable(),
                        error = %err,
                        "candidate probe failed"
                    );
                    attempts.push(Attempt::new(target, err.to_string()));
                }
            }
        }

        Err(attempts)
    }
}

#[async_trait]
impl CandidateResolver for ProbeResolver {
    #[instrument(skip_all, fields(what = set.what()))]
    async fn resolve(&self, set: &CandidateSet) -> Result<Resolution, ActionError> {
        self.try_candidates(set)
            .await
            .map_err(|attempts| ActionError::NoCandidateMatched {
                what: set.what().to_string(),
                attempts,
            })
    }

    async fn resolve_optional(&self, set: &CandidateSet) -> Result<Option<Resolution>, ActionError> {
        Ok(self.try_candidates(set).await.ok())
    }
}
