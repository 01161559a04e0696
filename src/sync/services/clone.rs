//! Entry point used by the user interface to clone selected issues.

use std::sync::Arc;
use thiserror::Error;

use super::{
    CloneStrategy, ReconcileError, Remediation, RemediationErrorHandler, StrategySelector,
};
use crate::sync::{
    domain::{CloneRequest, Configuration, NodeId},
    ports::{CacheCleaner, DestinationClient},
};

/// Service-level errors for clone requests.
#[derive(Debug, Error)]
pub enum CloneError {
    /// The error could not be remedied and is reported verbatim.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// The error has a known remedy that needs the user's involvement.
    #[error("{advice}")]
    ActionRequired {
        /// What the user should do.
        advice: String,
        /// The error that triggered the advice.
        source: ReconcileError,
    },
}

/// Result type for clone requests.
pub type CloneResult<T> = Result<T, CloneError>;

/// Clones issue selections into the destination.
///
/// Configuration is captured when the service is built; each call to
/// [`Self::create_tasks`] is an independent run with its own name indexes.
pub struct CloneService<D, C>
where
    D: DestinationClient,
    C: CacheCleaner,
{
    destination: Arc<D>,
    configuration: Configuration,
    handler: RemediationErrorHandler<C>,
}

impl<D, C> CloneService<D, C>
where
    D: DestinationClient,
    C: CacheCleaner,
{
    /// Creates a clone service.
    #[must_use]
    pub fn new(destination: Arc<D>, cleaner: Arc<C>, configuration: Configuration) -> Self {
        let handler = RemediationErrorHandler::new(cleaner, configuration.clean_todoist_cache);
        Self {
            destination,
            configuration,
            handler,
        }
    }

    /// Returns the configuration the service runs with.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the strategy the configuration selects.
    #[must_use]
    pub fn strategy(&self) -> CloneStrategy {
        StrategySelector::select(&self.configuration)
    }

    /// Clones every issue in `request`, reporting each step to `progress`.
    ///
    /// A handled destination error with automatic cache cleanup enabled
    /// removes the cache and replays the request once; the replay reuses any
    /// nodes the first attempt created. A URL comment the first attempt could
    /// not post is posted on its task before the replay starts.
    ///
    /// # Errors
    ///
    /// Returns [`CloneError::ActionRequired`] for handled errors the user
    /// must resolve, and [`CloneError::Reconcile`] for everything else,
    /// including a failed replay.
    pub async fn create_tasks<P>(
        &self,
        request: &CloneRequest,
        mut progress: P,
    ) -> CloneResult<Vec<NodeId>>
    where
        P: FnMut(&str),
    {
        let strategy = self.strategy();
        let first_attempt = strategy
            .create_tasks(&*self.destination, &self.configuration, request, &mut progress)
            .await;
        let failure = match first_attempt {
            Ok(issue_tasks) => return Ok(issue_tasks),
            Err(failure) => failure,
        };

        match self.handler.handle(&failure) {
            Remediation::Retry => {
                progress("Retrying after clearing the Todoist cache");
                if let Some(pending) = failure.pending_comment() {
                    pending.post(&*self.destination).await?;
                    progress(&format!("Added comment to task: {}", pending.task_id));
                }
                let issue_tasks = strategy
                    .create_tasks(&*self.destination, &self.configuration, request, &mut progress)
                    .await?;
                Ok(issue_tasks)
            }
            Remediation::Inform { message } => Err(CloneError::ActionRequired {
                advice: message,
                source: failure,
            }),
            Remediation::Escalate => Err(CloneError::Reconcile(failure)),
        }
    }
}
