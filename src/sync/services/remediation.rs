//! Recovery decisions for errors raised during reconciliation.

use std::sync::Arc;
use tracing::{error, info, warn};

use super::ReconcileError;
use crate::sync::ports::CacheCleaner;

/// Todoist error code for a stale temporary id in the local sync cache.
pub const INVALID_TEMP_ID: i64 = 16;

/// Whether an error has a known remedy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A creation failure whose code is in the handled set.
    Handled(i64),
    /// Anything else.
    Unhandled,
}

/// What the caller should do after a failed reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    /// The local cache was removed; replay the request once.
    Retry,
    /// Tell the user how to recover; nothing was changed.
    Inform {
        /// Message for the user.
        message: String,
    },
    /// Surface the error as it is; no retry.
    Escalate,
}

/// Classifies reconciliation failures and applies the cache-cleanup remedy.
///
/// The handler never starts reconciliation itself. Each call to
/// [`Self::handle`] classifies one error and ends in exactly one
/// [`Remediation`].
#[derive(Debug)]
pub struct RemediationErrorHandler<C: CacheCleaner> {
    cleaner: Arc<C>,
    handled_codes: Vec<i64>,
    clean_cache: bool,
}

impl<C: CacheCleaner> RemediationErrorHandler<C> {
    /// Creates a handler that recognises [`INVALID_TEMP_ID`].
    ///
    /// `clean_cache` mirrors the user's preference for automatic cleanup.
    #[must_use]
    pub fn new(cleaner: Arc<C>, clean_cache: bool) -> Self {
        Self {
            cleaner,
            handled_codes: vec![INVALID_TEMP_ID],
            clean_cache,
        }
    }

    /// Replaces the set of handled destination error codes.
    #[must_use]
    pub fn with_handled_codes(mut self, codes: impl IntoIterator<Item = i64>) -> Self {
        self.handled_codes = codes.into_iter().collect();
        self
    }

    /// Returns `true` when `code` has a known remedy.
    #[must_use]
    pub fn is_error_handled(&self, code: i64) -> bool {
        self.handled_codes.contains(&code)
    }

    /// Sorts an error into handled or unhandled.
    #[must_use]
    pub fn classify(&self, err: &ReconcileError) -> Classification {
        match err.code() {
            Some(code) if self.is_error_handled(code) => Classification::Handled(code),
            _ => Classification::Unhandled,
        }
    }

    /// Decides, and where allowed performs, the recovery for an error.
    #[must_use]
    pub fn handle(&self, err: &ReconcileError) -> Remediation {
        match self.classify(err) {
            Classification::Handled(code) => self.remediate(err, code),
            Classification::Unhandled => {
                if matches!(err, ReconcileError::InvalidHierarchy(_)) {
                    error!(error = %err, "hierarchy plan is inconsistent");
                } else {
                    warn!(error = %err, "escalating unhandled error");
                }
                Remediation::Escalate
            }
        }
    }

    fn remediate(&self, err: &ReconcileError, code: i64) -> Remediation {
        let reason = err
            .failure()
            .map_or_else(|| err.to_string(), |failure| failure.message.clone());

        if !self.clean_cache {
            warn!(code, "cache cleanup disabled, asking user to intervene");
            return Remediation::Inform {
                message: format!(
                    "Error: \"{reason}\". This error can usually be handled by deleting the \
                     Todoist cache. However, you have that preference turned off. Turn the \
                     preference on and retry your operation."
                ),
            };
        }

        match self.cleaner.remove_cache() {
            Ok(()) => {
                info!(code, "removed Todoist cache, retrying request");
                Remediation::Retry
            }
            Err(cleanup) => {
                warn!(code, error = %cleanup, "Todoist cache cleanup failed");
                Remediation::Inform {
                    message: format!(
                        "Error: \"{reason}\". Removing the Todoist cache failed ({cleanup}). \
                         Delete it manually and retry your operation."
                    ),
                }
            }
        }
    }
}
