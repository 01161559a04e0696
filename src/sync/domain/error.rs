//! Error types for synchronisation domain values.

use super::NodeKind;
use thiserror::Error;

/// Errors returned while constructing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncDomainError {
    /// The repository slug does not follow `owner/repo` format.
    #[error("invalid repository slug '{0}', expected owner/repo")]
    InvalidRepositorySlug(String),

    /// The URL does not point at a GitHub issue or pull request.
    #[error("invalid GitHub issue URL: {0}")]
    InvalidIssueUrl(String),

    /// The issue title is empty after trimming.
    #[error("issue title must not be empty")]
    EmptyIssueTitle,
}

/// An unrecognised persisted configuration value.
///
/// Callers log these and fall back to a safe default rather than aborting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The GitHub URL option spelling is unknown.
    #[error("unknown GitHub URL option: {0}")]
    UnknownUrlOption(String),

    /// The task creation strategy spelling is unknown.
    #[error("unknown task creation strategy: {0}")]
    UnknownStrategy(String),

    /// No task creation strategy has been chosen yet.
    #[error("task creation strategy is not set")]
    StrategyNotSet,
}

/// A mode/kind pairing that the hierarchy table cannot satisfy.
///
/// This always indicates a defect in calling code rather than bad input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidHierarchyError {
    /// The kind does not appear in the plan.
    #[error("{kind} is not part of the {plan} hierarchy")]
    KindNotInPlan {
        /// Requested node kind.
        kind: NodeKind,
        /// Plan description.
        plan: String,
    },

    /// The plan needs a name for a kind that the caller did not supply.
    #[error("no {0} name was supplied for the hierarchy")]
    MissingName(NodeKind),

    /// A non-root level was reached before any root was realised.
    #[error("{0} has no realised parent")]
    MissingParent(NodeKind),
}
