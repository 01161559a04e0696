//! Destination port: the slice of the Todoist API the engine relies on.

use crate::sync::domain::{DestinationNode, NodeId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for destination client operations.
pub type DestinationResult<T> = Result<T, DestinationError>;

/// Project, task and comment operations offered by the destination system.
///
/// Every call is awaited to completion before the next one is issued; the
/// engine never runs two calls concurrently.
#[async_trait]
pub trait DestinationClient: Send + Sync {
    /// Lists every project visible to the authenticated user.
    async fn list_projects(&self) -> DestinationResult<Vec<DestinationNode>>;

    /// Creates a top-level project.
    async fn create_project(&self, name: &str) -> DestinationResult<DestinationNode>;

    /// Lists tasks directly under a project or task.
    ///
    /// A parent with no children yields an empty list, not an error.
    async fn list_child_tasks(&self, parent_id: &NodeId)
    -> DestinationResult<Vec<DestinationNode>>;

    /// Creates a task under a project or task.
    async fn create_task(
        &self,
        parent_id: &NodeId,
        content: &str,
        description: Option<&str>,
    ) -> DestinationResult<DestinationNode>;

    /// Adds a comment to an existing task and returns the comment id.
    async fn create_comment(&self, task_id: &NodeId, content: &str) -> DestinationResult<NodeId>;
}

/// Errors reported by destination client implementations.
#[derive(Debug, Clone, Error)]
pub enum DestinationError {
    /// The API credential was refused.
    #[error("destination rejected the credential: {0}")]
    Authentication(String),

    /// The destination refused the request (quota, validation, stale ids).
    #[error("destination rejected the request: {message} (code {code})")]
    Rejected {
        /// Message returned by the destination.
        message: String,
        /// Destination-specific error code.
        code: i64,
    },

    /// The destination could not be reached or answered unexpectedly.
    #[error("destination unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DestinationError {
    /// Creates a rejection with a destination error code.
    #[must_use]
    pub fn rejected(message: impl Into<String>, code: i64) -> Self {
        Self::Rejected {
            message: message.into(),
            code,
        }
    }

    /// Wraps a transport or runtime failure.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
