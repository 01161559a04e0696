//! Find-or-create walk that realises one issue's hierarchy.

use std::fmt;
use thiserror::Error;
use tracing::info;

use super::{HierarchyResolver, TaskNameIndex};
use crate::sync::{
    domain::{FormattedContent, HierarchyPlan, InvalidHierarchyError, NodeId, NodeKind, NodeNames},
    ports::{DestinationClient, DestinationError},
};

/// A create call refused by the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationFailure {
    /// Message returned by the destination.
    pub message: String,
    /// Destination-specific error code.
    pub code: i64,
}

impl fmt::Display for CreationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// A URL comment that still has to be posted on an issue task.
///
/// Carried by [`ReconcileError::NoteCreation`] so a retry can post the
/// comment on the task the failed attempt already created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    /// Issue task the comment belongs to.
    pub task_id: NodeId,
    /// Comment text.
    pub body: String,
}

impl PendingComment {
    /// Creates a pending comment for `task_id`.
    #[must_use]
    pub fn new(task_id: NodeId, body: impl Into<String>) -> Self {
        Self {
            task_id,
            body: body.into(),
        }
    }

    /// Posts the comment on its task.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NoteCreation`] carrying this comment when the
    /// destination refuses it, and the mapped destination error otherwise.
    pub async fn post<D: DestinationClient>(&self, destination: &D) -> ReconcileResult<()> {
        destination
            .create_comment(&self.task_id, &self.body)
            .await
            .map_err(|err| ReconcileError::from_note_creation(err, self.clone()))?;
        info!(id = %self.task_id, "added issue URL comment");
        Ok(())
    }
}

/// Errors raised while reconciling a hierarchy.
///
/// Nodes created before the failure are left in place.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    /// The destination refused the credential.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A project or task could not be created.
    #[error("task creation failed: {0}")]
    TaskCreation(CreationFailure),

    /// The follow-up comment could not be created.
    #[error("comment creation failed: {failure}")]
    NoteCreation {
        /// The refused create call.
        failure: CreationFailure,
        /// The comment that was not posted.
        pending: PendingComment,
    },

    /// The plan and the supplied names do not fit together.
    #[error(transparent)]
    InvalidHierarchy(#[from] InvalidHierarchyError),

    /// The destination could not be queried or reached.
    #[error("destination error: {0}")]
    Destination(DestinationError),
}

impl ReconcileError {
    /// Returns the refused create call, if this is a creation failure.
    #[must_use]
    pub const fn failure(&self) -> Option<&CreationFailure> {
        match self {
            Self::TaskCreation(failure) | Self::NoteCreation { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Returns the comment a refused comment call left unposted.
    #[must_use]
    pub const fn pending_comment(&self) -> Option<&PendingComment> {
        match self {
            Self::NoteCreation { pending, .. } => Some(pending),
            _ => None,
        }
    }

    /// Returns the destination error code of a creation failure.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        self.failure().map(|failure| failure.code)
    }

    fn from_lookup(err: DestinationError) -> Self {
        match err {
            DestinationError::Authentication(message) => Self::Authentication(message),
            other => Self::Destination(other),
        }
    }

    fn from_creation(err: DestinationError, wrap: impl FnOnce(CreationFailure) -> Self) -> Self {
        match err {
            DestinationError::Authentication(message) => Self::Authentication(message),
            DestinationError::Rejected { message, code } => wrap(CreationFailure { message, code }),
            unavailable @ DestinationError::Unavailable(_) => Self::Destination(unavailable),
        }
    }

    fn from_task_creation(err: DestinationError) -> Self {
        Self::from_creation(err, Self::TaskCreation)
    }

    fn from_note_creation(err: DestinationError, pending: PendingComment) -> Self {
        Self::from_creation(err, |failure| Self::NoteCreation { failure, pending })
    }
}

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Realises hierarchy plans against the destination, one issue at a time.
///
/// A reconciler lives for one clone request. Its name indexes are shared by
/// every issue in the request, so an ancestor created for the first issue is
/// reused by the next without another listing.
pub struct TaskReconciler<'a, D: DestinationClient> {
    destination: &'a D,
    index: TaskNameIndex<'a, D>,
}

impl<'a, D: DestinationClient> TaskReconciler<'a, D> {
    /// Creates a reconciler with empty name indexes.
    #[must_use]
    pub fn new(destination: &'a D) -> Self {
        Self {
            destination,
            index: TaskNameIndex::new(destination),
        }
    }

    /// Finds or creates every ancestor in `plan`, root first, then the issue
    /// task itself, and returns the issue task's id.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::InvalidHierarchy`] when `names` lacks a name
    /// the plan needs, and the mapped destination error when a listing or
    /// create call fails.
    pub async fn reconcile(
        &mut self,
        plan: &HierarchyPlan,
        names: &NodeNames,
        content: &FormattedContent,
        progress: &mut dyn FnMut(&str),
    ) -> ReconcileResult<NodeId> {
        let mut parent: Option<NodeId> = None;
        for kind in plan.root_to_leaf().filter(|kind| *kind != NodeKind::Issue) {
            let name = names.require(kind)?;
            let node_id = if HierarchyResolver::is_root_task(kind, plan) {
                self.resolve_project(name, progress).await?
            } else {
                let parent_id = parent
                    .as_ref()
                    .ok_or(InvalidHierarchyError::MissingParent(kind))?;
                self.resolve_task(kind, parent_id, name, progress).await?
            };
            parent = Some(node_id);
        }

        let issue_parent = parent.ok_or(InvalidHierarchyError::MissingParent(NodeKind::Issue))?;
        self.place_issue(&issue_parent, content, progress).await
    }

    async fn resolve_project(
        &mut self,
        name: &str,
        progress: &mut dyn FnMut(&str),
    ) -> ReconcileResult<NodeId> {
        let destination = self.destination;
        let projects = self
            .index
            .projects()
            .await
            .map_err(ReconcileError::from_lookup)?;
        if let Some(existing) = projects.lookup(name) {
            info!(project = name, "using existing project");
            progress(&format!("Using project: {name}"));
            return Ok(existing.clone());
        }

        let project = destination
            .create_project(name)
            .await
            .map_err(ReconcileError::from_task_creation)?;
        projects.insert(name, project.id().clone());
        info!(project = name, id = %project.id(), "created project");
        progress(&format!("Added {name}"));
        Ok(project.id().clone())
    }

    async fn resolve_task(
        &mut self,
        kind: NodeKind,
        parent_id: &NodeId,
        name: &str,
        progress: &mut dyn FnMut(&str),
    ) -> ReconcileResult<NodeId> {
        let destination = self.destination;
        let siblings = self
            .index
            .children(parent_id)
            .await
            .map_err(ReconcileError::from_lookup)?;
        if let Some(existing) = siblings.lookup(name) {
            progress(&format!("Found existing {kind}: {name}"));
            return Ok(existing.clone());
        }

        let task = destination
            .create_task(parent_id, name, kind.ancestor_description())
            .await
            .map_err(ReconcileError::from_task_creation)?;
        siblings.insert(name, task.id().clone());
        info!(%kind, task = name, id = %task.id(), "created ancestor task");
        progress(&format!("Added {kind}: {name}"));
        Ok(task.id().clone())
    }

    async fn place_issue(
        &mut self,
        parent_id: &NodeId,
        content: &FormattedContent,
        progress: &mut dyn FnMut(&str),
    ) -> ReconcileResult<NodeId> {
        let destination = self.destination;
        let siblings = self
            .index
            .children(parent_id)
            .await
            .map_err(ReconcileError::from_lookup)?;
        if let Some(existing) = siblings.lookup_any(content.match_names()) {
            progress(&format!("Task already exists: {}", content.content));
            return Ok(existing.clone());
        }

        let task = destination
            .create_task(parent_id, &content.content, content.description())
            .await
            .map_err(ReconcileError::from_task_creation)?;
        siblings.insert(&content.content, task.id().clone());
        info!(task = %content.content, id = %task.id(), "created issue task");
        progress(&format!("Created task: {}", content.content));

        if let Some(comment) = content.comment() {
            PendingComment::new(task.id().clone(), comment)
                .post(destination)
                .await?;
        }
        Ok(task.id().clone())
    }
}
