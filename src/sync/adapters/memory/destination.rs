//! In-memory Todoist stand-in for synchronisation tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::sync::{
    domain::{DestinationNode, NodeId},
    ports::{DestinationClient, DestinationError, DestinationResult},
};

/// Code returned when a task is created under an unknown parent.
const UNKNOWN_PARENT_CODE: i64 = 404;

/// A destination call, recorded in the order it was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationCall {
    /// `list_projects`.
    ListProjects,
    /// `create_project`.
    CreateProject {
        /// Requested project name.
        name: String,
    },
    /// `list_child_tasks`.
    ListChildTasks {
        /// Parent project or task.
        parent_id: NodeId,
    },
    /// `create_task`.
    CreateTask {
        /// Parent project or task.
        parent_id: NodeId,
        /// Task content.
        content: String,
        /// Task description, if any.
        description: Option<String>,
    },
    /// `create_comment`.
    CreateComment {
        /// Commented task.
        task_id: NodeId,
        /// Comment text.
        content: String,
    },
}

/// Create operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailingOperation {
    /// `create_project`.
    CreateProject,
    /// `create_task`.
    CreateTask,
    /// `create_comment`.
    CreateComment,
}

#[derive(Debug)]
struct InjectedFailure {
    operation: FailingOperation,
    target: Option<String>,
    error: DestinationError,
}

#[derive(Debug, Default)]
struct InMemoryDestinationState {
    projects: Vec<DestinationNode>,
    tasks: Vec<DestinationNode>,
    comments: Vec<(NodeId, String)>,
    calls: Vec<DestinationCall>,
    failures: Vec<InjectedFailure>,
    rejected_credential: Option<String>,
}

impl InMemoryDestinationState {
    fn contains(&self, id: &NodeId) -> bool {
        self.projects
            .iter()
            .chain(self.tasks.iter())
            .any(|node| node.id() == id)
    }

    fn check_credential(&self) -> DestinationResult<()> {
        self.rejected_credential
            .as_ref()
            .map_or(Ok(()), |message| {
                Err(DestinationError::Authentication(message.clone()))
            })
    }

    /// Removes and returns the first one-shot failure matching the call.
    fn take_failure(&mut self, operation: FailingOperation, target: &str) -> Option<DestinationError> {
        let position = self.failures.iter().position(|failure| {
            failure.operation == operation
                && failure
                    .target
                    .as_deref()
                    .is_none_or(|expected| expected == target)
        })?;
        Some(self.failures.remove(position).error)
    }
}

/// Thread-safe in-memory destination.
///
/// Projects, tasks and comments live in insertion order, so listings are
/// deterministic. Every port call is journaled, including calls that fail,
/// and one-shot failures can be injected per create operation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDestination {
    state: Arc<RwLock<InMemoryDestinationState>>,
}

fn lock_error(err: &impl std::fmt::Display) -> DestinationError {
    DestinationError::unavailable(std::io::Error::other(err.to_string()))
}

fn new_node_id() -> NodeId {
    NodeId::new(Uuid::new_v4().to_string())
}

impl InMemoryDestination {
    /// Creates an empty destination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DestinationResult<RwLockReadGuard<'_, InMemoryDestinationState>> {
        self.state.read().map_err(|err| lock_error(&err))
    }

    fn write(&self) -> DestinationResult<RwLockWriteGuard<'_, InMemoryDestinationState>> {
        self.state.write().map_err(|err| lock_error(&err))
    }

    /// Adds a pre-existing project without journaling a call.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn seed_project(&self, name: &str) -> DestinationResult<DestinationNode> {
        let mut state = self.write()?;
        let project = DestinationNode::new(new_node_id(), name, None);
        state.projects.push(project.clone());
        Ok(project)
    }

    /// Adds a pre-existing task without journaling a call.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn seed_task(&self, parent_id: &NodeId, content: &str) -> DestinationResult<DestinationNode> {
        let mut state = self.write()?;
        let task = DestinationNode::new(new_node_id(), content, Some(parent_id.clone()));
        state.tasks.push(task.clone());
        Ok(task)
    }

    /// Makes the next matching create call fail with `error`.
    ///
    /// With `target` set, only a call for that project name, task content or
    /// comment text triggers the failure.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn fail_next(
        &self,
        operation: FailingOperation,
        target: Option<&str>,
        error: DestinationError,
    ) -> DestinationResult<()> {
        let mut state = self.write()?;
        state.failures.push(InjectedFailure {
            operation,
            target: target.map(str::to_owned),
            error,
        });
        Ok(())
    }

    /// Refuses every subsequent call with an authentication error.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn reject_credential(&self, message: &str) -> DestinationResult<()> {
        let mut state = self.write()?;
        state.rejected_credential = Some(message.to_owned());
        Ok(())
    }

    /// Returns every journaled call in order.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn calls(&self) -> DestinationResult<Vec<DestinationCall>> {
        Ok(self.read()?.calls.clone())
    }

    /// Returns all projects in creation order.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn projects(&self) -> DestinationResult<Vec<DestinationNode>> {
        Ok(self.read()?.projects.clone())
    }

    /// Returns all tasks in creation order.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn tasks(&self) -> DestinationResult<Vec<DestinationNode>> {
        Ok(self.read()?.tasks.clone())
    }

    /// Returns the tasks directly under a project or task.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn children_of(&self, parent_id: &NodeId) -> DestinationResult<Vec<DestinationNode>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.parent_id() == Some(parent_id))
            .cloned()
            .collect())
    }

    /// Returns the comments posted on a task.
    ///
    /// # Errors
    ///
    /// Returns destination runtime errors when lock acquisition fails.
    pub fn comments_on(&self, task_id: &NodeId) -> DestinationResult<Vec<String>> {
        let state = self.read()?;
        Ok(state
            .comments
            .iter()
            .filter(|(id, _)| id == task_id)
            .map(|(_, content)| content.clone())
            .collect())
    }
}

#[async_trait]
impl DestinationClient for InMemoryDestination {
    async fn list_projects(&self) -> DestinationResult<Vec<DestinationNode>> {
        let mut state = self.write()?;
        state.calls.push(DestinationCall::ListProjects);
        state.check_credential()?;
        Ok(state.projects.clone())
    }

    async fn create_project(&self, name: &str) -> DestinationResult<DestinationNode> {
        let mut state = self.write()?;
        state.calls.push(DestinationCall::CreateProject {
            name: name.to_owned(),
        });
        state.check_credential()?;
        if let Some(error) = state.take_failure(FailingOperation::CreateProject, name) {
            return Err(error);
        }

        let project = DestinationNode::new(new_node_id(), name, None);
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn list_child_tasks(
        &self,
        parent_id: &NodeId,
    ) -> DestinationResult<Vec<DestinationNode>> {
        let mut state = self.write()?;
        state.calls.push(DestinationCall::ListChildTasks {
            parent_id: parent_id.clone(),
        });
        state.check_credential()?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.parent_id() == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn create_task(
        &self,
        parent_id: &NodeId,
        content: &str,
        description: Option<&str>,
    ) -> DestinationResult<DestinationNode> {
        let mut state = self.write()?;
        state.calls.push(DestinationCall::CreateTask {
            parent_id: parent_id.clone(),
            content: content.to_owned(),
            description: description.map(str::to_owned),
        });
        state.check_credential()?;
        if let Some(error) = state.take_failure(FailingOperation::CreateTask, content) {
            return Err(error);
        }
        if !state.contains(parent_id) {
            return Err(DestinationError::rejected(
                format!("parent {parent_id} not found"),
                UNKNOWN_PARENT_CODE,
            ));
        }

        let task = DestinationNode::new(new_node_id(), content, Some(parent_id.clone()));
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn create_comment(&self, task_id: &NodeId, content: &str) -> DestinationResult<NodeId> {
        let mut state = self.write()?;
        state.calls.push(DestinationCall::CreateComment {
            task_id: task_id.clone(),
            content: content.to_owned(),
        });
        state.check_credential()?;
        if let Some(error) = state.take_failure(FailingOperation::CreateComment, content) {
            return Err(error);
        }
        if !state.tasks.iter().any(|task| task.id() == task_id) {
            return Err(DestinationError::rejected(
                format!("task {task_id} not found"),
                UNKNOWN_PARENT_CODE,
            ));
        }

        state.comments.push((task_id.clone(), content.to_owned()));
        Ok(new_node_id())
    }
}
