//! Persisted preferences that steer a synchronisation run.

use super::{ConfigurationError, UrlOption};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Project name used when the user has not chosen one.
pub const DEFAULT_TODOIST_PROJECT_NAME: &str = "Development";

/// Persisted choice of how cloned issues are laid out in Todoist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaskCreationStrategy {
    /// Repositories become tasks inside one named project.
    #[default]
    SingleTodoistProject,
    /// Each repository becomes its own project.
    ProjectByRepository,
    /// A user's assigned issues are grouped by repository in one project.
    AllIssuesAssignedToUser,
    /// The user has not picked a strategy yet.
    NotSet,
}

impl TaskCreationStrategy {
    /// Returns the persisted spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleTodoistProject => "Single Todoist Project",
            Self::ProjectByRepository => "Project by Repository",
            Self::AllIssuesAssignedToUser => "All Issues Assigned to User",
            Self::NotSet => "Not Set",
        }
    }
}

impl FromStr for TaskCreationStrategy {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Single Todoist Project" | "SingleTodoistProject" => Ok(Self::SingleTodoistProject),
            "Project by Repository" | "ProjectByRepository" => Ok(Self::ProjectByRepository),
            "All Issues Assigned to User" | "AllIssuesAssignedToUser" => {
                Ok(Self::AllIssuesAssignedToUser)
            }
            "Not Set" | "NotSet" => Ok(Self::NotSet),
            _ => Err(ConfigurationError::UnknownStrategy(value.to_owned())),
        }
    }
}

impl TryFrom<String> for TaskCreationStrategy {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskCreationStrategy> for String {
    fn from(value: TaskCreationStrategy) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for TaskCreationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preferences read at the start of a run and passed in explicitly.
///
/// Unknown enum spellings never fail deserialisation: they are logged and
/// replaced with the safest behaviour (plain task names, and a strategy that
/// the selector resolves to the single-project layout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Layout of projects and tasks.
    #[serde(deserialize_with = "lenient_strategy")]
    pub task_creation_strategy: TaskCreationStrategy,
    /// Where the issue URL is placed.
    #[serde(rename = "gitHubURLOption", deserialize_with = "lenient_url_option")]
    pub github_url_option: UrlOption,
    /// Name of the single project used by single-project layouts.
    pub todoist_project_name: String,
    /// Whether stale-cache errors may be fixed by deleting the local cache.
    pub clean_todoist_cache: bool,
}

impl Configuration {
    /// Sets the task creation strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: TaskCreationStrategy) -> Self {
        self.task_creation_strategy = strategy;
        self
    }

    /// Sets the URL option.
    #[must_use]
    pub const fn with_url_option(mut self, option: UrlOption) -> Self {
        self.github_url_option = option;
        self
    }

    /// Sets the single project name.
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.todoist_project_name = name.into();
        self
    }

    /// Sets whether the local cache may be cleaned automatically.
    #[must_use]
    pub const fn with_cache_cleanup(mut self, enabled: bool) -> Self {
        self.clean_todoist_cache = enabled;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            task_creation_strategy: TaskCreationStrategy::default(),
            github_url_option: UrlOption::default(),
            todoist_project_name: DEFAULT_TODOIST_PROJECT_NAME.to_owned(),
            clean_todoist_cache: true,
        }
    }
}

fn lenient_strategy<'de, D>(deserializer: D) -> Result<TaskCreationStrategy, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|err: ConfigurationError| {
        warn!(error = %err, "ignoring unrecognised task creation strategy");
        TaskCreationStrategy::NotSet
    }))
}

fn lenient_url_option<'de, D>(deserializer: D) -> Result<UrlOption, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|err: ConfigurationError| {
        warn!(error = %err, "falling back to plain task names");
        UrlOption::DoNotAdd
    }))
}
