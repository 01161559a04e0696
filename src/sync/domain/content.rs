//! How an issue's URL is carried into the task it becomes.

use super::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the GitHub issue URL goes when a task is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UrlOption {
    /// The URL is dropped; the task is named after the issue title.
    DoNotAdd,
    /// The URL becomes the task description.
    AddAsDescription,
    /// The URL is posted as a comment on the new task.
    AddAsComment,
    /// The task name is a markdown link `[title](url)`.
    #[default]
    HyperLinkedTaskName,
}

impl UrlOption {
    /// Returns the persisted spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DoNotAdd => "Do not add",
            Self::AddAsDescription => "Add as description",
            Self::AddAsComment => "Add as comment",
            Self::HyperLinkedTaskName => "Hyper Linked Task Name",
        }
    }
}

impl FromStr for UrlOption {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Do not add" | "DoNotAdd" => Ok(Self::DoNotAdd),
            "Add as description" | "AddAsDescription" => Ok(Self::AddAsDescription),
            "Add as comment" | "AddAsComment" => Ok(Self::AddAsComment),
            "Hyper Linked Task Name" | "HyperLinkedTaskName" => Ok(Self::HyperLinkedTaskName),
            _ => Err(ConfigurationError::UnknownUrlOption(value.to_owned())),
        }
    }
}

impl TryFrom<String> for UrlOption {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UrlOption> for String {
    fn from(value: UrlOption) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for UrlOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fields used to create one issue task.
///
/// Empty `description` and `comment` mean "not set". A non-empty comment
/// must be posted in a separate call once the task exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedContent {
    /// Task content (its visible name).
    pub content: String,
    /// Task description.
    pub description: String,
    /// Comment to add after creation.
    pub comment: String,
    /// Every name an existing task for the same issue may already carry.
    pub known_names: Vec<String>,
}

impl FormattedContent {
    /// Returns the description, or `None` when empty.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        Some(self.description.as_str()).filter(|text| !text.is_empty())
    }

    /// Returns the follow-up comment, or `None` when empty.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        Some(self.comment.as_str()).filter(|text| !text.is_empty())
    }

    /// Iterates the content followed by the other accepted names.
    pub fn match_names(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.content.as_str()).chain(self.known_names.iter().map(String::as_str))
    }
}
