//! Source issue value objects selected for cloning.

use super::SyncDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Validated GitHub repository identifier in `owner/repo` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositorySlug {
    owner: String,
    name: String,
}

impl RepositorySlug {
    /// Creates a validated repository slug.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::InvalidRepositorySlug`] if the value does not
    /// contain exactly one slash-delimited owner and repository segment.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut segments = normalized.split('/');
        let owner = segments.next().unwrap_or_default();
        let name = segments.next().unwrap_or_default();
        let is_valid = !owner.is_empty()
            && !name.is_empty()
            && segments.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(SyncDomainError::InvalidRepositorySlug(raw));
        }

        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Returns the organisation or user that owns the repository.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the bare repository name without its owner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for RepositorySlug {
    type Error = SyncDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepositorySlug> for String {
    fn from(value: RepositorySlug) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// An issue selected in the upstream tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIssue {
    slug: RepositorySlug,
    title: String,
    url: String,
    labels: Vec<String>,
}

impl SourceIssue {
    /// Creates an issue belonging to the given repository.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyIssueTitle`] if the title is blank.
    pub fn new(
        slug: RepositorySlug,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, SyncDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(SyncDomainError::EmptyIssueTitle);
        }

        Ok(Self {
            slug,
            title: trimmed.to_owned(),
            url: url.into().trim().to_owned(),
            labels: Vec::new(),
        })
    }

    /// Creates an issue whose repository is taken from its GitHub URL.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::InvalidIssueUrl`] when the URL is not a
    /// GitHub issue or pull request link, or
    /// [`SyncDomainError::EmptyIssueTitle`] if the title is blank.
    pub fn from_url(title: impl Into<String>, url: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw_url = url.into();
        let slug = Self::slug_from_url(&raw_url)?;
        Self::new(slug, title, raw_url)
    }

    /// Extracts `owner/repo` from a GitHub issue or pull request URL.
    ///
    /// Only the URL text is examined; nothing is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::InvalidIssueUrl`] when the URL is not of the
    /// form `https://github.com/<owner>/<repo>/(issues|pull)/<number>`.
    pub fn slug_from_url(url: &str) -> Result<RepositorySlug, SyncDomainError> {
        let invalid = || SyncDomainError::InvalidIssueUrl(url.to_owned());
        let path = url.trim().strip_prefix(GITHUB_URL_PREFIX).ok_or_else(invalid)?;
        let mut segments = path.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let kind = segments.next().unwrap_or_default();
        let number = segments.next().unwrap_or_default();

        let is_issue_link = matches!(kind, "issues" | "pull")
            && !number.is_empty()
            && number.chars().all(|c| c.is_ascii_digit());
        if !is_issue_link {
            return Err(invalid());
        }

        RepositorySlug::new(format!("{owner}/{repo}")).map_err(|_| invalid())
    }

    /// Sets the issue labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Returns the repository the issue belongs to.
    #[must_use]
    pub const fn slug(&self) -> &RepositorySlug {
        &self.slug
    }

    /// Returns the trimmed issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue URL, which may be empty.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the issue labels.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// One "Clone" action: a group of issues to copy into Todoist.
///
/// For milestone-grouped strategies `group_label` names the milestone task.
/// Requests built from a user's assigned issues span several repositories,
/// so the request-level slug is optional and each issue carries its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    repository_slug: Option<RepositorySlug>,
    group_label: String,
    issues: Vec<SourceIssue>,
}

impl CloneRequest {
    /// Creates a request for issues from a single repository.
    #[must_use]
    pub fn new(
        repository_slug: RepositorySlug,
        group_label: impl Into<String>,
        issues: impl IntoIterator<Item = SourceIssue>,
    ) -> Self {
        Self {
            repository_slug: Some(repository_slug),
            group_label: group_label.into().trim().to_owned(),
            issues: issues.into_iter().collect(),
        }
    }

    /// Creates a request for issues assigned to one user across repositories.
    #[must_use]
    pub fn for_assigned_issues(issues: impl IntoIterator<Item = SourceIssue>) -> Self {
        Self {
            repository_slug: None,
            group_label: String::new(),
            issues: issues.into_iter().collect(),
        }
    }

    /// Returns the repository the request was made from, if any.
    #[must_use]
    pub const fn repository_slug(&self) -> Option<&RepositorySlug> {
        self.repository_slug.as_ref()
    }

    /// Returns the milestone or grouping label.
    #[must_use]
    pub fn group_label(&self) -> &str {
        &self.group_label
    }

    /// Returns the issues in selection order.
    #[must_use]
    pub fn issues(&self) -> &[SourceIssue] {
        &self.issues
    }
}
