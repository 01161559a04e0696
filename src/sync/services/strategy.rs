//! Task creation strategies and their selection from configuration.

use tracing::{info, warn};

use super::{ContentFormatter, HierarchyResolver, ReconcileResult, TaskReconciler};
use crate::sync::{
    domain::{
        CloneRequest, Configuration, ConfigurationError, FormattedContent, HierarchyPlan, Mode,
        NodeId, NodeKind, NodeNames, RepositorySlug, SourceIssue, TaskCreationStrategy,
    },
    ports::DestinationClient,
};

/// How a clone request is laid out in the destination.
///
/// Each strategy contributes only a fixed mode and the rule for naming the
/// nodes of that mode's plan; the walk itself is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloneStrategy {
    /// One project per repository with milestone tasks inside.
    ByRepository,
    /// Repository tasks with milestone tasks inside one named project.
    SingleProject,
    /// A user's assigned issues from many repositories, grouped by
    /// repository and organisation inside one named project.
    OwnerAssignedIssues,
}

impl CloneStrategy {
    /// Returns the mode this strategy reconciles with.
    #[must_use]
    pub const fn mode(self) -> Mode {
        match self {
            Self::ByRepository => Mode::MultiProjectMilestone,
            Self::SingleProject => Mode::SingleProjectMilestone,
            Self::OwnerAssignedIssues => Mode::SingleProjectAssignee,
        }
    }

    /// Returns the hierarchy plan for this strategy's mode.
    #[must_use]
    pub const fn plan(self) -> HierarchyPlan {
        HierarchyResolver::resolve(self.mode())
    }

    /// Returns the strategy name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ByRepository => "by-repository",
            Self::SingleProject => "single-project",
            Self::OwnerAssignedIssues => "owner-assigned-issues",
        }
    }

    /// Returns the repository an issue is filed under.
    ///
    /// Assigned-issue requests span repositories, so each issue's own slug is
    /// used; the other strategies prefer the request's repository.
    #[must_use]
    pub fn repository_slug<'r>(
        self,
        request: &'r CloneRequest,
        issue: &'r SourceIssue,
    ) -> &'r RepositorySlug {
        match self {
            Self::OwnerAssignedIssues => issue.slug(),
            Self::ByRepository | Self::SingleProject => {
                request.repository_slug().unwrap_or_else(|| issue.slug())
            }
        }
    }

    /// Chooses the name of every node kind above and including the issue.
    #[must_use]
    pub fn node_names(
        self,
        request: &CloneRequest,
        issue: &SourceIssue,
        configuration: &Configuration,
        content: &FormattedContent,
    ) -> NodeNames {
        let slug = self.repository_slug(request, issue);
        NodeNames::new()
            .with(NodeKind::Issue, content.content.clone())
            .with(NodeKind::Milestone, request.group_label())
            .with(NodeKind::Repository, slug.name())
            .with(NodeKind::Organization, slug.owner())
            .with(
                NodeKind::NamedProject,
                configuration.todoist_project_name.clone(),
            )
    }

    /// Clones every issue of the request, in order, and returns the issue
    /// task ids.
    ///
    /// Issues are processed strictly one after another. The first error
    /// aborts the request; nodes created before it stay in place.
    ///
    /// # Errors
    ///
    /// Returns the first [`super::ReconcileError`] raised for any issue.
    pub async fn create_tasks<D: DestinationClient>(
        self,
        destination: &D,
        configuration: &Configuration,
        request: &CloneRequest,
        progress: &mut dyn FnMut(&str),
    ) -> ReconcileResult<Vec<NodeId>> {
        let plan = self.plan();
        info!(
            strategy = self.as_str(),
            %plan,
            issues = request.issues().len(),
            "cloning issues"
        );
        progress("Starting");
        if self.mode().is_single_project() {
            progress(&format!(
                "Using single project: {}",
                configuration.todoist_project_name
            ));
        }

        let mut reconciler = TaskReconciler::new(destination);
        let mut issue_tasks = Vec::with_capacity(request.issues().len());
        for issue in request.issues() {
            let content = ContentFormatter::format(issue, configuration.github_url_option);
            let names = self.node_names(request, issue, configuration, &content);
            let task_id = reconciler
                .reconcile(&plan, &names, &content, progress)
                .await?;
            issue_tasks.push(task_id);
        }

        progress("Done");
        Ok(issue_tasks)
    }
}

/// Picks the strategy named by the persisted configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategySelector;

impl StrategySelector {
    /// Maps a persisted strategy choice to a strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::StrategyNotSet`] when no strategy has
    /// been chosen.
    pub const fn try_select(
        strategy: TaskCreationStrategy,
    ) -> Result<CloneStrategy, ConfigurationError> {
        match strategy {
            TaskCreationStrategy::ProjectByRepository => Ok(CloneStrategy::ByRepository),
            TaskCreationStrategy::SingleTodoistProject => Ok(CloneStrategy::SingleProject),
            TaskCreationStrategy::AllIssuesAssignedToUser => {
                Ok(CloneStrategy::OwnerAssignedIssues)
            }
            TaskCreationStrategy::NotSet => Err(ConfigurationError::StrategyNotSet),
        }
    }

    /// Selects the strategy for a run, degrading to
    /// [`CloneStrategy::SingleProject`] when the choice is unusable.
    #[must_use]
    pub fn select(configuration: &Configuration) -> CloneStrategy {
        Self::try_select(configuration.task_creation_strategy).unwrap_or_else(|err| {
            warn!(
                error = %err,
                fallback = CloneStrategy::SingleProject.as_str(),
                "using fallback task creation strategy"
            );
            CloneStrategy::SingleProject
        })
    }
}
