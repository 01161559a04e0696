//! Positions in the destination hierarchy and the modes that arrange them.

use super::InvalidHierarchyError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A position in the destination hierarchy, not a concrete project or task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The task cloned from a GitHub issue.
    Issue,
    /// A milestone or grouping-label task.
    Milestone,
    /// A task or project named after a repository.
    Repository,
    /// A task or project named after a GitHub organisation.
    Organization,
    /// The user's single named Todoist project.
    NamedProject,
}

impl NodeKind {
    /// Returns the kind name used in progress messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Milestone => "milestone",
            Self::Repository => "repository",
            Self::Organization => "organization",
            Self::NamedProject => "project",
        }
    }

    /// Returns `true` for kinds that may sit at the top of a plan.
    #[must_use]
    pub const fn is_root_capable(self) -> bool {
        matches!(
            self,
            Self::Repository | Self::Organization | Self::NamedProject
        )
    }

    /// Returns the description given to newly created ancestor tasks.
    #[must_use]
    pub const fn ancestor_description(self) -> Option<&'static str> {
        match self {
            Self::Issue | Self::NamedProject => None,
            Self::Milestone => Some("Milestone task"),
            Self::Repository => Some("Repository task"),
            Self::Organization => Some("GitHub organisation"),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project grouping crossed with task grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One named project; issues grouped under milestones.
    SingleProjectMilestone,
    /// One named project; issues grouped under repositories and organisations.
    SingleProjectAssignee,
    /// One project per repository; issues grouped under milestones.
    MultiProjectMilestone,
    /// One project per organisation; issues grouped under repositories.
    MultiProjectAssignee,
}

impl Mode {
    /// Every mode, in table order.
    pub const ALL: [Self; 4] = [
        Self::MultiProjectMilestone,
        Self::SingleProjectMilestone,
        Self::SingleProjectAssignee,
        Self::MultiProjectAssignee,
    ];

    /// Returns `true` when every issue lands in one named project.
    #[must_use]
    pub const fn is_single_project(self) -> bool {
        matches!(
            self,
            Self::SingleProjectMilestone | Self::SingleProjectAssignee
        )
    }

    /// Returns the mode name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleProjectMilestone => "single-project/milestone",
            Self::SingleProjectAssignee => "single-project/assignee",
            Self::MultiProjectMilestone => "multi-project/milestone",
            Self::MultiProjectAssignee => "multi-project/assignee",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered node kinds from the issue up to the root, root last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyPlan {
    mode: Mode,
    kinds: &'static [NodeKind],
}

impl HierarchyPlan {
    /// Wraps one row of the hierarchy table.
    pub(crate) const fn new(mode: Mode, kinds: &'static [NodeKind]) -> Self {
        Self { mode, kinds }
    }

    /// Returns the mode this plan was derived from.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the kinds, leaf first and root last.
    #[must_use]
    pub const fn kinds(&self) -> &'static [NodeKind] {
        self.kinds
    }

    /// Returns the kind realised as a destination project.
    #[must_use]
    pub fn root(&self) -> NodeKind {
        // Table rows are never empty.
        self.kinds.last().copied().unwrap_or(NodeKind::Issue)
    }

    /// Returns the position of `kind`, counting from the leaf.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHierarchyError::KindNotInPlan`] when the kind is
    /// absent.
    pub fn position(&self, kind: NodeKind) -> Result<usize, InvalidHierarchyError> {
        self.kinds
            .iter()
            .position(|candidate| *candidate == kind)
            .ok_or_else(|| InvalidHierarchyError::KindNotInPlan {
                kind,
                plan: self.mode.to_string(),
            })
    }

    /// Iterates the kinds from the root down to the leaf.
    pub fn root_to_leaf(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.kinds.iter().rev().copied()
    }
}

impl fmt::Display for HierarchyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.kinds.iter().map(|kind| kind.as_str()).collect();
        write!(f, "{} [{}]", self.mode, names.join(" > "))
    }
}

/// The concrete name chosen for each kind of one issue's hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeNames {
    names: HashMap<NodeKind, String>,
}

impl NodeNames {
    /// Creates an empty name set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name for a kind, replacing any earlier choice.
    #[must_use]
    pub fn with(mut self, kind: NodeKind, name: impl Into<String>) -> Self {
        self.names.insert(kind, name.into());
        self
    }

    /// Returns the name chosen for a kind.
    #[must_use]
    pub fn get(&self, kind: NodeKind) -> Option<&str> {
        self.names.get(&kind).map(String::as_str)
    }

    /// Returns the non-blank name chosen for a kind.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHierarchyError::MissingName`] when no name, or only
    /// whitespace, was supplied.
    pub fn require(&self, kind: NodeKind) -> Result<&str, InvalidHierarchyError> {
        self.get(kind)
            .filter(|name| !name.trim().is_empty())
            .ok_or(InvalidHierarchyError::MissingName(kind))
    }
}
