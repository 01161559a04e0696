//! Static mapping from mode to hierarchy plan.

use crate::sync::domain::{HierarchyPlan, InvalidHierarchyError, Mode, NodeKind};

const MULTI_PROJECT_MILESTONE: &[NodeKind] =
    &[NodeKind::Issue, NodeKind::Milestone, NodeKind::Repository];
const SINGLE_PROJECT_MILESTONE: &[NodeKind] = &[
    NodeKind::Issue,
    NodeKind::Milestone,
    NodeKind::Repository,
    NodeKind::NamedProject,
];
const SINGLE_PROJECT_ASSIGNEE: &[NodeKind] = &[
    NodeKind::Issue,
    NodeKind::Repository,
    NodeKind::Organization,
    NodeKind::NamedProject,
];
const MULTI_PROJECT_ASSIGNEE: &[NodeKind] = &[
    NodeKind::Issue,
    NodeKind::Milestone,
    NodeKind::Repository,
    NodeKind::Organization,
];

/// Answers which node kinds must exist above an issue for a given mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyResolver;

impl HierarchyResolver {
    /// Returns the plan for a mode, leaf first and root last.
    #[must_use]
    pub const fn resolve(mode: Mode) -> HierarchyPlan {
        let kinds = match mode {
            Mode::MultiProjectMilestone => MULTI_PROJECT_MILESTONE,
            Mode::SingleProjectMilestone => SINGLE_PROJECT_MILESTONE,
            Mode::SingleProjectAssignee => SINGLE_PROJECT_ASSIGNEE,
            Mode::MultiProjectAssignee => MULTI_PROJECT_ASSIGNEE,
        };
        HierarchyPlan::new(mode, kinds)
    }

    /// Returns `true` iff `kind` is the last element of `plan`.
    #[must_use]
    pub fn is_root_task(kind: NodeKind, plan: &HierarchyPlan) -> bool {
        plan.root() == kind
    }

    /// Returns the kind directly above `kind`, or `None` for the root.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHierarchyError::KindNotInPlan`] when `kind` does not
    /// belong to `plan`.
    pub fn parent_kind_of(
        kind: NodeKind,
        plan: &HierarchyPlan,
    ) -> Result<Option<NodeKind>, InvalidHierarchyError> {
        let position = plan.position(kind)?;
        Ok(plan.kinds().get(position + 1).copied())
    }
}
