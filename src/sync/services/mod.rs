//! Application services for issue-to-task synchronisation.

mod clone;
mod content;
mod hierarchy;
mod name_index;
mod reconciler;
mod remediation;
mod strategy;

pub use clone::{CloneError, CloneResult, CloneService};
pub use content::ContentFormatter;
pub use hierarchy::HierarchyResolver;
pub use name_index::TaskNameIndex;
pub use reconciler::{
    CreationFailure, PendingComment, ReconcileError, ReconcileResult, TaskReconciler,
};
pub use remediation::{
    Classification, INVALID_TEMP_ID, Remediation, RemediationErrorHandler,
};
pub use strategy::{CloneStrategy, StrategySelector};
