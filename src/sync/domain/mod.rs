//! Domain model for issue-to-task synchronisation.
//!
//! Values here describe source issues, the shape of the destination
//! hierarchy, and the persisted preferences that steer a run. Nothing in this
//! module performs I/O.

mod config;
mod content;
mod error;
mod hierarchy;
mod issue;
mod node;

pub use config::{Configuration, DEFAULT_TODOIST_PROJECT_NAME, TaskCreationStrategy};
pub use content::{FormattedContent, UrlOption};
pub use error::{ConfigurationError, InvalidHierarchyError, SyncDomainError};
pub use hierarchy::{HierarchyPlan, Mode, NodeKind, NodeNames};
pub use issue::{CloneRequest, RepositorySlug, SourceIssue};
pub use node::{DestinationNode, NameIndex, NodeId};
