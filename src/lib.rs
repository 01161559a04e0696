//! Trellis: GitHub issue to Todoist task synchronisation.
//!
//! This crate turns selected GitHub issues into Todoist tasks nested under
//! the projects and tasks that represent their organisation, repository and
//! milestone. Existing nodes are found by name and reused, so cloning the
//! same issues again only fills in what is missing.
//!
//! # Architecture
//!
//! Trellis follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory Todoist,
//!   cache directory, configuration file)
//!
//! # Modules
//!
//! - [`sync`]: Hierarchy planning, reconciliation and error remediation

pub mod sync;
