//! Issue-to-Todoist hierarchy synchronisation.
//!
//! This module turns a flat selection of GitHub issues into a nested tree of
//! Todoist projects and tasks, reusing nodes that already exist by name and
//! creating only the missing ones. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
