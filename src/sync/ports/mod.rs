//! Port contracts for issue synchronisation.
//!
//! Ports define infrastructure-agnostic interfaces used by sync services.

pub mod cache;
pub mod destination;

pub use cache::{CacheCleaner, CacheCleanupError};
pub use destination::{DestinationClient, DestinationError, DestinationResult};
