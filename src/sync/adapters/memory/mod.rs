//! In-memory adapters for tests and dry runs.

mod destination;

pub use destination::{DestinationCall, FailingOperation, InMemoryDestination};
