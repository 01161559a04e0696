//! Shared builders for synchronisation unit tests.

use crate::sync::{
    adapters::memory::{DestinationCall, InMemoryDestination},
    domain::{Configuration, RepositorySlug, SourceIssue, UrlOption},
    ports::cache::MockCacheCleaner,
};
use std::sync::Arc;

pub(super) fn slug(value: &str) -> RepositorySlug {
    RepositorySlug::new(value).expect("valid repository slug")
}

pub(super) fn issue(repository: &str, title: &str, number: u64) -> SourceIssue {
    SourceIssue::new(
        slug(repository),
        title,
        format!("https://github.com/{repository}/issues/{number}"),
    )
    .expect("valid source issue")
}

/// Configuration that names issue tasks by plain title.
pub(super) fn plain_configuration() -> Configuration {
    Configuration::default().with_url_option(UrlOption::DoNotAdd)
}

/// Returns only the create calls, in order.
pub(super) fn creations(destination: &InMemoryDestination) -> Vec<DestinationCall> {
    destination
        .calls()
        .expect("journal readable")
        .into_iter()
        .filter(|call| {
            matches!(
                call,
                DestinationCall::CreateProject { .. }
                    | DestinationCall::CreateTask { .. }
                    | DestinationCall::CreateComment { .. }
            )
        })
        .collect()
}

/// Counts create-task calls for the given content.
pub(super) fn task_creations_named(destination: &InMemoryDestination, content: &str) -> usize {
    creations(destination)
        .iter()
        .filter(|call| {
            matches!(call, DestinationCall::CreateTask { content: created, .. } if created == content)
        })
        .count()
}

/// A cache cleaner that must succeed exactly `times` times.
pub(super) fn cleaner_called(times: usize) -> Arc<MockCacheCleaner> {
    let mut cleaner = MockCacheCleaner::new();
    cleaner.expect_remove_cache().times(times).returning(|| Ok(()));
    Arc::new(cleaner)
}
