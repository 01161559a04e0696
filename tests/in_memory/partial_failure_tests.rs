//! Failure and remediation tests for the clone service.
//!
//! Nodes created before a failure stay in place and are reused on retry.

use crate::in_memory::helpers::{
    CacheHome, cache_home, child_names, clone_service, destination, github_issue, runtime, slug,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::sync::{
    adapters::memory::{FailingOperation, InMemoryDestination},
    domain::{CloneRequest, Configuration, UrlOption},
    ports::DestinationError,
    services::{CloneError, INVALID_TEMP_ID, ReconcileError},
};

fn crash_request() -> CloneRequest {
    CloneRequest::new(
        slug("acme/widget"),
        "v2",
        [github_issue("acme/widget", "Crash on load", 3)],
    )
}

fn reject_next(destination: &InMemoryDestination, operation: FailingOperation, code: i64) {
    destination
        .fail_next(
            operation,
            None,
            DestinationError::rejected("Invalid temporary id", code),
        )
        .expect("configure destination");
}

/// A stale-id rejection removes the cache and the replay completes.
#[rstest]
fn stale_id_removes_cache_and_retries(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    reject_next(&destination, FailingOperation::CreateTask, INVALID_TEMP_ID);
    let service = clone_service(&destination, &cache_home, Configuration::default());
    let mut messages = Vec::new();

    rt.block_on(service.create_tasks(&crash_request(), |message: &str| {
        messages.push(message.to_owned());
    }))
    .expect("retry succeeds");

    assert!(!cache_home.cache.path().exists());
    assert!(cache_home.root.path().exists());
    assert!(messages.contains(&"Retrying after clearing the Todoist cache".to_owned()));
    assert_eq!(child_names(&destination, "Development"), vec!["widget"]);
    assert_eq!(child_names(&destination, "widget"), vec!["v2"]);
    assert_eq!(child_names(&destination, "v2").len(), 1);
}

/// With cleanup turned off the user is told what to do and the cache stays.
#[rstest]
fn stale_id_with_cleanup_disabled_keeps_cache(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    reject_next(&destination, FailingOperation::CreateTask, INVALID_TEMP_ID);
    let service = clone_service(
        &destination,
        &cache_home,
        Configuration::default().with_cache_cleanup(false),
    );

    let result = rt.block_on(service.create_tasks(&crash_request(), |_: &str| {}));

    assert!(
        matches!(&result, Err(CloneError::ActionRequired { advice, .. })
            if advice.contains("Turn the preference on")),
        "expected advice, got {result:?}"
    );
    assert!(cache_home.cache.path().exists());
    // ancestors created before the failure stay in place
    assert_eq!(child_names(&destination, "widget"), vec!["v2"]);
    assert!(child_names(&destination, "v2").is_empty());
}

/// Errors outside the handled set are reported and nothing is removed.
#[rstest]
fn unhandled_rejection_is_reported(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    reject_next(&destination, FailingOperation::CreateProject, 35);
    let service = clone_service(&destination, &cache_home, Configuration::default());

    let result = rt.block_on(service.create_tasks(&crash_request(), |_: &str| {}));

    assert!(
        matches!(
            &result,
            Err(CloneError::Reconcile(ReconcileError::TaskCreation(failure))) if failure.code == 35
        ),
        "expected task creation failure, got {result:?}"
    );
    assert!(cache_home.cache.path().exists());
    assert!(destination.projects().expect("projects readable").is_empty());
}

/// A refused URL comment is posted on the task it belonged to before the
/// replay reuses that task.
#[rstest]
fn refused_comment_is_posted_on_retry(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    reject_next(&destination, FailingOperation::CreateComment, INVALID_TEMP_ID);
    let service = clone_service(
        &destination,
        &cache_home,
        Configuration::default().with_url_option(UrlOption::AddAsComment),
    );
    let mut messages = Vec::new();

    let issue_tasks = rt
        .block_on(service.create_tasks(&crash_request(), |message: &str| {
            messages.push(message.to_owned());
        }))
        .expect("retry succeeds");

    assert!(!cache_home.cache.path().exists());
    assert_eq!(child_names(&destination, "v2"), vec!["Crash on load"]);
    let task_id = issue_tasks.first().expect("issue task returned");
    assert_eq!(
        destination.comments_on(task_id).expect("comments readable"),
        vec!["https://github.com/acme/widget/issues/3".to_owned()]
    );
    assert!(messages.contains(&format!("Added comment to task: {task_id}")));
    assert!(messages.contains(&"Task already exists: Crash on load".to_owned()));
}

/// A comment refused again during the retry is reported.
#[rstest]
fn comment_refused_twice_is_reported(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    reject_next(&destination, FailingOperation::CreateComment, INVALID_TEMP_ID);
    let service = clone_service(
        &destination,
        &cache_home,
        Configuration::default().with_url_option(UrlOption::AddAsComment),
    );
    reject_next(&destination, FailingOperation::CreateComment, INVALID_TEMP_ID);

    let result = rt.block_on(service.create_tasks(&crash_request(), |_: &str| {}));

    assert!(
        matches!(
            &result,
            Err(CloneError::Reconcile(err)) if err.pending_comment().is_some()
        ),
        "expected the comment failure to be reported, got {result:?}"
    );
    assert_eq!(child_names(&destination, "v2"), vec!["Crash on load"]);
}
