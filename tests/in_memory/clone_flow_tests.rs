//! Layout tests for the clone service over [`InMemoryDestination`].
//!
//! Covers every strategy and shows that reruns only reuse nodes.

use crate::in_memory::helpers::{
    CacheHome, cache_home, child_names, clone_service, creation_count, destination, github_issue,
    runtime, slug,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;
use trellis::sync::{
    adapters::{config_file::parse_configuration, memory::InMemoryDestination},
    domain::{CloneRequest, Configuration, UrlOption},
};

fn widget_request() -> CloneRequest {
    CloneRequest::new(
        slug("acme/widget"),
        "v2",
        [
            github_issue("acme/widget", "Crash on load", 3),
            github_issue("acme/widget", "Slow start", 4),
        ],
    )
}

/// The default configuration nests everything in one hyperlinked project.
#[rstest]
fn default_configuration_builds_single_project_layout(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    let service = clone_service(&destination, &cache_home, Configuration::default());

    let issue_tasks = rt
        .block_on(service.create_tasks(&widget_request(), |_: &str| {}))
        .expect("clone succeeds");

    assert_eq!(issue_tasks.len(), 2);
    assert_eq!(child_names(&destination, "Development"), vec!["widget"]);
    assert_eq!(child_names(&destination, "widget"), vec!["v2"]);
    assert_eq!(
        child_names(&destination, "v2"),
        vec![
            "[Crash on load](https://github.com/acme/widget/issues/3)",
            "[Slow start](https://github.com/acme/widget/issues/4)",
        ]
    );
}

/// A persisted by-repository choice gives each repository its own project.
#[rstest]
fn persisted_by_repository_configuration_builds_repository_projects(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    let configuration = parse_configuration(
        r#"
        taskCreationStrategy = "Project by Repository"
        gitHubURLOption = "Add as description"
        "#,
    )
    .expect("valid configuration");
    let service = clone_service(&destination, &cache_home, configuration);

    rt.block_on(service.create_tasks(&widget_request(), |_: &str| {}))
        .expect("clone succeeds");

    let projects = destination.projects().expect("projects readable");
    assert_eq!(
        projects.iter().map(|project| project.name()).collect::<Vec<_>>(),
        vec!["widget"]
    );
    assert_eq!(child_names(&destination, "widget"), vec!["v2"]);
    assert_eq!(
        child_names(&destination, "v2"),
        vec!["Crash on load", "Slow start"]
    );
}

/// Assigned issues are grouped under their organisation and repository.
#[rstest]
fn assigned_issues_span_organisations(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    let configuration = parse_configuration(
        r#"
        taskCreationStrategy = "All Issues Assigned to User"
        gitHubURLOption = "Do not add"
        todoistProjectName = "Assigned"
        "#,
    )
    .expect("valid configuration");
    let service = clone_service(&destination, &cache_home, configuration);
    let request = CloneRequest::for_assigned_issues([
        github_issue("acme/widget", "Crash on load", 3),
        github_issue("other/tool", "Broken build", 9),
        github_issue("acme/gadget", "Wrong colour", 5),
    ]);

    rt.block_on(service.create_tasks(&request, |_: &str| {}))
        .expect("clone succeeds");

    assert_eq!(child_names(&destination, "Assigned"), vec!["acme", "other"]);
    assert_eq!(child_names(&destination, "acme"), vec!["widget", "gadget"]);
    assert_eq!(child_names(&destination, "tool"), vec!["Broken build"]);
}

/// Running the same request twice creates nothing the second time.
#[rstest]
fn rerunning_a_request_is_idempotent(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    let service = clone_service(&destination, &cache_home, Configuration::default());

    let first = rt
        .block_on(service.create_tasks(&widget_request(), |_: &str| {}))
        .expect("first clone succeeds");
    let created = creation_count(&destination);
    let mut messages = Vec::new();
    let second = rt
        .block_on(service.create_tasks(&widget_request(), |message: &str| {
            messages.push(message.to_owned());
        }))
        .expect("second clone succeeds");

    assert_eq!(first, second);
    assert_eq!(creation_count(&destination), created);
    assert!(messages.contains(&"Using project: Development".to_owned()));
}

/// Changing the URL option between runs still finds the earlier tasks.
#[rstest]
fn changing_url_option_reuses_existing_issue_tasks(
    runtime: io::Result<Runtime>,
    destination: Arc<InMemoryDestination>,
    cache_home: CacheHome,
) {
    let rt = runtime.expect("runtime creation");
    let plain = clone_service(
        &destination,
        &cache_home,
        Configuration::default().with_url_option(UrlOption::DoNotAdd),
    );
    let linked = clone_service(&destination, &cache_home, Configuration::default());

    let first = rt
        .block_on(plain.create_tasks(&widget_request(), |_: &str| {}))
        .expect("plain clone succeeds");
    let second = rt
        .block_on(linked.create_tasks(&widget_request(), |_: &str| {}))
        .expect("hyperlinked clone succeeds");

    assert_eq!(first, second);
    assert_eq!(
        child_names(&destination, "v2"),
        vec!["Crash on load", "Slow start"]
    );
}
