//! Given steps for issue cloning BDD scenarios.

use super::world::CloneWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use trellis::sync::{
    adapters::memory::FailingOperation,
    domain::{RepositorySlug, SourceIssue},
    ports::DestinationError,
};

#[given(r#"the task creation strategy "{strategy}""#)]
fn task_creation_strategy(world: &mut CloneWorld, strategy: String) {
    world
        .configuration_lines
        .push(format!("taskCreationStrategy = \"{strategy}\""));
}

#[given(r#"the URL option "{option}""#)]
fn url_option(world: &mut CloneWorld, option: String) {
    world
        .configuration_lines
        .push(format!("gitHubURLOption = \"{option}\""));
}

#[given("automatic cache cleanup is disabled")]
fn cache_cleanup_disabled(world: &mut CloneWorld) {
    world
        .configuration_lines
        .push("cleanTodoistCache = false".to_owned());
}

#[given(r#"issues from repository "{repository}" in milestone "{milestone}""#)]
fn issues_from_repository(
    world: &mut CloneWorld,
    repository: String,
    milestone: String,
) -> Result<(), eyre::Report> {
    world.repository =
        Some(RepositorySlug::new(repository).wrap_err("parse scenario repository")?);
    world.milestone = milestone;
    Ok(())
}

#[given(r#"an issue titled "{title}" numbered {number:u64}"#)]
fn issue_titled(world: &mut CloneWorld, title: String, number: u64) -> Result<(), eyre::Report> {
    let repository = world
        .repository
        .clone()
        .ok_or_else(|| eyre::eyre!("missing repository in scenario world"))?;
    let url = format!("https://github.com/{repository}/issues/{number}");
    world
        .issues
        .push(SourceIssue::new(repository, title, url).wrap_err("build scenario issue")?);
    Ok(())
}

#[given(r#"the destination rejects task "{content}" with code {code:i64}"#)]
fn destination_rejects_task(
    world: &mut CloneWorld,
    content: String,
    code: i64,
) -> Result<(), eyre::Report> {
    world
        .destination
        .fail_next(
            FailingOperation::CreateTask,
            Some(content.as_str()),
            DestinationError::rejected("Invalid temporary id", code),
        )
        .wrap_err("inject destination failure")?;
    Ok(())
}
