//! Then steps for issue cloning BDD scenarios.

use super::world::CloneWorld;
use rstest_bdd_macros::then;
use trellis::sync::{adapters::memory::DestinationCall, services::CloneError};

#[then("the clone succeeds")]
fn clone_succeeds(world: &CloneWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing clone result in scenario world"))?;
    result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected clone failure: {err}"))?;
    Ok(())
}

#[then("the user is asked to act")]
fn user_is_asked_to_act(world: &CloneWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing clone result in scenario world"))?;
    if !matches!(result, Err(CloneError::ActionRequired { .. })) {
        return Err(eyre::eyre!("expected advice for the user, got {result:?}"));
    }
    Ok(())
}

#[then(r#"project "{name}" exists"#)]
fn project_exists(world: &CloneWorld, name: String) -> Result<(), eyre::Report> {
    let projects = world.destination.projects()?;
    if !projects.iter().any(|project| project.name() == name) {
        return Err(eyre::eyre!("expected project {name}"));
    }
    Ok(())
}

#[then(r#"task "{name}" is under "{parent}""#)]
fn task_is_under(world: &CloneWorld, name: String, parent: String) -> Result<(), eyre::Report> {
    let children = world.child_names(&parent)?;
    if !children.contains(&name) {
        return Err(eyre::eyre!(
            "expected {name} under {parent}, found {children:?}"
        ));
    }
    Ok(())
}

#[then(r#"task "{name}" was created once"#)]
fn task_created_once(world: &CloneWorld, name: String) -> Result<(), eyre::Report> {
    let created = world
        .destination
        .calls()?
        .iter()
        .filter(|call| {
            matches!(call, DestinationCall::CreateTask { content, .. } if *content == name)
        })
        .count();
    if created != 1 {
        return Err(eyre::eyre!("expected one create call for {name}, found {created}"));
    }
    Ok(())
}

#[then(r#"the progress reports "{message}""#)]
fn progress_reports(world: &CloneWorld, message: String) -> Result<(), eyre::Report> {
    if !world.progress.contains(&message) {
        return Err(eyre::eyre!(
            "expected progress message {message}, got {:?}",
            world.progress
        ));
    }
    Ok(())
}

#[then("the Todoist cache has been removed")]
fn cache_removed(world: &CloneWorld) -> Result<(), eyre::Report> {
    if world.cache.path().exists() {
        return Err(eyre::eyre!("expected {} to be removed", world.cache.path()));
    }
    Ok(())
}

#[then("the Todoist cache is still present")]
fn cache_present(world: &CloneWorld) -> Result<(), eyre::Report> {
    if !world.cache.path().exists() {
        return Err(eyre::eyre!("expected {} to remain", world.cache.path()));
    }
    if !world.cache_root.path().exists() {
        return Err(eyre::eyre!("scenario home directory disappeared"));
    }
    Ok(())
}
