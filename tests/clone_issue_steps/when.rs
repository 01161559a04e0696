//! When steps for issue cloning BDD scenarios.

use std::sync::Arc;

use super::world::{CloneWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use trellis::sync::{
    adapters::config_file::parse_configuration,
    domain::CloneRequest,
    services::CloneService,
};

fn clone_issues(world: &mut CloneWorld) -> Result<(), eyre::Report> {
    let configuration = parse_configuration(&world.configuration_lines.join("\n"))
        .wrap_err("parse scenario configuration")?;
    let repository = world
        .repository
        .clone()
        .ok_or_else(|| eyre::eyre!("missing repository in scenario world"))?;
    let request = CloneRequest::new(repository, world.milestone.clone(), world.issues.clone());
    let service = CloneService::new(
        Arc::clone(&world.destination),
        Arc::clone(&world.cache),
        configuration,
    );

    let progress = &mut world.progress;
    let result = run_async(service.create_tasks(&request, |message: &str| {
        progress.push(message.to_owned());
    }));
    world.last_result = Some(result);
    Ok(())
}

#[when("the issues are cloned")]
fn issues_are_cloned(world: &mut CloneWorld) -> Result<(), eyre::Report> {
    clone_issues(world)
}

#[when("the issues are cloned again")]
fn issues_are_cloned_again(world: &mut CloneWorld) -> Result<(), eyre::Report> {
    clone_issues(world)
}
