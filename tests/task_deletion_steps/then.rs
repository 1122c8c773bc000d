//! Then steps for guarded task change scenarios.

use super::world::{OWNER, TaskChangeWorld, run_async};
use dotask::task::services::TaskLifecycleError;
use rstest_bdd_macros::then;

#[then("the task still exists")]
fn task_still_exists(world: &TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    run_async(world.service.get(OWNER, task_id))
        .map_err(|err| eyre::eyre!("expected task {task_id} to exist, got {err}"))?;
    Ok(())
}

#[then("the task no longer exists")]
fn task_no_longer_exists(world: &TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.get(OWNER, task_id));
    if !matches!(result, Err(TaskLifecycleError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the notice is "{expected}""#)]
fn notice_is(world: &TaskChangeWorld, expected: String) -> Result<(), eyre::Report> {
    let screen = world
        .last_screen
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no screen recorded"))?;
    let notice = screen.notice.as_deref().unwrap_or_default();
    if notice != expected {
        return Err(eyre::eyre!("expected notice {expected:?}, found {notice:?}"));
    }
    Ok(())
}

#[then("the task has no due date")]
fn task_has_no_due_date(world: &TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let task = run_async(world.service.get(OWNER, task_id))
        .map_err(|err| eyre::eyre!("load task {task_id}: {err}"))?;
    if let Some(due) = task.due_at() {
        return Err(eyre::eyre!("expected no due date, found {due}"));
    }
    Ok(())
}
