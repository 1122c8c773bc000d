//! Given steps for guarded task change scenarios.

use super::world::{OWNER, TaskChangeWorld, run_async};
use dotask::dispatch::{CallbackAction, CardAction};
use dotask::task::services::CreateTaskRequest;
use dotask::view::ListView;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a pending task "{content}""#)]
fn pending_task(world: &mut TaskChangeWorld, content: String) -> Result<(), eyre::Report> {
    let task = run_async(world.service.create(CreateTaskRequest::new(OWNER, content)))
        .wrap_err("create scenario task")?;
    world.task = Some(task);
    Ok(())
}

#[given("the task has been marked done")]
fn task_marked_done(world: &mut TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    world.press(CallbackAction::Card {
        action: CardAction::Done,
        task_id,
        view: ListView::default(),
    });
    Ok(())
}
