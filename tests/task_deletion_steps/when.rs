//! When steps for guarded task change scenarios.

use super::world::TaskChangeWorld;
use dotask::dispatch::{CallbackAction, CardAction};
use dotask::task::domain::SnoozeOffset;
use dotask::view::ListView;
use rstest_bdd_macros::when;

#[when("the user asks to delete the task")]
fn ask_to_delete(world: &mut TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    world.press(CallbackAction::Card {
        action: CardAction::Delete,
        task_id,
        view: ListView::default(),
    });
    Ok(())
}

#[when("the user confirms the deletion")]
fn confirm_deletion(world: &mut TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    world.press(CallbackAction::ConfirmDelete {
        task_id,
        view: ListView::default(),
    });
    Ok(())
}

#[when("the user cancels the deletion")]
fn cancel_deletion(world: &mut TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    world.press(CallbackAction::CancelDelete {
        task_id,
        view: ListView::default(),
    });
    Ok(())
}

#[when("the user snoozes the task by one hour")]
fn snooze_one_hour(world: &mut TaskChangeWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    world.press(CallbackAction::Snooze {
        task_id,
        offset: SnoozeOffset::OneHour,
        view: ListView::default(),
    });
    Ok(())
}
