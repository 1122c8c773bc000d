//! Pending interactions across users and after inactivity.

use crate::in_memory::helpers::{ALICE, BOB, BotUnderTest, bot, first_text, notice};
use dotask::dispatch::{CallbackAction, DueChoice, EXPIRED_NOTICE};
use dotask::task::services::ListTasksRequest;
use rstest::rstest;
use std::time::Duration;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn flows_are_tracked_per_user(bot: BotUnderTest) {
    bot.send_text(ALICE, "➕ Add Task").await;

    let bob = bot.send_text(BOB, "Buy milk").await;
    assert!(notice(&bob).contains("Please use the menu"));

    let alice = bot.send_text(ALICE, "Buy milk").await;
    assert!(first_text(&alice).contains("When is"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn abandoned_flow_expires_after_inactivity() {
    let bot = BotUnderTest::with_idle_timeout(Duration::from_millis(50));
    bot.send_text(ALICE, "➕ Add Task").await;
    bot.send_text(ALICE, "Water the plants").await;

    tokio::time::sleep(Duration::from_millis(300)).await;

    let screen = bot
        .press(ALICE, CallbackAction::PickDue(DueChoice::Tomorrow))
        .await;
    assert_eq!(notice(&screen), EXPIRED_NOTICE);
    let page = bot
        .tasks
        .list(ALICE, &ListTasksRequest::default())
        .await
        .expect("list tasks");
    assert_eq!(page.total, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancel_command_leaves_the_flow(bot: BotUnderTest) {
    bot.send_text(ALICE, "➕ Add Task").await;

    let cancelled = bot.send_text(ALICE, "/cancel").await;
    assert_eq!(first_text(&cancelled), "Cancelled.");

    let idle = bot.send_text(ALICE, "/cancel").await;
    assert_eq!(first_text(&idle), "Nothing to cancel.");
}
