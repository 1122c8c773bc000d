//! Listing pagination and filters through the router.

use crate::in_memory::helpers::{ALICE, BOB, BotUnderTest, bot, first_text};
use dotask::dispatch::{CallbackAction, CardAction};
use dotask::task::domain::{PriorityFilter, TaskPriority, TaskStatus};
use dotask::view::ListView;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn seven_tasks_span_two_pages(bot: BotUnderTest) {
    for n in 1..=7 {
        bot.seed(ALICE, &format!("Chore number {n}"), TaskPriority::Medium)
            .await;
    }

    let first = bot.send_text(ALICE, "📋 My Tasks").await;
    assert!(first.listing);
    assert_eq!(first.messages.len(), 6);
    assert!(first_text(&first).contains("Page 1/2"));

    let second = bot
        .press(ALICE, CallbackAction::List(ListView::default().at_page(2)))
        .await;
    assert_eq!(second.messages.len(), 3);
    assert!(first_text(&second).contains("Page 2/2"));
    assert!(
        second
            .messages
            .get(1)
            .is_some_and(|card| card.text.contains("<b>6.</b>"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn page_past_the_end_shows_the_last_page(bot: BotUnderTest) {
    for n in 1..=6 {
        bot.seed(ALICE, &format!("Errand {n}"), TaskPriority::Low).await;
    }

    let screen = bot
        .press(ALICE, CallbackAction::List(ListView::default().at_page(9)))
        .await;

    assert!(first_text(&screen).contains("Page 2/2"));
    assert_eq!(screen.messages.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_filter_hides_other_priorities(bot: BotUnderTest) {
    bot.seed(ALICE, "Pay rent", TaskPriority::High).await;
    bot.seed(ALICE, "Sort photos", TaskPriority::Low).await;

    let view = ListView {
        priority: PriorityFilter::Only(TaskPriority::High),
        ..ListView::default()
    };
    let screen = bot.press(ALICE, CallbackAction::List(view)).await;

    assert_eq!(screen.messages.len(), 2);
    assert!(first_text(&screen).contains("(1)"));
    assert!(
        screen
            .messages
            .get(1)
            .is_some_and(|card| card.text.contains("Pay rent"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_move_to_the_done_view(bot: BotUnderTest) {
    let task = bot.seed(ALICE, "Call the bank", TaskPriority::Medium).await;
    let view = ListView::default();

    let pending = bot
        .press(
            ALICE,
            CallbackAction::Card {
                action: CardAction::Done,
                task_id: task.id(),
                view,
            },
        )
        .await;
    assert!(first_text(&pending).contains("No tasks match."));

    let done_view = view.toggled_status();
    assert_eq!(done_view.status, TaskStatus::Done);
    let done = bot.press(ALICE, CallbackAction::List(done_view)).await;
    assert!(
        done.messages
            .get(1)
            .is_some_and(|card| card.text.contains("Call the bank"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_only_show_the_requesting_users_tasks(bot: BotUnderTest) {
    bot.seed(ALICE, "Alice's chore", TaskPriority::Medium).await;
    bot.seed(BOB, "Bob's chore", TaskPriority::Medium).await;

    let screen = bot.send_text(BOB, "📋 My Tasks").await;

    assert_eq!(screen.messages.len(), 2);
    assert!(screen.messages.iter().all(|m| !m.text.contains("Alice")));
}
