//! `PostgreSQL` user repository: first contact and refreshes.

use crate::postgres::helpers::{ALICE, BOB, BoxError, PostgresContext, repositories, tuesday_morning};
use chrono::TimeDelta;
use dotask::user::domain::UserProfile;
use dotask::user::ports::UserRepository;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeat_contact_keeps_registration_time(
    #[future] repositories: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = repositories.await?;
    let first_seen = tuesday_morning();
    let later = first_seen + TimeDelta::days(3);

    let registered = context
        .users
        .upsert(&UserProfile::new(ALICE, "Alice"), first_seen)
        .await?;
    assert_eq!(registered.registered_at(), first_seen);

    let renamed = UserProfile::new(ALICE, "Alice Liddell")
        .with_username("alice")
        .with_language("en");
    let refreshed = context.users.upsert(&renamed, later).await?;
    assert_eq!(refreshed.registered_at(), first_seen);
    assert_eq!(refreshed.last_seen_at(), later);
    assert_eq!(refreshed.profile(), &renamed);

    let stored = context
        .users
        .find_by_id(ALICE)
        .await?
        .ok_or("user vanished after refresh")?;
    assert_eq!(stored.registered_at(), first_seen);
    assert_eq!(stored.name(), "Alice Liddell");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_user_is_absent(
    #[future] repositories: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let context = repositories.await?;
    context.register(ALICE).await?;

    assert!(context.users.find_by_id(BOB).await?.is_none());
    Ok(())
}
