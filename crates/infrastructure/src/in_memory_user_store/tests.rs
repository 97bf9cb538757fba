use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use userlookup_application::{UserLookupService, UserSeeder, UserStore};
use userlookup_core::AppError;
use userlookup_domain::{User, UserId};

use super::InMemoryUserStore;

fn seed_users() -> Vec<User> {
    vec![
        User::new(UserId::new(1), "John Doe"),
        User::new(UserId::new(2), "Jane Smith"),
    ]
}

fn seeded_store() -> InMemoryUserStore {
    match InMemoryUserStore::with_users(seed_users()) {
        Ok(store) => store,
        Err(error) => panic!("seed users should not collide: {error}"),
    }
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(error) => panic!("failed to build test runtime: {error}"),
    }
}

#[tokio::test]
async fn seeded_store_answers_reference_scenarios() {
    let service = UserLookupService::new(Arc::new(seeded_store()));

    assert!(matches!(service.user_exists(UserId::new(1)).await, Ok(true)));
    assert!(matches!(service.user_exists(UserId::new(3)).await, Ok(false)));

    let found = service.get_user_by_id(UserId::new(1)).await;
    assert!(matches!(
        found,
        Ok(Some(ref user)) if *user == User::new(UserId::new(1), "John Doe")
    ));
    assert!(matches!(
        service.get_user_by_id(UserId::new(3)).await,
        Ok(None)
    ));
}

#[tokio::test]
async fn insert_users_populates_empty_store() {
    let store = InMemoryUserStore::new();
    assert!(store.is_empty().await);

    let result = store.insert_users(&seed_users()).await;

    assert!(result.is_ok());
    assert_eq!(store.len().await, 2);
    assert!(matches!(store.exists(UserId::new(2)).await, Ok(true)));
}

#[tokio::test]
async fn insert_users_rejects_duplicates_within_batch_without_partial_writes() {
    let store = InMemoryUserStore::new();
    let batch = vec![
        User::new(UserId::new(10), "First"),
        User::new(UserId::new(11), "Second"),
        User::new(UserId::new(10), "Again"),
    ];

    let result = store.insert_users(&batch).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn insert_users_rejects_identifiers_already_stored() {
    let store = seeded_store();

    let result = store
        .insert_users(&[
            User::new(UserId::new(3), "New"),
            User::new(UserId::new(1), "Shadow"),
        ])
        .await;

    assert!(matches!(result, Err(AppError::Conflict(ref message)) if message.contains("'1'")));
    assert_eq!(store.len().await, 2);
    assert!(matches!(store.exists(UserId::new(3)).await, Ok(false)));
    assert!(matches!(
        store.find_by_id(UserId::new(1)).await,
        Ok(Some(ref user)) if user.name() == "John Doe"
    ));
}

#[test]
fn with_users_rejects_duplicate_identifiers() {
    let result = InMemoryUserStore::with_users([
        User::new(UserId::new(5), "One"),
        User::new(UserId::new(5), "Two"),
    ]);

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn duplicate_names_are_allowed() {
    let store = InMemoryUserStore::new();

    let result = store
        .insert_users(&[
            User::new(UserId::new(1), "Alex"),
            User::new(UserId::new(2), "Alex"),
        ])
        .await;

    assert!(result.is_ok());
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn lookups_do_not_change_store_contents() {
    let store = seeded_store();

    for raw in [-7, 0, 1, 2, 3] {
        let _ = store.exists(UserId::new(raw)).await;
        let _ = store.find_by_id(UserId::new(raw)).await;
    }

    assert_eq!(store.len().await, 2);
}

proptest! {
    #[test]
    fn exists_agrees_with_find_by_id(
        seeded in prop::collection::hash_set(any::<i32>(), 0..32),
        probe in any::<i32>(),
    ) {
        let users: Vec<User> = seeded
            .iter()
            .map(|raw| User::new(UserId::new(*raw), format!("user-{raw}")))
            .collect();
        let store = match InMemoryUserStore::with_users(users) {
            Ok(store) => store,
            Err(error) => panic!("distinct ids should not collide: {error}"),
        };

        let (exists, found) = runtime().block_on(async {
            (
                store.exists(UserId::new(probe)).await,
                store.find_by_id(UserId::new(probe)).await,
            )
        });

        let (Ok(exists), Ok(found)) = (exists, found) else {
            panic!("in-memory lookups never fail");
        };
        prop_assert_eq!(exists, found.is_some());
        prop_assert_eq!(exists, seeded.contains(&probe));
        if let Some(user) = found {
            prop_assert_eq!(user.user_id(), UserId::new(probe));
        }
    }

    #[test]
    fn every_seeded_user_is_found_and_repeated_lookups_match(
        seeded in prop::collection::hash_set(any::<i32>(), 1..32),
    ) {
        let users: Vec<User> = seeded
            .iter()
            .map(|raw| User::new(UserId::new(*raw), format!("user-{raw}")))
            .collect();
        let store = InMemoryUserStore::new();
        let runtime = runtime();

        let inserted = runtime.block_on(store.insert_users(&users));
        prop_assert!(inserted.is_ok());

        let seen: HashSet<i32> = runtime.block_on(async {
            let mut seen = HashSet::new();
            for user in &users {
                let first = store.find_by_id(user.user_id()).await;
                let second = store.find_by_id(user.user_id()).await;
                if let (Ok(Some(first)), Ok(Some(second))) = (first, second)
                    && first == second
                    && first == *user
                {
                    seen.insert(first.user_id().as_i32());
                }
            }
            seen
        });

        prop_assert_eq!(seen, seeded);
    }
}
