//! Engine-level tests against the in-memory stores.
//!
//! These exercise the full path a request takes below the HTTP layer:
//! authenticator and counter engine wired to store implementations.

use std::sync::Arc;

use drawer_auth::{Authenticator, NewUser, UserDirectory, UserUpdate};
use drawer_core::{DomainError, UserId};
use drawer_inventory::{CounterEngine, ItemName};

use crate::memory::{InMemoryCounterStore, InMemoryUserStore};

fn engine() -> CounterEngine {
    CounterEngine::new(Arc::new(InMemoryCounterStore::new()))
}

fn item(name: &str) -> ItemName {
    ItemName::new(name).unwrap()
}

#[tokio::test]
async fn create_then_get_returns_the_counter() {
    let engine = engine();
    let owner = UserId::new();

    let created = engine.create(owner, &item("apple"), 5).await.unwrap();
    assert_eq!(created.item, "apple");
    assert_eq!(created.count, 5);

    let fetched = engine.get(owner, &item("apple")).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_create_conflicts_and_leaves_one_row() {
    let engine = engine();
    let owner = UserId::new();

    engine.create(owner, &item("apple"), 5).await.unwrap();
    let err = engine.create(owner, &item("apple"), 9).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let all = engine.list_all(owner).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].count, 5);
}

#[tokio::test]
async fn create_rejects_negative_count() {
    let engine = engine();
    let owner = UserId::new();

    let err = engine.create(owner, &item("apple"), -1).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert!(engine.list_all(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_to_missing_item_is_not_found() {
    let engine = engine();
    let owner = UserId::new();

    let err = engine.add(owner, &item("apple"), 3).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[tokio::test]
async fn subtract_more_than_available_reports_both_sides() {
    let engine = engine();
    let owner = UserId::new();

    engine.create(owner, &item("apple"), 8).await.unwrap();
    let err = engine.subtract(owner, &item("apple"), 10).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::InsufficientStock {
            requested: 10,
            available: 8,
        }
    );

    // The failed subtract left the count untouched.
    let counter = engine.get(owner, &item("apple")).await.unwrap();
    assert_eq!(counter.count, 8);
}

#[tokio::test]
async fn subtract_from_missing_item_is_not_found() {
    let engine = engine();
    let owner = UserId::new();

    let err = engine.subtract(owner, &item("apple"), 1).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let engine = engine();
    let owner = UserId::new();

    engine.create(owner, &item("apple"), 1).await.unwrap();
    engine.delete(owner, &item("apple")).await.unwrap();

    let err = engine.get(owner, &item("apple")).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound);

    let err = engine.delete(owner, &item("apple")).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[tokio::test]
async fn delete_all_is_idempotent() {
    let engine = engine();
    let owner = UserId::new();

    // Nothing to delete is still success.
    engine.delete_all(owner).await.unwrap();

    engine.create(owner, &item("apple"), 1).await.unwrap();
    engine.create(owner, &item("pear"), 2).await.unwrap();
    engine.delete_all(owner).await.unwrap();
    assert!(engine.list_all(owner).await.unwrap().is_empty());

    engine.delete_all(owner).await.unwrap();
}

#[tokio::test]
async fn owners_with_the_same_item_name_are_independent() {
    let engine = engine();
    let alice = UserId::new();
    let bob = UserId::new();

    engine.create(alice, &item("apple"), 10).await.unwrap();
    engine.create(bob, &item("apple"), 3).await.unwrap();

    engine.subtract(alice, &item("apple"), 4).await.unwrap();
    engine.delete_all(bob).await.unwrap();

    let counter = engine.get(alice, &item("apple")).await.unwrap();
    assert_eq!(counter.count, 6);
    assert!(engine.list_all(bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn full_counter_lifecycle() {
    let engine = engine();
    let owner = UserId::new();

    engine.create(owner, &item("apple"), 5).await.unwrap();

    let counter = engine.add(owner, &item("apple"), 3).await.unwrap();
    assert_eq!(counter.count, 8);

    let err = engine.subtract(owner, &item("apple"), 10).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::InsufficientStock {
            requested: 10,
            available: 8,
        }
    );

    let counter = engine.subtract(owner, &item("apple"), 8).await.unwrap();
    assert_eq!(counter.count, 0);

    engine.delete(owner, &item("apple")).await.unwrap();
    let err = engine.get(owner, &item("apple")).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_subtracts_never_drive_a_count_negative() {
    let engine = Arc::new(engine());
    let owner = UserId::new();

    engine.create(owner, &item("apple"), 50).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.subtract(owner, &item("apple"), 5).await.is_ok()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }

    // 20 concurrent subtracts of 5 against 50: exactly 10 can win.
    assert_eq!(successes, 10);
    let counter = engine.get(owner, &item("apple")).await.unwrap();
    assert_eq!(counter.count, 0);
}

#[tokio::test]
async fn created_user_can_authenticate_and_deleted_user_cannot() {
    let users = Arc::new(InMemoryUserStore::new());
    let auth = Authenticator::new(users.clone());

    let record = users
        .create(
            NewUser::new("alice@example.com", "Alice").unwrap(),
            "s3cret".to_string(),
        )
        .await
        .unwrap();

    let principal = auth
        .authenticate(&record.id.to_string(), "s3cret")
        .await
        .unwrap();
    assert_eq!(principal.user_id(), record.id);

    assert!(users.remove(record.id).await.unwrap());
    let err = auth
        .authenticate(&record.id.to_string(), "s3cret")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Unauthorized);
}

#[tokio::test]
async fn duplicate_email_is_rejected_on_create_and_update() {
    let users = InMemoryUserStore::new();

    let alice = users
        .create(
            NewUser::new("alice@example.com", "Alice").unwrap(),
            "a".to_string(),
        )
        .await
        .unwrap();
    let bob = users
        .create(
            NewUser::new("bob@example.com", "Bob").unwrap(),
            "b".to_string(),
        )
        .await
        .unwrap();

    let err = users
        .create(
            NewUser::new("alice@example.com", "Other Alice").unwrap(),
            "c".to_string(),
        )
        .await
        .unwrap_err();
    assert_eq!(err, drawer_core::StoreError::Duplicate);

    let err = users
        .update(bob.id, UserUpdate::new("alice@example.com", "Bob").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, drawer_core::StoreError::Duplicate);

    // Updating a user to its own email is not a collision.
    let updated = users
        .update(alice.id, UserUpdate::new("alice@example.com", "Alice B").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Alice B");
}

mod properties {
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(i64),
        Subtract(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..20i64).prop_map(Op::Add),
            (0..20i64).prop_map(Op::Subtract),
        ]
    }

    proptest! {
        /// Any sequence of adds and subtracts tracks a simple model and
        /// never leaves the counter negative: a subtract either succeeds
        /// exactly (sufficient balance) or fails leaving state untouched.
        #[test]
        fn add_subtract_sequences_track_the_model(
            initial in 0..50i64,
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();

            rt.block_on(async move {
                let engine = engine();
                let owner = UserId::new();
                let apple = item("apple");

                engine.create(owner, &apple, initial).await.unwrap();
                let mut model = initial;

                for op in ops {
                    match op {
                        Op::Add(delta) => {
                            let counter = engine.add(owner, &apple, delta).await.unwrap();
                            model += delta;
                            prop_assert_eq!(counter.count, model);
                        }
                        Op::Subtract(delta) => match engine.subtract(owner, &apple, delta).await {
                            Ok(counter) => {
                                prop_assert!(model >= delta);
                                model -= delta;
                                prop_assert_eq!(counter.count, model);
                            }
                            Err(DomainError::InsufficientStock { requested, available }) => {
                                prop_assert!(model < delta);
                                prop_assert_eq!(requested, delta);
                                prop_assert_eq!(available, model);
                            }
                            Err(other) => return Err(TestCaseError::fail(format!(
                                "unexpected error: {other}"
                            ))),
                        },
                    }

                    let counter = engine.get(owner, &apple).await.unwrap();
                    prop_assert_eq!(counter.count, model);
                    prop_assert!(counter.count >= 0);
                }

                Ok(())
            })?;
        }
    }
}
