use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Engine, EngineError, NewTransactionCmd, NewUserCmd, UpdateTransactionCmd, balance,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn new_user(engine: &Engine, name: &str) -> i64 {
    engine
        .new_user(NewUserCmd::new(
            name,
            format!("{}@example.com", name.to_lowercase()),
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        ))
        .await
        .unwrap()
        .id
}

async fn balance_of(engine: &Engine, user_id: i64) -> f64 {
    engine.user(user_id).await.unwrap().balance
}

#[tokio::test]
async fn credit_increases_and_debt_decreases_balance() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;

    engine
        .new_transaction(NewTransactionCmd::credit(alice, 100.0).description("salary"))
        .await
        .unwrap();
    assert_eq!(balance_of(&engine, alice).await, 100.0);

    engine
        .new_transaction(NewTransactionCmd::debt(alice, 40.0).description("groceries"))
        .await
        .unwrap();
    assert_eq!(balance_of(&engine, alice).await, 60.0);
}

#[tokio::test]
async fn create_update_delete_scenario() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;
    assert_eq!(balance_of(&engine, alice).await, 0.0);

    let debt = engine
        .new_transaction(NewTransactionCmd::debt(alice, 50.0))
        .await
        .unwrap();
    assert_eq!(balance_of(&engine, alice).await, -50.0);

    let credit = engine
        .new_transaction(NewTransactionCmd::credit(alice, 30.0))
        .await
        .unwrap();
    assert_eq!(balance_of(&engine, alice).await, -20.0);

    let updated = engine
        .update_transaction(UpdateTransactionCmd::new(debt.id).value(20.0))
        .await
        .unwrap();
    assert_eq!(updated.value, 20.0);
    assert!(updated.is_debt);
    assert_eq!(balance_of(&engine, alice).await, 10.0);

    engine.delete_transaction(credit.id).await.unwrap();
    assert_eq!(balance_of(&engine, alice).await, -20.0);

    assert_eq!(
        engine.transaction(credit.id).await,
        Err(EngineError::KeyNotFound(format!("transaction {}", credit.id)))
    );
}

#[tokio::test]
async fn balance_equals_sum_of_signed_effects() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;

    let ops = [
        (12.5, false),
        (3.25, true),
        (100.0, true),
        (0.0, false),
        (42.0, false),
        (7.75, true),
    ];
    let mut expected = 0.0;
    for (value, is_debt) in ops {
        let cmd = if is_debt {
            NewTransactionCmd::debt(alice, value)
        } else {
            NewTransactionCmd::credit(alice, value)
        };
        engine.new_transaction(cmd).await.unwrap();
        expected = balance::adjust(expected, value, is_debt);
    }

    let effects: f64 = engine
        .list_user_transactions(alice)
        .await
        .unwrap()
        .iter()
        .map(|tx| tx.effect())
        .sum();
    assert_eq!(balance_of(&engine, alice).await, expected);
    assert_eq!(effects, expected);
}

#[tokio::test]
async fn flipping_debt_flag_matches_direct_creation() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;
    let bob = new_user(&engine, "Bob").await;

    let tx = engine
        .new_transaction(NewTransactionCmd::debt(alice, 25.0))
        .await
        .unwrap();
    engine
        .update_transaction(UpdateTransactionCmd::new(tx.id).is_debt(false).value(40.0))
        .await
        .unwrap();

    engine
        .new_transaction(NewTransactionCmd::credit(bob, 40.0))
        .await
        .unwrap();

    assert_eq!(balance_of(&engine, alice).await, balance_of(&engine, bob).await);
    assert_eq!(balance_of(&engine, alice).await, 40.0);
}

#[tokio::test]
async fn update_without_changes_keeps_balance() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;

    let tx = engine
        .new_transaction(NewTransactionCmd::debt(alice, 18.0).description("bus"))
        .await
        .unwrap();
    let updated = engine
        .update_transaction(UpdateTransactionCmd::new(tx.id).description("train"))
        .await
        .unwrap();

    assert_eq!(updated.description, "train");
    assert_eq!(updated.value, 18.0);
    assert_eq!(balance_of(&engine, alice).await, -18.0);
}

#[tokio::test]
async fn update_with_other_user_moves_the_effect() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;
    let bob = new_user(&engine, "Bob").await;

    let tx = engine
        .new_transaction(NewTransactionCmd::credit(alice, 70.0))
        .await
        .unwrap();
    let moved = engine
        .update_transaction(UpdateTransactionCmd::new(tx.id).user_id(bob).value(60.0))
        .await
        .unwrap();

    assert_eq!(moved.user_id, bob);
    assert_eq!(balance_of(&engine, alice).await, 0.0);
    assert_eq!(balance_of(&engine, bob).await, 60.0);
    assert!(engine.list_user_transactions(alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_with_unknown_user_changes_nothing() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;

    let tx = engine
        .new_transaction(NewTransactionCmd::credit(alice, 70.0))
        .await
        .unwrap();
    let err = engine
        .update_transaction(UpdateTransactionCmd::new(tx.id).user_id(999).value(1.0))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::KeyNotFound("user 999".to_string()));
    assert_eq!(balance_of(&engine, alice).await, 70.0);
    assert_eq!(engine.transaction(tx.id).await.unwrap().value, 70.0);
}

#[tokio::test]
async fn create_for_missing_user_fails_without_side_effects() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;
    engine
        .new_transaction(NewTransactionCmd::credit(alice, 5.0))
        .await
        .unwrap();

    let err = engine
        .new_transaction(NewTransactionCmd::debt(alice + 100, 10.0))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::KeyNotFound(format!("user {}", alice + 100))
    );
    assert_eq!(balance_of(&engine, alice).await, 5.0);
    assert_eq!(engine.list_transactions().await.unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_values_are_rejected_before_mutation() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;

    for value in [-1.0, f64::NAN, f64::INFINITY] {
        let err = engine
            .new_transaction(NewTransactionCmd::credit(alice, value))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    let too_long = "x".repeat(256);
    let err = engine
        .new_transaction(NewTransactionCmd::credit(alice, 1.0).description(too_long))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let tx = engine
        .new_transaction(NewTransactionCmd::credit(alice, 9.0))
        .await
        .unwrap();
    let err = engine
        .update_transaction(UpdateTransactionCmd::new(tx.id).value(-9.0))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    assert_eq!(balance_of(&engine, alice).await, 9.0);
}

#[tokio::test]
async fn missing_transaction_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(
        engine.delete_transaction(42).await,
        Err(EngineError::KeyNotFound("transaction 42".to_string()))
    );
    assert_eq!(
        engine
            .update_transaction(UpdateTransactionCmd::new(42).value(1.0))
            .await
            .unwrap_err(),
        EngineError::KeyNotFound("transaction 42".to_string())
    );
}

#[tokio::test]
async fn user_transactions_are_listed_in_creation_order() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;
    let bob = new_user(&engine, "Bob").await;

    for (user, description) in [(alice, "first"), (bob, "other"), (alice, "second"), (alice, "third")]
    {
        engine
            .new_transaction(NewTransactionCmd::credit(user, 1.0).description(description))
            .await
            .unwrap();
    }

    let descriptions: Vec<String> = engine
        .list_user_transactions(alice)
        .await
        .unwrap()
        .into_iter()
        .map(|tx| tx.description)
        .collect();
    assert_eq!(descriptions, ["first", "second", "third"]);

    assert_eq!(
        engine.list_user_transactions(999).await,
        Err(EngineError::KeyNotFound("user 999".to_string()))
    );
}

#[tokio::test]
async fn recompute_repairs_drifted_balance() {
    let (engine, db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;
    engine
        .new_transaction(NewTransactionCmd::credit(alice, 80.0))
        .await
        .unwrap();
    engine
        .new_transaction(NewTransactionCmd::debt(alice, 30.0))
        .await
        .unwrap();

    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "UPDATE users SET balance = ? WHERE id = ?",
        vec![1234.0_f64.into(), alice.into()],
    ))
    .await
    .unwrap();
    assert_eq!(balance_of(&engine, alice).await, 1234.0);

    let user = engine.recompute_balance(alice).await.unwrap();
    assert_eq!(user.balance, 50.0);
    assert_eq!(balance_of(&engine, alice).await, 50.0);
}

#[tokio::test]
async fn overflowing_balance_is_rejected_and_rolled_back() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;

    let first = engine
        .new_transaction(NewTransactionCmd::credit(alice, 1.0e308))
        .await
        .unwrap();

    assert_eq!(
        engine
            .new_transaction(NewTransactionCmd::credit(alice, 1.0e308))
            .await
            .unwrap_err(),
        EngineError::Validation("resulting balance is out of range".to_string())
    );
    assert_eq!(balance_of(&engine, alice).await, 1.0e308);
    assert_eq!(engine.list_user_transactions(alice).await.unwrap().len(), 1);

    let small = engine
        .new_transaction(NewTransactionCmd::credit(alice, 5.0))
        .await
        .unwrap();
    assert_eq!(
        engine
            .update_transaction(UpdateTransactionCmd::new(small.id).value(1.0e308))
            .await
            .unwrap_err(),
        EngineError::Validation("resulting balance is out of range".to_string())
    );
    assert_eq!(engine.transaction(small.id).await.unwrap().value, 5.0);

    engine.delete_transaction(small.id).await.unwrap();
    engine.delete_transaction(first.id).await.unwrap();
    assert_eq!(balance_of(&engine, alice).await, 0.0);
}

#[tokio::test]
async fn writes_refresh_modified_at_and_keep_created_at() {
    let (engine, _db) = engine_with_db().await;
    let alice = new_user(&engine, "Alice").await;
    let before = engine.user(alice).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let tx = engine
        .new_transaction(NewTransactionCmd::debt(alice, 12.0))
        .await
        .unwrap();
    assert_eq!(tx.created_at, tx.modified_at);

    let after = engine.user(alice).await.unwrap();
    assert_eq!(after.created_at, before.created_at);
    assert!(after.modified_at > before.modified_at);

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let updated = engine
        .update_transaction(UpdateTransactionCmd::new(tx.id).description("rent"))
        .await
        .unwrap();
    assert_eq!(updated.created_at, tx.created_at);
    assert!(updated.modified_at > tx.modified_at);

    let stored = engine.transaction(tx.id).await.unwrap();
    assert_eq!(stored.created_at, tx.created_at);
    assert_eq!(stored.modified_at, updated.modified_at);
    assert!(engine.user(alice).await.unwrap().modified_at > after.modified_at);
}
