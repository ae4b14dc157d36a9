use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use engine::{CreateTransactionCmd, Engine, EngineError, MoneyCents, TransactionKind};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_connection() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_db() -> Engine {
    engine_with_connection().await.0
}

/// Makes every transaction insert fail after the category has been written.
async fn reject_transaction_inserts(db: &DatabaseConnection) {
    db.execute_unprepared(
        "CREATE TRIGGER reject_transactions BEFORE INSERT ON transactions \
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .await
    .unwrap();
}

fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

#[tokio::test]
async fn empty_ledger_has_zero_balance() {
    let engine = engine_with_db().await;

    let balance = engine.balance().await.unwrap();
    assert_eq!(balance.income, MoneyCents::ZERO);
    assert_eq!(balance.outcome, MoneyCents::ZERO);
    assert_eq!(balance.total, MoneyCents::ZERO);
}

#[tokio::test]
async fn salary_then_rent_scenario() {
    let engine = engine_with_db().await;

    engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(1000), "Work"))
        .await
        .unwrap();
    assert_eq!(engine.balance().await.unwrap().total, cents(1000));

    let err = engine
        .create_transaction(CreateTransactionCmd::outcome("Rent", cents(1200), "Housing"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientBalance(_)));
    assert_eq!(engine.balance().await.unwrap().total, cents(1000));

    engine
        .create_transaction(CreateTransactionCmd::outcome("Rent", cents(800), "Housing"))
        .await
        .unwrap();

    let balance = engine.balance().await.unwrap();
    assert_eq!(balance.income, cents(1000));
    assert_eq!(balance.outcome, cents(800));
    assert_eq!(balance.total, cents(200));
}

#[tokio::test]
async fn rejected_outcome_persists_nothing() {
    let engine = engine_with_db().await;

    let err = engine
        .create_transaction(CreateTransactionCmd::outcome("Rent", cents(1), "Housing"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientBalance(_)));

    assert!(engine.list_transactions().await.unwrap().is_empty());
    assert!(engine.categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn outcome_equal_to_total_is_accepted() {
    let engine = engine_with_db().await;

    engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(500), "Work"))
        .await
        .unwrap();
    engine
        .create_transaction(CreateTransactionCmd::outcome("Groceries", cents(500), "Food"))
        .await
        .unwrap();

    assert_eq!(engine.balance().await.unwrap().total, MoneyCents::ZERO);
}

#[tokio::test]
async fn invalid_type_persists_nothing() {
    let engine = engine_with_db().await;

    let err = engine
        .create_transaction(CreateTransactionCmd::new(
            "Gift",
            "transfer",
            cents(100),
            "Misc",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidType(_)));

    assert!(engine.list_transactions().await.unwrap().is_empty());
    assert!(engine.categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn negative_value_is_rejected() {
    let engine = engine_with_db().await;

    let err = engine
        .create_transaction(CreateTransactionCmd::income("Refund", cents(-100), "Misc"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(engine.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_category_is_rejected() {
    let engine = engine_with_db().await;

    let err = engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(100), "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
    assert!(engine.categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn created_transaction_is_linked_to_its_category() {
    let engine = engine_with_db().await;

    let tx = engine
        .create_transaction(CreateTransactionCmd::income(" Salary ", cents(1000), " Work "))
        .await
        .unwrap();
    assert_eq!(tx.title, "Salary");
    assert_eq!(tx.kind, TransactionKind::Income);
    assert_eq!(tx.value, cents(1000));

    let stored = engine.transaction(tx.id).await.unwrap();
    assert_eq!(stored.id, tx.id);
    assert_eq!(stored.category_id, tx.category_id);

    let listed = engine.list_transactions().await.unwrap();
    assert_eq!(listed.len(), 1);
    let (listed_tx, category) = &listed[0];
    assert_eq!(listed_tx.id, tx.id);
    assert_eq!(category.id, tx.category_id);
    assert_eq!(category.title, "Work");
}

#[tokio::test]
async fn transactions_reuse_existing_category() {
    let engine = engine_with_db().await;

    let salary = engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(1000), "Work"))
        .await
        .unwrap();
    let bonus = engine
        .create_transaction(CreateTransactionCmd::income("Bonus", cents(200), "Work"))
        .await
        .unwrap();

    assert_eq!(salary.category_id, bonus.category_id);
    assert_eq!(engine.categories().await.unwrap().len(), 1);
}

#[tokio::test]
async fn category_titles_are_case_sensitive() {
    let engine = engine_with_db().await;

    let lower = engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(1000), "work"))
        .await
        .unwrap();
    let upper = engine
        .create_transaction(CreateTransactionCmd::income("Bonus", cents(200), "Work"))
        .await
        .unwrap();

    assert_ne!(lower.category_id, upper.category_id);
    assert_eq!(engine.categories().await.unwrap().len(), 2);
}

#[tokio::test]
async fn resolve_categories_deduplicates_and_is_idempotent() {
    let engine = engine_with_db().await;

    let first = engine
        .resolve_categories(&["Food", "Food", "Rent"])
        .await
        .unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(engine.categories().await.unwrap().len(), 2);

    let second = engine.resolve_categories(&["Rent", "Food"]).await.unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second["Food"].id, first["Food"].id);
    assert_eq!(second["Rent"].id, first["Rent"].id);
    assert_eq!(engine.categories().await.unwrap().len(), 2);

    assert!(engine.resolve_categories(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn balance_matches_signed_sum_of_transactions() {
    let engine = engine_with_db().await;

    let inputs = [
        ("income", 1250, "Work"),
        ("outcome", 300, "Food"),
        ("income", 75, "Gifts"),
        ("outcome", 1025, "Rent"),
        ("income", 1, "Work"),
    ];
    for (kind, value, category) in inputs {
        engine
            .create_transaction(CreateTransactionCmd::new("entry", kind, cents(value), category))
            .await
            .unwrap();
    }

    let balance = engine.balance().await.unwrap();
    let listed: MoneyCents = engine
        .list_transactions()
        .await
        .unwrap()
        .iter()
        .map(|(tx, _)| tx.signed_value())
        .sum();

    assert_eq!(balance.income, cents(1326));
    assert_eq!(balance.outcome, cents(1325));
    assert_eq!(balance.total, balance.income - balance.outcome);
    assert_eq!(balance.total, listed);
}

#[tokio::test]
async fn delete_missing_transaction_is_not_found() {
    let engine = engine_with_db().await;

    engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(1000), "Work"))
        .await
        .unwrap();

    let err = engine.delete_transaction(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    assert_eq!(engine.list_transactions().await.unwrap().len(), 1);
    assert_eq!(engine.balance().await.unwrap().total, cents(1000));
}

#[tokio::test]
async fn delete_keeps_the_category() {
    let engine = engine_with_db().await;

    let salary = engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(1000), "Work"))
        .await
        .unwrap();
    let bonus = engine
        .create_transaction(CreateTransactionCmd::income("Bonus", cents(100), "Work"))
        .await
        .unwrap();

    engine.delete_transaction(salary.id).await.unwrap();

    let remaining = engine.list_transactions().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].0.id, bonus.id);
    assert_eq!(engine.balance().await.unwrap().total, cents(100));

    engine.delete_transaction(bonus.id).await.unwrap();
    let categories = engine.categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, salary.category_id);

    assert!(matches!(
        engine.transaction(salary.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn failed_insert_rolls_back_the_new_category() {
    let (engine, db) = engine_with_connection().await;
    reject_transaction_inserts(&db).await;

    let err = engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(1000), "Work"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));

    assert!(engine.categories().await.unwrap().is_empty());
    assert!(engine.list_transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn income_overflowing_the_ledger_is_rejected() {
    let engine = engine_with_db().await;
    let half = cents(i64::MAX / 2 + 1);

    engine
        .create_transaction(CreateTransactionCmd::income("Jackpot", half, "Luck"))
        .await
        .unwrap();

    let err = engine
        .create_transaction(CreateTransactionCmd::income("Jackpot", half, "Luck"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MaxBalanceReached(_)));

    let balance = engine.balance().await.unwrap();
    assert_eq!(balance.income, half);
    assert_eq!(balance.total, half);

    engine
        .create_transaction(CreateTransactionCmd::outcome("Spend", cents(1), "Food"))
        .await
        .unwrap();
    assert_eq!(engine.list_transactions().await.unwrap().len(), 2);
}

#[tokio::test]
async fn ledger_balance_matches_listed_rows() {
    let engine = engine_with_db().await;

    engine
        .create_transaction(CreateTransactionCmd::income("Salary", cents(1000), "Work"))
        .await
        .unwrap();
    engine
        .create_transaction(CreateTransactionCmd::outcome("Rent", cents(400), "Housing"))
        .await
        .unwrap();

    let ledger = engine.ledger().await.unwrap();
    let listed: MoneyCents = ledger
        .transactions
        .iter()
        .map(|(tx, _)| tx.signed_value())
        .sum();

    assert_eq!(ledger.transactions.len(), 2);
    assert_eq!(ledger.balance.total, listed);
    assert_eq!(ledger.balance, engine.balance().await.unwrap());
}
