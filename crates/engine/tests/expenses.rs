use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, Money};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::new(db.clone());
    (engine, db)
}

#[tokio::test]
async fn add_assigns_id_and_stores_cents() {
    let (engine, _db) = engine_with_db().await;

    let expense = engine
        .add_expense(12.5, "Food", "2024-01-05", None)
        .await
        .unwrap();

    assert_eq!(expense.amount, Money::new(1250));
    assert_eq!(expense.category, "Food");
    assert_eq!(expense.date.to_string(), "2024-01-05");
    assert_eq!(expense.description, None);

    let second = engine
        .add_expense(3.0, "Transport", "2024-01-06", Some("bus ticket"))
        .await
        .unwrap();
    assert_ne!(expense.id, second.id);
    assert_eq!(second.description.as_deref(), Some("bus ticket"));
}

#[tokio::test]
async fn list_orders_date_desc_then_id_desc() {
    let (engine, _db) = engine_with_db().await;

    let old = engine
        .add_expense(5.0, "Food", "2024-01-01", None)
        .await
        .unwrap();
    let newer = engine
        .add_expense(7.0, "Rent", "2024-02-01", None)
        .await
        .unwrap();
    let same_day_first = engine
        .add_expense(1.0, "Food", "2024-02-01", None)
        .await
        .unwrap();

    let listed = engine.expenses().await.unwrap();
    let ids: Vec<i32> = listed.iter().map(|expense| expense.id).collect();
    assert_eq!(ids, vec![same_day_first.id, newer.id, old.id]);
}

#[tokio::test]
async fn empty_description_is_stored_as_absent() {
    let (engine, _db) = engine_with_db().await;

    let expense = engine
        .add_expense(2.0, "Misc", "2024-03-10", Some("   "))
        .await
        .unwrap();
    assert_eq!(expense.description, None);
}

#[tokio::test]
async fn rejects_invalid_input() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .add_expense(0.0, "Food", "2024-01-05", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_expense(-4.2, "Food", "2024-01-05", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_expense(5.0, "  ", "2024-01-05", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingField(_)));

    let err = engine
        .add_expense(5.0, "Food", "05/01/2024", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));

    assert!(engine.expenses().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_row_and_reports_missing_ids() {
    let (engine, _db) = engine_with_db().await;

    let expense = engine
        .add_expense(9.99, "Food", "2024-01-05", None)
        .await
        .unwrap();

    engine.delete_expense(expense.id).await.unwrap();
    assert!(engine.expenses().await.unwrap().is_empty());

    let err = engine.delete_expense(expense.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}
