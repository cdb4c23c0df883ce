use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    router(ServerState {
        engine: Arc::new(engine::Engine::new(db)),
    })
}

async fn body_json(res: Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_expenses() -> Request<Body> {
    Request::builder()
        .uri("/api/expenses")
        .body(Body::empty())
        .unwrap()
}

fn post_expense(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/expenses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn delete_expense(id: i64) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/api/expenses/{id}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn list_starts_empty() {
    let app = test_router().await;

    let res = app.oneshot(get_expenses()).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn create_echoes_record_and_list_returns_it() {
    let app = test_router().await;

    let res = app
        .clone()
        .oneshot(post_expense(json!({
            "amount": 12.5,
            "category": "Food",
            "date": "2024-01-05",
            "description": null,
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let created = body_json(res).await;
    assert_eq!(created["amount"], json!(12.5));
    assert_eq!(created["category"], json!("Food"));
    assert_eq!(created["date"], json!("2024-01-05"));
    assert_eq!(created["description"], json!(null));
    assert!(created["id"].is_i64());

    let res = app.oneshot(get_expenses()).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed = body_json(res).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn list_orders_newest_date_first() {
    let app = test_router().await;

    for (amount, date) in [(1.0, "2024-01-01"), (2.0, "2024-03-01"), (3.0, "2024-02-01")] {
        let res = app
            .clone()
            .oneshot(post_expense(json!({
                "amount": amount,
                "category": "Misc",
                "date": date,
                "description": null,
            })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app.oneshot(get_expenses()).await.unwrap();
    let listed = body_json(res).await;
    let dates: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|expense| expense["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
}

#[tokio::test]
async fn create_rejects_bad_input_with_error_body() {
    let app = test_router().await;

    let res = app
        .clone()
        .oneshot(post_expense(json!({
            "amount": 0.0,
            "category": "Food",
            "date": "2024-01-05",
            "description": null,
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(res).await["error"].is_string());

    let res = app
        .clone()
        .oneshot(post_expense(json!({
            "amount": 5.0,
            "category": "",
            "date": "2024-01-05",
            "description": null,
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert_eq!(body["error"], json!("Missing required field: category"));

    let res = app
        .clone()
        .oneshot(post_expense(json!({
            "amount": 5.0,
            "category": "Food",
            "date": "05/01/2024",
            "description": null,
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(res).await["error"].is_string());

    let res = app.oneshot(get_expenses()).await.unwrap();
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn delete_removes_record() {
    let app = test_router().await;

    let res = app
        .clone()
        .oneshot(post_expense(json!({
            "amount": 9.99,
            "category": "Food",
            "date": "2024-01-05",
            "description": "lunch",
        })))
        .await
        .unwrap();
    let id = body_json(res).await["id"].as_i64().unwrap();

    let res = app.clone().oneshot(delete_expense(id)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.oneshot(get_expenses()).await.unwrap();
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn delete_unknown_id_is_404_with_error_body() {
    let app = test_router().await;

    let res = app.oneshot(delete_expense(42)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_json(res).await["error"].is_string());
}
