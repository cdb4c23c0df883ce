//! Expenses API endpoints

use api_types::expense::{Expense, ExpenseNew};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn view(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        amount: expense.amount.to_decimal(),
        category: expense.category,
        date: expense.date,
        description: expense.description,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    tracing::debug!("fetching all expenses");
    let expenses = state.engine.expenses().await?;
    tracing::debug!("found {} expenses", expenses.len());

    Ok(Json(expenses.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    tracing::debug!("received expense: {payload:?}");

    let expense = state
        .engine
        .add_expense(
            payload.amount,
            &payload.category,
            &payload.date,
            payload.description.as_deref(),
        )
        .await?;
    tracing::info!("added expense {}", expense.id);

    Ok((StatusCode::CREATED, Json(view(expense))))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    tracing::debug!("deleting expense {id}");
    state.engine.delete_expense(id).await?;
    tracing::info!("deleted expense {id}");

    Ok(StatusCode::NO_CONTENT)
}
