//! Transactions API endpoints

use api_types::{
    balance::Balance,
    transaction::{
        TransactionImported, TransactionKind as ApiKind, TransactionListResponse,
        TransactionNew, TransactionView,
    },
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, categories::map_category, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Outcome => ApiKind::Outcome,
    }
}

fn map_balance(balance: engine::Balance) -> Balance {
    Balance {
        income: balance.income.cents(),
        outcome: balance.outcome.cents(),
        total: balance.total.cents(),
    }
}

fn map_transaction(tx: engine::Transaction, category: Option<engine::Category>) -> TransactionView {
    TransactionView {
        id: tx.id,
        title: tx.title,
        kind: map_kind(tx.kind),
        value: tx.value.cents(),
        category_id: tx.category_id,
        category: category.map(map_category),
        created_at: tx.created_at,
    }
}

/// Lists the ledger together with its balance.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let ledger = state.engine.ledger().await?;

    let transactions = ledger
        .transactions
        .into_iter()
        .map(|(tx, category)| map_transaction(tx, Some(category)))
        .collect();

    Ok(Json(TransactionListResponse {
        transactions,
        balance: map_balance(ledger.balance),
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.transaction(id).await?;
    Ok(Json(map_transaction(tx, None)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(engine::CreateTransactionCmd::new(
            payload.title,
            payload.kind,
            engine::MoneyCents::new(payload.value),
            payload.category,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(map_transaction(tx, None))))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Imports the CSV document sent as request body.
pub async fn import(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TransactionImported>), ServerError> {
    if body.is_empty() {
        return Err(ServerError::Generic("empty import body".to_string()));
    }

    let transactions = state
        .engine
        .import_transactions(body.as_ref())
        .await?
        .into_iter()
        .map(|tx| map_transaction(tx, None))
        .collect();

    Ok((StatusCode::CREATED, Json(TransactionImported { transactions })))
}
