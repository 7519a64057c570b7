//! Transactions API endpoints
//!
//! Create, update and delete go through the engine so the owner's balance
//! follows every change.

use api_types::transaction::{TransactionNew, TransactionUpdate, TransactionView};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn transaction_view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        is_debt: tx.is_debt,
        value: tx.value,
        description: tx.description,
        user: tx.user_id,
        created_at: tx.created_at,
        modified_at: tx.modified_at,
    }
}

fn transaction_views(txs: Vec<engine::Transaction>) -> Vec<TransactionView> {
    txs.into_iter().map(transaction_view).collect()
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let txs = state.engine.list_transactions().await?;
    Ok(Json(transaction_views(txs)))
}

/// Transactions of one user, oldest first.
pub async fn list_for_user(
    State(state): State<ServerState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let Path(user_id) = user_id?;
    let txs = state.engine.list_user_transactions(user_id).await?;
    Ok(Json(transaction_views(txs)))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Path(id) = id?;
    let tx = state.engine.transaction(id).await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let Json(payload) = payload?;
    let tx = state
        .engine
        .new_transaction(engine::NewTransactionCmd {
            user_id: payload.user,
            value: payload.value,
            is_debt: payload.is_debt,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(transaction_view(tx))))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let tx = state
        .engine
        .update_transaction(engine::UpdateTransactionCmd {
            transaction_id: id,
            user_id: payload.user,
            value: payload.value,
            is_debt: payload.is_debt,
            description: payload.description,
        })
        .await?;

    Ok(Json(transaction_view(tx)))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
