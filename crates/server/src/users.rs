//! Users API endpoints

use api_types::user::{UserNew, UserUpdate, UserView};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn user_view(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        birth_date: user.birth_date,
        balance: user.balance,
        profession: user.profession,
        created_at: user.created_at,
        modified_at: user.modified_at,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state.engine.list_users().await?;
    Ok(Json(users.into_iter().map(user_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Path(id) = id?;
    let user = state.engine.user(id).await?;
    Ok(Json(user_view(user)))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<UserNew>, JsonRejection>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let Json(payload) = payload?;
    let mut cmd = engine::NewUserCmd::new(payload.name, payload.email, payload.birth_date);
    cmd.profession = payload.profession;

    let user = state.engine.new_user(cmd).await?;
    Ok((StatusCode::CREATED, Json(user_view(user))))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let user = state
        .engine
        .update_user(engine::UpdateUserCmd {
            user_id: id,
            name: payload.name,
            email: payload.email,
            birth_date: payload.birth_date,
            profession: payload.profession,
        })
        .await?;

    Ok(Json(user_view(user)))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rebuild the user's balance from its transactions.
pub async fn recompute(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Path(id) = id?;
    let user = state.engine.recompute_balance(id).await?;
    Ok(Json(user_view(user)))
}
