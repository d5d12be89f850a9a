//! User management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use toolcrib_entity::user::User;

use crate::dto::request::UserRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<User>>>> {
    let users = state.user_service.list().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let user = state.user_service.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.get(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UserRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.update(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.user_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("User deleted"))))
}
