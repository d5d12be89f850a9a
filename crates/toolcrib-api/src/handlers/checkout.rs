//! Checkout and return handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use toolcrib_entity::checkout::Checkout;

use crate::dto::request::{CheckoutRequest, ReturnRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/checkouts
pub async fn list_open_checkouts(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Checkout>>>> {
    let checkouts = state.checkout_queries.list_open().await?;
    Ok(Json(ApiResponse::ok(checkouts)))
}

/// POST /api/checkouts
pub async fn checkout_tool(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Checkout>>)> {
    let checkout = state
        .lifecycle
        .checkout(req.user_id, req.tool_id, &req.project_location, &req.due_date)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(checkout))))
}

/// POST /api/checkouts/return
pub async fn return_tool(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReturnRequest>,
) -> ApiResult<Json<ApiResponse<Checkout>>> {
    let condition = req
        .condition
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| state.config.inventory.default_return_condition.clone());
    let checkout = state
        .lifecycle
        .return_tool(req.tool_id, Some(&condition))
        .await?;
    Ok(Json(ApiResponse::ok(checkout)))
}

/// GET /api/checkouts/{id}
pub async fn get_checkout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Checkout>>> {
    let checkout = state.checkout_queries.get(id).await?;
    Ok(Json(ApiResponse::ok(checkout)))
}
