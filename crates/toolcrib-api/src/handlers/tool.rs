//! Tool registry and calibration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use toolcrib_entity::checkout::Checkout;
use toolcrib_entity::tool::Tool;

use crate::dto::request::{ToolRequest, ToolSearchQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/tools?search=
pub async fn list_tools(
    State(state): State<AppState>,
    Query(query): Query<ToolSearchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Tool>>>> {
    let tools = match query.search.as_deref() {
        Some(search) => state.tool_service.search(search).await?,
        None => state.tool_service.list().await?,
    };
    Ok(Json(ApiResponse::ok(tools)))
}

/// POST /api/tools
pub async fn create_tool(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ToolRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Tool>>)> {
    let tool = state.tool_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tool))))
}

/// GET /api/tools/available
pub async fn list_available_tools(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Tool>>>> {
    let tools = state.tool_service.list_available().await?;
    Ok(Json(ApiResponse::ok(tools)))
}

/// GET /api/tools/serial/{serial}
pub async fn get_tool_by_serial(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> ApiResult<Json<ApiResponse<Tool>>> {
    let tool = state.tool_service.get_by_serial(&serial).await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// GET /api/tools/{id}
pub async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Tool>>> {
    let tool = state.tool_service.get(id).await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// PUT /api/tools/{id}
pub async fn update_tool(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ToolRequest>,
) -> ApiResult<Json<ApiResponse<Tool>>> {
    let tool = state.tool_service.update(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// DELETE /api/tools/{id}
pub async fn delete_tool(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.tool_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Tool deleted"))))
}

/// POST /api/tools/{id}/calibrate
pub async fn calibrate_tool(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Tool>>> {
    let tool = state.lifecycle.calibrate(id).await?;
    Ok(Json(ApiResponse::ok(tool)))
}

/// GET /api/tools/{id}/checkouts
pub async fn tool_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Vec<Checkout>>>> {
    let history = state.tool_service.history(id).await?;
    Ok(Json(ApiResponse::ok(history)))
}
