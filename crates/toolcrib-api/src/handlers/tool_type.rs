//! Tool type handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use toolcrib_entity::tool_type::ToolType;

use crate::dto::request::ToolTypeRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/tool-types
pub async fn list_tool_types(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ToolType>>>> {
    let tool_types = state.tool_type_service.list().await?;
    Ok(Json(ApiResponse::ok(tool_types)))
}

/// POST /api/tool-types
pub async fn create_tool_type(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ToolTypeRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ToolType>>)> {
    let tool_type = state.tool_type_service.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tool_type))))
}

/// GET /api/tool-types/{id}
pub async fn get_tool_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<ToolType>>> {
    let tool_type = state.tool_type_service.get(id).await?;
    Ok(Json(ApiResponse::ok(tool_type)))
}

/// PUT /api/tool-types/{id}
pub async fn update_tool_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ToolTypeRequest>,
) -> ApiResult<Json<ApiResponse<ToolType>>> {
    let tool_type = state.tool_type_service.update(id, req.into()).await?;
    Ok(Json(ApiResponse::ok(tool_type)))
}

/// DELETE /api/tool-types/{id}
pub async fn delete_tool_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.tool_type_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Tool type deleted"))))
}
