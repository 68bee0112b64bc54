use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::repository;
use crate::error::ApiError;
use crate::projection::{registry, ListContext, SqlResult};
use crate::state::AppState;

use super::{detail_projected, list_projected, require_text, FieldsQuery};

#[derive(Debug, Deserialize)]
pub struct StageBody {
    pub label: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

/// POST /api/stages
pub async fn create_stage(
    State(state): State<AppState>,
    Json(body): Json<StageBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;
    let starts_at = require_text(body.starts_at, "starts_at")?;
    let ends_at = require_text(body.ends_at, "ends_at")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "stages" ("label", "starts_at", "ends_at")
                VALUES ($1, $2::timestamptz, $3::timestamptz)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(label), json!(starts_at), json!(ends_at)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/stages
pub async fn list_stages(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::STAGE, &query, &ListContext::new()).await
}

/// GET /api/stages/:stage_id
pub async fn get_stage(
    State(state): State<AppState>,
    Path(stage_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::STAGE, &query, json!(stage_id)).await
}

/// PUT /api/stages/:stage_id - absent fields keep their stored value.
pub async fn update_stage(
    State(state): State<AppState>,
    Path(stage_id): Path<Uuid>,
    Json(body): Json<StageBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "stages"
                SET "label" = COALESCE($1, "label"),
                    "starts_at" = COALESCE($2::timestamptz, "starts_at"),
                    "ends_at" = COALESCE($3::timestamptz, "ends_at")
                WHERE "id" = $4::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![
                json!(body.label),
                json!(body.starts_at),
                json!(body.ends_at),
                json!(stage_id),
            ],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/stages/:stage_id
pub async fn delete_stage(
    State(state): State<AppState>,
    Path(stage_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "stages" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(stage_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
