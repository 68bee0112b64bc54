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
pub struct GroupBody {
    pub label: Option<String>,
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<GroupBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "groups" ("label") VALUES ($1) RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(label)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::GROUP, &query, &ListContext::new()).await
}

/// GET /api/groups/:group_id
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::GROUP, &query, json!(group_id)).await
}

/// PUT /api/groups/:group_id - absent fields keep their stored value.
pub async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(body): Json<GroupBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "groups" SET "label" = COALESCE($1, "label")
                WHERE "id" = $2::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(body.label), json!(group_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/groups/:group_id
pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "groups" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(group_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
