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
pub struct CategoryBody {
    pub label: Option<String>,
}

/// POST /api/extra/spot-categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "spot_categories" ("label") VALUES ($1) RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(label)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/extra/spot-categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::SPOT_CATEGORY, &query, &ListContext::new()).await
}

/// GET /api/extra/spot-categories/:category_id
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::SPOT_CATEGORY, &query, json!(category_id)).await
}

/// PUT /api/extra/spot-categories/:category_id
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(body): Json<CategoryBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "spot_categories" SET "label" = $1 WHERE "id" = $2::uuid RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(label), json!(category_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/extra/spot-categories/:category_id
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "spot_categories" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(category_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
