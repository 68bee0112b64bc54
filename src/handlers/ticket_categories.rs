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

use super::{detail_projected, list_projected, require, require_text, FieldsQuery};

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub label: Option<String>,
    pub price: Option<i32>,
}

/// POST /api/ticket-categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;
    let price = require(body.price, "price")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "ticket_categories" ("label", "price") VALUES ($1, $2) RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(label), json!(price)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/ticket-categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::TICKET_CATEGORY, &query, &ListContext::new()).await
}

/// GET /api/ticket-categories/:category_id
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::TICKET_CATEGORY, &query, json!(category_id)).await
}

/// PUT /api/ticket-categories/:category_id
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(body): Json<CategoryBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;
    let price = require(body.price, "price")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "ticket_categories" SET "label" = $1, "price" = $2
                WHERE "id" = $3::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(label), json!(price), json!(category_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/ticket-categories/:category_id
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "ticket_categories" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(category_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
