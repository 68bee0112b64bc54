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
pub struct StadiumBody {
    pub name: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub photo: Option<String>,
}

/// POST /api/stadiums
pub async fn create_stadium(
    State(state): State<AppState>,
    Json(body): Json<StadiumBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;
    let city = require_text(body.city, "city")?;
    let capacity = require(body.capacity, "capacity")?;
    let location = require_text(body.location, "location")?;
    let photo = require_text(body.photo, "photo")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "stadiums" ("name", "city", "capacity", "location", "contact", "photo")
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![
                json!(name),
                json!(city),
                json!(capacity),
                json!(location),
                json!(body.contact),
                json!(photo),
            ],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/stadiums
pub async fn list_stadiums(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::STADIUM, &query, &ListContext::new()).await
}

/// GET /api/stadiums/:stadium_id
pub async fn get_stadium(
    State(state): State<AppState>,
    Path(stadium_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::STADIUM, &query, json!(stadium_id)).await
}

/// PUT /api/stadiums/:stadium_id
pub async fn update_stadium(
    State(state): State<AppState>,
    Path(stadium_id): Path<Uuid>,
    Json(body): Json<StadiumBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;
    let city = require_text(body.city, "city")?;
    let capacity = require(body.capacity, "capacity")?;
    let location = require_text(body.location, "location")?;
    let photo = require_text(body.photo, "photo")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "stadiums"
                SET "name" = $1, "city" = $2, "capacity" = $3, "location" = $4,
                    "contact" = COALESCE($5, "contact"), "photo" = $6
                WHERE "id" = $7::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![
                json!(name),
                json!(city),
                json!(capacity),
                json!(location),
                json!(body.contact),
                json!(photo),
                json!(stadium_id),
            ],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/stadiums/:stadium_id
pub async fn delete_stadium(
    State(state): State<AppState>,
    Path(stadium_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "stadiums" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(stadium_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
