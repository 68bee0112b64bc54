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

/// Row cap applied when a listing is narrowed to VIP spots.
const VIP_LIST_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct SpotBody {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub photo: Option<String>,
    pub vip: Option<bool>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SpotListQuery {
    pub fields: Option<String>,
    pub status: Option<String>,
}

/// POST /api/extra/spots
pub async fn create_spot(
    State(state): State<AppState>,
    Json(body): Json<SpotBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;
    let contact = require_text(body.contact, "contact")?;
    let location = require_text(body.location, "location")?;
    let short_description = require_text(body.short_description, "short_description")?;
    let long_description = require_text(body.long_description, "long_description")?;
    let vip = require(body.vip, "vip")?;
    let category_id = require(body.category_id, "category_id")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "spots" ("name", "contact", "location", "short_description", "long_description", "photo", "vip", "category_id")
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![
                json!(name),
                json!(contact),
                json!(location),
                json!(short_description),
                json!(long_description),
                json!(body.photo),
                json!(vip),
                json!(category_id),
            ],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/extra/spots - `status=vip` narrows to VIP spots and caps the rows.
pub async fn list_spots(
    State(state): State<AppState>,
    Query(query): Query<SpotListQuery>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = ListContext::new();
    if query.status.as_deref() == Some("vip") {
        ctx.filter(r#"sp."vip" = $?"#, json!(true)).limit(VIP_LIST_LIMIT);
    }

    let fields = FieldsQuery { fields: query.fields.clone() };
    list_projected(&state, &registry::SPOT, &fields, &ctx).await
}

/// GET /api/extra/spots/:spot_id
pub async fn get_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::SPOT, &query, json!(spot_id)).await
}

/// PUT /api/extra/spots/:spot_id
pub async fn update_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<Uuid>,
    Json(body): Json<SpotBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;
    let contact = require_text(body.contact, "contact")?;
    let location = require_text(body.location, "location")?;
    let short_description = require_text(body.short_description, "short_description")?;
    let long_description = require_text(body.long_description, "long_description")?;
    let vip = require(body.vip, "vip")?;
    require(body.category_id, "category_id")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "spots"
                SET "name" = $1, "contact" = $2, "location" = $3,
                    "short_description" = $4, "long_description" = $5,
                    "photo" = COALESCE($6, "photo"), "vip" = $7
                WHERE "id" = $8::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![
                json!(name),
                json!(contact),
                json!(location),
                json!(short_description),
                json!(long_description),
                json!(body.photo),
                json!(vip),
                json!(spot_id),
            ],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/extra/spots/:spot_id
pub async fn delete_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "spots" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(spot_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
