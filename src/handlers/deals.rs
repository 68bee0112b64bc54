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
pub struct DealBody {
    pub label: Option<String>,
    pub photo: Option<String>,
    pub spot_id: Option<Uuid>,
}

/// POST /api/extra/good-deals
pub async fn create_deal(
    State(state): State<AppState>,
    Json(body): Json<DealBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;
    let photo = require_text(body.photo, "photo")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "good_deals" ("label", "photo", "spot_id")
                VALUES ($1, $2, $3::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(label), json!(photo), json!(body.spot_id)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/extra/good-deals
pub async fn list_deals(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::GOOD_DEAL, &query, &ListContext::new()).await
}

/// GET /api/extra/good-deals/:deal_id
pub async fn get_deal(
    State(state): State<AppState>,
    Path(deal_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::GOOD_DEAL, &query, json!(deal_id)).await
}

/// PUT /api/extra/good-deals/:deal_id
pub async fn update_deal(
    State(state): State<AppState>,
    Path(deal_id): Path<Uuid>,
    Json(body): Json<DealBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;
    let photo = require_text(body.photo, "photo")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "good_deals"
                SET "label" = $1, "photo" = $2, "spot_id" = COALESCE($3::uuid, "spot_id")
                WHERE "id" = $4::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(label), json!(photo), json!(body.spot_id), json!(deal_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/extra/good-deals/:deal_id
pub async fn delete_deal(
    State(state): State<AppState>,
    Path(deal_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "good_deals" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(deal_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
