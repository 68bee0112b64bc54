// Squad management, nested under a team.

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
pub struct PlayerBody {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub position: Option<String>,
    pub photo: Option<String>,
}

/// POST /api/teams/:team_id/players
pub async fn create_player(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(body): Json<PlayerBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "players" ("name", "number", "position", "photo", "team_id")
                VALUES ($1, $2, $3, $4, $5::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![
                json!(name),
                json!(body.number),
                json!(body.position),
                json!(body.photo),
                json!(team_id),
            ],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/teams/:team_id/players
pub async fn list_players(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = ListContext::new();
    ctx.filter(r#"p."team_id" = $?::uuid"#, json!(team_id));
    list_projected(&state, &registry::PLAYER, &query, &ctx).await
}

/// GET /api/teams/:team_id/players/:player_id
pub async fn get_player(
    State(state): State<AppState>,
    Path((_team_id, player_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::PLAYER, &query, json!(player_id)).await
}

/// PUT /api/teams/:team_id/players/:player_id
pub async fn update_player(
    State(state): State<AppState>,
    Path((team_id, player_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<PlayerBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "players"
                SET "name" = $1, "number" = $2, "position" = $3, "photo" = $4
                WHERE "id" = $5::uuid AND "team_id" = $6::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![
                json!(name),
                json!(body.number),
                json!(body.position),
                json!(body.photo),
                json!(player_id),
                json!(team_id),
            ],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/teams/:team_id/players/:player_id
pub async fn delete_player(
    State(state): State<AppState>,
    Path((team_id, player_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "players" WHERE "id" = $1::uuid AND "team_id" = $2::uuid"#
                .to_string(),
            params: vec![json!(player_id), json!(team_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
