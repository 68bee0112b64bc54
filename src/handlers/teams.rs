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
pub struct TeamBody {
    pub name: Option<String>,
    pub code: Option<String>,
    pub flag: Option<String>,
    pub is_participating: Option<bool>,
    pub is_disqualified: Option<bool>,
    pub group_id: Option<Uuid>,
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<TeamBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;
    let code = require_text(body.code, "code")?;
    let flag = require_text(body.flag, "flag")?;
    let is_participating = require(body.is_participating, "is_participating")?;
    let is_disqualified = require(body.is_disqualified, "is_disqualified")?;

    // Teams outside the current edition are never disqualified and carry no group
    let (is_disqualified, group_id) = if is_participating {
        (is_disqualified, body.group_id)
    } else {
        (false, None)
    };

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "teams" ("name", "code", "flag", "is_participating", "is_disqualified", "group_id")
                VALUES ($1, $2, $3, $4, $5, $6::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![
                json!(name),
                json!(code),
                json!(flag),
                json!(is_participating),
                json!(is_disqualified),
                json!(group_id),
            ],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/teams
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::TEAM, &query, &ListContext::new()).await
}

/// GET /api/teams/:team_id
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::TEAM, &query, json!(team_id)).await
}

/// PUT /api/teams/:team_id
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(body): Json<TeamBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = require_text(body.name, "name")?;
    let code = require_text(body.code, "code")?;
    let flag = require_text(body.flag, "flag")?;
    let is_participating = require(body.is_participating, "is_participating")?;
    let is_disqualified = require(body.is_disqualified, "is_disqualified")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "teams"
                SET "name" = $1, "code" = $2, "flag" = $3,
                    "is_participating" = $4, "is_disqualified" = $5, "group_id" = $6::uuid
                WHERE "id" = $7::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![
                json!(name),
                json!(code),
                json!(flag),
                json!(is_participating),
                json!(is_disqualified),
                json!(body.group_id),
                json!(team_id),
            ],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/teams/:team_id
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "teams" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(team_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct GroupAssignment {
    pub team_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
}

/// POST /api/teams/add-to-group - joining a group implies participation.
pub async fn add_to_group(
    State(state): State<AppState>,
    Json(body): Json<GroupAssignment>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let team_id = require(body.team_id, "team_id")?;
    let group_id = require(body.group_id, "group_id")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "teams" SET "is_participating" = true, "group_id" = $1::uuid
                WHERE "id" = $2::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(group_id), json!(team_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/teams/remove-from-group
pub async fn remove_from_group(
    State(state): State<AppState>,
    Json(body): Json<GroupAssignment>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let team_id = require(body.team_id, "team_id")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "teams" SET "group_id" = NULL
                WHERE "id" = $1::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(team_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}
