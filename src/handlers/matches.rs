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
pub struct CreateMatchBody {
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub stadium_id: Option<Uuid>,
    pub stage_id: Option<Uuid>,
    pub home_team_id: Option<Uuid>,
    pub away_team_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMatchBody {
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub stadium_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct MatchListQuery {
    pub fields: Option<String>,
    pub date: Option<String>,
    pub stage_id: Option<Uuid>,
}

/// POST /api/matches
///
/// Creates the fixture and seeds one stat row per side in the same statement,
/// so a failed insert leaves nothing behind.
pub async fn create_match(
    State(state): State<AppState>,
    Json(body): Json<CreateMatchBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let date = require_text(body.date, "date")?;
    let stadium_id = require(body.stadium_id, "stadium_id")?;
    let stage_id = require(body.stage_id, "stage_id")?;
    let home_team_id = require(body.home_team_id, "home_team_id")?;
    let away_team_id = require(body.away_team_id, "away_team_id")?;

    if home_team_id == away_team_id {
        return Err(ApiError::rejected("Duplicate team"));
    }

    let time = body.time.unwrap_or_else(|| date.clone());
    let status = body.status.unwrap_or_else(|| "next".to_string());

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH created AS (
                INSERT INTO "matches" ("date", "time", "status", "stadium_id")
                VALUES ($1::timestamptz, $2::timestamptz, $3, $4::uuid)
                RETURNING *
            ), entries AS (
                INSERT INTO "match_stage_teams" ("match_id", "team_id", "stage_id")
                SELECT created."id", sides.team_id, $5::uuid
                FROM created, (VALUES ($6::uuid), ($7::uuid)) AS sides(team_id)
            )
            SELECT to_jsonb(created) AS record FROM created"#
                .to_string(),
            params: vec![
                json!(date),
                json!(time),
                json!(status),
                json!(stadium_id),
                json!(stage_id),
                json!(home_team_id),
                json!(away_team_id),
            ],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/matches - optional `date` and `stage_id` filters. The stage
/// filter keeps fixtures whose every entry belongs to that stage.
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = ListContext::new();
    if let Some(date) = &query.date {
        ctx.filter(r#"m."date" = $?::timestamptz"#, json!(date));
    }
    if let Some(stage_id) = &query.stage_id {
        ctx.filter(
            r#"NOT EXISTS (SELECT 1 FROM "match_stage_teams" mste WHERE mste."match_id" = m."id" AND mste."stage_id" <> $?::uuid)"#,
            json!(stage_id),
        );
    }

    let fields = FieldsQuery { fields: query.fields.clone() };
    list_projected(&state, &registry::MATCH, &fields, &ctx).await
}

/// GET /api/matches/:match_id
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::MATCH, &query, json!(match_id)).await
}

/// PUT /api/matches/:match_id - updates the fixture itself; the per-team
/// stat rows are left untouched.
pub async fn update_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(body): Json<UpdateMatchBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let date = require_text(body.date, "date")?;
    let time = require_text(body.time, "time")?;
    let status = require_text(body.status, "status")?;
    let stadium_id = require(body.stadium_id, "stadium_id")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "matches"
                SET "date" = $1::timestamptz, "time" = $2::timestamptz, "status" = $3, "stadium_id" = $4::uuid
                WHERE "id" = $5::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![
                json!(date),
                json!(time),
                json!(status),
                json!(stadium_id),
                json!(match_id),
            ],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/matches/:match_id
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "matches" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(match_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
