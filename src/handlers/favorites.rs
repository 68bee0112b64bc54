// Favorite-team management.
//
// The follow/unfollow pair is keyed by the (team, user) composite; listings
// project over the owning user row so `_count` can replace the rows entirely.

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
use crate::projection::{self, registry, ListContext, ProjectionRequest, SqlResult};
use crate::state::AppState;

use super::{list_projected, require, FieldsQuery};

#[derive(Debug, Deserialize)]
pub struct FavoriteBody {
    pub user_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

/// POST /api/user/fav-teams/follow (also POST /api/teams/fav)
///
/// Only teams in the current edition can be followed; the store is the
/// authority on that, not the request body.
pub async fn follow(
    State(state): State<AppState>,
    Json(body): Json<FavoriteBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user_id = require(body.user_id, "user_id")?;
    let team_id = require(body.team_id, "team_id")?;

    let participating = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"SELECT to_jsonb("is_participating") AS record FROM "teams" WHERE "id" = $1::uuid"#
                .to_string(),
            params: vec![json!(team_id)],
        },
    )
    .await?
    .and_then(|v| v.as_bool())
    .ok_or_else(|| ApiError::store("Record not found"))?;

    if !participating {
        return Err(ApiError::rejected(
            "Cannot link a user to a non-participating team",
        ));
    }

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "team_users" ("team_id", "user_id")
                VALUES ($1::uuid, $2::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(team_id), json!(user_id)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/user/fav-teams/unfollow (also DELETE /api/teams/fav)
pub async fn unfollow(
    State(state): State<AppState>,
    Json(body): Json<FavoriteBody>,
) -> Result<StatusCode, ApiError> {
    let user_id = require(body.user_id, "user_id")?;
    let team_id = require(body.team_id, "team_id")?;

    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "team_users" WHERE "team_id" = $1::uuid AND "user_id" = $2::uuid"#
                .to_string(),
            params: vec![json!(team_id), json!(user_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/user/fav-teams - the caller's followed teams, projected.
pub async fn list_followed(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
    Json(body): Json<FavoriteBody>,
) -> Result<Json<Value>, ApiError> {
    let user_id = require(body.user_id, "user_id")?;

    let request = query.request();
    let sql = projection::build_detail(&registry::USER_FAVORITES, request.as_ref(), json!(user_id));
    let row = repository::fetch_optional(&state.pool, &sql).await?;
    Ok(Json(row.unwrap_or(Value::Null)))
}

/// POST /api/user/fav-teams/:team_id - one followed team, projected.
pub async fn get_followed(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
    Json(body): Json<FavoriteBody>,
) -> Result<Json<Value>, ApiError> {
    let user_id = require(body.user_id, "user_id")?;

    let mut ctx = ListContext::new();
    ctx.filter(r#"t."id" = $?::uuid"#, json!(team_id));
    ctx.filter(
        r#"EXISTS (SELECT 1 FROM "team_users" tu WHERE tu."team_id" = t."id" AND tu."user_id" = $?::uuid)"#,
        json!(user_id),
    );

    // Without an explicit field list this returns the public team card only
    let request = query
        .request()
        .unwrap_or_else(|| ProjectionRequest::parse("id,name,code,flag"));
    let sql = projection::build_list(&registry::TEAM, Some(&request), &ctx);
    let row = repository::fetch_optional(&state.pool, &sql).await?;
    Ok(Json(row.unwrap_or(Value::Null)))
}

/// GET /api/teams/fav/:user_id - full rows of the teams a user follows.
pub async fn list_followed_teams(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    let mut ctx = ListContext::new();
    ctx.filter(
        r#"EXISTS (SELECT 1 FROM "team_users" tu WHERE tu."team_id" = t."id" AND tu."user_id" = $?::uuid)"#,
        json!(user_id),
    );
    list_projected(&state, &registry::TEAM, &query, &ctx).await
}
