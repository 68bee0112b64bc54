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
pub struct QuizBody {
    pub label: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AwardPointsBody {
    pub quiz_id: Option<Uuid>,
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub points: Option<i32>,
}

/// POST /api/quiz
pub async fn create_quiz(
    State(state): State<AppState>,
    Json(body): Json<QuizBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "quizzes" ("label", "date") VALUES ($1, $2::timestamptz) RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(label), json!(body.date)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/quiz
pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    list_projected(&state, &registry::QUIZ, &query, &ListContext::new()).await
}

/// GET /api/quiz/:quiz_id
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Json<Value>, ApiError> {
    detail_projected(&state, &registry::QUIZ, &query, json!(quiz_id)).await
}

/// PUT /api/quiz/:quiz_id - an absent date clears the stored one.
pub async fn update_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(body): Json<QuizBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "quizzes" SET "label" = $1, "date" = $2::timestamptz
                WHERE "id" = $3::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(label), json!(body.date), json!(quiz_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/quiz/:quiz_id
pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "quizzes" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(quiz_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/quiz/points - record the points a user earned on one question.
pub async fn award_points(
    State(state): State<AppState>,
    Json(body): Json<AwardPointsBody>,
) -> Result<Json<Value>, ApiError> {
    let quiz_id = require(body.quiz_id, "quiz_id")?;
    let question_id = require(body.question_id, "question_id")?;
    let answer_id = require(body.answer_id, "answer_id")?;
    let user_id = require(body.user_id, "user_id")?;
    let points = require(body.points, "points")?;
    if points < 0 {
        return Err(ApiError::validation("points must be non-negative"));
    }

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "quiz_points" ("quiz_id", "question_id", "answer_id", "user_id", "points")
                VALUES ($1::uuid, $2::uuid, $3::uuid, $4::uuid, $5)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![
                json!(quiz_id),
                json!(question_id),
                json!(answer_id),
                json!(user_id),
                json!(points),
            ],
        },
    )
    .await?;

    Ok(Json(record))
}

/// GET /api/quiz/:quiz_id/leaderboard - summed points per user, joined with
/// the public user fields.
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let rows = repository::fetch_rows(
        &state.pool,
        &SqlResult {
            query: r#"SELECT json_build_object(
                'user_id', u."id",
                'contact', u."contact",
                'first_name', u."first_name",
                'photo', u."photo",
                'address', u."address",
                'total_points', totals."total"
            ) AS record
            FROM (
                SELECT "user_id", SUM("points") AS "total"
                FROM "quiz_points"
                WHERE "quiz_id" = $1::uuid
                GROUP BY "user_id"
            ) totals
            JOIN "users" u ON u."id" = totals."user_id"
            ORDER BY totals."total" DESC"#
                .to_string(),
            params: vec![json!(quiz_id)],
        },
    )
    .await?;

    Ok(Json(Value::Array(rows)))
}
