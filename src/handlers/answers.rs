use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::repository;
use crate::error::ApiError;
use crate::projection::SqlResult;
use crate::state::AppState;

use super::{require, require_text};

#[derive(Debug, Deserialize)]
pub struct AnswerBody {
    pub value: Option<String>,
    pub is_correct: Option<bool>,
    pub question_id: Option<Uuid>,
}

/// POST /api/quiz/answers
pub async fn create_answer(
    State(state): State<AppState>,
    Json(body): Json<AnswerBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let value = require_text(body.value, "value")?;
    let is_correct = require(body.is_correct, "is_correct")?;
    let question_id = require(body.question_id, "question_id")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "answers" ("value", "is_correct", "question_id")
                VALUES ($1, $2, $3::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(value), json!(is_correct), json!(question_id)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/quiz/answers/:answer_id
pub async fn update_answer(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    Json(body): Json<AnswerBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let value = require_text(body.value, "value")?;
    let is_correct = require(body.is_correct, "is_correct")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "answers" SET "value" = $1, "is_correct" = $2
                WHERE "id" = $3::uuid
                RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(value), json!(is_correct), json!(answer_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/quiz/answers/:answer_id
pub async fn delete_answer(
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "answers" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(answer_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
