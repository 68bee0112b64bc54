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
pub struct CreateQuestionBody {
    pub label: Option<String>,
    pub duration: Option<i32>,
    pub quiz_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuestionBody {
    pub label: Option<String>,
}

/// POST /api/quiz/questions
pub async fn create_question(
    State(state): State<AppState>,
    Json(body): Json<CreateQuestionBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;
    let quiz_id = require(body.quiz_id, "quiz_id")?;

    let record = repository::fetch_one(
        &state.pool,
        &SqlResult {
            query: r#"WITH inserted AS (
                INSERT INTO "questions" ("label", "duration", "quiz_id")
                VALUES ($1, $2, $3::uuid)
                RETURNING *
            ) SELECT to_jsonb(inserted) AS record FROM inserted"#
                .to_string(),
            params: vec![json!(label), json!(body.duration), json!(quiz_id)],
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/quiz/questions/:question_id
pub async fn update_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(body): Json<UpdateQuestionBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let label = require_text(body.label, "label")?;

    let record = repository::fetch_optional(
        &state.pool,
        &SqlResult {
            query: r#"WITH updated AS (
                UPDATE "questions" SET "label" = $1 WHERE "id" = $2::uuid RETURNING *
            ) SELECT to_jsonb(updated) AS record FROM updated"#
                .to_string(),
            params: vec![json!(label), json!(question_id)],
        },
    )
    .await?
    .ok_or_else(|| ApiError::store("Record not found"))?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/quiz/questions/:question_id
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    repository::execute_expecting(
        &state.pool,
        &SqlResult {
            query: r#"DELETE FROM "questions" WHERE "id" = $1::uuid"#.to_string(),
            params: vec![json!(question_id)],
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}
