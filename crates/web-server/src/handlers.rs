use crate::{error::ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use database::{Answer, DbError, Question};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body for `POST /questions/`.
#[derive(Debug, Deserialize)]
pub struct CreateQuestion {
    #[serde(default)]
    pub text: String,
}

/// Body for `POST /questions/{id}/answers/`.
#[derive(Debug, Deserialize)]
pub struct CreateAnswerForQuestion {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub text: String,
}

/// Body for `POST /answers/`. Absent fields decode to their empty values and
/// are rejected by the presence checks below.
#[derive(Debug, Deserialize)]
pub struct CreateAnswer {
    #[serde(default)]
    pub question_id: i32,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub text: String,
}

/// Response envelope for `GET /questions/{id}`.
#[derive(Debug, Serialize)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// Translates a gateway miss into a 404 with a resource-specific message.
/// Any other storage failure stays a 500.
fn map_lookup(err: DbError, resource: &str) -> ApiError {
    match err {
        DbError::NotFound => ApiError::NotFound(format!("{resource} not found")),
        other => ApiError::Database(other),
    }
}

/// Unwraps a decoded JSON body, turning any rejection into a 400.
fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(body) = payload.map_err(|rej| ApiError::Validation(rej.body_text()))?;
    Ok(body)
}

/// # GET /questions/
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Question>>, ApiError> {
    let questions = state.repo.list_questions().await?;
    Ok(Json(questions))
}

/// # GET /questions/{id}
/// Fetches one question together with all of its answers.
pub async fn get_question(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<QuestionWithAnswers>, ApiError> {
    let question = state
        .repo
        .get_question(id)
        .await
        .map_err(|e| map_lookup(e, "question"))?;
    let answers = state.repo.answers_for_question(id).await?;

    Ok(Json(QuestionWithAnswers { question, answers }))
}

/// # POST /questions/
/// Empty `text` is accepted; the presence checks apply to answers only.
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateQuestion>, JsonRejection>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let body = decode(payload)?;
    let question = state.repo.create_question(&body.text).await?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// # POST /questions/{id}/answers/
/// The question is looked up before the body is examined; a missing question
/// is a 404 on this route.
pub async fn create_answer_for_question(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAnswerForQuestion>, JsonRejection>,
) -> Result<(StatusCode, Json<Answer>), ApiError> {
    state
        .repo
        .get_question(id)
        .await
        .map_err(|e| map_lookup(e, "question"))?;

    let body = decode(payload)?;
    if body.user_id.is_empty() || body.text.is_empty() {
        return Err(ApiError::Validation(
            "user_id and text are required".to_string(),
        ));
    }

    let answer = state.repo.create_answer(id, &body.user_id, &body.text).await?;

    Ok((StatusCode::CREATED, Json(answer)))
}

/// # DELETE /questions/{id}
/// Responds with the question as it was before deletion. Answers under it
/// are removed by the storage-level cascade.
pub async fn delete_question(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Question>, ApiError> {
    let question = state
        .repo
        .get_question(id)
        .await
        .map_err(|e| map_lookup(e, "question"))?;
    state.repo.delete_question(id).await?;

    Ok(Json(question))
}

/// # GET /answers/{id}
pub async fn get_answer(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Answer>, ApiError> {
    let answer = state
        .repo
        .get_answer(id)
        .await
        .map_err(|e| map_lookup(e, "answer"))?;

    Ok(Json(answer))
}

/// # POST /answers/
/// A missing question is a 400 on this route, not a 404 as on the nested
/// route under /questions/.
pub async fn create_answer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAnswer>, JsonRejection>,
) -> Result<(StatusCode, Json<Answer>), ApiError> {
    let body = decode(payload)?;
    if body.question_id == 0 || body.user_id.is_empty() || body.text.is_empty() {
        return Err(ApiError::Validation(
            "question_id, user_id and text are required".to_string(),
        ));
    }

    state
        .repo
        .get_question(body.question_id)
        .await
        .map_err(|e| match e {
            DbError::NotFound => ApiError::Validation("question not found".to_string()),
            other => ApiError::Database(other),
        })?;

    let answer = state
        .repo
        .create_answer(body.question_id, &body.user_id, &body.text)
        .await?;

    Ok((StatusCode::CREATED, Json(answer)))
}

/// # DELETE /answers/{id}
/// No existence check: deleting an id that was never created still responds
/// with an empty 200.
pub async fn delete_answer(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    state.repo.delete_answer(id).await?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn question_envelope_exposes_question_and_answers_keys() {
        let envelope = QuestionWithAnswers {
            question: Question {
                id: 1,
                text: "What is the purpose of an index in PostgreSQL?".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            },
            answers: Vec::new(),
        };

        let value = serde_json::to_value(envelope).unwrap();

        assert!(value["question"].is_object());
        assert_eq!(value["answers"], serde_json::json!([]));
    }

    #[test]
    fn lookup_miss_becomes_a_resource_specific_404() {
        let err = map_lookup(DbError::NotFound, "question");
        assert!(matches!(err, ApiError::NotFound(msg) if msg == "question not found"));
    }

    #[test]
    fn lookup_failure_stays_a_storage_error() {
        let err = map_lookup(
            DbError::ConnectionError(sqlx::Error::PoolClosed),
            "question",
        );
        assert!(matches!(err, ApiError::Database(_)));
    }

    #[test]
    fn create_answer_body_defaults_absent_fields() {
        let body: CreateAnswer = serde_json::from_str(r#"{"question_id": 3}"#).unwrap();

        assert_eq!(body.question_id, 3);
        assert!(body.user_id.is_empty());
        assert!(body.text.is_empty());
    }
}
