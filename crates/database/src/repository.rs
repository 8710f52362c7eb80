use crate::DbError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use sqlx::FromRow;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Represents a row from the `questions` table.
///
/// `id` and `created_at` are assigned by the database at insert time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Represents a row from the `answers` table. Each answer belongs to exactly
/// one question; the schema removes answers when their question is deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i32,
    pub question_id: i32,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all questions. Row order is whatever the storage returns.
    pub async fn list_questions(&self) -> Result<Vec<Question>, DbError> {
        let questions =
            sqlx::query_as::<_, Question>("SELECT id, text, created_at FROM questions")
                .fetch_all(&self.pool)
                .await?;
        Ok(questions)
    }

    /// Fetches a single question by id.
    pub async fn get_question(&self, id: i32) -> Result<Question, DbError> {
        let question = sqlx::query_as::<_, Question>(
            "SELECT id, text, created_at FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::RowNotFound = e {
                DbError::NotFound
            } else {
                e.into()
            }
        })?;
        Ok(question)
    }

    /// Inserts a question and returns the stored row, with the id and
    /// creation timestamp the database assigned.
    pub async fn create_question(&self, text: &str) -> Result<Question, DbError> {
        let question = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (text) VALUES ($1) RETURNING id, text, created_at",
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(question)
    }

    /// Deletes a question. Its answers are removed by the FK cascade.
    pub async fn delete_question(&self, id: i32) -> Result<(), DbError> {
        sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Fetches all answers attached to one question. Row order is whatever
    /// the storage returns.
    pub async fn answers_for_question(&self, question_id: i32) -> Result<Vec<Answer>, DbError> {
        let answers = sqlx::query_as::<_, Answer>(
            "SELECT id, question_id, user_id, text, created_at FROM answers WHERE question_id = $1",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(answers)
    }

    /// Fetches a single answer by id.
    pub async fn get_answer(&self, id: i32) -> Result<Answer, DbError> {
        let answer = sqlx::query_as::<_, Answer>(
            "SELECT id, question_id, user_id, text, created_at FROM answers WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::RowNotFound = e {
                DbError::NotFound
            } else {
                e.into()
            }
        })?;
        Ok(answer)
    }

    /// Inserts an answer under an existing question and returns the stored
    /// row. The caller is expected to have checked the question exists; a
    /// concurrent question deletion still surfaces here as an FK violation.
    pub async fn create_answer(
        &self,
        question_id: i32,
        user_id: &str,
        text: &str,
    ) -> Result<Answer, DbError> {
        let answer = sqlx::query_as::<_, Answer>(
            "INSERT INTO answers (question_id, user_id, text) VALUES ($1, $2, $3) \
             RETURNING id, question_id, user_id, text, created_at",
        )
        .bind(question_id)
        .bind(user_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(answer)
    }

    /// Deletes an answer. Deleting an id that does not exist is not an
    /// error; the statement simply affects zero rows.
    pub async fn delete_answer(&self, id: i32) -> Result<(), DbError> {
        sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_question() -> Question {
        Question {
            id: 7,
            text: "What is a transaction in a database?".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn question_serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample_question()).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["text"], "What is a transaction in a database?");
        assert!(value["created_at"].is_string());
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn answer_serializes_with_wire_field_names() {
        let answer = Answer {
            id: 3,
            question_id: 7,
            user_id: "11111111-1111-1111-1111-111111111111".to_string(),
            text: "A logical unit of work.".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 31, 0).unwrap(),
        };

        let value = serde_json::to_value(answer).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["question_id"], 7);
        assert_eq!(value["user_id"], "11111111-1111-1111-1111-111111111111");
        assert_eq!(value["text"], "A logical unit of work.");
        assert!(value["created_at"].is_string());
        assert_eq!(value.as_object().unwrap().len(), 5);
    }

    #[test]
    fn question_round_trips_through_json() {
        let question = sample_question();
        let json = serde_json::to_string(&question).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, question.id);
        assert_eq!(back.text, question.text);
        assert_eq!(back.created_at, question.created_at);
    }
}
