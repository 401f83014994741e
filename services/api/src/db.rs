//! Data Access Layer
//!
//! This module contains all the functions for interacting with the SQLite
//! database. It owns the durable, ordered, per-session append log of turns
//! and the session rows. Queries use the runtime-checked `sqlx` API so the
//! crate builds without a live database.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{Session, Speaker, Turn};

/// A wrapper around the `SqlitePool` to provide a clear data access interface.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Creates a new `Db` instance.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs all pending `sqlx` migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Creates a new interview session together with its opening `ai` turn in
    /// a single transaction.
    ///
    /// The caller must have already obtained the opening question; a session
    /// row never exists without its first turn.
    pub async fn create_interview(
        &self,
        role: &str,
        resume_text: &str,
        first_question: &str,
    ) -> Result<(Session, Turn)> {
        let mut tx = self.pool.begin().await?;

        let session: Session = sqlx::query_as(
            r#"
            INSERT INTO interviews (role, resume_text)
            VALUES (?1, ?2)
            RETURNING id, role, resume_text, status, created_at
            "#,
        )
        .bind(role)
        .bind(resume_text)
        .fetch_one(&mut *tx)
        .await?;

        let turn: Turn = sqlx::query_as(
            r#"
            INSERT INTO turns (session_id, seq, speaker, text)
            VALUES (?1, 1, ?2, ?3)
            RETURNING id, session_id, seq, speaker, text, created_at
            "#,
        )
        .bind(session.id)
        .bind(Speaker::Ai)
        .bind(first_question)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((session, turn))
    }

    /// Retrieves a single interview session by its ID.
    pub async fn get_interview(&self, session_id: i64) -> Result<Option<Session>> {
        let session = sqlx::query_as(
            r#"
            SELECT id, role, resume_text, status, created_at
            FROM interviews
            WHERE id = ?1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    /// Appends a turn to a session's transcript, assigning the next
    /// per-session sequence number in the same statement.
    pub async fn append_turn(
        &self,
        session_id: i64,
        speaker: Speaker,
        text: &str,
    ) -> Result<Turn> {
        let turn = sqlx::query_as(
            r#"
            INSERT INTO turns (session_id, seq, speaker, text)
            VALUES (
                ?1,
                (SELECT COALESCE(MAX(seq), 0) + 1 FROM turns WHERE session_id = ?1),
                ?2,
                ?3
            )
            RETURNING id, session_id, seq, speaker, text, created_at
            "#,
        )
        .bind(session_id)
        .bind(speaker)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(turn)
    }

    /// Retrieves the full transcript for a session, ordered by sequence
    /// number. A just-appended turn is always visible here.
    pub async fn transcript(&self, session_id: i64) -> Result<Vec<Turn>> {
        let turns = sqlx::query_as(
            r#"
            SELECT id, session_id, seq, speaker, text, created_at
            FROM turns
            WHERE session_id = ?1
            ORDER BY seq ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionStatus;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_db() -> Db {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        let db = Db::new(pool);
        db.run_migrations().await.expect("migrations");
        db
    }

    #[tokio::test]
    async fn create_interview_persists_session_and_opening_turn_together() {
        let db = test_db().await;
        let (session, turn) = db
            .create_interview("Backend Engineer", "", "Tell me about yourself.")
            .await
            .unwrap();

        assert_eq!(session.role, "Backend Engineer");
        assert_eq!(session.resume_text, "");
        assert_eq!(session.status, SessionStatus::Started);
        assert_eq!(turn.session_id, session.id);
        assert_eq!(turn.seq, 1);
        assert_eq!(turn.speaker, Speaker::Ai);
        assert_eq!(turn.text, "Tell me about yourself.");

        let transcript = db.transcript(session.id).await.unwrap();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].id, turn.id);
    }

    #[tokio::test]
    async fn session_ids_are_storage_assigned_and_increasing() {
        let db = test_db().await;
        let (first, _) = db.create_interview("A", "", "q").await.unwrap();
        let (second, _) = db.create_interview("B", "", "q").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn append_assigns_dense_per_session_sequence_numbers() {
        let db = test_db().await;
        let (session, _) = db.create_interview("Designer", "", "Q1").await.unwrap();
        let (other, _) = db.create_interview("Writer", "", "Q1").await.unwrap();

        let user_turn = db
            .append_turn(session.id, Speaker::User, "A1")
            .await
            .unwrap();
        let ai_turn = db.append_turn(session.id, Speaker::Ai, "Q2").await.unwrap();
        // The other session's counter is independent.
        let other_turn = db.append_turn(other.id, Speaker::User, "A1").await.unwrap();

        assert_eq!(user_turn.seq, 2);
        assert_eq!(ai_turn.seq, 3);
        assert_eq!(other_turn.seq, 2);
    }

    #[tokio::test]
    async fn transcript_is_ordered_and_read_your_writes() {
        let db = test_db().await;
        let (session, _) = db.create_interview("Designer", "", "Q1").await.unwrap();
        db.append_turn(session.id, Speaker::User, "A1").await.unwrap();
        db.append_turn(session.id, Speaker::Ai, "Q2").await.unwrap();
        db.append_turn(session.id, Speaker::User, "A2").await.unwrap();

        let transcript = db.transcript(session.id).await.unwrap();
        let speakers: Vec<Speaker> = transcript.iter().map(|t| t.speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::Ai, Speaker::User, Speaker::Ai, Speaker::User]
        );
        let seqs: Vec<i64> = transcript.iter().map(|t| t.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn unknown_session_has_no_row_and_empty_transcript() {
        let db = test_db().await;
        assert!(db.get_interview(999).await.unwrap().is_none());
        assert!(db.transcript(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_interview_returns_created_row() {
        let db = test_db().await;
        let (created, _) = db
            .create_interview("Designer", "ten years of figma", "Q1")
            .await
            .unwrap();
        let fetched = db.get_interview(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.resume_text, "ten years of figma");
    }
}
