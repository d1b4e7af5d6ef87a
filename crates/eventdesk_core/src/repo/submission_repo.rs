//! Survey submission persistence.
//!
//! # Invariants
//! - `reassign_user` is one `UPDATE` statement: readers see either none or all
//!   of a user's submissions moved.

use crate::model::survey::{SubmissionId, SurveySubmission};
use crate::model::user::UserId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub trait SubmissionRepository {
    fn create_submission(&self, submission: &SurveySubmission) -> RepoResult<SubmissionId>;
    fn count_by_user(&self, user_id: UserId) -> RepoResult<u64>;
    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<SurveySubmission>>;
    /// Moves every submission owned by `source` to `target`.
    ///
    /// Returns the number of submissions moved.
    fn reassign_user(&self, source: UserId, target: UserId) -> RepoResult<usize>;
}

pub struct SqliteSubmissionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSubmissionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SubmissionRepository for SqliteSubmissionRepository<'_> {
    fn create_submission(&self, submission: &SurveySubmission) -> RepoResult<SubmissionId> {
        self.conn.execute(
            "INSERT INTO survey_submissions (uuid, survey_uuid, user_id, submitted_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                submission.uuid.to_string(),
                submission.survey_id.to_string(),
                submission.user_id,
                submission.submitted_at_ms,
            ],
        )?;
        Ok(submission.uuid)
    }

    fn count_by_user(&self, user_id: UserId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM survey_submissions WHERE user_id = ?1;",
            [user_id],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative submission count `{count}`")))
    }

    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<SurveySubmission>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, survey_uuid, user_id, submitted_at
             FROM survey_submissions
             WHERE user_id = ?1
             ORDER BY submitted_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut submissions = Vec::new();
        while let Some(row) = rows.next()? {
            submissions.push(parse_submission_row(row)?);
        }
        Ok(submissions)
    }

    fn reassign_user(&self, source: UserId, target: UserId) -> RepoResult<usize> {
        let moved = self.conn.execute(
            "UPDATE survey_submissions SET user_id = ?1 WHERE user_id = ?2;",
            params![target, source],
        )?;
        Ok(moved)
    }
}

fn parse_submission_row(row: &Row<'_>) -> RepoResult<SurveySubmission> {
    Ok(SurveySubmission {
        uuid: parse_uuid(row, "uuid")?,
        survey_id: parse_uuid(row, "survey_uuid")?,
        user_id: row.get("user_id")?,
        submitted_at_ms: row.get("submitted_at")?,
    })
}

fn parse_uuid(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{text}` in survey_submissions.{column}"
        ))
    })
}
