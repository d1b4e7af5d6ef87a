//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Keep SQL inside the persistence boundary.
//! - Return semantic errors (`*NotFound`) alongside storage transport errors.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Bulk ownership changes are single statements, never per-row loops.

use crate::db::DbError;
use crate::model::event::EventId;
use crate::model::survey::{SurveyId, SurveyValidationError};
use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event_repo;
pub mod submission_repo;
pub mod survey_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(SurveyValidationError),
    Db(DbError),
    UserNotFound(UserId),
    EventNotFound(EventId),
    SurveyNotFound(SurveyId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::SurveyNotFound(id) => write!(f, "survey not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurveyValidationError> for RepoError {
    fn from(value: SurveyValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
