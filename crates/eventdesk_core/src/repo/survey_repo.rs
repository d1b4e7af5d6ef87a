//! Survey persistence and visibility lookups.

use crate::model::event::EventId;
use crate::model::survey::{Survey, SurveyId};
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const SURVEY_SELECT_SQL: &str = "SELECT uuid, event_id, title, is_visible FROM surveys";

pub trait SurveyRepository {
    fn create_survey(&self, survey: &Survey) -> RepoResult<SurveyId>;
    fn get_survey(&self, id: SurveyId) -> RepoResult<Option<Survey>>;
    fn set_visible(&self, id: SurveyId, is_visible: bool) -> RepoResult<()>;
    fn delete_survey(&self, id: SurveyId) -> RepoResult<()>;
    fn list_for_event(&self, event_id: EventId) -> RepoResult<Vec<Survey>>;
    /// Returns whether at least one visible survey belongs to the event.
    fn has_visible_survey(&self, event_id: EventId) -> RepoResult<bool>;
    fn count_visible(&self, event_id: EventId) -> RepoResult<u64>;
}

pub struct SqliteSurveyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSurveyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SurveyRepository for SqliteSurveyRepository<'_> {
    fn create_survey(&self, survey: &Survey) -> RepoResult<SurveyId> {
        survey.validate()?;
        self.conn.execute(
            "INSERT INTO surveys (uuid, event_id, title, is_visible) VALUES (?1, ?2, ?3, ?4);",
            params![
                survey.uuid.to_string(),
                survey.event_id,
                survey.title.as_str(),
                bool_to_int(survey.is_visible),
            ],
        )?;
        Ok(survey.uuid)
    }

    fn get_survey(&self, id: SurveyId) -> RepoResult<Option<Survey>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SURVEY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_survey_row(row)?));
        }
        Ok(None)
    }

    fn set_visible(&self, id: SurveyId, is_visible: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE surveys SET is_visible = ?1 WHERE uuid = ?2;",
            params![bool_to_int(is_visible), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::SurveyNotFound(id));
        }
        Ok(())
    }

    fn delete_survey(&self, id: SurveyId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM surveys WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::SurveyNotFound(id));
        }
        Ok(())
    }

    fn list_for_event(&self, event_id: EventId) -> RepoResult<Vec<Survey>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SURVEY_SELECT_SQL} WHERE event_id = ?1 ORDER BY title ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([event_id])?;
        let mut surveys = Vec::new();
        while let Some(row) = rows.next()? {
            surveys.push(parse_survey_row(row)?);
        }
        Ok(surveys)
    }

    fn has_visible_survey(&self, event_id: EventId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM surveys WHERE event_id = ?1 AND is_visible = 1);",
            [event_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn count_visible(&self, event_id: EventId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM surveys WHERE event_id = ?1 AND is_visible = 1;",
            [event_id],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative survey count `{count}`")))
    }
}

fn parse_survey_row(row: &Row<'_>) -> RepoResult<Survey> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in surveys.uuid"))
    })?;

    let survey = Survey {
        uuid,
        event_id: row.get("event_id")?,
        title: row.get("title")?,
        is_visible: int_to_bool(row.get("is_visible")?, "surveys.is_visible")?,
    };
    survey.validate()?;
    Ok(survey)
}
