//! Event, manager and per-event feature override persistence.
//!
//! # Invariants
//! - Loaded events carry their manager ids sorted ascending.
//! - At most one feature override row exists per `(event, feature)`.

use crate::model::event::{Event, EventId};
use crate::model::user::UserId;
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

pub trait EventRepository {
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    fn add_manager(&self, event_id: EventId, user_id: UserId) -> RepoResult<()>;
    /// Returns the stored override for one feature, `None` when never set.
    fn feature_override(&self, event_id: EventId, feature_name: &str) -> RepoResult<Option<bool>>;
    fn set_feature_override(
        &self,
        event_id: EventId,
        feature_name: &str,
        enabled: bool,
    ) -> RepoResult<()>;
}

pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn require_event(&self, id: EventId) -> RepoResult<Event> {
        self.get_event(id)?.ok_or(RepoError::EventNotFound(id))
    }

    fn manager_ids(&self, event_id: EventId) -> RepoResult<Vec<UserId>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id FROM event_managers WHERE event_id = ?1 ORDER BY user_id ASC;",
        )?;
        let ids = stmt
            .query_map([event_id], |row| row.get::<_, UserId>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        self.conn.execute(
            "INSERT INTO events (id, title, creator_id) VALUES (?1, ?2, ?3);",
            params![event.id, event.title.as_str(), event.creator_id],
        )?;
        for manager_id in &event.manager_ids {
            self.add_manager(event.id, *manager_id)?;
        }
        Ok(event.id)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, title, creator_id FROM events WHERE id = ?1;",
                [id],
                |row| {
                    Ok((
                        row.get::<_, EventId>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, UserId>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, title, creator_id)) = row else {
            return Ok(None);
        };
        Ok(Some(Event {
            id,
            title,
            creator_id,
            manager_ids: self.manager_ids(id)?,
        }))
    }

    fn add_manager(&self, event_id: EventId, user_id: UserId) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO event_managers (event_id, user_id) VALUES (?1, ?2);",
            params![event_id, user_id],
        )?;
        Ok(())
    }

    fn feature_override(&self, event_id: EventId, feature_name: &str) -> RepoResult<Option<bool>> {
        let value = self
            .conn
            .query_row(
                "SELECT enabled FROM event_features WHERE event_id = ?1 AND feature_name = ?2;",
                params![event_id, feature_name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        value
            .map(|raw| int_to_bool(raw, "event_features.enabled"))
            .transpose()
    }

    fn set_feature_override(
        &self,
        event_id: EventId,
        feature_name: &str,
        enabled: bool,
    ) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO event_features (event_id, feature_name, enabled)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (event_id, feature_name) DO UPDATE SET enabled = excluded.enabled;",
            params![event_id, feature_name, bool_to_int(enabled)],
        )?;
        Ok(())
    }
}
