//! Event (conference/meeting) record.

use crate::model::user::{User, UserId};
use serde::{Deserialize, Serialize};

/// Numeric event identifier assigned by the host.
pub type EventId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub creator_id: UserId,
    /// Users granted management rights besides the creator, in any order.
    pub manager_ids: Vec<UserId>,
}

impl Event {
    pub fn new(id: EventId, title: impl Into<String>, creator_id: UserId) -> Self {
        Self {
            id,
            title: title.into(),
            creator_id,
            manager_ids: Vec::new(),
        }
    }

    /// Returns whether `user` may change this event's configuration.
    ///
    /// Anonymous sessions (`None`) can never modify an event.
    pub fn can_modify(&self, user: Option<&User>) -> bool {
        let Some(user) = user else {
            return false;
        };
        user.is_admin
            || user.id == self.creator_id
            || self.manager_ids.contains(&user.id)
    }
}
