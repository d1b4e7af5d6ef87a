//! User account record.

use serde::{Deserialize, Serialize};

/// Numeric user identifier assigned by the host.
pub type UserId = i64;

/// Account of a person acting on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    /// Platform administrators can modify every event.
    pub is_admin: bool,
}

impl User {
    pub fn new(id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            is_admin: false,
        }
    }
}
