//! User account persistence.

use crate::model::user::{User, UserId};
use crate::repo::{bool_to_int, int_to_bool, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
}

pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Loads a user, turning a missing row into `UserNotFound`.
    pub fn require_user(&self, id: UserId) -> RepoResult<User> {
        self.get_user(id)?.ok_or(RepoError::UserNotFound(id))
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (id, full_name, is_admin) VALUES (?1, ?2, ?3);",
            params![user.id, user.full_name.as_str(), bool_to_int(user.is_admin)],
        )?;
        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, full_name, is_admin FROM users WHERE id = ?1;",
                [id],
                |row| {
                    Ok((
                        row.get::<_, UserId>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, full_name, is_admin)| {
            Ok(User {
                id,
                full_name,
                is_admin: int_to_bool(is_admin, "users.is_admin")?,
            })
        })
        .transpose()
    }
}
