//! Per-request collaborators passed to signal receivers.

use crate::features::FeatureCatalog;
use crate::i18n::Translator;
use crate::model::user::User;
use crate::repo::RepoError;
use crate::routes::{RouteError, UrlMap};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HookResult<T> = Result<T, HookError>;

/// Failure raised by a receiver, propagated to the dispatching caller as is.
#[derive(Debug)]
pub enum HookError {
    Repo(RepoError),
    Route(RouteError),
}

impl Display for HookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Route(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Route(err) => Some(err),
        }
    }
}

impl From<RepoError> for HookError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<RouteError> for HookError {
    fn from(value: RouteError) -> Self {
        Self::Route(value)
    }
}

impl From<rusqlite::Error> for HookError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// Explicit replacement for ambient session/request state.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub conn: &'a Connection,
    /// Acting user, `None` for anonymous sessions.
    pub user: Option<&'a User>,
    pub features: &'a FeatureCatalog,
    pub urls: &'a UrlMap,
    pub translator: &'a dyn Translator,
}
