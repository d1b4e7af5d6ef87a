//! Application bootstrap and host-side signal dispatch.
//!
//! # Responsibility
//! - Register feature modules once and freeze the resulting tables.
//! - Give request handlers explicit context instead of ambient session state.
//!
//! # Invariants
//! - `users.merged` receivers run inside one transaction: either every
//!   receiver's changes commit or none do.

use crate::features::{FeatureCatalog, FeatureCatalogError};
use crate::i18n::{IdentityTranslator, Translator};
use crate::menu::{render_event_menu, sorted_management_menu, RenderedMenuEntry, SideMenuItem};
use crate::model::event::Event;
use crate::model::user::{User, UserId};
use crate::repo::user_repo::SqliteUserRepository;
use crate::routes::UrlMap;
use crate::signals::{HookResult, RequestContext, SignalError, SignalRegistry};
use crate::surveys;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum AppError {
    Signal(SignalError),
    Catalog(FeatureCatalogError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signal(err) => write!(f, "signal registration failed: {err}"),
            Self::Catalog(err) => write!(f, "feature catalog failed: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Signal(err) => Some(err),
            Self::Catalog(err) => Some(err),
        }
    }
}

impl From<SignalError> for AppError {
    fn from(value: SignalError) -> Self {
        Self::Signal(value)
    }
}

impl From<FeatureCatalogError> for AppError {
    fn from(value: FeatureCatalogError) -> Self {
        Self::Catalog(value)
    }
}

/// Frozen host wiring shared by all requests.
pub struct App {
    signals: SignalRegistry,
    features: FeatureCatalog,
    urls: UrlMap,
    translator: Box<dyn Translator>,
}

impl App {
    /// Registers the built-in feature modules with default routes.
    pub fn bootstrap() -> Result<Self, AppError> {
        let mut signals = SignalRegistry::new();
        Self::register_builtin(&mut signals)?;
        Self::from_registry(signals, UrlMap::with_defaults())
    }

    /// Connects every built-in feature module to `signals`.
    pub fn register_builtin(signals: &mut SignalRegistry) -> Result<(), SignalError> {
        surveys::register(signals)
    }

    /// Freezes a fully connected registry and builds the feature catalog.
    pub fn from_registry(signals: SignalRegistry, urls: UrlMap) -> Result<Self, AppError> {
        let features = FeatureCatalog::from_signals(&signals)?;
        info!(
            "event=app_bootstrap module=app status=ok features={}",
            features.names().join(",")
        );
        Ok(Self {
            signals,
            features,
            urls,
            translator: Box::new(IdentityTranslator),
        })
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn signals(&self) -> &SignalRegistry {
        &self.signals
    }

    pub fn features(&self) -> &FeatureCatalog {
        &self.features
    }

    pub fn urls(&self) -> &UrlMap {
        &self.urls
    }

    /// Builds the per-request context for `user` (or an anonymous session).
    pub fn context<'a>(
        &'a self,
        conn: &'a Connection,
        user: Option<&'a User>,
    ) -> RequestContext<'a> {
        RequestContext {
            conn,
            user,
            features: &self.features,
            urls: &self.urls,
            translator: &*self.translator,
        }
    }

    /// Dispatches `users.merged` inside one transaction.
    ///
    /// Any receiver error rolls back every change made during dispatch.
    pub fn merge_users(
        &self,
        conn: &mut Connection,
        target: &User,
        source: &User,
    ) -> HookResult<()> {
        let tx = conn.transaction()?;
        if let Err(err) = self.signals.send_users_merged(&tx, target, source) {
            error!(
                "event=users_merged module=app status=error source_user={} target_user={} error={}",
                source.id, target.id, err
            );
            return Err(err);
        }
        tx.commit()?;
        info!(
            "event=users_merged module=app status=ok source_user={} target_user={}",
            source.id, target.id
        );
        Ok(())
    }

    /// Resolves both accounts, then merges `source_id` into `target_id`.
    ///
    /// Unknown ids fail with `UserNotFound` before any receiver runs.
    pub fn merge_users_by_id(
        &self,
        conn: &mut Connection,
        target_id: UserId,
        source_id: UserId,
    ) -> HookResult<()> {
        let (target, source) = {
            let users = SqliteUserRepository::new(conn);
            (users.require_user(target_id)?, users.require_user(source_id)?)
        };
        self.merge_users(conn, &target, &source)
    }

    /// Management side menu entries, ordered by key.
    pub fn management_menu(
        &self,
        ctx: &RequestContext<'_>,
        event: &Event,
    ) -> HookResult<Vec<(String, SideMenuItem)>> {
        let items = self.signals.collect_management_menu(ctx, event)?;
        Ok(sorted_management_menu(items))
    }

    /// Visible public side menu entries, in registration order.
    pub fn event_menu(
        &self,
        ctx: &RequestContext<'_>,
        event: &Event,
    ) -> HookResult<Vec<RenderedMenuEntry>> {
        let entries = self.signals.collect_event_menu(ctx, event);
        render_event_menu(ctx, &entries, event)
    }
}
