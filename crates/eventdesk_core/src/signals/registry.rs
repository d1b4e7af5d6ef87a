//! Typed receiver lists for every host signal.

use super::context::{HookResult, RequestContext};
use super::{EVENT_FEATURE_DEFINITIONS, EVENT_MANAGEMENT_SIDEMENU, EVENT_SIDEMENU, USERS_MERGED};
use crate::features::EventFeature;
use crate::menu::{EventMenuEntry, SideMenuItem};
use crate::model::event::Event;
use crate::model::user::User;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

static RECEIVER_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("valid receiver id regex")
});

pub type UsersMergedHandler =
    Box<dyn Fn(&Connection, &User, &User) -> HookResult<()> + Send + Sync>;
pub type ManagementMenuHandler = Box<
    dyn Fn(&RequestContext<'_>, &Event) -> HookResult<Option<(String, SideMenuItem)>>
        + Send
        + Sync,
>;
pub type EventMenuHandler =
    Box<dyn Fn(&RequestContext<'_>, &Event) -> EventMenuEntry + Send + Sync>;
pub type FeatureDefinitionsHandler = Box<dyn Fn() -> Arc<dyn EventFeature> + Send + Sync>;

/// Receiver connection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    InvalidReceiverId(String),
    DuplicateReceiver {
        signal: &'static str,
        receiver: String,
    },
}

impl Display for SignalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReceiverId(value) => write!(f, "receiver id is invalid: {value}"),
            Self::DuplicateReceiver { signal, receiver } => {
                write!(f, "receiver `{receiver}` already connected to `{signal}`")
            }
        }
    }
}

impl Error for SignalError {}

struct Receivers<H> {
    signal: &'static str,
    entries: Vec<(String, H)>,
}

impl<H> Receivers<H> {
    fn new(signal: &'static str) -> Self {
        Self {
            signal,
            entries: Vec::new(),
        }
    }

    fn connect(&mut self, receiver: &str, handler: H) -> Result<(), SignalError> {
        let receiver = receiver.trim();
        if !RECEIVER_ID_RE.is_match(receiver) {
            return Err(SignalError::InvalidReceiverId(receiver.to_string()));
        }
        if self.entries.iter().any(|(id, _)| id == receiver) {
            return Err(SignalError::DuplicateReceiver {
                signal: self.signal,
                receiver: receiver.to_string(),
            });
        }

        debug!(
            "event=signal_connect module=signals status=ok signal={} receiver={}",
            self.signal, receiver
        );
        self.entries.push((receiver.to_string(), handler));
        Ok(())
    }

    fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }
}

impl<H> Debug for Receivers<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Receivers")
            .field("signal", &self.signal)
            .field("receivers", &self.ids())
            .finish()
    }
}

/// Process-wide table of signal receivers, built once during bootstrap.
#[derive(Debug)]
pub struct SignalRegistry {
    users_merged: Receivers<UsersMergedHandler>,
    management_menu: Receivers<ManagementMenuHandler>,
    event_menu: Receivers<EventMenuHandler>,
    feature_definitions: Receivers<FeatureDefinitionsHandler>,
}

impl Default for SignalRegistry {
    fn default() -> Self {
        Self {
            users_merged: Receivers::new(USERS_MERGED),
            management_menu: Receivers::new(EVENT_MANAGEMENT_SIDEMENU),
            event_menu: Receivers::new(EVENT_SIDEMENU),
            feature_definitions: Receivers::new(EVENT_FEATURE_DEFINITIONS),
        }
    }
}

impl SignalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_users_merged<F>(&mut self, receiver: &str, handler: F) -> Result<(), SignalError>
    where
        F: Fn(&Connection, &User, &User) -> HookResult<()> + Send + Sync + 'static,
    {
        self.users_merged.connect(receiver, Box::new(handler))
    }

    pub fn connect_management_menu<F>(
        &mut self,
        receiver: &str,
        handler: F,
    ) -> Result<(), SignalError>
    where
        F: Fn(&RequestContext<'_>, &Event) -> HookResult<Option<(String, SideMenuItem)>>
            + Send
            + Sync
            + 'static,
    {
        self.management_menu.connect(receiver, Box::new(handler))
    }

    pub fn connect_event_menu<F>(&mut self, receiver: &str, handler: F) -> Result<(), SignalError>
    where
        F: Fn(&RequestContext<'_>, &Event) -> EventMenuEntry + Send + Sync + 'static,
    {
        self.event_menu.connect(receiver, Box::new(handler))
    }

    pub fn connect_feature_definitions<F>(
        &mut self,
        receiver: &str,
        handler: F,
    ) -> Result<(), SignalError>
    where
        F: Fn() -> Arc<dyn EventFeature> + Send + Sync + 'static,
    {
        self.feature_definitions.connect(receiver, Box::new(handler))
    }

    /// Returns connected receiver ids for one signal name, in dispatch order.
    ///
    /// Unknown signal names yield an empty list.
    pub fn receivers(&self, signal: &str) -> Vec<&str> {
        match signal {
            USERS_MERGED => self.users_merged.ids(),
            EVENT_MANAGEMENT_SIDEMENU => self.management_menu.ids(),
            EVENT_SIDEMENU => self.event_menu.ids(),
            EVENT_FEATURE_DEFINITIONS => self.feature_definitions.ids(),
            _ => vec![],
        }
    }

    /// Notifies receivers that `source` was merged into `target`.
    ///
    /// Stops at the first failing receiver and returns its error; the caller
    /// owns the surrounding transaction.
    pub fn send_users_merged(
        &self,
        conn: &Connection,
        target: &User,
        source: &User,
    ) -> HookResult<()> {
        for (receiver, handler) in &self.users_merged.entries {
            if let Err(err) = handler(conn, target, source) {
                warn!(
                    "event=signal_dispatch module=signals status=error signal={} receiver={} error={}",
                    USERS_MERGED, receiver, err
                );
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn collect_management_menu(
        &self,
        ctx: &RequestContext<'_>,
        event: &Event,
    ) -> HookResult<Vec<(String, SideMenuItem)>> {
        let mut items = Vec::new();
        for (_, handler) in &self.management_menu.entries {
            if let Some(item) = handler(ctx, event)? {
                items.push(item);
            }
        }
        Ok(items)
    }

    pub fn collect_event_menu(
        &self,
        ctx: &RequestContext<'_>,
        event: &Event,
    ) -> Vec<EventMenuEntry> {
        self.event_menu
            .entries
            .iter()
            .map(|(_, handler)| handler(ctx, event))
            .collect()
    }

    pub fn collect_feature_definitions(&self) -> Vec<Arc<dyn EventFeature>> {
        self.feature_definitions
            .entries
            .iter()
            .map(|(_, handler)| handler())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{SignalError, SignalRegistry};
    use crate::model::user::User;
    use crate::signals::{HookResult, USERS_MERGED};
    use rusqlite::Connection;

    fn noop_merge(_: &Connection, _: &User, _: &User) -> HookResult<()> {
        Ok(())
    }

    #[test]
    fn rejects_duplicate_receiver_for_same_signal() {
        let mut registry = SignalRegistry::new();
        registry
            .connect_users_merged("surveys", noop_merge)
            .expect("first connection");
        let err = registry
            .connect_users_merged("surveys", noop_merge)
            .expect_err("duplicate receiver must fail");
        assert_eq!(
            err,
            SignalError::DuplicateReceiver {
                signal: USERS_MERGED,
                receiver: "surveys".to_string(),
            }
        );
    }

    #[test]
    fn rejects_malformed_receiver_ids() {
        let mut registry = SignalRegistry::new();
        for bad in ["", "Surveys", "1surveys", "surveys..extra", "sur veys"] {
            let err = registry
                .connect_users_merged(bad, noop_merge)
                .expect_err("malformed id must fail");
            assert!(matches!(err, SignalError::InvalidReceiverId(_)));
        }
    }

    #[test]
    fn lists_receivers_in_connection_order() {
        let mut registry = SignalRegistry::new();
        registry
            .connect_users_merged("surveys", noop_merge)
            .expect("surveys connection");
        registry
            .connect_users_merged("events.registration", noop_merge)
            .expect("registration connection");

        assert_eq!(
            registry.receivers(USERS_MERGED),
            vec!["surveys", "events.registration"]
        );
        assert!(registry.receivers("no.such.signal").is_empty());
    }
}
