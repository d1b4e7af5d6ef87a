//! Side menu descriptors contributed by feature modules.
//!
//! Management entries are fully resolved when contributed. Public entries
//! carry a visibility predicate that is evaluated on every render.

use crate::i18n::Translatable;
use crate::model::event::Event;
use crate::repo::RepoResult;
use crate::signals::{HookResult, RequestContext};
use rusqlite::Connection;
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Lazily evaluated visibility rule for a public menu entry.
pub type VisibilityFn = Arc<dyn Fn(&Connection, &Event) -> RepoResult<bool> + Send + Sync>;

/// Entry of an event's management side menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SideMenuItem {
    pub label: Translatable,
    pub url: String,
    pub visible: bool,
    /// Feature that must be enabled for the entry to make sense.
    pub event_feature: Option<&'static str>,
}

/// Entry of an event's public side menu.
#[derive(Clone)]
pub struct EventMenuEntry {
    pub endpoint: &'static str,
    pub label: Translatable,
    pub name: &'static str,
    visible: Option<VisibilityFn>,
}

impl EventMenuEntry {
    /// Creates an always-visible entry.
    pub fn new(endpoint: &'static str, label: Translatable, name: &'static str) -> Self {
        Self {
            endpoint,
            label,
            name,
            visible: None,
        }
    }

    pub fn with_visibility<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Connection, &Event) -> RepoResult<bool> + Send + Sync + 'static,
    {
        self.visible = Some(Arc::new(predicate));
        self
    }

    /// Evaluates the visibility rule for one render.
    pub fn is_visible(&self, conn: &Connection, event: &Event) -> RepoResult<bool> {
        match &self.visible {
            Some(predicate) => predicate(conn, event),
            None => Ok(true),
        }
    }
}

impl Debug for EventMenuEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventMenuEntry")
            .field("endpoint", &self.endpoint)
            .field("label", &self.label)
            .field("name", &self.name)
            .field("has_visibility_rule", &self.visible.is_some())
            .finish()
    }
}

/// Public menu entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMenuEntry {
    pub name: &'static str,
    pub label: String,
    pub url: String,
}

/// Resolves visible public entries, keeping their input order.
pub fn render_event_menu(
    ctx: &RequestContext<'_>,
    entries: &[EventMenuEntry],
    event: &Event,
) -> HookResult<Vec<RenderedMenuEntry>> {
    let mut rendered = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_visible(ctx.conn, event)? {
            continue;
        }
        rendered.push(RenderedMenuEntry {
            name: entry.name,
            label: entry.label.resolve(ctx.translator).into_owned(),
            url: ctx.urls.url_for(entry.endpoint, event.id)?,
        });
    }
    Ok(rendered)
}

/// Orders management entries by their menu key.
pub fn sorted_management_menu(
    mut items: Vec<(String, SideMenuItem)>,
) -> Vec<(String, SideMenuItem)> {
    items.sort_by(|(left, _), (right, _)| left.cmp(right));
    items
}
