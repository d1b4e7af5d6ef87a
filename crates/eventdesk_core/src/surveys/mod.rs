//! Surveys feature wiring.
//!
//! # Responsibility
//! - Connect the surveys module to the host signals it extends.
//! - Keep survey ownership consistent when user accounts are merged.
//!
//! # Invariants
//! - Receivers hold no state; each call depends only on its arguments.
//! - Merge reassignment is a single bulk update inside the caller's
//!   transaction.

mod feature;

pub use feature::{SurveysFeature, SURVEYS_FEATURE_NAME};

use crate::features::EventFeature;
use crate::i18n::tr;
use crate::menu::{EventMenuEntry, SideMenuItem};
use crate::model::event::Event;
use crate::model::user::User;
use crate::repo::submission_repo::{SqliteSubmissionRepository, SubmissionRepository};
use crate::repo::survey_repo::{SqliteSurveyRepository, SurveyRepository};
use crate::repo::RepoResult;
use crate::routes::{SURVEY_DISPLAY_LIST, SURVEY_MANAGEMENT};
use crate::signals::{HookResult, RequestContext, SignalError, SignalRegistry};
use log::info;
use rusqlite::Connection;
use std::sync::Arc;

/// Receiver id used for every surveys connection.
pub const RECEIVER_ID: &str = "surveys";
/// Menu key and public entry name.
pub const MENU_NAME: &str = "surveys";

const LOG_TARGET: &str = "events.survey";

/// Connects all surveys receivers. Call once during bootstrap.
pub fn register(signals: &mut SignalRegistry) -> Result<(), SignalError> {
    signals.connect_users_merged(RECEIVER_ID, on_users_merged)?;
    signals.connect_management_menu(RECEIVER_ID, on_event_management_menu)?;
    signals.connect_event_menu(RECEIVER_ID, on_event_public_menu)?;
    signals.connect_feature_definitions(RECEIVER_ID, on_feature_catalog)?;
    Ok(())
}

/// Hands every submission of `source` over to `target`.
pub fn on_users_merged(conn: &Connection, target: &User, source: &User) -> HookResult<()> {
    let moved = SqliteSubmissionRepository::new(conn).reassign_user(source.id, target.id)?;
    info!(
        target: LOG_TARGET,
        "event=users_merged module=surveys status=ok source_user={} target_user={} moved={}",
        source.id,
        target.id,
        moved
    );
    Ok(())
}

/// Management menu entry, visible to event managers while the feature is on.
pub fn on_event_management_menu(
    ctx: &RequestContext<'_>,
    event: &Event,
) -> HookResult<Option<(String, SideMenuItem)>> {
    let visible = event.can_modify(ctx.user)
        && ctx
            .features
            .is_enabled(ctx.conn, event, SURVEYS_FEATURE_NAME)?;
    let item = SideMenuItem {
        label: tr("Surveys"),
        url: ctx.urls.url_for(SURVEY_MANAGEMENT, event.id)?,
        visible,
        event_feature: Some(SURVEYS_FEATURE_NAME),
    };
    Ok(Some((MENU_NAME.to_string(), item)))
}

/// Public menu entry, shown while the event has a visible survey.
pub fn on_event_public_menu(_ctx: &RequestContext<'_>, _event: &Event) -> EventMenuEntry {
    EventMenuEntry::new(SURVEY_DISPLAY_LIST, tr("Surveys"), MENU_NAME)
        .with_visibility(has_visible_surveys)
}

pub fn on_feature_catalog() -> Arc<dyn EventFeature> {
    Arc::new(SurveysFeature)
}

fn has_visible_surveys(conn: &Connection, event: &Event) -> RepoResult<bool> {
    SqliteSurveyRepository::new(conn).has_visible_survey(event.id)
}
