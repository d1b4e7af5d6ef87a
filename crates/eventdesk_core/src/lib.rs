//! Core of the eventdesk event-management host.
//! Hosts the signal registry, feature catalog and the surveys feature module.

pub mod app;
pub mod config;
pub mod db;
pub mod features;
pub mod i18n;
pub mod logging;
pub mod menu;
pub mod model;
pub mod repo;
pub mod routes;
pub mod signals;
pub mod surveys;

pub use app::{App, AppError};
pub use config::{ConfigError, CoreConfig};
pub use features::{EventFeature, FeatureCatalog, FeatureCatalogError};
pub use i18n::{tr, CatalogTranslator, IdentityTranslator, Translatable, Translator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use menu::{EventMenuEntry, RenderedMenuEntry, SideMenuItem};
pub use model::event::{Event, EventId};
pub use model::survey::{Survey, SurveyId, SurveySubmission, SurveyValidationError};
pub use model::user::{User, UserId};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::submission_repo::{SqliteSubmissionRepository, SubmissionRepository};
pub use repo::survey_repo::{SqliteSurveyRepository, SurveyRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use routes::{RouteError, UrlMap};
pub use signals::{HookError, HookResult, RequestContext, SignalError, SignalRegistry};
pub use surveys::SurveysFeature;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
