//! Endpoint name to URL path resolution.

use crate::model::event::EventId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENT_ID_PLACEHOLDER: &str = "{event_id}";

/// Survey management page of one event.
pub const SURVEY_MANAGEMENT: &str = "survey.management";
/// Public survey listing of one event.
pub const SURVEY_DISPLAY_LIST: &str = "survey.display_survey_list";

const DEFAULT_ROUTES: &[(&str, &str)] = &[
    (SURVEY_MANAGEMENT, "/event/{event_id}/manage/surveys/"),
    (SURVEY_DISPLAY_LIST, "/event/{event_id}/surveys/"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    UnknownEndpoint(String),
    MissingEventPlaceholder(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEndpoint(value) => write!(f, "no route registered for endpoint: {value}"),
            Self::MissingEventPlaceholder(value) => {
                write!(f, "route template lacks {EVENT_ID_PLACEHOLDER}: {value}")
            }
        }
    }
}

impl Error for RouteError {}

/// Per-event URL templates keyed by endpoint name.
#[derive(Debug, Clone, Default)]
pub struct UrlMap {
    templates: BTreeMap<String, String>,
}

impl UrlMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map preloaded with the survey endpoints.
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        for (endpoint, template) in DEFAULT_ROUTES {
            map.templates
                .insert((*endpoint).to_string(), (*template).to_string());
        }
        map
    }

    /// Adds or replaces one endpoint template.
    pub fn add(
        &mut self,
        endpoint: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<(), RouteError> {
        let template = template.into();
        if !template.contains(EVENT_ID_PLACEHOLDER) {
            return Err(RouteError::MissingEventPlaceholder(template));
        }
        self.templates.insert(endpoint.into(), template);
        Ok(())
    }

    pub fn url_for(&self, endpoint: &str, event_id: EventId) -> Result<String, RouteError> {
        let template = self
            .templates
            .get(endpoint)
            .ok_or_else(|| RouteError::UnknownEndpoint(endpoint.to_string()))?;
        Ok(template.replace(EVENT_ID_PLACEHOLDER, &event_id.to_string()))
    }
}
