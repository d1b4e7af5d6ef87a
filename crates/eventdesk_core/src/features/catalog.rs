//! Name-indexed feature catalog and enablement checks.

use super::EventFeature;
use crate::model::event::Event;
use crate::repo::event_repo::{EventRepository, SqliteEventRepository};
use crate::repo::{RepoError, RepoResult};
use crate::signals::SignalRegistry;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static FEATURE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid feature name regex"));

#[derive(Debug)]
pub enum FeatureCatalogError {
    InvalidFeatureName(String),
    DuplicateFeature(String),
    UnknownFeature(String),
    Repo(RepoError),
}

impl Display for FeatureCatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFeatureName(value) => write!(f, "feature name is invalid: {value}"),
            Self::DuplicateFeature(value) => write!(f, "feature already defined: {value}"),
            Self::UnknownFeature(value) => write!(f, "feature is not defined: {value}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FeatureCatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FeatureCatalogError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Immutable set of feature definitions collected at bootstrap.
#[derive(Debug, Default)]
pub struct FeatureCatalog {
    features: BTreeMap<&'static str, Arc<dyn EventFeature>>,
}

impl FeatureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog from every `event.get_feature_definitions` receiver.
    pub fn from_signals(signals: &SignalRegistry) -> Result<Self, FeatureCatalogError> {
        let mut catalog = Self::new();
        for feature in signals.collect_feature_definitions() {
            catalog.insert(feature)?;
        }
        info!(
            "event=feature_catalog_built module=features status=ok count={}",
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn insert(&mut self, feature: Arc<dyn EventFeature>) -> Result<(), FeatureCatalogError> {
        let name = feature.name();
        if !FEATURE_NAME_RE.is_match(name) {
            return Err(FeatureCatalogError::InvalidFeatureName(name.to_string()));
        }
        if self.features.contains_key(name) {
            return Err(FeatureCatalogError::DuplicateFeature(name.to_string()));
        }
        self.features.insert(name, feature);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn EventFeature>> {
        self.features.get(name)
    }

    /// Sorted feature names.
    pub fn names(&self) -> Vec<&'static str> {
        self.features.keys().copied().collect()
    }

    /// Returns whether `name` is active for `event`.
    pub fn is_enabled(&self, conn: &Connection, event: &Event, name: &str) -> RepoResult<bool> {
        let Some(feature) = self.features.get(name) else {
            return Ok(false);
        };
        let stored = SqliteEventRepository::new(conn).feature_override(event.id, name)?;
        Ok(stored.unwrap_or_else(|| feature.is_default_for_event(event)))
    }

    /// Stores an explicit per-event override for a catalogued feature.
    pub fn set_enabled(
        &self,
        conn: &Connection,
        event: &Event,
        name: &str,
        enabled: bool,
    ) -> Result<(), FeatureCatalogError> {
        if !self.features.contains_key(name) {
            return Err(FeatureCatalogError::UnknownFeature(name.to_string()));
        }
        SqliteEventRepository::new(conn).set_feature_override(event.id, name, enabled)?;
        info!(
            "event=feature_toggle module=features status=ok event_id={} feature={} enabled={}",
            event.id, name, enabled
        );
        Ok(())
    }

    /// Sorted names of features active for `event`.
    pub fn enabled_features(
        &self,
        conn: &Connection,
        event: &Event,
    ) -> RepoResult<Vec<&'static str>> {
        let mut enabled = Vec::new();
        for name in self.features.keys() {
            if self.is_enabled(conn, event, name)? {
                enabled.push(*name);
            }
        }
        Ok(enabled)
    }
}
