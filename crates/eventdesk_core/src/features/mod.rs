//! Per-event optional features.
//!
//! # Responsibility
//! - Define the contract feature modules implement to appear in the catalog.
//! - Decide whether a feature is active for an event.
//!
//! # Invariants
//! - Feature names are unique lowercase identifiers.
//! - An explicit per-event override always wins over the feature default.
//! - Features missing from the catalog are never enabled.

mod catalog;

pub use catalog::{FeatureCatalog, FeatureCatalogError};

use crate::i18n::Translatable;
use crate::model::event::Event;
use std::fmt::Debug;

/// Toggleable capability an organizer can switch on or off per event.
pub trait EventFeature: Debug + Send + Sync {
    /// Stable identifier stored in per-event overrides.
    fn name(&self) -> &'static str;

    fn friendly_name(&self) -> Translatable;

    fn description(&self) -> Translatable;

    /// Whether the feature is on for `event` when no override exists.
    fn is_default_for_event(&self, _event: &Event) -> bool {
        false
    }
}
