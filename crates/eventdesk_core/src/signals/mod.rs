//! Host extension points and their receivers.
//!
//! # Responsibility
//! - Hold one typed receiver list per host signal.
//! - Dispatch signals in registration order with explicit request context.
//!
//! # Invariants
//! - The registry is filled during bootstrap and only read afterwards.
//! - A receiver id is connected at most once per signal.

mod context;
mod registry;

pub use context::{HookError, HookResult, RequestContext};
pub use registry::{
    EventMenuHandler, FeatureDefinitionsHandler, ManagementMenuHandler, SignalError,
    SignalRegistry, UsersMergedHandler,
};

/// Fired after one user account has been merged into another.
pub const USERS_MERGED: &str = "users.merged";
/// Collects entries for an event's management side menu.
pub const EVENT_MANAGEMENT_SIDEMENU: &str = "event_management.sidemenu";
/// Collects entries for an event's public side menu.
pub const EVENT_SIDEMENU: &str = "event.sidemenu";
/// Collects selectable per-event feature definitions.
pub const EVENT_FEATURE_DEFINITIONS: &str = "event.get_feature_definitions";
