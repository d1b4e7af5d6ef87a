//! Domain records shared by the host and feature modules.
//!
//! # Responsibility
//! - Define users, events, surveys and survey submissions.
//! - Keep permission checks that only depend on record fields next to the data.

pub mod event;
pub mod survey;
pub mod user;
