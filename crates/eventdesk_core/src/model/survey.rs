//! Survey and survey submission records.
//!
//! Survey authoring and answer payloads live outside this crate; only the
//! fields needed for listing visibility and ownership are modelled here.

use crate::model::event::EventId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type SurveyId = Uuid;
pub type SubmissionId = Uuid;

/// Questionnaire attached to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub uuid: SurveyId,
    pub event_id: EventId,
    pub title: String,
    /// Controls whether the survey shows up in the public survey listing.
    pub is_visible: bool,
}

impl Survey {
    /// Creates a hidden survey with a generated id.
    pub fn new(event_id: EventId, title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            event_id,
            title: title.into(),
            is_visible: false,
        }
    }

    pub fn visible(mut self) -> Self {
        self.is_visible = true;
        self
    }

    pub fn validate(&self) -> Result<(), SurveyValidationError> {
        if self.title.trim().is_empty() {
            return Err(SurveyValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// One respondent's recorded answers to a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub uuid: SubmissionId,
    pub survey_id: SurveyId,
    /// `None` for anonymous submissions.
    pub user_id: Option<UserId>,
    /// Unix epoch milliseconds.
    pub submitted_at_ms: i64,
}

impl SurveySubmission {
    pub fn new(survey_id: SurveyId, user_id: Option<UserId>, submitted_at_ms: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            survey_id,
            user_id,
            submitted_at_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyValidationError {
    EmptyTitle,
}

impl Display for SurveyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "survey title must not be empty"),
        }
    }
}

impl Error for SurveyValidationError {}
