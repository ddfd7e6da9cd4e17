//! Error type shared by the client, the resolver and the skill dispatcher.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillError {
    #[error("No auth token in session and no override configured")]
    MissingAuthToken,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("T Cube responded with {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Time sheet grid for {weeks_back} weeks back was empty")]
    EmptyGrid { weeks_back: u32 },

    #[error("Target date {target} is after today ({today})")]
    WeekOutOfRange { today: NaiveDate, target: NaiveDate },

    #[error("Request was sent for application {0}")]
    InvalidApplicationId(String),

    #[error("Invalid value {value:?} for slot {slot}")]
    InvalidSlot { slot: String, value: Option<String> },
}

impl SkillError {
    /// Failures that happened while talking to T Cube. These all end up as the same apology.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            SkillError::Transport(_)
                | SkillError::Http { .. }
                | SkillError::MalformedResponse(_)
                | SkillError::EmptyGrid { .. }
        )
    }
}

pub type SkillResult<T> = Result<T, SkillError>;
