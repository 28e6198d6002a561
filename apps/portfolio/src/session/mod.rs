// Page sessions: the server-held UI state behind the filter controls and
// the "create CV" form. Commands mutate a session; handlers render it.

pub mod commands;
pub mod gate;
pub mod handlers;
pub mod registry;
pub mod view;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::builder::{BuilderError, FormBuilder};
use crate::filter::FilterState;
use crate::store::{MergeOutcome, MergeReport};

pub use gate::SubmissionGate;
pub use registry::SessionRegistry;
pub use view::SessionView;

pub const SAVE_SUCCESS: &str = "Your CV data has been saved successfully!";
pub const SAVE_FAILURE: &str = "There was an error saving your CV data. Please try again later.";

/// Result of the last submission, shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitStatus {
    Success {
        message: String,
        profile: String,
        outcome: MergeOutcome,
    },
    Failure {
        message: String,
    },
}

impl SubmitStatus {
    pub fn saved(report: &MergeReport) -> Self {
        SubmitStatus::Success {
            message: SAVE_SUCCESS.to_string(),
            profile: report.profile.clone(),
            outcome: report.outcome,
        }
    }

    pub fn failed() -> Self {
        SubmitStatus::Failure {
            message: SAVE_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageSession {
    pub id: Uuid,
    /// Profile whose items the filter state is previewed against.
    pub profile: Option<String>,
    pub filter: FilterState,
    pub builder: FormBuilder,
    pub submitting: bool,
    pub last_status: Option<SubmitStatus>,
    pub created_at: DateTime<Utc>,
    /// Last time a request reached this session.
    pub touched_at: DateTime<Utc>,
}

impl PageSession {
    pub fn new(profile: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile,
            filter: FilterState::default(),
            builder: FormBuilder::default(),
            submitting: false,
            last_status: None,
            created_at: now,
            touched_at: now,
        }
    }

    /// Idle for longer than `ttl` at `now`. A session with a submission in
    /// flight never expires.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        !self.submitting
            && (now - self.touched_at)
                .to_std()
                .map(|idle| idle > ttl)
                .unwrap_or(false)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("A submission is already in progress for session {0}")]
    SubmitInFlight(Uuid),

    #[error("Required fields are missing: {}", .0.join(", "))]
    NotReady(Vec<String>),

    #[error(transparent)]
    Builder(#[from] BuilderError),
}
