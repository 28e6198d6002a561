use std::sync::Arc;

use tracing::{error, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::draft::CvDraft;
use crate::session::{SessionRegistry, SubmissionGate};
use crate::store::{CvStore, MergeReport};

/// State shared by every route handler.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable profile store. Default: JsonFileStore. PgStore when DATABASE_URL is set.
    pub store: Arc<dyn CvStore>,
    pub sessions: SessionRegistry,
    pub gate: SubmissionGate,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn CvStore>, config: Config) -> Self {
        Self {
            store,
            sessions: SessionRegistry::new(config.session_ttl),
            gate: SubmissionGate::default(),
            config,
        }
    }

    /// Stores a draft under its profile name. A concurrent submission for
    /// the same name is a conflict; storage failures are logged.
    pub async fn store_draft(&self, draft: &CvDraft) -> Result<MergeReport, AppError> {
        let name = draft.profile_name();
        if name.is_empty() {
            return Err(AppError::Validation(
                "personal.fullName is required".to_string(),
            ));
        }

        let Some(_guard) = self.gate.try_acquire(name) else {
            warn!("Rejected concurrent submission for '{name}'");
            return Err(AppError::Conflict(format!(
                "A submission for '{name}' is already in progress"
            )));
        };

        self.store.merge_draft(draft).await.map_err(|e| {
            error!("Failed to store draft for '{name}': {e:#}");
            AppError::Internal(e)
        })
    }
}
