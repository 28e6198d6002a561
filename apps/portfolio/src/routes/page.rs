use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::filter::FilterState;
use crate::models::cv::CvDocument;
use crate::models::draft::CvDraft;
use crate::render::{render_page, PageContext};
use crate::session::SAVE_FAILURE;
use crate::state::AppState;
use crate::store::load_for_page;

/// Query parameters of `GET /`, parsed from pairs so `category` may repeat.
#[derive(Debug, Default, PartialEq)]
pub struct PageQuery {
    pub profile: Option<String>,
    pub project_type: Option<String>,
    pub categories: Vec<String>,
}

impl PageQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = PageQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "profile" => query.profile = Some(value),
                "type" => query.project_type = Some(value),
                "category" => query.categories.push(value),
                "categories" => query
                    .categories
                    .extend(value.split(',').map(str::to_string)),
                _ => {}
            }
        }
        query
    }

    pub fn filter_state(&self) -> FilterState {
        FilterState::default()
            .with_project_type(self.project_type.as_deref().unwrap_or_default())
            .with_categories(&self.categories)
    }
}

#[derive(Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub profile_user: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecordResponse {
    pub status: String,
    pub message: String,
}

/// GET /
/// Renders the CV page. An unknown profile renders the empty document.
pub async fn handle_index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let query = PageQuery::from_pairs(pairs);
    let profile = query
        .profile
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(&state.config.default_profile)
        .to_string();

    let doc = match load_for_page(state.store.as_ref(), &profile).await? {
        Some(doc) => doc,
        None => {
            warn!("Profile '{profile}' not found, rendering empty page");
            CvDocument {
                name_list: state.store.list_profiles().await?,
                ..Default::default()
            }
        }
    };

    let state_filter = query.filter_state();
    let ctx = PageContext {
        profiles: &doc.name_list,
        current_profile: &profile,
        state: &state_filter,
        filtered_skill_group: &state.config.filtered_skill_group,
    };
    Ok(Html(render_page(&doc, &ctx)?))
}

/// POST /
/// Returns the CV document for `profile_user`.
pub async fn handle_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<CvDocument>, AppError> {
    let name = req
        .profile_user
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("Missing profile URI in request".to_string()))?;

    load_for_page(state.store.as_ref(), &name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile '{name}' not found")))
}

/// POST /record
/// Merges a CV draft into the profile store.
pub async fn handle_record(
    State(state): State<AppState>,
    Json(draft): Json<CvDraft>,
) -> Result<Json<RecordResponse>, AppError> {
    match state.store_draft(&draft).await {
        Ok(report) => {
            info!("Recorded draft for '{}'", report.profile);
            Ok(Json(RecordResponse {
                status: "success".to_string(),
                message: format!(
                    "Profile '{}' saved ({} entries). Please refresh the page to see updates.",
                    report.profile, report.entries_added
                ),
            }))
        }
        Err(AppError::Internal(_)) => Ok(Json(RecordResponse {
            status: "failure".to_string(),
            message: SAVE_FAILURE.to_string(),
        })),
        Err(e) => Err(e),
    }
}
