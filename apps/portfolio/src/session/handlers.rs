use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::errors::AppError;
use crate::filter::{compute_visibility, VisibilityReport};
use crate::render::node::Node;
use crate::render::render_form;
use crate::session::commands::{Command, Effect};
use crate::session::{PageSession, SessionView, SubmitStatus};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Serialize)]
pub struct CommandResponse {
    #[serde(flatten)]
    pub effect: Effect,
    pub view: SessionView,
}

/// Visibility of the bound profile's items under the session filter.
/// Missing or unreadable profiles yield no report.
async fn preview(state: &AppState, session: &PageSession) -> Option<VisibilityReport> {
    let name = session.profile.as_deref()?;
    match state.store.load_profile(name).await {
        Ok(Some(doc)) => Some(compute_visibility(
            &doc,
            &session.filter,
            &state.config.filtered_skill_group,
        )),
        Ok(None) => None,
        Err(e) => {
            error!("Failed to load profile '{name}' for preview: {e:#}");
            None
        }
    }
}

async fn view(state: &AppState, session: &PageSession) -> SessionView {
    SessionView::build(session, preview(state, session).await)
}

/// POST /builder/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let Json(req) = body.unwrap_or_default();
    let profile = req
        .profile
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    if let Some(name) = &profile {
        if state.store.load_profile(name).await?.is_none() {
            return Err(AppError::NotFound(format!("Profile '{name}' not found")));
        }
    }

    let session = state.sessions.create(profile).await;
    Ok((StatusCode::CREATED, Json(view(&state, &session).await)))
}

/// GET /builder/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.snapshot(id).await?;
    Ok(Json(view(&state, &session).await))
}

/// POST /builder/sessions/:id/commands
pub async fn handle_command(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(command): Json<Command>,
) -> Result<Json<CommandResponse>, AppError> {
    let (effect, session) = state.sessions.apply(id, command).await?;
    debug!("Session {id}: {effect:?}");
    Ok(Json(CommandResponse {
        effect,
        view: view(&state, &session).await,
    }))
}

/// GET /builder/sessions/:id/form
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state.sessions.snapshot(id).await?;
    Ok(Html(Node::from(render_form(&session.builder)).to_html()))
}

/// POST /builder/sessions/:id/submit
///
/// The store call runs on its own task so the session is always released,
/// even if the client goes away mid-request.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let draft = state.sessions.begin_submit(id).await?;

    let task_state = state.clone();
    let outcome = tokio::spawn(async move {
        let result = task_state.store_draft(&draft).await;
        let status = match &result {
            Ok(report) => Some(SubmitStatus::saved(report)),
            Err(AppError::Conflict(_)) => None,
            Err(_) => Some(SubmitStatus::failed()),
        };
        let session = task_state.sessions.finish_submit(id, status).await;
        (result, session)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Submit task failed: {e}")))?;

    let (result, session) = outcome;
    let session = session?;
    if let Err(AppError::Conflict(msg)) = result {
        return Err(AppError::Conflict(msg));
    }
    Ok(Json(view(&state, &session).await))
}

/// DELETE /builder/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}
