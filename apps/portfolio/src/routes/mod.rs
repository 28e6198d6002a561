pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV page
        .route("/", get(page::handle_index).post(page::handle_profile))
        .route("/record", post(page::handle_record))
        // Page sessions (filter + form builder)
        .route("/builder/sessions", post(handlers::handle_create_session))
        .route(
            "/builder/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/builder/sessions/:id/commands",
            post(handlers::handle_command),
        )
        .route("/builder/sessions/:id/form", get(handlers::handle_get_form))
        .route("/builder/sessions/:id/submit", post(handlers::handle_submit))
        .with_state(state)
}
