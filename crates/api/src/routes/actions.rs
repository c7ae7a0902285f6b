//! Route definitions for remediation actions and survey views.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{actions, surveys};
use crate::state::AppState;

/// Survey-scoped routes, mounted at `/surveys`.
///
/// ```text
/// GET    /{survey_id}/actions      -> list_actions
/// POST   /{survey_id}/actions      -> create_action
/// GET    /{survey_id}/action-plan  -> action_plan
/// GET    /{survey_id}/summary      -> summary (?org_id, threshold)
/// ```
pub fn surveys_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{survey_id}/actions",
            get(actions::list_actions).post(actions::create_action),
        )
        .route("/{survey_id}/action-plan", get(surveys::action_plan))
        .route("/{survey_id}/summary", get(surveys::summary))
}

/// Action routes, mounted at `/actions`.
///
/// ```text
/// GET    /{id}           -> get_action
/// PUT    /{id}           -> update_action
/// DELETE /{id}           -> delete_action
/// POST   /{id}/comments  -> add_comment
/// POST   /{id}/evidence  -> add_evidence
/// ```
pub fn actions_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(actions::get_action)
                .put(actions::update_action)
                .delete(actions::delete_action),
        )
        .route("/{id}/comments", post(actions::add_comment))
        .route("/{id}/evidence", post(actions::add_evidence))
}
