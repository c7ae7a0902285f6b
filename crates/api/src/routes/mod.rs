pub mod actions;
pub mod admin;
pub mod health;
pub mod integrations;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/all-organizations                         list every organization (GET)
/// /admin/all-surveys                               list every survey (GET)
/// /admin/all-respondents                           respondents, optional filters (POST)
/// /admin/all-responses                             responses by question ids (POST)
/// /admin/all-users                                 users by ids (POST)
///
/// /surveys/{survey_id}/actions                     list, create
/// /surveys/{survey_id}/action-plan                 active/completed view (GET)
/// /surveys/{survey_id}/summary                     response summary (GET)
///
/// /actions/{id}                                    get, update, delete
/// /actions/{id}/comments                           prepend comment (POST)
/// /actions/{id}/evidence                           append evidence URL (POST)
///
/// /ai/chat                                         chat completion (POST)
/// /email/send                                      send email (POST)
///
/// /set-admin-cookie                                issue admin session (POST)
/// /logout                                          clear session cookies (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/surveys", actions::surveys_router())
        .nest("/actions", actions::actions_router())
        .merge(integrations::router())
        .merge(session::router())
}
