//! Route definitions for the cross-tenant admin override endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin override routes, mounted at `/admin`.
///
/// ```text
/// GET    /all-organizations  -> all_organizations
/// GET    /all-surveys        -> all_surveys
/// POST   /all-respondents    -> all_respondents
/// POST   /all-responses      -> all_responses
/// POST   /all-users          -> all_users
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all-organizations", get(admin::all_organizations))
        .route("/all-surveys", get(admin::all_surveys))
        .route("/all-respondents", post(admin::all_respondents))
        .route("/all-responses", post(admin::all_responses))
        .route("/all-users", post(admin::all_users))
}
