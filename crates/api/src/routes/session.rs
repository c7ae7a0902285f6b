use axum::routing::post;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// ```text
/// POST   /set-admin-cookie  -> set_admin_cookie
/// POST   /logout            -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/set-admin-cookie", post(session::set_admin_cookie))
        .route("/logout", post(session::logout))
}
