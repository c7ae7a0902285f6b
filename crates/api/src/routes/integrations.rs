//! Route definitions for the AI and email integrations.

use axum::routing::post;
use axum::Router;

use crate::handlers::{ai, email};
use crate::state::AppState;

/// ```text
/// POST   /ai/chat     -> chat
/// POST   /email/send  -> send_email  (admin session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ai/chat", post(ai::chat))
        .route("/email/send", post(email::send_email))
}
