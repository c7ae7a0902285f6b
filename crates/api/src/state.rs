use std::sync::Arc;

use vitals_ai::ChatClient;
use vitals_mail::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Pool on the public credential tier. Dashboard reads and writes.
    pub pool: vitals_db::DbPool,
    /// Pool on the elevated service tier. Only the admin override routes use it.
    pub service_pool: vitals_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Inference client; `None` when the AI credentials are not configured.
    pub chat: Option<Arc<ChatClient>>,
    /// SMTP mailer; `None` when `SMTP_HOST` is not set.
    pub mailer: Option<Arc<Mailer>>,
}
