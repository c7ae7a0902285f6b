//! Admin session extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitals_core::admin_session::{verify_admin_token, ADMIN_ID_COOKIE, ADMIN_TOKEN_COOKIE};
use vitals_core::error::CoreError;
use vitals_core::types::DbId;
use vitals_db::repositories::AdminRepo;

use crate::cookies::get_cookie;
use crate::error::AppError;
use crate::state::AppState;

/// An admin identified by the `admin_id` cookie, verified by the signed
/// `admin_token` cookie and still active in the `admins` table.
///
/// Every failure rejects with 401 and the body `{"error": "Unauthorized"}`:
/// a missing `admin_id` or token, a token that does not verify or has
/// outlived `ADMIN_SESSION_MAX_AGE_SECS`, an id that is not a UUID, or an
/// admin that no longer exists or was deactivated.
///
/// ```ignore
/// async fn admin_only(session: AdminSession) -> AppResult<Json<()>> {
///     tracing::info!(admin_id = %session.admin_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub admin_id: DbId,
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized("Unauthorized".into()))
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin_id = get_cookie(&parts.headers, ADMIN_ID_COOKIE).ok_or_else(unauthorized)?;
        let token = get_cookie(&parts.headers, ADMIN_TOKEN_COOKIE).ok_or_else(unauthorized)?;

        let session = &state.config.session;
        let now = chrono::Utc::now().timestamp();
        if !verify_admin_token(&session.secret, admin_id, token, now, session.max_age_secs) {
            tracing::warn!(admin_id = %admin_id, "Admin token failed verification");
            return Err(unauthorized());
        }

        let admin_id: DbId = admin_id.parse().map_err(|_| unauthorized())?;
        if AdminRepo::find_active(&state.service_pool, admin_id)
            .await?
            .is_none()
        {
            tracing::warn!(admin_id = %admin_id, "Session for unknown or inactive admin");
            return Err(unauthorized());
        }

        Ok(AdminSession { admin_id })
    }
}
