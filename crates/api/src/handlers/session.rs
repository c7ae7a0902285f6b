//! Admin session cookie issuance and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use vitals_core::admin_session::{
    sign_admin_session, ADMIN_ID_COOKIE, ADMIN_TOKEN_COOKIE, PROVIDER_COOKIE_PREFIX,
};
use vitals_core::error::CoreError;
use vitals_core::types::DbId;
use vitals_db::repositories::AdminRepo;

use crate::cookies::{cookie_names_with_prefix, expire_cookie, set_cookie, CookieOptions};
use crate::error::{AppError, AppResult};
use crate::middleware::json::ValidJson;
use crate::state::AppState;

/// Body for `POST /set-admin-cookie`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdminCookieRequest {
    pub admin_id: Option<String>,
}

/// POST /set-admin-cookie
///
/// Issues `admin_id` and the signed `admin_token` for an active admin.
pub async fn set_admin_cookie(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SetAdminCookieRequest>,
) -> AppResult<impl IntoResponse> {
    let raw_id = input
        .admin_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("adminId is required".into()))?;
    let admin_id: DbId = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest("adminId must be a UUID".into()))?;

    let admin = AdminRepo::find_active(&state.service_pool, admin_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unauthorized".into())))?;

    let session = &state.config.session;
    let id = admin.id.to_string();
    let token = sign_admin_session(&session.secret, &id, chrono::Utc::now().timestamp());
    let cookies = [
        set_cookie(
            ADMIN_ID_COOKIE,
            &id,
            CookieOptions {
                http_only: false,
                secure: session.cookie_secure,
                max_age_secs: session.max_age_secs,
            },
        ),
        set_cookie(
            ADMIN_TOKEN_COOKIE,
            &token,
            CookieOptions {
                http_only: true,
                secure: session.cookie_secure,
                max_age_secs: session.max_age_secs,
            },
        ),
    ];

    tracing::info!(admin_id = %admin.id, "Admin session issued");

    Ok((
        AppendHeaders(cookies.map(|c| (SET_COOKIE, c))),
        Json(json!({ "success": true })),
    ))
}

/// POST /logout
///
/// Expires both admin cookies and every provider session cookie the request
/// carried. Always succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let secure = state.config.session.cookie_secure;

    let mut names = vec![ADMIN_ID_COOKIE.to_string(), ADMIN_TOKEN_COOKIE.to_string()];
    names.extend(cookie_names_with_prefix(&headers, PROVIDER_COOKIE_PREFIX));

    let cookies: Vec<_> = names
        .iter()
        .map(|name| (SET_COOKIE, expire_cookie(name, secure)))
        .collect();

    tracing::info!(cleared = cookies.len(), "Logged out");

    (AppendHeaders(cookies), Json(json!({ "success": true })))
}
