//! Cross-tenant admin override handlers.
//!
//! Every handler requires an [`AdminSession`] and reads through the elevated
//! service pool, bypassing per-organization scoping. Rows are returned bare
//! (no `data` envelope).

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vitals_core::types::DbId;
use vitals_db::models::response::SurveyResponse;
use vitals_db::models::user::User;
use vitals_db::repositories::{
    OrganizationRepo, RespondentRepo, ResponseRepo, SurveyRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::admin_session::AdminSession;
use crate::middleware::json::ValidJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Optional filters for `POST /admin/all-respondents`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondentFilter {
    pub org_id: Option<DbId>,
    pub survey_id: Option<DbId>,
}

/// Body for `POST /admin/all-responses`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllResponsesRequest {
    pub question_ids: Vec<DbId>,
    pub org_id: Option<DbId>,
}

/// Body for `POST /admin/all-users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllUsersRequest {
    pub user_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin/all-organizations
pub async fn all_organizations(
    session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let orgs = OrganizationRepo::list_all(&state.service_pool).await?;
    tracing::debug!(admin_id = %session.admin_id, count = orgs.len(), "Listed all organizations");
    Ok(Json(orgs))
}

/// GET /admin/all-surveys
pub async fn all_surveys(
    session: AdminSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let surveys = SurveyRepo::list_all(&state.service_pool).await?;
    tracing::debug!(admin_id = %session.admin_id, count = surveys.len(), "Listed all surveys");
    Ok(Json(surveys))
}

/// POST /admin/all-respondents
///
/// The body is optional; an empty body lists every respondent.
pub async fn all_respondents(
    session: AdminSession,
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let filter: RespondentFilter = if body.iter().all(u8::is_ascii_whitespace) {
        RespondentFilter::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let respondents =
        RespondentRepo::list_all(&state.service_pool, filter.org_id, filter.survey_id).await?;
    tracing::debug!(
        admin_id = %session.admin_id,
        count = respondents.len(),
        "Listed respondents across organizations"
    );
    Ok(Json(respondents))
}

/// POST /admin/all-responses
///
/// An empty `questionIds` list returns `[]` without querying.
pub async fn all_responses(
    session: AdminSession,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<AllResponsesRequest>,
) -> AppResult<impl IntoResponse> {
    if input.question_ids.is_empty() {
        return Ok(Json(Vec::<SurveyResponse>::new()));
    }

    let responses =
        ResponseRepo::list_by_questions(&state.service_pool, &input.question_ids, input.org_id)
            .await?;
    tracing::debug!(
        admin_id = %session.admin_id,
        questions = input.question_ids.len(),
        count = responses.len(),
        "Listed responses across organizations"
    );
    Ok(Json(responses))
}

/// POST /admin/all-users
///
/// An empty `userIds` list returns `[]` without querying.
pub async fn all_users(
    session: AdminSession,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<AllUsersRequest>,
) -> AppResult<impl IntoResponse> {
    if input.user_ids.is_empty() {
        return Ok(Json(Vec::<User>::new()));
    }

    let users = UserRepo::list_by_ids(&state.service_pool, &input.user_ids).await?;
    tracing::debug!(admin_id = %session.admin_id, count = users.len(), "Listed users by id");
    Ok(Json(users))
}
