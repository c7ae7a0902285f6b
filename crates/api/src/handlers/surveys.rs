//! Survey-level views: the action plan and the response summary.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use vitals_core::action_plan::build_action_plan;
use vitals_core::error::CoreError;
use vitals_core::scoring::{
    average_score, classify_dimensions, score_dimensions, validate_threshold,
};
use vitals_core::summary::{build_summary, SummaryInput};
use vitals_core::types::DbId;
use vitals_db::repositories::{ActionRepo, RespondentRepo, ResponseRepo, SurveyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::admin_session::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the summary.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// Restrict responses and respondents to one organization.
    pub org_id: Option<DbId>,
    /// Override the survey's stored minimum threshold (0-5).
    pub threshold: Option<f64>,
}

/// GET /surveys/{survey_id}/action-plan
///
/// Active actions by priority, completed actions by most recent update.
pub async fn action_plan(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let actions = ActionRepo::list_by_survey(&state.pool, survey_id).await?;
    let plan = build_action_plan(&actions);
    Ok(Json(DataResponse { data: plan }))
}

/// GET /surveys/{survey_id}/summary?org_id=&threshold=
pub async fn summary(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Query(params): Query<SummaryParams>,
) -> AppResult<impl IntoResponse> {
    let survey = SurveyRepo::find_by_id(&state.pool, survey_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;

    let threshold = params.threshold.unwrap_or(survey.minimum_threshold);
    validate_threshold(threshold).map_err(AppError::BadRequest)?;

    let answers = ResponseRepo::dimension_answers(&state.pool, survey_id, params.org_id).await?;
    let respondent_count =
        RespondentRepo::count_by_survey(&state.pool, survey_id, params.org_id).await?;
    let actions = ActionRepo::list_by_survey(&state.pool, survey_id).await?;

    let scores = score_dimensions(answers.iter().map(|a| (a.dimension.as_str(), a.score)));
    let tiers = classify_dimensions(&scores, threshold);

    let summary = build_summary(SummaryInput {
        respondent_count,
        average_score: average_score(answers.iter().map(|a| a.score)),
        minimum_threshold: threshold,
        scores: &scores,
        tiers: &tiers,
        actions: &actions,
    });

    Ok(Json(DataResponse { data: summary }))
}
