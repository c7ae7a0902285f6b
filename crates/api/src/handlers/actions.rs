//! Handlers for remediation actions.
//!
//! Provides endpoints for listing, creating, reading, updating and deleting
//! actions, plus atomic comment and evidence appends.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use vitals_core::actions::{
    validate_comment_content, validate_description, validate_dimension, validate_evidence_url,
    validate_priority, validate_stage, validate_tier, validate_title, ActionComment,
};
use vitals_core::error::CoreError;
use vitals_core::types::DbId;
use vitals_db::models::action::{CreateAction, UpdateAction};
use vitals_db::repositories::{ActionRepo, SurveyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::admin_session::AdminSession;
use crate::middleware::json::ValidJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Display name used for comments when the request does not supply one.
const DEFAULT_AUTHOR_NAME: &str = "Admin";

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for `POST /actions/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub content: String,
    pub author_name: Option<String>,
}

/// Body for `POST /actions/{id}/evidence`.
#[derive(Debug, Deserialize)]
pub struct AddEvidence {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create(input: &CreateAction) -> Result<(), String> {
    validate_dimension(&input.dimension)?;
    validate_tier(&input.tier)?;
    validate_title(&input.title)?;
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    if let Some(ref priority) = input.priority {
        validate_priority(priority)?;
    }
    if let Some(ref stage) = input.workflow_stage {
        validate_stage(stage)?;
    }
    input
        .evidence_urls
        .iter()
        .try_for_each(|url| validate_evidence_url(url))
}

fn validate_update(input: &UpdateAction) -> Result<(), String> {
    if let Some(ref dimension) = input.dimension {
        validate_dimension(dimension)?;
    }
    if let Some(ref tier) = input.tier {
        validate_tier(tier)?;
    }
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(Some(ref description)) = input.description {
        validate_description(description)?;
    }
    if let Some(ref priority) = input.priority {
        validate_priority(priority)?;
    }
    if let Some(Some(ref stage)) = input.workflow_stage {
        validate_stage(stage)?;
    }
    if let Some(ref urls) = input.evidence_urls {
        urls.iter().try_for_each(|url| validate_evidence_url(url))?;
    }
    if let Some(ref comments) = input.comments {
        comments
            .iter()
            .try_for_each(|c| validate_comment_content(&c.content))?;
    }
    Ok(())
}

fn action_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Action",
        id,
    })
}

// ---------------------------------------------------------------------------
// Survey-scoped handlers
// ---------------------------------------------------------------------------

/// GET /surveys/{survey_id}/actions
///
/// List all actions for a survey, newest first.
pub async fn list_actions(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let actions = ActionRepo::list_by_survey(&state.pool, survey_id).await?;
    Ok(Json(DataResponse { data: actions }))
}

/// POST /surveys/{survey_id}/actions
///
/// Create an action against a classified dimension.
pub async fn create_action(
    session: AdminSession,
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    ValidJson(input): ValidJson<CreateAction>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input).map_err(AppError::BadRequest)?;

    SurveyRepo::find_by_id(&state.pool, survey_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id: survey_id,
        }))?;

    let action = ActionRepo::create(&state.pool, survey_id, &input).await?;

    tracing::info!(
        admin_id = %session.admin_id,
        action_id = %action.id,
        survey_id = %survey_id,
        dimension = %action.dimension,
        tier = %action.tier,
        "Action created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: action })))
}

// ---------------------------------------------------------------------------
// Action handlers
// ---------------------------------------------------------------------------

/// GET /actions/{id}
pub async fn get_action(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let action = ActionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| action_not_found(id))?;
    Ok(Json(DataResponse { data: action }))
}

/// PUT /actions/{id}
///
/// Merge the supplied fields; an explicit `null` clears a nullable field.
/// A stage or completion change is reconciled so that `is_completed` holds
/// exactly when the stage is `done`.
pub async fn update_action(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateAction>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input).map_err(AppError::BadRequest)?;

    let action = ActionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| action_not_found(id))?;

    tracing::info!(
        admin_id = %session.admin_id,
        action_id = %id,
        is_completed = action.is_completed,
        "Action updated"
    );

    Ok(Json(DataResponse { data: action }))
}

/// DELETE /actions/{id}
///
/// Returns 204 whether or not the action existed.
pub async fn delete_action(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ActionRepo::delete(&state.pool, id).await?;

    tracing::info!(
        admin_id = %session.admin_id,
        action_id = %id,
        deleted,
        "Action delete requested"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /actions/{id}/comments
///
/// Prepend a comment authored by the current admin.
pub async fn add_comment(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<CreateComment>,
) -> AppResult<impl IntoResponse> {
    validate_comment_content(&input.content).map_err(AppError::BadRequest)?;

    let author_name = input
        .author_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_AUTHOR_NAME);
    let comment = ActionComment::new(session.admin_id, author_name, input.content.trim());

    let action = ActionRepo::append_comment(&state.pool, id, &comment)
        .await?
        .ok_or_else(|| action_not_found(id))?;

    tracing::info!(
        admin_id = %session.admin_id,
        action_id = %id,
        comment_id = %comment.id,
        "Action comment added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: action })))
}

/// POST /actions/{id}/evidence
pub async fn add_evidence(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<AddEvidence>,
) -> AppResult<impl IntoResponse> {
    let url = input.url.trim();
    validate_evidence_url(url).map_err(AppError::BadRequest)?;

    let action = ActionRepo::append_evidence(&state.pool, id, url)
        .await?
        .ok_or_else(|| action_not_found(id))?;

    tracing::info!(admin_id = %session.admin_id, action_id = %id, "Action evidence added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: action })))
}
