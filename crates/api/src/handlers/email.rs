//! Transactional email relay.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use vitals_mail::OutgoingEmail;

use crate::error::{AppError, AppResult};
use crate::middleware::admin_session::AdminSession;
use crate::middleware::json::ValidJson;
use crate::state::AppState;

/// Body for `POST /email/send`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to: Option<String>,
    pub subject: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
    pub from_name: Option<String>,
    pub from_email: Option<String>,
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

impl SendEmailRequest {
    /// Check required fields and convert into a message.
    pub fn into_email(self) -> AppResult<OutgoingEmail> {
        let to = required(self.to, "to")?;
        let subject = required(self.subject, "subject")?;
        let html = self.html.filter(|v| !v.is_empty());
        let text = self.text.filter(|v| !v.is_empty());
        if html.is_none() && text.is_none() {
            return Err(AppError::BadRequest("html or text is required".into()));
        }
        Ok(OutgoingEmail {
            to,
            subject,
            html,
            text,
            from_name: self.from_name.filter(|v| !v.is_empty()),
            from_email: self.from_email.filter(|v| !v.is_empty()),
        })
    }
}

/// POST /email/send
///
/// Admin only, so the relay cannot be used to send mail on the service
/// account's behalf by anonymous callers.
pub async fn send_email(
    session: AdminSession,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SendEmailRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.into_email()?;
    let mailer = state.mailer.as_ref().ok_or(AppError::NotConfigured("Email"))?;

    mailer.send(&email).await?;
    tracing::info!(admin_id = %session.admin_id, to = %email.to, "Email relayed");

    Ok(Json(json!({ "success": true })))
}
