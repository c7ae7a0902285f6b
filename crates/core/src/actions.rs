//! Remediation action constants, validation, and completion rules.
//!
//! An action is a task raised against one survey dimension in either the
//! `critical` or `at_risk` tier. Its workflow stage and completion flag are
//! kept in lockstep by [`sync_completion`].

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of an action title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of an action description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Maximum length of a comment in characters.
pub const MAX_COMMENT_LENGTH: usize = 5_000;

/// Maximum length of a single evidence URL.
pub const MAX_EVIDENCE_URL_LENGTH: usize = 2_048;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

pub const TIER_CRITICAL: &str = "critical";
pub const TIER_AT_RISK: &str = "at_risk";

/// Tiers an action may be raised against. Strong dimensions need no action.
pub const VALID_TIERS: &[&str] = &[TIER_CRITICAL, TIER_AT_RISK];

// ---------------------------------------------------------------------------
// Priorities
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

/// Priority assigned when a create request omits one.
pub const DEFAULT_PRIORITY: &str = PRIORITY_MEDIUM;

/// Sort weight of a priority. Unknown values sort last.
pub fn priority_weight(priority: &str) -> u8 {
    match priority {
        PRIORITY_HIGH => 3,
        PRIORITY_MEDIUM => 2,
        PRIORITY_LOW => 1,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Workflow stages
// ---------------------------------------------------------------------------

pub const STAGE_TODO: &str = "todo";
pub const STAGE_IN_PROGRESS: &str = "in_progress";
pub const STAGE_REVIEW: &str = "review";
pub const STAGE_DONE: &str = "done";

pub const VALID_STAGES: &[&str] = &[STAGE_TODO, STAGE_IN_PROGRESS, STAGE_REVIEW, STAGE_DONE];

/// Stage an action returns to when it is reopened via the completion flag.
pub const REOPENED_STAGE: &str = STAGE_IN_PROGRESS;

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// A comment on an action. Stored inline on the action, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionComment {
    pub id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub content: String,
    pub created_at: Timestamp,
}

impl ActionComment {
    /// Build a new comment stamped with a fresh id and the current time.
    pub fn new(author_id: DbId, author_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            author_id,
            author_name: author_name.into(),
            content: content.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Read-side view
// ---------------------------------------------------------------------------

/// The fields of a stored action that the plan and summary views need.
///
/// Implemented by the repository row type so view logic stays independent of
/// the persistence layer.
pub trait ActionRecord {
    fn dimension(&self) -> &str;
    fn tier(&self) -> &str;
    fn priority(&self) -> &str;
    fn is_completed(&self) -> bool;
    fn updated_at(&self) -> Timestamp;
}

// ---------------------------------------------------------------------------
// Completion sync
// ---------------------------------------------------------------------------

/// The stage/completion pair to persist after applying an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    pub workflow_stage: Option<String>,
    pub is_completed: bool,
}

/// Reconcile `workflow_stage` and `is_completed` for an update.
///
/// * A requested stage wins: `done` completes the action, any other stage
///   (or clearing the stage with `Some(None)`) reopens it.
/// * A requested completion flag without a stage moves the stage to `done`,
///   or off `done` to [`REOPENED_STAGE`] when reopening.
/// * With neither requested the current pair is kept as is.
pub fn sync_completion(
    current_stage: Option<&str>,
    current_completed: bool,
    requested_stage: Option<Option<&str>>,
    requested_completed: Option<bool>,
) -> CompletionState {
    if let Some(stage) = requested_stage {
        return CompletionState {
            workflow_stage: stage.map(str::to_string),
            is_completed: completion_for_stage(stage),
        };
    }

    match requested_completed {
        Some(true) => CompletionState {
            workflow_stage: Some(STAGE_DONE.to_string()),
            is_completed: true,
        },
        Some(false) => {
            let stage = match current_stage {
                Some(STAGE_DONE) => Some(REOPENED_STAGE.to_string()),
                other => other.map(str::to_string),
            };
            CompletionState {
                workflow_stage: stage,
                is_completed: false,
            }
        }
        None => CompletionState {
            workflow_stage: current_stage.map(str::to_string),
            is_completed: current_completed,
        },
    }
}

/// Completion flag implied by a stage on create.
pub fn completion_for_stage(stage: Option<&str>) -> bool {
    stage == Some(STAGE_DONE)
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

pub fn validate_tier(tier: &str) -> Result<(), String> {
    validate_one_of("tier", tier, VALID_TIERS)
}

pub fn validate_priority(priority: &str) -> Result<(), String> {
    validate_one_of("priority", priority, VALID_PRIORITIES)
}

pub fn validate_stage(stage: &str) -> Result<(), String> {
    validate_one_of("workflow stage", stage, VALID_STAGES)
}

/// Title must be non-blank and within [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Action title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Action title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_dimension(dimension: &str) -> Result<(), String> {
    if dimension.trim().is_empty() {
        Err("Dimension cannot be empty".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        Err(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        ))
    } else {
        Ok(())
    }
}

pub fn validate_comment_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Comment content cannot be empty".to_string());
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Evidence must be an absolute `http` or `https` URL.
pub fn validate_evidence_url(url: &str) -> Result<(), String> {
    if url.len() > MAX_EVIDENCE_URL_LENGTH {
        return Err(format!(
            "Evidence URL exceeds maximum length of {MAX_EVIDENCE_URL_LENGTH} characters"
        ));
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(format!("Invalid evidence URL '{url}'. Must start with http:// or https://")),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
