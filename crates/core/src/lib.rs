//! Safety Vitals domain logic.
//!
//! Pure, storage-agnostic building blocks shared by the repository layer and
//! the HTTP API:
//!
//! - [`scoring`] -- dimension scoring and tier classification.
//! - [`actions`] -- remediation action rules (validation, completion sync).
//! - [`action_plan`] -- active/completed partition of a survey's actions.
//! - [`summary`] -- response summary aggregation per tier and dimension.
//! - [`admin_session`] -- signing and verification of admin session tokens.

pub mod action_plan;
pub mod actions;
pub mod admin_session;
pub mod error;
pub mod scoring;
pub mod summary;
pub mod types;
