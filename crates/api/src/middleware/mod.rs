//! Request extractors.
//!
//! - [`admin_session::AdminSession`] -- Requires a verified admin session cookie.
//! - [`json::ValidJson`] -- JSON body with 400 rejections.

pub mod admin_session;
pub mod json;
