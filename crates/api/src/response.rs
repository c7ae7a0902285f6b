//! Shared response envelope types for the dashboard handlers.
//!
//! Dashboard responses use a `{ "data": ... }` envelope. The admin override
//! routes return bare rows instead, which the existing client expects.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: actions }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
