//! Shared response envelope types for API handlers.
//!
//! Every API response is discriminated: `{ "success": true, "data": ... }`
//! on success, `{ "success": false, "error": ..., "code": ... }` on failure
//! (the latter is produced by `AppError`). Use [`DataResponse`] instead of
//! ad-hoc `serde_json::json!` so the success shape stays consistent.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
