//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Response envelope for bulk imports: how many rows were written plus the
/// created entries.
#[derive(Debug, Serialize)]
pub struct BulkImportResponse<T: Serialize> {
    pub count: usize,
    pub data: Vec<T>,
}
