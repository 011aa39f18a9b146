//! Shared response envelope for resource endpoints.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Token endpoints return their fields at the top level instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
