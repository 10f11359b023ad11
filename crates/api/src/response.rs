//! Shared response envelope for resource-returning handlers.
//!
//! The parking check returns its result document unwrapped; everything else
//! uses [`DataResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
