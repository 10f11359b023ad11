//! Permit area model.

use geo::MultiPolygon;
use parkcheck_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A permit area row (geometry omitted).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PermitArea {
    pub id: DbId,
    pub name: String,
    /// Short code permits refer to in their `areas` list (e.g. `"A"`).
    pub identifier: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a permit area.
#[derive(Debug, Clone)]
pub struct CreatePermitArea {
    pub name: String,
    pub identifier: String,
    /// Area outline in WGS84; projected to EPSG:3879 on insert.
    pub geom: MultiPolygon<f64>,
}
