//! Paid parking model and DTOs.

use parkcheck_core::geometry::Location;
use parkcheck_core::types::{DbId, Timestamp, ZoneNumber};
use serde::Serialize;
use sqlx::FromRow;

/// A parking row. The stored point is exposed as `longitude`/`latitude`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Parking {
    pub id: DbId,
    pub registration_number: String,
    #[serde(skip)]
    pub normalized_reg_num: String,
    pub operator_id: DbId,
    pub zone: ZoneNumber,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub time_start: Timestamp,
    /// `None` for an open-ended parking.
    pub time_end: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a parking. The repository derives the normalised
/// registration number.
#[derive(Debug, Clone)]
pub struct CreateParking {
    pub registration_number: String,
    pub operator_id: DbId,
    pub zone: ZoneNumber,
    pub location: Option<Location>,
    pub time_start: Timestamp,
    pub time_end: Option<Timestamp>,
}
