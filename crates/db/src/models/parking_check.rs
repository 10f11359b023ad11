//! Parking check audit model.
//!
//! Checks are an append-only trail: there is no update DTO and no
//! `updated_at` column. The database rejects UPDATE and DELETE outright.

use parkcheck_core::enforcement::ParkingCheckResult;
use parkcheck_core::geometry::Location;
use parkcheck_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// One recorded enforcement check.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParkingCheck {
    pub id: DbId,
    pub registration_number: String,
    pub longitude: f64,
    pub latitude: f64,
    pub time: Timestamp,
    /// Whether the caller supplied `time` instead of using the current time.
    pub time_overridden: bool,
    pub performer_id: Option<DbId>,
    pub allowed: bool,
    /// The response document returned to the caller.
    pub result: Json<ParkingCheckResult>,
    pub found_parking_id: Option<DbId>,
    pub found_permit_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for recording a check.
#[derive(Debug, Clone)]
pub struct CreateParkingCheck {
    pub registration_number: String,
    pub location: Location,
    pub time: Timestamp,
    pub time_overridden: bool,
    pub performer_id: Option<DbId>,
    pub result: ParkingCheckResult,
    pub found_parking_id: Option<DbId>,
    pub found_permit_id: Option<DbId>,
}
