//! Payment zone model.

use geo::MultiPolygon;
use parkcheck_core::types::{DbId, Timestamp, ZoneNumber};
use serde::Serialize;
use sqlx::FromRow;

/// A payment zone row (geometry omitted).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentZone {
    pub id: DbId,
    pub number: ZoneNumber,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a payment zone.
#[derive(Debug, Clone)]
pub struct CreatePaymentZone {
    pub number: ZoneNumber,
    pub name: String,
    /// Zone outline in WGS84; projected to EPSG:3879 on insert.
    pub geom: MultiPolygon<f64>,
}
