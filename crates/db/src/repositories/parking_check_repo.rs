//! Repository for the append-only `parking_checks` table.
//!
//! Only inserts and reads are offered; the table's trigger rejects UPDATE
//! and DELETE.

use parkcheck_core::geometry::WGS84_SRID;
use parkcheck_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::parking_check::{CreateParkingCheck, ParkingCheck};

const COLUMNS: &str = "id, registration_number, \
     ST_X(location) AS longitude, ST_Y(location) AS latitude, \
     time, time_overridden, performer_id, allowed, result, \
     found_parking_id, found_permit_id, created_at";

pub struct ParkingCheckRepo;

impl ParkingCheckRepo {
    /// Record a check. `allowed` is taken from the result document.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParkingCheck,
    ) -> Result<ParkingCheck, sqlx::Error> {
        let query = format!(
            "INSERT INTO parking_checks
                (registration_number, location, time, time_overridden,
                 performer_id, allowed, result, found_parking_id, found_permit_id)
             VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), {WGS84_SRID}), $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ParkingCheck>(&query)
            .bind(&input.registration_number)
            .bind(input.location.longitude)
            .bind(input.location.latitude)
            .bind(input.time)
            .bind(input.time_overridden)
            .bind(input.performer_id)
            .bind(input.result.allowed)
            .bind(Json(&input.result))
            .bind(input.found_parking_id)
            .bind(input.found_permit_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ParkingCheck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking_checks WHERE id = $1");
        sqlx::query_as::<_, ParkingCheck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent checks first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ParkingCheck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parking_checks ORDER BY id DESC LIMIT $1");
        sqlx::query_as::<_, ParkingCheck>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM parking_checks")
            .fetch_one(pool)
            .await
    }
}
