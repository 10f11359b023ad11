//! Repository for the `parkings` table.

use parkcheck_core::enforcement::ParkingMatch;
use parkcheck_core::geometry::WGS84_SRID;
use parkcheck_core::registration;
use parkcheck_core::types::{DbId, Timestamp, ZoneNumber};
use sqlx::PgPool;

use crate::models::parking::{CreateParking, Parking};

/// Column list shared across queries. The stored point is split into
/// `longitude`/`latitude`.
const COLUMNS: &str = "id, registration_number, normalized_reg_num, operator_id, zone, \
     ST_X(location) AS longitude, ST_Y(location) AS latitude, \
     time_start, time_end, created_at, updated_at";

/// Provides CRUD and validity lookup for paid parkings.
pub struct ParkingRepo;

impl ParkingRepo {
    /// Insert a parking, storing the normalised registration number alongside
    /// the submitted one.
    pub async fn create(pool: &PgPool, input: &CreateParking) -> Result<Parking, sqlx::Error> {
        let query = format!(
            "INSERT INTO parkings
                (registration_number, normalized_reg_num, operator_id, zone,
                 location, time_start, time_end)
             VALUES ($1, $2, $3, $4, ST_SetSRID(ST_MakePoint($5, $6), {WGS84_SRID}), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parking>(&query)
            .bind(&input.registration_number)
            .bind(registration::normalize(&input.registration_number))
            .bind(input.operator_id)
            .bind(input.zone)
            .bind(input.location.map(|l| l.longitude))
            .bind(input.location.map(|l| l.latitude))
            .bind(input.time_start)
            .bind(input.time_end)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parkings WHERE id = $1");
        sqlx::query_as::<_, Parking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a parking for `normalized_reg_num` in `zone` that is valid at
    /// `time`. Both window ends are inclusive; a missing end never expires.
    ///
    /// When several match, an open-ended parking wins, then the one ending
    /// latest.
    pub async fn find_valid(
        pool: &PgPool,
        normalized_reg_num: &str,
        zone: ZoneNumber,
        time: Timestamp,
    ) -> Result<Option<ParkingMatch>, sqlx::Error> {
        let row = sqlx::query_as::<_, (DbId, Option<Timestamp>)>(
            "SELECT id, time_end FROM parkings
             WHERE normalized_reg_num = $1
               AND zone = $2
               AND time_start <= $3
               AND (time_end IS NULL OR time_end >= $3)
             ORDER BY time_end DESC NULLS FIRST, id DESC
             LIMIT 1",
        )
        .bind(normalized_reg_num)
        .bind(zone)
        .bind(time)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(parking_id, end_time)| ParkingMatch {
            parking_id,
            end_time,
        }))
    }
}
