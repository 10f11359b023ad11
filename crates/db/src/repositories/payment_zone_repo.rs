//! Repository for the `payment_zones` table.

use parkcheck_core::geometry::{multi_polygon_wkt, Location, GK25FIN_SRID, WGS84_SRID};
use parkcheck_core::types::ZoneNumber;
use sqlx::PgPool;

use crate::models::payment_zone::{CreatePaymentZone, PaymentZone};

const COLUMNS: &str = "id, number, name, created_at, updated_at";

/// Provides creation and point-in-polygon lookup for payment zones.
pub struct PaymentZoneRepo;

impl PaymentZoneRepo {
    /// Insert a zone, projecting its WGS84 outline to EPSG:3879.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePaymentZone,
    ) -> Result<PaymentZone, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_zones (number, name, geom)
             VALUES ($1, $2, ST_Multi(ST_Transform(ST_GeomFromText($3, {WGS84_SRID}), {GK25FIN_SRID})))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentZone>(&query)
            .bind(input.number)
            .bind(&input.name)
            .bind(multi_polygon_wkt(&input.geom))
            .fetch_one(pool)
            .await
    }

    /// Number of the zone containing `location`, lowest number first when
    /// zones overlap.
    pub async fn find_number_containing(
        pool: &PgPool,
        location: &Location,
    ) -> Result<Option<ZoneNumber>, sqlx::Error> {
        let query = format!(
            "SELECT number FROM payment_zones
             WHERE ST_Contains(
                 geom,
                 ST_Transform(ST_SetSRID(ST_MakePoint($1, $2), {WGS84_SRID}), {GK25FIN_SRID})
             )
             ORDER BY number
             LIMIT 1"
        );
        sqlx::query_scalar::<_, ZoneNumber>(&query)
            .bind(location.longitude)
            .bind(location.latitude)
            .fetch_optional(pool)
            .await
    }

    /// Whether a zone with the given number exists.
    pub async fn exists_number(pool: &PgPool, number: ZoneNumber) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM payment_zones WHERE number = $1)",
        )
        .bind(number)
        .fetch_one(pool)
        .await
    }
}
