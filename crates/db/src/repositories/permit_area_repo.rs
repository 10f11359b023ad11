//! Repository for the `permit_areas` table.

use parkcheck_core::geometry::{multi_polygon_wkt, Location, GK25FIN_SRID, WGS84_SRID};
use sqlx::PgPool;

use crate::models::permit_area::{CreatePermitArea, PermitArea};

const COLUMNS: &str = "id, name, identifier, created_at, updated_at";

/// Provides creation and point-in-polygon lookup for permit areas.
pub struct PermitAreaRepo;

impl PermitAreaRepo {
    /// Insert an area, projecting its WGS84 outline to EPSG:3879.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePermitArea,
    ) -> Result<PermitArea, sqlx::Error> {
        let query = format!(
            "INSERT INTO permit_areas (name, identifier, geom)
             VALUES ($1, $2, ST_Multi(ST_Transform(ST_GeomFromText($3, {WGS84_SRID}), {GK25FIN_SRID})))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PermitArea>(&query)
            .bind(&input.name)
            .bind(&input.identifier)
            .bind(multi_polygon_wkt(&input.geom))
            .fetch_one(pool)
            .await
    }

    /// Identifier of the area containing `location`, alphabetically first
    /// when areas overlap.
    pub async fn find_identifier_containing(
        pool: &PgPool,
        location: &Location,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!(
            "SELECT identifier FROM permit_areas
             WHERE ST_Contains(
                 geom,
                 ST_Transform(ST_SetSRID(ST_MakePoint($1, $2), {WGS84_SRID}), {GK25FIN_SRID})
             )
             ORDER BY identifier
             LIMIT 1"
        );
        sqlx::query_scalar::<_, String>(&query)
            .bind(location.longitude)
            .bind(location.latitude)
            .fetch_optional(pool)
            .await
    }
}
