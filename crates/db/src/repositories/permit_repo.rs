//! Repositories for the `permit_series` and `permits` tables.

use parkcheck_core::enforcement::PermitMatch;
use parkcheck_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::permit::{CreatePermit, Permit, PermitSeries};

const SERIES_COLUMNS: &str = "id, active, created_at, updated_at";

const COLUMNS: &str = "id, series_id, external_id, subjects, areas, created_at, updated_at";

pub struct PermitSeriesRepo;

impl PermitSeriesRepo {
    pub async fn create(pool: &PgPool, active: bool) -> Result<PermitSeries, sqlx::Error> {
        let query = format!(
            "INSERT INTO permit_series (active) VALUES ($1) RETURNING {SERIES_COLUMNS}"
        );
        sqlx::query_as::<_, PermitSeries>(&query)
            .bind(active)
            .fetch_one(pool)
            .await
    }

    /// Toggle whether the series' permits are honoured.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        active: bool,
    ) -> Result<Option<PermitSeries>, sqlx::Error> {
        let query = format!(
            "UPDATE permit_series SET active = $2 WHERE id = $1 RETURNING {SERIES_COLUMNS}"
        );
        sqlx::query_as::<_, PermitSeries>(&query)
            .bind(id)
            .bind(active)
            .fetch_optional(pool)
            .await
    }
}

/// Provides creation and validity lookup for permits.
pub struct PermitRepo;

impl PermitRepo {
    pub async fn create(pool: &PgPool, input: &CreatePermit) -> Result<Permit, sqlx::Error> {
        let query = format!(
            "INSERT INTO permits (series_id, external_id, subjects, areas)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Permit>(&query)
            .bind(input.series_id)
            .bind(&input.external_id)
            .bind(Json(&input.subjects))
            .bind(Json(&input.areas))
            .fetch_one(pool)
            .await
    }

    /// Find a permit in an active series covering `normalized_reg_num` in
    /// permit area `area` at `time`.
    ///
    /// A permit matches when one of its subjects and one of its areas are
    /// both valid at `time` (inclusive bounds). The match is valid until the
    /// earlier of the two window ends; the latest such end wins.
    pub async fn find_valid(
        pool: &PgPool,
        normalized_reg_num: &str,
        area: &str,
        time: Timestamp,
    ) -> Result<Option<PermitMatch>, sqlx::Error> {
        let row = sqlx::query_as::<_, (DbId, Timestamp)>(
            r#"SELECT p.id, LEAST(s.end_time, a.end_time) AS valid_until
             FROM permits p
             JOIN permit_series ps ON ps.id = p.series_id
             CROSS JOIN LATERAL jsonb_to_recordset(p.subjects)
                 AS s(registration_number TEXT, start_time TIMESTAMPTZ, end_time TIMESTAMPTZ)
             CROSS JOIN LATERAL jsonb_to_recordset(p.areas)
                 AS a(area TEXT, start_time TIMESTAMPTZ, end_time TIMESTAMPTZ)
             WHERE ps.active
               AND upper(regexp_replace(s.registration_number, '[[:space:]-]', '', 'g') COLLATE "C") = $1
               AND s.start_time <= $3 AND s.end_time >= $3
               AND a.area = $2
               AND a.start_time <= $3 AND a.end_time >= $3
             ORDER BY valid_until DESC, p.id DESC
             LIMIT 1"#,
        )
        .bind(normalized_reg_num)
        .bind(area)
        .bind(time)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(permit_id, end_time)| PermitMatch { permit_id, end_time }))
    }
}
