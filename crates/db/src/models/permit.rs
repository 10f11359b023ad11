//! Permit series and permit models.

use parkcheck_core::permit::{validate_permit_document, PermitAreaWindow, PermitSubject};
use parkcheck_core::types::{DbId, Timestamp};
use parkcheck_core::validation::FieldErrors;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A batch of permits that is honoured only while `active`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PermitSeries {
    pub id: DbId,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A permit row with its subject and area windows decoded from JSONB.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Permit {
    pub id: DbId,
    pub series_id: DbId,
    pub external_id: Option<String>,
    pub subjects: Json<Vec<PermitSubject>>,
    pub areas: Json<Vec<PermitAreaWindow>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a permit. Construct with [`CreatePermit::new`] so the
/// document is validated before it reaches the database.
#[derive(Debug, Clone)]
pub struct CreatePermit {
    pub series_id: DbId,
    pub external_id: Option<String>,
    pub subjects: Vec<PermitSubject>,
    pub areas: Vec<PermitAreaWindow>,
}

impl CreatePermit {
    pub fn new(
        series_id: DbId,
        external_id: Option<String>,
        subjects: Vec<PermitSubject>,
        areas: Vec<PermitAreaWindow>,
    ) -> Result<Self, FieldErrors> {
        validate_permit_document(&subjects, &areas)?;
        Ok(Self {
            series_id,
            external_id,
            subjects,
            areas,
        })
    }
}
