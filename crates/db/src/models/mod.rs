//! Entity models and DTOs.
//!
//! Row structs derive `FromRow`; geometry columns are never selected as-is.
//! Points come back as `longitude`/`latitude` via `ST_X`/`ST_Y` and polygons
//! are write-only.

pub mod operator;
pub mod parking;
pub mod parking_check;
pub mod payment_zone;
pub mod permit;
pub mod permit_area;
pub mod user;
