//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod operator_repo;
pub mod parking_check_repo;
pub mod parking_repo;
pub mod payment_zone_repo;
pub mod permit_area_repo;
pub mod permit_repo;
pub mod user_repo;

pub use operator_repo::OperatorRepo;
pub use parking_check_repo::ParkingCheckRepo;
pub use parking_repo::ParkingRepo;
pub use payment_zone_repo::PaymentZoneRepo;
pub use permit_area_repo::PermitAreaRepo;
pub use permit_repo::{PermitRepo, PermitSeriesRepo};
pub use user_repo::UserRepo;
