//! Request handlers.
//!
//! Handlers validate input with `parkcheck_core`, delegate storage to the
//! repositories in `parkcheck_db`, and map errors via [`crate::error::AppError`].

pub mod check_parking;
pub mod operator_parking;
