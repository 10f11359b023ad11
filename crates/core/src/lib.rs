//! Domain logic for the parking enforcement backend.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` crate
//! stores what these types describe and the `api` crate wires them to
//! requests.

pub mod check_time;
pub mod enforcement;
pub mod error;
pub mod geometry;
pub mod parking;
pub mod permit;
pub mod registration;
pub mod roles;
pub mod types;
pub mod validation;
