//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in
//! `20240101000002_create_users_and_operators.sql`.

/// Enforcement staff. The only role allowed to run parking checks.
pub const ROLE_STAFF: &str = "staff";
/// Parking operators registering paid parkings.
pub const ROLE_OPERATOR: &str = "operator";
/// Ordinary authenticated users with no enforcement privileges.
pub const ROLE_USER: &str = "user";
