//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Requires the `staff` role.
//! - [`rbac::RequireOperator`] -- Requires the `operator` role.

pub mod auth;
pub mod rbac;
