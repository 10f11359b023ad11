//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! match. A missing or invalid token is rejected with 401 before the role is
//! considered.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use parkcheck_core::error::CoreError;
use parkcheck_core::roles::{ROLE_OPERATOR, ROLE_STAFF};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: &str,
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        tracing::debug!(
            user_id = user.user_id,
            role = %user.role,
            required = role,
            "Role rejected"
        );
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(user)
}

/// Requires the `staff` role (enforcement officers). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn staff_only(RequireStaff(user): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_STAFF, "Staff role required")
            .await
            .map(RequireStaff)
    }
}

/// Requires the `operator` role (parking payment providers).
pub struct RequireOperator(pub AuthUser);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, ROLE_OPERATOR, "Operator role required")
            .await
            .map(RequireOperator)
    }
}
