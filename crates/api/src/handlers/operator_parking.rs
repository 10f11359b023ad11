//! Handler for operators registering paid parkings.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use parkcheck_core::error::CoreError;
use parkcheck_core::parking::RegisterParkingRequest;
use parkcheck_core::validation::FieldErrors;
use parkcheck_db::models::parking::CreateParking;
use parkcheck_db::repositories::{OperatorRepo, ParkingRepo, PaymentZoneRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireOperator;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /operator/v1/parking/
///
/// Register a paid parking on behalf of the operator linked to the caller.
/// Returns 201 with the stored parking.
pub async fn register_parking(
    RequireOperator(user): RequireOperator,
    State(state): State<AppState>,
    payload: Result<Json<RegisterParkingRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let operator = OperatorRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| CoreError::Forbidden("No operator is linked to this user".into()))?;

    let Json(request) = payload?;
    let registration = request.into_registration().map_err(CoreError::from)?;

    if !PaymentZoneRepo::exists_number(&state.pool, registration.zone).await? {
        return Err(CoreError::from(FieldErrors::single(
            "zone",
            format!("Payment zone {} does not exist.", registration.zone),
        ))
        .into());
    }

    let parking = ParkingRepo::create(
        &state.pool,
        &CreateParking {
            registration_number: registration.registration_number,
            operator_id: operator.id,
            zone: registration.zone,
            location: registration.location,
            time_start: registration.time_start,
            time_end: registration.time_end,
        },
    )
    .await?;

    tracing::info!(
        parking_id = parking.id,
        operator_id = operator.id,
        zone = parking.zone,
        "Parking registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: parking })))
}
