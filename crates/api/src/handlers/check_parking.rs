//! Handler for enforcement parking checks.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use parkcheck_core::enforcement::{self, CheckParkingRequest, ParkingCheckResult, ResolvedLocation};
use parkcheck_core::error::CoreError;
use parkcheck_db::models::parking_check::CreateParkingCheck;
use parkcheck_db::repositories::{
    ParkingCheckRepo, ParkingRepo, PaymentZoneRepo, PermitAreaRepo, PermitRepo,
};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// POST /enforcement/v1/check_parking/
///
/// Resolve the payment zone and permit area at the submitted location, look
/// for a paid parking or a permit covering the registration number at the
/// check time, and record the check. "Not allowed" is a regular 200 result.
pub async fn check_parking(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    payload: Result<Json<CheckParkingRequest>, JsonRejection>,
) -> AppResult<Json<ParkingCheckResult>> {
    let Json(request) = payload?;
    let params = request.into_params(Utc::now()).map_err(CoreError::from)?;
    let time = params.time.time;

    let payment_zone =
        PaymentZoneRepo::find_number_containing(&state.pool, &params.location).await?;
    let permit_area =
        PermitAreaRepo::find_identifier_containing(&state.pool, &params.location).await?;

    let parking = match payment_zone {
        Some(zone) => {
            ParkingRepo::find_valid(&state.pool, &params.normalized_registration, zone, time)
                .await?
        }
        None => None,
    };

    // A valid parking settles the check; permits are only consulted without one.
    let permit = match (&parking, &permit_area) {
        (None, Some(area)) => {
            PermitRepo::find_valid(&state.pool, &params.normalized_registration, area, time)
                .await?
        }
        _ => None,
    };

    let outcome = enforcement::decide(
        time,
        ResolvedLocation {
            payment_zone,
            permit_area,
        },
        parking,
        permit,
    );

    let check = ParkingCheckRepo::create(
        &state.pool,
        &CreateParkingCheck {
            registration_number: params.registration_number,
            location: params.location,
            time,
            time_overridden: params.time.overridden,
            performer_id: Some(user.user_id),
            result: outcome.result.clone(),
            found_parking_id: outcome.allowed_by.and_then(|by| by.parking_id()),
            found_permit_id: outcome.allowed_by.and_then(|by| by.permit_id()),
        },
    )
    .await?;

    tracing::info!(
        check_id = check.id,
        performer_id = user.user_id,
        allowed = outcome.result.allowed,
        payment_zone = ?outcome.result.location.payment_zone,
        permit_area = ?outcome.result.location.permit_area,
        time_overridden = params.time.overridden,
        "Parking check recorded",
    );

    Ok(Json(outcome.result))
}
