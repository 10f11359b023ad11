//! Parking check request validation and the allow/deny decision.
//!
//! The database layer resolves which payment zone and permit area contain the
//! point and which parking or permit is valid at the check time. [`decide`]
//! turns those lookups into the response document.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::check_time::{self, CheckTime};
use crate::geometry::Location;
use crate::registration;
use crate::types::{DbId, Timestamp, ZoneNumber};
use crate::validation::FieldErrors;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST /enforcement/v1/check_parking/`.
///
/// Every field is optional at the serde level so that missing fields are
/// reported per field instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CheckParkingRequest {
    #[validate(
        required,
        length(min = 1, max = 20, message = "Ensure this field has no more than 20 characters.")
    )]
    pub registration_number: Option<String>,

    #[validate(required, nested)]
    pub location: Option<Location>,

    /// ISO 8601 datetime with offset. Defaults to the current time.
    #[serde(default)]
    pub time: Option<String>,
}

/// Validated inputs of a parking check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckParams {
    /// Registration number as submitted (trimmed), kept for the audit trail.
    pub registration_number: String,
    /// Normalised form used for lookups.
    pub normalized_registration: String,
    pub location: Location,
    pub time: CheckTime,
}

impl CheckParkingRequest {
    /// Validate the request and resolve the check time against `now`.
    ///
    /// All problems are collected into a single [`FieldErrors`].
    pub fn into_params(self, now: Timestamp) -> Result<CheckParams, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };

        if let Some(raw) = &self.registration_number {
            if errors.get("registration_number").is_none()
                && registration::normalize(raw).is_empty()
            {
                errors.add("registration_number", "This field may not be blank.");
            }
        }

        let check_time = match check_time::resolve(self.time.as_deref(), now) {
            Ok(resolved) => Some(resolved),
            Err(time_errors) => {
                errors.merge(time_errors);
                None
            }
        };

        match (self.registration_number, self.location, check_time) {
            (Some(raw), Some(location), Some(time)) if errors.is_empty() => Ok(CheckParams {
                normalized_registration: registration::normalize(&raw),
                registration_number: raw.trim().to_string(),
                location,
                time,
            }),
            _ => Err(errors),
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup results
// ---------------------------------------------------------------------------

/// Which payment zone and permit area contain the checked point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub payment_zone: Option<ZoneNumber>,
    pub permit_area: Option<String>,
}

/// A paid parking valid at the check time in the resolved zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParkingMatch {
    pub parking_id: DbId,
    /// `None` for open-ended parkings.
    pub end_time: Option<Timestamp>,
}

/// A permit valid at the check time in the resolved area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitMatch {
    pub permit_id: DbId,
    /// Earlier of the matching subject and area window ends.
    pub end_time: Timestamp,
}

/// The record a check was allowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedBy {
    Parking(ParkingMatch),
    Permit(PermitMatch),
}

impl AllowedBy {
    pub fn parking_id(&self) -> Option<DbId> {
        match self {
            AllowedBy::Parking(m) => Some(m.parking_id),
            AllowedBy::Permit(_) => None,
        }
    }

    pub fn permit_id(&self) -> Option<DbId> {
        match self {
            AllowedBy::Permit(m) => Some(m.permit_id),
            AllowedBy::Parking(_) => None,
        }
    }

    pub fn end_time(&self) -> Option<Timestamp> {
        match self {
            AllowedBy::Parking(m) => m.end_time,
            AllowedBy::Permit(m) => Some(m.end_time),
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Response document of a parking check; also persisted on the audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingCheckResult {
    pub allowed: bool,
    pub end_time: Option<Timestamp>,
    pub location: ResolvedLocation,
    pub time: Timestamp,
}

/// Result document plus the record that allowed it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub result: ParkingCheckResult,
    pub allowed_by: Option<AllowedBy>,
}

/// Combine the lookups into an outcome. A paid parking wins over a permit.
pub fn decide(
    time: Timestamp,
    location: ResolvedLocation,
    parking: Option<ParkingMatch>,
    permit: Option<PermitMatch>,
) -> CheckOutcome {
    let allowed_by = parking
        .map(AllowedBy::Parking)
        .or_else(|| permit.map(AllowedBy::Permit));

    CheckOutcome {
        result: ParkingCheckResult {
            allowed: allowed_by.is_some(),
            end_time: allowed_by.and_then(|by| by.end_time()),
            location,
            time,
        },
        allowed_by,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_time::TIMEZONE_REQUIRED;
    use crate::validation::REQUIRED_MESSAGE;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn request(json: serde_json::Value) -> CheckParkingRequest {
        serde_json::from_value(json).unwrap()
    }

    fn in_zone_one() -> ResolvedLocation {
        ResolvedLocation {
            payment_zone: Some(1),
            permit_area: None,
        }
    }

    #[test]
    fn valid_request_becomes_params() {
        let params = request(serde_json::json!({
            "registration_number": " abc-123 ",
            "location": { "longitude": 24.9, "latitude": 60.2 }
        }))
        .into_params(now())
        .unwrap();

        assert_eq!(params.registration_number, "abc-123");
        assert_eq!(params.normalized_registration, "ABC123");
        assert_eq!(params.location, Location::new(24.9, 60.2));
        assert_eq!(params.time.time, now());
        assert!(!params.time.overridden);
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        let errors = request(serde_json::json!({})).into_params(now()).unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["location", "registration_number"]
        );
        assert_eq!(
            errors.get("location"),
            Some(&[REQUIRED_MESSAGE.to_string()][..])
        );
    }

    #[test]
    fn out_of_range_location_uses_dotted_key() {
        let errors = request(serde_json::json!({
            "registration_number": "ABC-123",
            "location": { "longitude": 24.9, "latitude": 160.2 }
        }))
        .into_params(now())
        .unwrap_err();

        assert!(errors.get("location.latitude").is_some());
        assert!(errors.get("location.longitude").is_none());
    }

    #[test]
    fn blank_registration_number_is_rejected() {
        let errors = request(serde_json::json!({
            "registration_number": " - ",
            "location": { "longitude": 24.9, "latitude": 60.2 }
        }))
        .into_params(now())
        .unwrap_err();

        assert!(errors.get("registration_number").is_some());
    }

    #[test]
    fn naive_time_is_merged_with_other_errors() {
        let errors = request(serde_json::json!({
            "location": { "longitude": 24.9, "latitude": 60.2 },
            "time": "2011-01-31T12:34:56.123456"
        }))
        .into_params(now())
        .unwrap_err();

        assert_matches!(errors.get("time"), Some([m]) if m == TIMEZONE_REQUIRED);
        assert!(errors.get("registration_number").is_some());
    }

    #[test]
    fn parking_match_allows_with_its_end_time() {
        let end = now() + Duration::hours(1);
        let outcome = decide(
            now(),
            in_zone_one(),
            Some(ParkingMatch {
                parking_id: 7,
                end_time: Some(end),
            }),
            None,
        );

        assert!(outcome.result.allowed);
        assert_eq!(outcome.result.end_time, Some(end));
        assert_matches!(outcome.allowed_by, Some(AllowedBy::Parking(m)) if m.parking_id == 7);
    }

    #[test]
    fn parking_wins_over_permit() {
        let outcome = decide(
            now(),
            in_zone_one(),
            Some(ParkingMatch {
                parking_id: 1,
                end_time: None,
            }),
            Some(PermitMatch {
                permit_id: 2,
                end_time: now() + Duration::days(1),
            }),
        );

        assert!(outcome.result.allowed);
        assert_eq!(outcome.result.end_time, None);
        assert_eq!(outcome.allowed_by.and_then(|b| b.parking_id()), Some(1));
        assert_eq!(outcome.allowed_by.and_then(|b| b.permit_id()), None);
    }

    #[test]
    fn permit_match_allows() {
        let end = now() + Duration::days(1);
        let outcome = decide(
            now(),
            ResolvedLocation {
                payment_zone: None,
                permit_area: Some("A".into()),
            },
            None,
            Some(PermitMatch {
                permit_id: 3,
                end_time: end,
            }),
        );

        assert!(outcome.result.allowed);
        assert_eq!(outcome.result.end_time, Some(end));
        assert_eq!(outcome.allowed_by.and_then(|b| b.permit_id()), Some(3));
    }

    #[test]
    fn no_match_is_not_allowed_and_has_no_end_time() {
        let outcome = decide(now(), ResolvedLocation::default(), None, None);

        assert!(!outcome.result.allowed);
        assert_eq!(outcome.result.end_time, None);
        assert!(outcome.allowed_by.is_none());
    }

    #[test]
    fn result_serializes_with_exact_keys() {
        let outcome = decide(now(), ResolvedLocation::default(), None, None);
        let json = serde_json::to_value(&outcome.result).unwrap();

        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["allowed", "end_time", "location", "time"]);
        assert_eq!(
            json["location"],
            serde_json::json!({ "payment_zone": null, "permit_area": null })
        );
    }
}
