//! Operator-submitted paid parkings.

use serde::Deserialize;
use validator::Validate;

use crate::check_time;
use crate::geometry::Location;
use crate::registration;
use crate::types::{Timestamp, ZoneNumber};
use crate::validation::FieldErrors;

/// Body of `POST /operator/v1/parking/`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterParkingRequest {
    #[validate(
        required,
        length(min = 1, max = 20, message = "Ensure this field has no more than 20 characters.")
    )]
    pub registration_number: Option<String>,

    #[validate(
        required,
        range(min = 1, message = "Ensure this value is greater than or equal to 1.")
    )]
    pub zone: Option<ZoneNumber>,

    #[validate(required)]
    pub time_start: Option<String>,

    #[serde(default)]
    pub time_end: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub location: Option<Location>,
}

/// A validated parking registration, ready to be stored for an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingRegistration {
    pub registration_number: String,
    pub zone: ZoneNumber,
    pub location: Option<Location>,
    pub time_start: Timestamp,
    pub time_end: Option<Timestamp>,
}

impl RegisterParkingRequest {
    pub fn into_registration(self) -> Result<ParkingRegistration, FieldErrors> {
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

        let time_start = parse_optional("time_start", self.time_start.as_deref(), &mut errors);
        let time_end = parse_optional("time_end", self.time_end.as_deref(), &mut errors);

        if let (Some(start), Some(end)) = (time_start, time_end) {
            if end < start {
                errors.add("time_end", "time_end cannot be before time_start.");
            }
        }

        match (self.registration_number, self.zone, time_start) {
            (Some(raw), Some(zone), Some(time_start)) if errors.is_empty() => {
                Ok(ParkingRegistration {
                    registration_number: raw.trim().to_string(),
                    zone,
                    location: self.location,
                    time_start,
                    time_end,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_optional(field: &str, raw: Option<&str>, errors: &mut FieldErrors) -> Option<Timestamp> {
    match raw.map(|value| check_time::parse_field(field, value)) {
        Some(Ok(time)) => Some(time),
        Some(Err(field_errors)) => {
            errors.merge(field_errors);
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_time::TIMEZONE_REQUIRED;
    use crate::validation::REQUIRED_MESSAGE;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn request(json: serde_json::Value) -> RegisterParkingRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn open_ended_parking_without_location() {
        let registration = request(serde_json::json!({
            "registration_number": "ABC-123",
            "zone": 2,
            "time_start": "2024-03-01T10:00:00+02:00"
        }))
        .into_registration()
        .unwrap();

        assert_eq!(registration.zone, 2);
        assert_eq!(
            registration.time_start,
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
        );
        assert_eq!(registration.time_end, None);
        assert_eq!(registration.location, None);
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = request(serde_json::json!({})).into_registration().unwrap_err();

        for field in ["registration_number", "zone", "time_start"] {
            assert_matches!(errors.get(field), Some([m]) if m == REQUIRED_MESSAGE);
        }
        assert!(errors.get("time_end").is_none());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let errors = request(serde_json::json!({
            "registration_number": "ABC-123",
            "zone": 1,
            "time_start": "2024-03-01T10:00:00Z",
            "time_end": "2024-03-01T09:00:00Z"
        }))
        .into_registration()
        .unwrap_err();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["time_end"]);
    }

    #[test]
    fn naive_times_need_timezone() {
        let errors = request(serde_json::json!({
            "registration_number": "ABC-123",
            "zone": 1,
            "time_start": "2024-03-01T10:00:00"
        }))
        .into_registration()
        .unwrap_err();

        assert_matches!(errors.get("time_start"), Some([m]) if m == TIMEZONE_REQUIRED);
    }

    #[test]
    fn zone_must_be_positive() {
        let errors = request(serde_json::json!({
            "registration_number": "ABC-123",
            "zone": 0,
            "time_start": "2024-03-01T10:00:00Z"
        }))
        .into_registration()
        .unwrap_err();

        assert!(errors.get("zone").is_some());
    }
}
