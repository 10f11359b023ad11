//! Digital parking permit documents.
//!
//! A permit lists the vehicles it covers (`subjects`) and the permit areas
//! it is valid in (`areas`), each with its own validity window. A permit
//! allows parking only when a subject window and an area window both cover
//! the check time. That lookup runs in SQL (`PermitRepo::find_valid`); this
//! module only checks documents before they are stored.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;
use crate::validation::FieldErrors;

/// A vehicle covered by a permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSubject {
    pub registration_number: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

/// A permit area (by identifier) a permit is valid in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitAreaWindow {
    pub area: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

/// Check the structural rules of a permit before it is stored.
pub fn validate_permit_document(
    subjects: &[PermitSubject],
    areas: &[PermitAreaWindow],
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if subjects.is_empty() {
        errors.add("subjects", "At least one subject is required.");
    }
    for (i, subject) in subjects.iter().enumerate() {
        if subject.registration_number.trim().is_empty() {
            errors.add(
                format!("subjects[{i}].registration_number"),
                "This field may not be blank.",
            );
        }
        if subject.start_time > subject.end_time {
            errors.add(
                format!("subjects[{i}].end_time"),
                "end_time cannot be before start_time.",
            );
        }
    }

    if areas.is_empty() {
        errors.add("areas", "At least one area is required.");
    }
    for (i, area) in areas.iter().enumerate() {
        if area.area.trim().is_empty() {
            errors.add(format!("areas[{i}].area"), "This field may not be blank.");
        }
        if area.start_time > area.end_time {
            errors.add(
                format!("areas[{i}].end_time"),
                "end_time cannot be before start_time.",
            );
        }
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn subject(start_offset: i64, end_offset: i64) -> PermitSubject {
        let now = Utc::now();
        PermitSubject {
            registration_number: "ABC-123".into(),
            start_time: now + Duration::hours(start_offset),
            end_time: now + Duration::hours(end_offset),
        }
    }

    fn area(code: &str, start_offset: i64, end_offset: i64) -> PermitAreaWindow {
        let now = Utc::now();
        PermitAreaWindow {
            area: code.into(),
            start_time: now + Duration::hours(start_offset),
            end_time: now + Duration::hours(end_offset),
        }
    }

    #[test]
    fn well_formed_document_passes() {
        assert!(validate_permit_document(&[subject(0, 24)], &[area("A", 0, 24)]).is_ok());
    }

    #[test]
    fn empty_lists_are_rejected() {
        let errors = validate_permit_document(&[], &[]).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["areas", "subjects"]);
    }

    #[test]
    fn inverted_windows_and_blank_codes_are_reported_by_index() {
        let mut bad_subject = subject(2, 1);
        bad_subject.registration_number = "  ".into();
        let errors =
            validate_permit_document(&[bad_subject], &[area("A", 0, 1), area("", 0, 1)])
                .unwrap_err();

        assert!(errors.get("subjects[0].registration_number").is_some());
        assert!(errors.get("subjects[0].end_time").is_some());
        assert!(errors.get("areas[1].area").is_some());
        assert!(errors.get("areas[0].area").is_none());
    }

    #[test]
    fn documents_serialize_with_rfc3339_times() {
        let json = serde_json::to_value(subject(0, 1)).unwrap();
        assert!(json["start_time"].as_str().unwrap().contains('T'));
        assert_eq!(json["registration_number"], "ABC-123");
    }
}
