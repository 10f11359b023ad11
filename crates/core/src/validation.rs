//! Field-level validation errors.
//!
//! [`FieldErrors`] is the shape every 400 response with per-field messages
//! takes on the wire: a JSON object mapping field names to lists of
//! human-readable messages, e.g. `{"time": ["Timezone is required"]}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Message used for every missing required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Ordered map of field name to validation messages.
///
/// Nested fields use dotted keys (`location.latitude`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error set holding a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Append a message to a field's list.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Move every message from `other` into `self`.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when no errors were recorded, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        flatten("", &errors, &mut out);
        out
    }
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.add(key.clone(), message_for(error));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(&key, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(&format!("{key}[{index}]"), nested, out);
                }
            }
        }
    }
}

fn message_for(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "required" => REQUIRED_MESSAGE.to_string(),
        code => format!("Invalid value ({code})."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Inner {
        #[validate(range(min = 0, max = 10, message = "Out of range."))]
        value: i32,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(required)]
        name: Option<String>,
        #[validate(nested)]
        inner: Inner,
    }

    #[test]
    fn single_error_serializes_as_field_map() {
        let errors = FieldErrors::single("time", "Timezone is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "time": ["Timezone is required"] }));
    }

    #[test]
    fn merge_appends_messages_per_field() {
        let mut errors = FieldErrors::single("zone", "first");
        let mut other = FieldErrors::single("zone", "second");
        other.add("time", "third");
        errors.merge(other);

        assert_eq!(
            errors.get("zone"),
            Some(&["first".to_string(), "second".to_string()][..])
        );
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["time", "zone"]);
    }

    #[test]
    fn empty_errors_convert_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("a", "b").into_result().is_err());
    }

    #[test]
    fn validator_errors_flatten_with_dotted_keys() {
        let outer = Outer {
            name: None,
            inner: Inner { value: 42 },
        };
        let errors: FieldErrors = outer.validate().unwrap_err().into();

        assert_eq!(errors.get("name"), Some(&[REQUIRED_MESSAGE.to_string()][..]));
        assert_eq!(
            errors.get("inner.value"),
            Some(&["Out of range.".to_string()][..])
        );
    }

    #[test]
    fn display_joins_fields() {
        let mut errors = FieldErrors::single("a", "bad");
        errors.add("b", "worse");
        assert_eq!(errors.to_string(), "a: bad; b: worse");
    }
}
