//! Editor form validation.
//!
//! Rules come from the resource schema. Every violation is collected so the
//! editor can flag all offending fields at once; nothing here touches the
//! network.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::datetime;
use crate::models::{FieldKind, FieldSpec, ResourceSchema};

/// A rule violation on one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All violations found in one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First message recorded for a field.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, spec: &FieldSpec, message: impl Into<String>) {
        self.0.push(FieldError {
            field: spec.name.to_string(),
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Validate form values against a schema.
///
/// Returns the cleaned values: trimmed, choices spelled as declared, dates in
/// canonical format, blank optional fields dropped.
pub fn validate_form(
    schema: &ResourceSchema,
    form: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, ValidationErrors> {
    validate_changes(schema, form, &BTreeMap::new())
}

/// Validate an edited form against the values it was opened with.
///
/// A date-time left as loaded skips its minute-step rule, so a stored record
/// off the slot grid can still be saved without moving it.
pub fn validate_changes(
    schema: &ResourceSchema,
    form: &BTreeMap<String, String>,
    loaded: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut cleaned = BTreeMap::new();

    for spec in schema.fields {
        let raw = form.get(spec.name).map(|v| v.trim()).unwrap_or("");
        if raw.is_empty() {
            if spec.required {
                errors.push(spec, spec.message);
            }
            continue;
        }

        let unchanged = loaded.get(spec.name).is_some_and(|v| v.trim() == raw);
        match check_value(spec, raw, !unchanged) {
            Ok(value) => {
                cleaned.insert(spec.name.to_string(), value);
            }
            Err(message) => errors.push(spec, message),
        }
    }

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(errors)
    }
}

fn check_value(spec: &FieldSpec, value: &str, enforce_step: bool) -> Result<String, String> {
    match spec.kind {
        FieldKind::Text | FieldKind::LongText => Ok(value.to_string()),
        FieldKind::Email => {
            if email_regex().is_match(value) {
                Ok(value.to_string())
            } else {
                Err("Please enter a valid email address".to_string())
            }
        }
        FieldKind::Number => match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(value.to_string()),
            _ => Err(format!("{} must be a non-negative number", spec.label)),
        },
        FieldKind::Choice(options) => options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(value))
            .map(|o| o.to_string())
            .ok_or_else(|| format!("{} must be one of: {}", spec.label, options.join(", "))),
        FieldKind::Date => datetime::parse_date(value)
            .map(|d| d.format(datetime::DATE_FORMAT).to_string())
            .ok_or_else(|| format!("{} must be a date (YYYY-MM-DD)", spec.label)),
        FieldKind::DateTime { minute_step, .. } => {
            let parsed = datetime::parse_editor_value(value).ok_or_else(|| {
                format!("{} must be a date and time (YYYY-MM-DD HH:mm)", spec.label)
            })?;
            if let Some(step) = minute_step.filter(|_| enforce_step) {
                if !datetime::on_minute_step(parsed, step) {
                    return Err(format!("{} must be on a {}-minute slot", spec.label, step));
                }
            }
            Ok(parsed.format(datetime::EDITOR_FORMAT).to_string())
        }
    }
}
