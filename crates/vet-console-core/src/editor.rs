//! Record editor.
//!
//! Drives one add-or-edit form and the delete confirmation for a screen:
//!
//! ```text
//! Idle ──open_for_create / open_for_edit──▶ Editing ──submit ok──▶ Idle
//!   │                                         │  ▲
//!   │                                         └──┘ submit failed / invalid
//!   └──request_delete──▶ ConfirmingDelete ──confirm / cancel──▶ Idle
//! ```
//!
//! The editor never talks to the backend itself. `begin_submit` validates and
//! produces the request body, the screen dispatches it, and `complete_submit`
//! reports the outcome back.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::datetime;
use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{FieldKind, Resource};
use crate::validation::{validate_changes, ValidationErrors};

/// Form field values, keyed by field name.
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update { document_id: String },
}

/// An open form.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub mode: EditorMode,
    pub form: FormValues,
    /// Values the form was opened with
    pub loaded: FormValues,
    /// Violations from the last submit attempt
    pub errors: ValidationErrors,
    /// A create/update request is outstanding
    pub in_flight: bool,
}

#[derive(Debug, Clone)]
pub enum EditorState {
    Idle,
    Editing(EditSession),
    ConfirmingDelete { document_id: String },
}

/// A validated request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit {
    pub mode: EditorMode,
    pub body: Value,
}

pub struct RecordEditor<R: Resource> {
    state: EditorState,
    _record: PhantomData<fn() -> R>,
}

impl<R: Resource> Default for RecordEditor<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> RecordEditor<R> {
    pub fn new() -> Self {
        Self {
            state: EditorState::Idle,
            _record: PhantomData,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditorState::Idle)
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditorState::Editing(session) => Some(session),
            _ => None,
        }
    }

    /// False while a request is outstanding or no form is open.
    pub fn can_submit(&self) -> bool {
        self.session().is_some_and(|s| !s.in_flight)
    }

    /// Open an empty form for a new record.
    pub fn open_for_create(&mut self) -> ConsoleResult<()> {
        self.ensure_can_open()?;
        self.state = EditorState::Editing(EditSession {
            mode: EditorMode::Create,
            form: FormValues::new(),
            loaded: FormValues::new(),
            errors: ValidationErrors::default(),
            in_flight: false,
        });
        Ok(())
    }

    /// Open a form populated from a saved record.
    pub fn open_for_edit(&mut self, record: &R) -> ConsoleResult<()> {
        self.ensure_can_open()?;
        let document_id = record
            .document_id()
            .ok_or_else(|| ConsoleError::InvalidState("record has no documentId".into()))?
            .to_string();
        let form = record_to_form(record);
        self.state = EditorState::Editing(EditSession {
            mode: EditorMode::Update { document_id },
            loaded: form.clone(),
            form,
            errors: ValidationErrors::default(),
            in_flight: false,
        });
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> ConsoleResult<()> {
        let schema = R::schema();
        let spec = schema
            .field(name)
            .ok_or_else(|| ConsoleError::unknown_field(name, schema.suggest_field(name)))?;
        let session = self.editable_session()?;
        session.form.insert(spec.name.to_string(), value.into());
        Ok(())
    }

    /// Validate the form and build the request body.
    ///
    /// On validation failure the errors are kept on the session and nothing is
    /// marked in flight.
    pub fn begin_submit(&mut self) -> ConsoleResult<PendingSubmit> {
        let session = match &mut self.state {
            EditorState::Editing(session) => session,
            _ => return Err(ConsoleError::InvalidState("no form is open".into())),
        };
        if session.in_flight {
            return Err(ConsoleError::SubmitInFlight);
        }

        let cleaned = match validate_changes(R::schema(), &session.form, &session.loaded) {
            Ok(cleaned) => cleaned,
            Err(errors) => {
                session.errors = errors.clone();
                return Err(ConsoleError::Validation(errors));
            }
        };
        let body = form_to_body::<R>(&cleaned)?;

        session.errors = ValidationErrors::default();
        session.in_flight = true;
        Ok(PendingSubmit {
            mode: session.mode.clone(),
            body,
        })
    }

    /// Report the outcome of the request started by `begin_submit`.
    pub fn complete_submit(&mut self, succeeded: bool) {
        if !self.session().is_some_and(|s| s.in_flight) {
            return;
        }
        if succeeded {
            self.state = EditorState::Idle;
        } else if let EditorState::Editing(session) = &mut self.state {
            session.in_flight = false;
        }
    }

    /// Close the form or drop a pending delete confirmation.
    pub fn cancel(&mut self) -> ConsoleResult<()> {
        if self.session().is_some_and(|s| s.in_flight) {
            return Err(ConsoleError::SubmitInFlight);
        }
        self.state = EditorState::Idle;
        Ok(())
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, document_id: &str) -> ConsoleResult<()> {
        if !self.is_idle() {
            return Err(ConsoleError::InvalidState(
                "close the form before deleting".into(),
            ));
        }
        self.state = EditorState::ConfirmingDelete {
            document_id: document_id.to_string(),
        };
        Ok(())
    }

    /// Accept the pending confirmation, returning the id to delete.
    pub fn confirm_delete(&mut self) -> ConsoleResult<String> {
        match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::ConfirmingDelete { document_id } => Ok(document_id),
            other => {
                self.state = other;
                Err(ConsoleError::InvalidState("no delete is awaiting confirmation".into()))
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.state, EditorState::ConfirmingDelete { .. }) {
            self.state = EditorState::Idle;
        }
    }

    fn ensure_can_open(&self) -> ConsoleResult<()> {
        match &self.state {
            EditorState::Editing(session) if session.in_flight => Err(ConsoleError::SubmitInFlight),
            EditorState::ConfirmingDelete { .. } => Err(ConsoleError::InvalidState(
                "a delete is awaiting confirmation".into(),
            )),
            _ => Ok(()),
        }
    }

    fn editable_session(&mut self) -> ConsoleResult<&mut EditSession> {
        match &mut self.state {
            EditorState::Editing(session) if session.in_flight => Err(ConsoleError::SubmitInFlight),
            EditorState::Editing(session) => Ok(session),
            _ => Err(ConsoleError::InvalidState("no form is open".into())),
        }
    }
}

/// Form values for a saved record, rebuilding composite date-times.
pub fn record_to_form<R: Resource>(record: &R) -> FormValues {
    let mut form = FormValues::new();
    for spec in R::schema().fields {
        let value = match spec.kind {
            FieldKind::DateTime {
                date_field,
                time_field,
                ..
            } => record
                .field(date_field)
                .and_then(|date| datetime::combine(date, record.field(time_field).unwrap_or(""))),
            _ => record.field(spec.name).map(str::to_string),
        };
        if let Some(value) = value {
            form.insert(spec.name.to_string(), value);
        }
    }
    form
}

/// Request body for validated form values.
///
/// Composite date-times are split into their stored fields, and the result is
/// passed through the typed record so only schema fields reach the wire.
pub fn form_to_body<R: Resource>(cleaned: &BTreeMap<String, String>) -> ConsoleResult<Value> {
    let mut fields = Map::new();
    for spec in R::schema().fields {
        let Some(value) = cleaned.get(spec.name) else {
            continue;
        };
        match spec.kind {
            FieldKind::DateTime {
                date_field,
                time_field,
                ..
            } => {
                if let Some(instant) = datetime::parse_editor_value(value) {
                    let (date, time) = datetime::split(instant);
                    fields.insert(date_field.to_string(), Value::String(date));
                    fields.insert(time_field.to_string(), Value::String(time));
                }
            }
            _ => {
                fields.insert(spec.name.to_string(), Value::String(value.clone()));
            }
        }
    }
    let record: R = serde_json::from_value(Value::Object(fields))?;
    Ok(serde_json::to_value(&record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, LabDiagnostic, Pet};

    fn fill_pet(editor: &mut RecordEditor<Pet>) {
        for (name, value) in [
            ("name", "Rex"),
            ("ownerFullname", "Alice Lee"),
            ("type", "Dog"),
            ("breed", "Labrador"),
            ("age", "3"),
            ("gender", "Male"),
            ("weight", "30"),
        ] {
            editor.set_field(name, value).unwrap();
        }
    }

    #[test]
    fn test_create_flow() {
        let mut editor = RecordEditor::<Pet>::new();
        editor.open_for_create().unwrap();
        fill_pet(&mut editor);

        let pending = editor.begin_submit().unwrap();
        assert_eq!(pending.mode, EditorMode::Create);
        assert_eq!(pending.body["name"], "Rex");
        assert!(pending.body.get("documentId").is_none());
        assert!(!editor.can_submit());

        editor.complete_submit(true);
        assert!(editor.is_idle());
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut editor = RecordEditor::<Pet>::new();
        editor.open_for_create().unwrap();
        fill_pet(&mut editor);
        editor.set_field("name", "").unwrap();

        let err = editor.begin_submit().unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        let session = editor.session().unwrap();
        assert_eq!(session.errors.for_field("name"), Some("Please enter the pet name"));
        assert_eq!(session.form["ownerFullname"], "Alice Lee");
        assert!(editor.can_submit());
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut editor = RecordEditor::<Pet>::new();
        editor.open_for_create().unwrap();
        fill_pet(&mut editor);
        editor.begin_submit().unwrap();

        assert!(matches!(editor.begin_submit(), Err(ConsoleError::SubmitInFlight)));
        assert!(matches!(editor.set_field("age", "4"), Err(ConsoleError::SubmitInFlight)));
        assert!(matches!(editor.cancel(), Err(ConsoleError::SubmitInFlight)));
    }

    #[test]
    fn test_failed_submit_stays_editing() {
        let mut editor = RecordEditor::<Pet>::new();
        editor.open_for_create().unwrap();
        fill_pet(&mut editor);
        editor.begin_submit().unwrap();

        editor.complete_submit(false);
        let session = editor.session().unwrap();
        assert!(!session.in_flight);
        assert_eq!(session.form["name"], "Rex");
    }

    #[test]
    fn test_edit_rebuilds_datetime() {
        let appointment = Appointment {
            document_id: Some("a1".into()),
            pet_name: "Rex".into(),
            date: "2024-05-01".into(),
            time: "10:30".into(),
            ..Default::default()
        };
        let mut editor = RecordEditor::<Appointment>::new();
        editor.open_for_edit(&appointment).unwrap();

        let session = editor.session().unwrap();
        assert_eq!(
            session.mode,
            EditorMode::Update {
                document_id: "a1".into()
            }
        );
        assert_eq!(session.form["appointmentDate"], "2024-05-01 10:30");
        assert!(!session.form.contains_key("date"));
    }

    #[test]
    fn test_edit_keeps_stored_off_slot_time() {
        let appointment = Appointment {
            document_id: Some("a1".into()),
            owner_fullname: "Alice Lee".into(),
            email: "alice@example.com".into(),
            phone_number: "555-0100".into(),
            pet_name: "Rex".into(),
            pet_type: "Dog".into(),
            pet_age: "3".into(),
            pet_weight: "30".into(),
            pet_gender: "male".into(),
            purpose: "Vaccination".into(),
            date: "2024-05-01".into(),
            time: "10:15".into(),
            ..Default::default()
        };
        let mut editor = RecordEditor::<Appointment>::new();
        editor.open_for_edit(&appointment).unwrap();
        editor.set_field("purpose", "Check-up").unwrap();

        let pending = editor.begin_submit().unwrap();
        assert_eq!(pending.body["time"], "10:15");
        assert_eq!(pending.body["purpose"], "Check-up");
        editor.complete_submit(false);

        editor.set_field("appointmentDate", "2024-05-01 10:45").unwrap();
        assert!(matches!(editor.begin_submit(), Err(ConsoleError::Validation(_))));
    }

    #[test]
    fn test_lab_time_with_seconds_rejected() {
        let mut editor = RecordEditor::<LabDiagnostic>::new();
        editor.open_for_create().unwrap();
        editor.set_field("appointmentDate", "2024-05-01 10:07:30").unwrap();
        editor.begin_submit().unwrap_err();
        let errors = &editor.session().unwrap().errors;
        assert!(errors.for_field("appointmentDate").is_some());
    }

    #[test]
    fn test_body_splits_datetime() {
        let cleaned: BTreeMap<String, String> = [
            ("ownerFullname", "Alice"),
            ("petName", "Rex"),
            ("appointmentDate", "2024-05-01 10:30"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let body = form_to_body::<LabDiagnostic>(&cleaned).unwrap();
        assert_eq!(body["date"], "2024-05-01");
        assert_eq!(body["time"], "10:30");
        assert!(body.get("appointmentDate").is_none());
    }

    #[test]
    fn test_edit_requires_document_id() {
        let mut editor = RecordEditor::<Pet>::new();
        assert!(editor.open_for_edit(&Pet::new("Rex", "Alice", "Dog")).is_err());
        assert!(editor.is_idle());
    }

    #[test]
    fn test_unknown_field_suggests() {
        let mut editor = RecordEditor::<Pet>::new();
        editor.open_for_create().unwrap();
        let err = editor.set_field("owner", "Alice").unwrap_err();
        assert!(matches!(err, ConsoleError::Unknown { kind: "field", .. }));
    }

    #[test]
    fn test_delete_confirmation() {
        let mut editor = RecordEditor::<Pet>::new();
        assert!(editor.confirm_delete().is_err());

        editor.request_delete("p1").unwrap();
        assert!(editor.open_for_create().is_err());
        assert_eq!(editor.confirm_delete().unwrap(), "p1");
        assert!(editor.is_idle());

        editor.request_delete("p2").unwrap();
        editor.cancel_delete();
        assert!(editor.is_idle());
    }
}
