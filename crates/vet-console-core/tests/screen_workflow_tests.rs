//! Screen workflow integration tests over the in-memory backend.

use std::sync::Arc;

use serde_json::json;
use vet_console_core::api::{BackendCall, CallKind, MemoryBackend};
use vet_console_core::notify::NotificationLevel;
use vet_console_core::{
    Appointment, ConsoleError, LabDiagnostic, MedicalInventory, Pet, ResourceKind, Screen,
};

fn seeded_labs() -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed(
        ResourceKind::LabDiagnostic,
        vec![
            json!({ "documentId": "l1", "ownerFullname": "Alice Lee", "petType": "Dog" }),
            json!({ "documentId": "l2", "ownerFullname": "Bob Han", "petType": "Cat" }),
        ],
    );
    backend
}

fn loaded<R: vet_console_core::Resource>(backend: &Arc<MemoryBackend>) -> Screen<R> {
    let mut screen = Screen::<R>::new(backend.clone());
    screen.load().unwrap();
    backend.clear_calls();
    screen
}

fn fill(screen: &mut Screen<Appointment>, pairs: &[(&str, &str)]) {
    for (name, value) in pairs {
        screen.set_form_field(name, value).unwrap();
    }
}

const APPOINTMENT_FORM: &[(&str, &str)] = &[
    ("ownerFullname", "Alice Lee"),
    ("email", "alice@example.com"),
    ("phoneNumber", "555-0100"),
    ("petName", "Rex"),
    ("petType", "Dog"),
    ("petAge", "3"),
    ("petWeight", "30"),
    ("petGender", "Male"),
    ("purpose", "Vaccination"),
    ("appointmentDate", "2024-05-01 10:30"),
];

#[test]
fn test_category_filter_scenario() {
    let backend = seeded_labs();
    let mut screen = loaded::<LabDiagnostic>(&backend);

    screen.set_filter("petType", "Dog").unwrap();
    let visible = screen.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].owner_fullname, "Alice Lee");

    // Filtering never touches the backend or the collection.
    assert!(backend.calls().is_empty());
    assert_eq!(screen.records().len(), 2);
}

#[test]
fn test_create_with_missing_required_field_sends_nothing() {
    let backend = Arc::new(MemoryBackend::new());
    let mut screen = loaded::<Appointment>(&backend);

    screen.open_for_create().unwrap();
    fill(&mut screen, APPOINTMENT_FORM);
    screen.set_form_field("petName", "").unwrap();

    let errors = match screen.submit() {
        Err(ConsoleError::Validation(errors)) => errors,
        other => panic!("expected validation error, got {:?}", other),
    };
    assert_eq!(errors.for_field("petName"), Some("Please enter the pet name"));

    assert!(backend.calls().is_empty());
    let session = screen.editor().session().expect("editor stays open");
    assert_eq!(session.form["ownerFullname"], "Alice Lee");
    assert_eq!(session.errors.len(), 1);

    let notes = screen.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, "Please fix the highlighted fields");
}

#[test]
fn test_confirmed_delete_is_one_delete_then_one_get() {
    let backend = seeded_labs();
    let mut screen = loaded::<LabDiagnostic>(&backend);

    screen.request_delete("l1").unwrap();
    // Nothing is removed before confirmation.
    assert_eq!(screen.records().len(), 2);
    assert!(backend.calls().is_empty());

    screen.confirm_delete().unwrap();
    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::Delete(ResourceKind::LabDiagnostic, "l1".into()),
            BackendCall::FetchAll(ResourceKind::LabDiagnostic),
        ]
    );
    assert_eq!(screen.records().len(), 1);
    assert_eq!(
        screen.take_notifications()[0].message,
        "Lab diagnostic deleted successfully"
    );
}

#[test]
fn test_cancelled_delete_sends_nothing() {
    let backend = seeded_labs();
    let mut screen = loaded::<LabDiagnostic>(&backend);

    screen.request_delete("l2").unwrap();
    screen.cancel_delete();
    assert!(screen.editor().is_idle());
    assert!(screen.confirm_delete().is_err());
    assert!(backend.calls().is_empty());
}

#[test]
fn test_failed_delete_keeps_collection() {
    let backend = seeded_labs();
    let mut screen = loaded::<LabDiagnostic>(&backend);
    backend.fail(ResourceKind::LabDiagnostic, CallKind::Delete);

    screen.request_delete("l1").unwrap();
    let err = screen.confirm_delete().unwrap_err();
    assert!(matches!(err, ConsoleError::Mutation { .. }));
    assert_eq!(backend.calls().len(), 1);
    assert_eq!(screen.records().len(), 2);
    assert_eq!(
        screen.take_notifications()[0].message,
        "Failed to delete lab diagnostic"
    );
}

#[test]
fn test_failed_update_keeps_collection_and_editor() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed(
        ResourceKind::Pet,
        vec![json!({
            "documentId": "p1",
            "name": "Rex",
            "ownerFullname": "Alice Lee",
            "type": "Dog",
            "breed": "Labrador",
            "age": "3",
            "gender": "Male",
            "weight": "30"
        })],
    );
    let mut screen = loaded::<Pet>(&backend);
    let before = screen.records().to_vec();
    backend.fail(ResourceKind::Pet, CallKind::Update);

    screen.open_for_edit("p1").unwrap();
    screen.set_form_field("weight", "32").unwrap();
    let err = screen.submit().unwrap_err();

    assert!(matches!(err, ConsoleError::Mutation { .. }));
    assert_eq!(screen.records(), before.as_slice());
    // No refresh after a failed mutation.
    assert_eq!(backend.calls().len(), 1);

    let session = screen.editor().session().expect("editor stays open");
    assert_eq!(session.form["weight"], "32");
    assert!(!session.in_flight);

    let notes = screen.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, "Failed to update pet");

    // The same form can be retried once the backend recovers.
    backend.recover(ResourceKind::Pet, CallKind::Update);
    screen.submit().unwrap();
    assert_eq!(screen.records()[0].weight, "32");
}

#[test]
fn test_create_round_trip_rebuilds_datetime() {
    let backend = Arc::new(MemoryBackend::new());
    let mut screen = loaded::<Appointment>(&backend);

    screen.open_for_create().unwrap();
    fill(&mut screen, APPOINTMENT_FORM);
    screen.submit().unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    let BackendCall::Create(ResourceKind::Appointment, body) = &calls[0] else {
        panic!("expected create, got {:?}", calls[0]);
    };
    assert_eq!(body["date"], "2024-05-01");
    assert_eq!(body["time"], "10:30");
    assert_eq!(body["petGender"], "male");
    assert!(body.get("documentId").is_none());
    assert_eq!(calls[1], BackendCall::FetchAll(ResourceKind::Appointment));

    assert!(screen.editor().is_idle());
    let saved = screen.records()[0].clone();
    assert!(saved.document_id.is_some());
    assert_eq!(saved.pet_name, "Rex");

    let id = saved.document_id.clone().unwrap();
    screen.open_for_edit(&id).unwrap();
    let form = &screen.editor().session().unwrap().form;
    for (name, value) in APPOINTMENT_FORM {
        let expected = if *name == "petGender" { "male" } else { *value };
        assert_eq!(form.get(*name).map(String::as_str), Some(expected), "{}", name);
    }
}

#[test]
fn test_off_slot_appointment_rejected() {
    let backend = Arc::new(MemoryBackend::new());
    let mut screen = loaded::<Appointment>(&backend);

    screen.open_for_create().unwrap();
    fill(&mut screen, APPOINTMENT_FORM);
    screen.set_form_field("appointmentDate", "2024-05-01 10:45").unwrap();

    assert!(matches!(screen.submit(), Err(ConsoleError::Validation(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn test_refresh_failure_after_create_is_reported() {
    let backend = Arc::new(MemoryBackend::new());
    let mut screen = loaded::<MedicalInventory>(&backend);
    backend.fail(ResourceKind::MedicalInventory, CallKind::FetchAll);

    screen.open_for_create().unwrap();
    for (name, value) in [
        ("brand", "Zoetis"),
        ("name", "Rimadyl"),
        ("supplier", "VetSupply"),
        ("quantity", "40"),
        ("unitPrice", "2.50"),
        ("expirationDate", "2026-01-31"),
    ] {
        screen.set_form_field(name, value).unwrap();
    }
    screen.submit().unwrap();

    assert!(screen.editor().is_idle());
    assert_eq!(backend.rows(ResourceKind::MedicalInventory).len(), 1);
    let messages: Vec<_> = screen
        .take_notifications()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Medicine added successfully".to_string(),
            "Failed to load medical inventories".to_string(),
        ]
    );
}

#[test]
fn test_failed_initial_load_leaves_screen_usable() {
    let backend = Arc::new(MemoryBackend::new());
    backend.fail(ResourceKind::Pet, CallKind::FetchAll);
    let mut screen = Screen::<Pet>::new(backend.clone());

    assert!(matches!(screen.load(), Err(ConsoleError::Load { .. })));
    assert!(!screen.is_loaded());
    assert!(screen.visible().is_empty());

    backend.recover(ResourceKind::Pet, CallKind::FetchAll);
    assert_eq!(screen.refresh().unwrap(), 0);
    assert!(screen.is_loaded());
}
