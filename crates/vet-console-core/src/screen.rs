//! Generic record-management screen.
//!
//! A [`Screen`] composes the collection store, filter criteria, an optional
//! column sort, the record editor and a notification queue for one resource.
//! Every mutation follows the same sequence: request, then on success exactly
//! one full refresh. Nothing is patched into the collection locally.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::api::{ApiError, Backend};
use crate::editor::{EditorMode, EditorState, FormValues, RecordEditor};
use crate::error::{ConsoleError, ConsoleResult, Operation};
use crate::filter::{self, FilterCriteria};
use crate::models::{
    Appointment, Client, LabDiagnostic, MedicalInventory, Pet, Resource, ResourceKind,
    ResourceSchema, SortColumn,
};
use crate::notify::{Notification, Notifications};
use crate::sort::{self, SortSpec};
use crate::store::CollectionStore;
use crate::validation::ValidationErrors;

/// Queued when a submit is blocked by validation.
pub const VALIDATION_NOTICE: &str = "Please fix the highlighted fields";

pub struct Screen<R: Resource> {
    backend: Arc<dyn Backend>,
    store: CollectionStore<R>,
    criteria: FilterCriteria,
    sort: Option<(SortSpec, &'static SortColumn)>,
    editor: RecordEditor<R>,
    notifications: Notifications,
}

impl<R: Resource> Screen<R> {
    /// A screen with an empty collection. Call [`Screen::load`] to populate it.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            store: CollectionStore::new(),
            criteria: FilterCriteria::for_resource::<R>(),
            sort: None,
            editor: RecordEditor::new(),
            notifications: Notifications::new(),
        }
    }

    /// Fetch the collection. Failures are also queued as a notification.
    pub fn load(&mut self) -> ConsoleResult<usize> {
        let result = self.store.load(self.backend.as_ref());
        if result.is_err() {
            self.notifications
                .error(format!("Failed to load {}", R::kind().plural()));
        }
        result
    }

    pub fn refresh(&mut self) -> ConsoleResult<usize> {
        self.load()
    }

    pub fn records(&self) -> &[R] {
        self.store.records()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn set_filter(&mut self, key: &str, value: &str) -> ConsoleResult<()> {
        self.criteria.set(key, value)
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Set or remove the column sort. Unknown columns are rejected.
    pub fn set_sort(&mut self, spec: Option<SortSpec>) -> ConsoleResult<()> {
        self.sort = match spec {
            Some(spec) => {
                let column = spec.resolve(R::schema())?;
                Some((spec, column))
            }
            None => None,
        };
        Ok(())
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref().map(|(spec, _)| spec)
    }

    /// Records to display: filtered, then sorted if a sort is set.
    pub fn visible(&self) -> Vec<&R> {
        let mut rows = filter::apply(self.store.records(), &self.criteria);
        if let Some((spec, column)) = &self.sort {
            sort::sort_by_column(&mut rows, column, spec.descending);
        }
        rows
    }

    pub fn editor(&self) -> &RecordEditor<R> {
        &self.editor
    }

    pub fn open_for_create(&mut self) -> ConsoleResult<()> {
        self.editor.open_for_create()
    }

    pub fn open_for_edit(&mut self, document_id: &str) -> ConsoleResult<()> {
        let record = self
            .store
            .get(document_id)
            .ok_or_else(|| ConsoleError::NotFound(document_id.to_string()))?;
        self.editor.open_for_edit(record)
    }

    pub fn set_form_field(&mut self, name: &str, value: &str) -> ConsoleResult<()> {
        self.editor.set_field(name, value)
    }

    /// Validate and send the open form.
    ///
    /// On success the editor closes and the collection is refreshed. On
    /// failure the editor stays open with its values and the collection is
    /// left as it was.
    pub fn submit(&mut self) -> ConsoleResult<()> {
        let pending = match self.editor.begin_submit() {
            Ok(pending) => pending,
            Err(err @ ConsoleError::Validation(_)) => {
                self.notifications.error(VALIDATION_NOTICE);
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let kind = R::kind();
        let (operation, result) = match &pending.mode {
            EditorMode::Create => {
                debug!("creating {}", kind.noun());
                (Operation::Create, self.backend.create(kind, &pending.body))
            }
            EditorMode::Update { document_id } => {
                debug!("updating {} {}", kind.noun(), document_id);
                (
                    Operation::Update,
                    self.backend.update(kind, document_id, &pending.body),
                )
            }
        };

        match result {
            Ok(()) => {
                self.editor.complete_submit(true);
                self.mutation_succeeded(operation);
                Ok(())
            }
            Err(source) => {
                self.editor.complete_submit(false);
                Err(self.mutation_failed(operation, source))
            }
        }
    }

    pub fn cancel_edit(&mut self) -> ConsoleResult<()> {
        self.editor.cancel()
    }

    /// Ask for confirmation before deleting a record in the collection.
    pub fn request_delete(&mut self, document_id: &str) -> ConsoleResult<()> {
        if self.store.get(document_id).is_none() {
            return Err(ConsoleError::NotFound(document_id.to_string()));
        }
        self.editor.request_delete(document_id)
    }

    /// Send the confirmed delete, then refresh.
    pub fn confirm_delete(&mut self) -> ConsoleResult<()> {
        let document_id = self.editor.confirm_delete()?;
        let kind = R::kind();
        debug!("deleting {} {}", kind.noun(), document_id);
        match self.backend.delete(kind, &document_id) {
            Ok(()) => {
                self.mutation_succeeded(Operation::Delete);
                Ok(())
            }
            Err(source) => Err(self.mutation_failed(Operation::Delete, source)),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.editor.cancel_delete();
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.pending()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn mutation_succeeded(&mut self, operation: Operation) {
        self.notifications.success(format!(
            "{} {} successfully",
            R::kind().title(),
            operation.past()
        ));
        // A failed refresh is already queued as a notification; the mutation
        // itself went through.
        if let Err(err) = self.refresh() {
            debug!("refresh after {:?} failed: {}", operation, err);
        }
    }

    fn mutation_failed(&mut self, operation: Operation, source: ApiError) -> ConsoleError {
        let kind = R::kind();
        self.notifications
            .error(format!("Failed to {} {}", operation.verb(), kind.noun()));
        ConsoleError::Mutation {
            resource: kind,
            operation,
            source,
        }
    }
}

/// A record flattened to its stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub document_id: Option<String>,
    /// Present fields only, keyed by wire name
    pub fields: BTreeMap<String, String>,
}

impl Row {
    pub fn from_record<R: Resource>(record: &R) -> Self {
        let fields = R::schema()
            .stored_fields()
            .into_iter()
            .filter_map(|name| record.field(name).map(|v| (name.to_string(), v.to_string())))
            .collect();
        Self {
            document_id: record.document_id().map(str::to_string),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|v| v.as_str())
    }
}

/// Editor state without the record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    /// `document_id` is `None` while creating
    Editing {
        document_id: Option<String>,
        in_flight: bool,
    },
    ConfirmingDelete {
        document_id: String,
    },
}

/// Type-erased screen, so front-ends can hold one per resource.
pub trait ScreenHandle: Send {
    fn kind(&self) -> ResourceKind;
    fn schema(&self) -> &'static ResourceSchema;

    fn load(&mut self) -> ConsoleResult<usize>;
    fn refresh(&mut self) -> ConsoleResult<usize>;
    fn is_loaded(&self) -> bool;
    /// Size of the full collection
    fn total(&self) -> usize;

    fn set_filter(&mut self, key: &str, value: &str) -> ConsoleResult<()>;
    fn filter_value(&self, key: &str) -> Option<String>;
    fn clear_filters(&mut self);
    fn set_sort(&mut self, spec: Option<SortSpec>) -> ConsoleResult<()>;
    /// Filtered and sorted rows
    fn rows(&self) -> Vec<Row>;

    fn phase(&self) -> EditorPhase;
    fn form(&self) -> Option<FormValues>;
    fn form_errors(&self) -> ValidationErrors;
    fn open_for_create(&mut self) -> ConsoleResult<()>;
    fn open_for_edit(&mut self, document_id: &str) -> ConsoleResult<()>;
    fn set_form_field(&mut self, name: &str, value: &str) -> ConsoleResult<()>;
    fn submit(&mut self) -> ConsoleResult<()>;
    fn cancel_edit(&mut self) -> ConsoleResult<()>;

    fn request_delete(&mut self, document_id: &str) -> ConsoleResult<()>;
    fn confirm_delete(&mut self) -> ConsoleResult<()>;
    fn cancel_delete(&mut self);

    fn take_notifications(&mut self) -> Vec<Notification>;
}

impl<R: Resource> ScreenHandle for Screen<R> {
    fn kind(&self) -> ResourceKind {
        R::kind()
    }

    fn schema(&self) -> &'static ResourceSchema {
        R::schema()
    }

    fn load(&mut self) -> ConsoleResult<usize> {
        Screen::<R>::load(self)
    }

    fn refresh(&mut self) -> ConsoleResult<usize> {
        Screen::<R>::refresh(self)
    }

    fn is_loaded(&self) -> bool {
        Screen::<R>::is_loaded(self)
    }

    fn total(&self) -> usize {
        self.store.len()
    }

    fn set_filter(&mut self, key: &str, value: &str) -> ConsoleResult<()> {
        Screen::<R>::set_filter(self, key, value)
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        self.criteria.get(key).map(str::to_string)
    }

    fn clear_filters(&mut self) {
        Screen::<R>::clear_filters(self)
    }

    fn set_sort(&mut self, spec: Option<SortSpec>) -> ConsoleResult<()> {
        Screen::<R>::set_sort(self, spec)
    }

    fn rows(&self) -> Vec<Row> {
        self.visible().into_iter().map(Row::from_record).collect()
    }

    fn phase(&self) -> EditorPhase {
        match self.editor.state() {
            EditorState::Idle => EditorPhase::Idle,
            EditorState::Editing(session) => EditorPhase::Editing {
                document_id: match &session.mode {
                    EditorMode::Create => None,
                    EditorMode::Update { document_id } => Some(document_id.clone()),
                },
                in_flight: session.in_flight,
            },
            EditorState::ConfirmingDelete { document_id } => EditorPhase::ConfirmingDelete {
                document_id: document_id.clone(),
            },
        }
    }

    fn form(&self) -> Option<FormValues> {
        self.editor.session().map(|s| s.form.clone())
    }

    fn form_errors(&self) -> ValidationErrors {
        self.editor
            .session()
            .map(|s| s.errors.clone())
            .unwrap_or_default()
    }

    fn open_for_create(&mut self) -> ConsoleResult<()> {
        Screen::<R>::open_for_create(self)
    }

    fn open_for_edit(&mut self, document_id: &str) -> ConsoleResult<()> {
        Screen::<R>::open_for_edit(self, document_id)
    }

    fn set_form_field(&mut self, name: &str, value: &str) -> ConsoleResult<()> {
        Screen::<R>::set_form_field(self, name, value)
    }

    fn submit(&mut self) -> ConsoleResult<()> {
        Screen::<R>::submit(self)
    }

    fn cancel_edit(&mut self) -> ConsoleResult<()> {
        Screen::<R>::cancel_edit(self)
    }

    fn request_delete(&mut self, document_id: &str) -> ConsoleResult<()> {
        Screen::<R>::request_delete(self, document_id)
    }

    fn confirm_delete(&mut self) -> ConsoleResult<()> {
        Screen::<R>::confirm_delete(self)
    }

    fn cancel_delete(&mut self) {
        Screen::<R>::cancel_delete(self)
    }

    fn take_notifications(&mut self) -> Vec<Notification> {
        Screen::<R>::take_notifications(self)
    }
}

/// Build the screen for a resource.
pub fn open_screen(kind: ResourceKind, backend: Arc<dyn Backend>) -> Box<dyn ScreenHandle> {
    match kind {
        ResourceKind::Appointment => Box::new(Screen::<Appointment>::new(backend)),
        ResourceKind::Client => Box::new(Screen::<Client>::new(backend)),
        ResourceKind::Pet => Box::new(Screen::<Pet>::new(backend)),
        ResourceKind::LabDiagnostic => Box::new(Screen::<LabDiagnostic>::new(backend)),
        ResourceKind::MedicalInventory => Box::new(Screen::<MedicalInventory>::new(backend)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BackendCall, CallKind, MemoryBackend};
    use crate::notify::NotificationLevel;
    use serde_json::json;

    fn pet_screen() -> (Arc<MemoryBackend>, Screen<Pet>) {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed(
            ResourceKind::Pet,
            vec![
                json!({ "documentId": "p1", "name": "Rex", "ownerFullname": "Alice Lee", "type": "Dog", "age": "10" }),
                json!({ "documentId": "p2", "name": "Tom", "ownerFullname": "Bob Han", "type": "Cat", "age": "2" }),
            ],
        );
        let mut screen = Screen::<Pet>::new(backend.clone());
        screen.load().unwrap();
        backend.clear_calls();
        (backend, screen)
    }

    #[test]
    fn test_visible_filters_then_sorts() {
        let (_, mut screen) = pet_screen();
        screen.set_sort(Some(SortSpec::ascending("age"))).unwrap();
        let names: Vec<_> = screen.visible().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Tom", "Rex"]);

        screen.set_filter("petType", "dog").unwrap();
        assert_eq!(screen.visible().len(), 1);
        screen.clear_filters();
        assert_eq!(screen.visible().len(), 2);
    }

    #[test]
    fn test_unknown_sort_column_keeps_previous() {
        let (_, mut screen) = pet_screen();
        screen.set_sort(Some(SortSpec::descending("name"))).unwrap();
        assert!(screen.set_sort(Some(SortSpec::ascending("colour"))).is_err());
        assert_eq!(screen.sort(), Some(&SortSpec::descending("name")));
    }

    #[test]
    fn test_load_failure_notifies() {
        let backend = Arc::new(MemoryBackend::new());
        backend.fail(ResourceKind::Pet, CallKind::FetchAll);
        let mut screen = Screen::<Pet>::new(backend);

        assert!(screen.load().is_err());
        let notes = screen.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, "Failed to load pets");
    }

    #[test]
    fn test_edit_sends_update_then_refresh() {
        let (backend, mut screen) = pet_screen();
        screen.open_for_edit("p2").unwrap();
        for (name, value) in [("breed", "Siamese"), ("gender", "female"), ("weight", "4")] {
            screen.set_form_field(name, value).unwrap();
        }
        screen.submit().unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            BackendCall::Update(ResourceKind::Pet, id, body) => {
                assert_eq!(id, "p2");
                assert_eq!(body["gender"], "Female");
                assert!(body.get("documentId").is_none());
            }
            other => panic!("unexpected call {:?}", other),
        }
        assert_eq!(calls[1], BackendCall::FetchAll(ResourceKind::Pet));
        assert_eq!(screen.store.get("p2").map(|p| p.breed.as_str()), Some("Siamese"));
        assert_eq!(
            screen.take_notifications()[0].message,
            "Pet updated successfully"
        );
    }

    #[test]
    fn test_delete_requires_known_id() {
        let (backend, mut screen) = pet_screen();
        assert!(matches!(
            screen.request_delete("missing"),
            Err(ConsoleError::NotFound(_))
        ));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_handle_rows_are_flat() {
        let (backend, _) = pet_screen();
        let mut handle = open_screen(ResourceKind::Pet, backend);
        handle.load().unwrap();
        let rows = handle.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].document_id.as_deref(), Some("p1"));
        assert_eq!(rows[0].get("ownerFullname"), Some("Alice Lee"));
        assert_eq!(rows[0].get("breed"), None);
        assert_eq!(handle.phase(), EditorPhase::Idle);

        handle.open_for_create().unwrap();
        assert_eq!(
            handle.phase(),
            EditorPhase::Editing {
                document_id: None,
                in_flight: false
            }
        );
    }
}
