//! Vet Console Core Library
//!
//! Record-management core for a veterinary clinic console: appointments,
//! clients, pet patients, lab diagnostics and medical inventory, each kept in
//! sync with a REST backend.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────────── Screen<R> ────────────────────┐
//!            │                                                   │
//! Backend ──▶│ CollectionStore ──▶ Filter ──▶ Sort ──▶ visible   │──▶ front-end
//!    ▲       │                                                   │
//!    │       │ RecordEditor: validate → split date/time → body   │
//!    │       └───────────────────────────┬───────────────────────┘
//!    └──── create / update / delete ─────┘ then one full refresh
//! ```
//!
//! # Core Principle
//!
//! **The backend is the single source of truth.** The in-memory collection is
//! only ever replaced by a full fetch; writes are never applied locally.
//!
//! # Modules
//!
//! - [`models`]: Record types and their declarative schemas
//! - [`api`]: Backend trait, HTTP adapter and in-memory backend
//! - [`store`]: Collection store
//! - [`filter`] / [`sort`]: Derived, read-only views of the collection
//! - [`validation`] / [`editor`]: Add-or-edit form workflow
//! - [`screen`]: One generic screen per resource
//! - [`layout`]: Shared navigation chrome
//! - [`config`]: Backend location and timeouts

pub mod api;
pub mod config;
pub mod datetime;
pub mod editor;
pub mod error;
pub mod filter;
pub mod layout;
pub mod models;
pub mod notify;
pub mod screen;
pub mod sort;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use api::{ApiError, Backend, HttpBackend, MemoryBackend};
pub use config::{ConfigError, ConsoleConfig};
pub use error::{ConsoleError, ConsoleResult};
pub use models::{
    Appointment, Client, LabDiagnostic, MedicalInventory, Pet, Resource, ResourceKind,
};
pub use screen::{open_screen, Row, Screen, ScreenHandle};
pub use sort::SortSpec;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use models::FieldKind;
use notify::NotificationLevel;
use screen::EditorPhase;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum VetConsoleError {
    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<ConsoleError> for VetConsoleError {
    fn from(e: ConsoleError) -> Self {
        match e {
            ConsoleError::Load { .. } | ConsoleError::Mutation { .. } | ConsoleError::Encode(_) => {
                VetConsoleError::BackendError(e.to_string())
            }
            ConsoleError::Validation(errors) => VetConsoleError::ValidationError(errors.to_string()),
            ConsoleError::NotFound(id) => VetConsoleError::NotFound(id),
            ConsoleError::Unknown { .. }
            | ConsoleError::InvalidState(_)
            | ConsoleError::SubmitInFlight => VetConsoleError::InvalidInput(e.to_string()),
        }
    }
}

impl From<ApiError> for VetConsoleError {
    fn from(e: ApiError) -> Self {
        VetConsoleError::BackendError(e.to_string())
    }
}

impl From<ConfigError> for VetConsoleError {
    fn from(e: ConfigError) -> Self {
        VetConsoleError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for VetConsoleError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        VetConsoleError::BackendError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Connect to a REST backend.
#[uniffi::export]
pub fn connect(config: FfiConsoleConfig) -> Result<Arc<ClinicConsole>, VetConsoleError> {
    let config = ConsoleConfig {
        base_url: config.base_url,
        timeout_secs: config.timeout_secs,
    };
    config.validate()?;
    let backend = HttpBackend::from_config(&config)?;
    Ok(Arc::new(ClinicConsole::new(Arc::new(backend))))
}

/// Console over an empty in-memory backend (for testing and demos).
#[uniffi::export]
pub fn connect_in_memory() -> Arc<ClinicConsole> {
    Arc::new(ClinicConsole::new(Arc::new(MemoryBackend::new())))
}

/// Application title shown in the header.
#[uniffi::export]
pub fn app_title() -> String {
    layout::APP_TITLE.to_string()
}

/// Menu items with the entry for `current_key` selected.
#[uniffi::export]
pub fn navigation(current_key: String) -> Vec<FfiNavItem> {
    layout::navigation(layout::Route::from_key(&current_key))
        .into_iter()
        .map(|i| i.into())
        .collect()
}

#[uniffi::export]
pub fn footer() -> String {
    layout::current_footer()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe set of screens, one per resource.
#[derive(uniffi::Object)]
pub struct ClinicConsole {
    screens: Mutex<HashMap<ResourceKind, Box<dyn ScreenHandle>>>,
}

impl ClinicConsole {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let screens = ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, open_screen(kind, backend.clone())))
            .collect();
        Self {
            screens: Mutex::new(screens),
        }
    }

    fn with_screen<T>(
        &self,
        resource: FfiResource,
        f: impl FnOnce(&mut dyn ScreenHandle) -> ConsoleResult<T>,
    ) -> Result<T, VetConsoleError> {
        let kind: ResourceKind = resource.into();
        let mut screens = self.screens.lock()?;
        let screen = screens
            .get_mut(&kind)
            .ok_or_else(|| VetConsoleError::NotFound(kind.to_string()))?;
        Ok(f(screen.as_mut())?)
    }
}

#[uniffi::export]
impl ClinicConsole {
    // =========================================================================
    // Collection Operations
    // =========================================================================

    /// Fetch the full collection, replacing what is held.
    pub fn load(&self, resource: FfiResource) -> Result<u32, VetConsoleError> {
        self.with_screen(resource, |s| s.load().map(|n| n as u32))
    }

    /// Rows to display, filtered and sorted.
    pub fn rows(&self, resource: FfiResource) -> Result<Vec<FfiRow>, VetConsoleError> {
        self.with_screen(resource, |s| Ok(s.rows().into_iter().map(|r| r.into()).collect()))
    }

    /// Size of the full collection.
    pub fn total(&self, resource: FfiResource) -> Result<u32, VetConsoleError> {
        self.with_screen(resource, |s| Ok(s.total() as u32))
    }

    // =========================================================================
    // Filter and Sort
    // =========================================================================

    /// Set a filter value. An empty value clears that filter.
    pub fn set_filter(
        &self,
        resource: FfiResource,
        key: String,
        value: String,
    ) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.set_filter(&key, &value))
    }

    pub fn clear_filters(&self, resource: FfiResource) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| {
            s.clear_filters();
            Ok(())
        })
    }

    /// Sort on a column, or pass `None` to restore collection order.
    pub fn set_sort(
        &self,
        resource: FfiResource,
        column: Option<String>,
        descending: bool,
    ) -> Result<(), VetConsoleError> {
        let spec = column.map(|column| SortSpec { column, descending });
        self.with_screen(resource, |s| s.set_sort(spec))
    }

    /// Filter inputs for a screen.
    pub fn filters(&self, resource: FfiResource) -> Result<Vec<FfiFilter>, VetConsoleError> {
        self.with_screen(resource, |s| {
            Ok(s.schema()
                .filters
                .iter()
                .map(|f| FfiFilter {
                    key: f.key.to_string(),
                    label: f.label.to_string(),
                    value: s.filter_value(f.key),
                })
                .collect())
        })
    }

    // =========================================================================
    // Editor Operations
    // =========================================================================

    /// Editor form fields for a screen.
    pub fn form_fields(&self, resource: FfiResource) -> Result<Vec<FfiFieldSpec>, VetConsoleError> {
        self.with_screen(resource, |s| Ok(s.schema().fields.iter().map(|f| f.into()).collect()))
    }

    pub fn open_for_create(&self, resource: FfiResource) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.open_for_create())
    }

    pub fn open_for_edit(
        &self,
        resource: FfiResource,
        document_id: String,
    ) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.open_for_edit(&document_id))
    }

    pub fn set_form_field(
        &self,
        resource: FfiResource,
        name: String,
        value: String,
    ) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.set_form_field(&name, &value))
    }

    /// Current form values, or `None` when no form is open.
    pub fn form(
        &self,
        resource: FfiResource,
    ) -> Result<Option<HashMap<String, String>>, VetConsoleError> {
        self.with_screen(resource, |s| Ok(s.form().map(|f| f.into_iter().collect())))
    }

    /// Violations from the last submit attempt.
    pub fn form_errors(&self, resource: FfiResource) -> Result<Vec<FfiFieldError>, VetConsoleError> {
        self.with_screen(resource, |s| {
            Ok(s.form_errors()
                .iter()
                .map(|e| FfiFieldError {
                    field: e.field.clone(),
                    message: e.message.clone(),
                })
                .collect())
        })
    }

    pub fn editor_phase(&self, resource: FfiResource) -> Result<FfiEditorPhase, VetConsoleError> {
        self.with_screen(resource, |s| Ok(s.phase().into()))
    }

    /// Validate and send the open form, then refresh on success.
    pub fn submit(&self, resource: FfiResource) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.submit())
    }

    pub fn cancel_edit(&self, resource: FfiResource) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.cancel_edit())
    }

    // =========================================================================
    // Delete Operations
    // =========================================================================

    pub fn request_delete(
        &self,
        resource: FfiResource,
        document_id: String,
    ) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.request_delete(&document_id))
    }

    pub fn confirm_delete(&self, resource: FfiResource) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| s.confirm_delete())
    }

    pub fn cancel_delete(&self, resource: FfiResource) -> Result<(), VetConsoleError> {
        self.with_screen(resource, |s| {
            s.cancel_delete();
            Ok(())
        })
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Pending notifications for a screen, oldest first. Each is returned once.
    pub fn take_notifications(
        &self,
        resource: FfiResource,
    ) -> Result<Vec<FfiNotification>, VetConsoleError> {
        self.with_screen(resource, |s| {
            Ok(s.take_notifications().into_iter().map(|n| n.into()).collect())
        })
    }
}

// =========================================================================
// FFI Types
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiResource {
    Appointment,
    Client,
    Pet,
    LabDiagnostic,
    MedicalInventory,
}

impl From<FfiResource> for ResourceKind {
    fn from(resource: FfiResource) -> Self {
        match resource {
            FfiResource::Appointment => ResourceKind::Appointment,
            FfiResource::Client => ResourceKind::Client,
            FfiResource::Pet => ResourceKind::Pet,
            FfiResource::LabDiagnostic => ResourceKind::LabDiagnostic,
            FfiResource::MedicalInventory => ResourceKind::MedicalInventory,
        }
    }
}

/// FFI-safe backend settings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConsoleConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// FFI-safe table row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRow {
    pub document_id: Option<String>,
    pub fields: HashMap<String, String>,
}

impl From<Row> for FfiRow {
    fn from(row: Row) -> Self {
        Self {
            document_id: row.document_id,
            fields: row.fields.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilter {
    pub key: String,
    pub label: String,
    pub value: Option<String>,
}

/// FFI-safe form field description.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldSpec {
    pub name: String,
    pub label: String,
    /// text, long_text, email, number, choice, date or datetime
    pub kind: String,
    pub required: bool,
    /// Allowed values for choice fields
    pub options: Vec<String>,
    /// Slot size for datetime fields
    pub minute_step: Option<u32>,
}

impl From<&models::FieldSpec> for FfiFieldSpec {
    fn from(spec: &models::FieldSpec) -> Self {
        let (kind, options, minute_step) = match spec.kind {
            FieldKind::Text => ("text", Vec::new(), None),
            FieldKind::LongText => ("long_text", Vec::new(), None),
            FieldKind::Email => ("email", Vec::new(), None),
            FieldKind::Number => ("number", Vec::new(), None),
            FieldKind::Choice(options) => (
                "choice",
                options.iter().map(|o| o.to_string()).collect(),
                None,
            ),
            FieldKind::Date => ("date", Vec::new(), None),
            FieldKind::DateTime { minute_step, .. } => ("datetime", Vec::new(), minute_step),
        };
        Self {
            name: spec.name.to_string(),
            label: spec.label.to_string(),
            kind: kind.to_string(),
            required: spec.required,
            options,
            minute_step,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiEditorPhase {
    Idle,
    Editing {
        document_id: Option<String>,
        in_flight: bool,
    },
    ConfirmingDelete {
        document_id: String,
    },
}

impl From<EditorPhase> for FfiEditorPhase {
    fn from(phase: EditorPhase) -> Self {
        match phase {
            EditorPhase::Idle => FfiEditorPhase::Idle,
            EditorPhase::Editing {
                document_id,
                in_flight,
            } => FfiEditorPhase::Editing {
                document_id,
                in_flight,
            },
            EditorPhase::ConfirmingDelete { document_id } => {
                FfiEditorPhase::ConfirmingDelete { document_id }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiNotificationLevel {
    Success,
    Error,
}

/// FFI-safe notification.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    pub id: u64,
    pub level: FfiNotificationLevel,
    pub message: String,
}

impl From<notify::Notification> for FfiNotification {
    fn from(n: notify::Notification) -> Self {
        Self {
            id: n.id,
            level: match n.level {
                NotificationLevel::Success => FfiNotificationLevel::Success,
                NotificationLevel::Error => FfiNotificationLevel::Error,
            },
            message: n.message,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNavItem {
    pub key: String,
    pub label: String,
    pub path: String,
    pub selected: bool,
}

impl From<layout::NavItem> for FfiNavItem {
    fn from(item: layout::NavItem) -> Self {
        Self {
            key: item.key.to_string(),
            label: item.label.to_string(),
            path: item.path.to_string(),
            selected: item.selected,
        }
    }
}
