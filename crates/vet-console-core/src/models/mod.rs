//! Domain models for the clinic console.
//!
//! Every resource is a flat record with a server-assigned `documentId` and a
//! static [`ResourceSchema`] describing its fields, filters and sortable columns.

mod appointment;
mod client;
mod inventory;
mod lab;
mod lenient;
mod pet;
mod schema;

pub use appointment::*;
pub use client::*;
pub use inventory::*;
pub use lab::*;
pub use pet::*;
pub use schema::*;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type managed by one screen.
pub trait Resource: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Static description of this resource.
    fn schema() -> &'static ResourceSchema;

    /// Server identity, `None` until the backend assigns one.
    fn document_id(&self) -> Option<&str>;

    /// Read a field by its wire name. Unknown or absent fields yield `None`.
    fn field(&self, name: &str) -> Option<&str>;

    /// Shorthand for `Self::schema().kind`.
    fn kind() -> ResourceKind {
        Self::schema().kind
    }
}

/// Schema of a resource kind.
pub fn schema_for(kind: ResourceKind) -> &'static ResourceSchema {
    match kind {
        ResourceKind::Appointment => &APPOINTMENT_SCHEMA,
        ResourceKind::Client => &CLIENT_SCHEMA,
        ResourceKind::Pet => &PET_SCHEMA,
        ResourceKind::LabDiagnostic => &LAB_DIAGNOSTIC_SCHEMA,
        ResourceKind::MedicalInventory => &MEDICAL_INVENTORY_SCHEMA,
    }
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
