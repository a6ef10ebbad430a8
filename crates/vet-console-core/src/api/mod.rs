//! Backend access.
//!
//! One REST resource per [`ResourceKind`]:
//!
//! ```text
//! GET    /{resource}                          → all records
//! POST   /{resource}/create   (appointments: /book)
//! PUT    /{resource}/update?documentId={id}
//! DELETE /{resource}/delete?documentId={id}
//! ```
//!
//! Bodies are flat JSON objects. The [`Backend`] trait is the seam screens talk
//! through; [`HttpBackend`] is the real adapter and [`MemoryBackend`] an
//! in-process stand-in.

mod http;
mod memory;

pub use http::*;
pub use memory::*;

use serde_json::Value;
use thiserror::Error;

use crate::models::ResourceKind;

/// Backend errors. Callers do not distinguish transport from rejection.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// CRUD access to the clinic backend.
pub trait Backend: Send + Sync {
    /// Fetch the full collection, in backend order.
    fn fetch_all(&self, resource: ResourceKind) -> ApiResult<Vec<Value>>;

    /// Create a record. The body carries no `documentId`.
    fn create(&self, resource: ResourceKind, body: &Value) -> ApiResult<()>;

    /// Replace the fields of the record identified by `document_id`.
    fn update(&self, resource: ResourceKind, document_id: &str, body: &Value) -> ApiResult<()>;

    fn delete(&self, resource: ResourceKind, document_id: &str) -> ApiResult<()>;
}

impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    fn fetch_all(&self, resource: ResourceKind) -> ApiResult<Vec<Value>> {
        (**self).fetch_all(resource)
    }

    fn create(&self, resource: ResourceKind, body: &Value) -> ApiResult<()> {
        (**self).create(resource, body)
    }

    fn update(&self, resource: ResourceKind, document_id: &str, body: &Value) -> ApiResult<()> {
        (**self).update(resource, document_id, body)
    }

    fn delete(&self, resource: ResourceKind, document_id: &str) -> ApiResult<()> {
        (**self).delete(resource, document_id)
    }
}
