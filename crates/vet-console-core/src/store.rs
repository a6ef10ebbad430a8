//! Collection store.
//!
//! Owns the in-memory copy of one resource's records. The copy is only ever
//! replaced wholesale from a full fetch; a failed fetch leaves it untouched.

use log::{debug, info};

use crate::api::{ApiError, Backend};
use crate::error::{ConsoleError, ConsoleResult};
use crate::models::Resource;

#[derive(Debug, Clone)]
pub struct CollectionStore<R: Resource> {
    records: Vec<R>,
    loaded: bool,
}

impl<R: Resource> Default for CollectionStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> CollectionStore<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loaded: false,
        }
    }

    /// Fetch every record and replace the collection.
    ///
    /// All rows must decode before anything is replaced.
    pub fn load(&mut self, backend: &dyn Backend) -> ConsoleResult<usize> {
        let kind = R::kind();
        let load_error = |source: ApiError| ConsoleError::Load {
            resource: kind,
            source,
        };

        let rows = backend.fetch_all(kind).map_err(load_error)?;
        debug!("decoding {} {} rows", rows.len(), kind);
        let records = rows
            .into_iter()
            .map(serde_json::from_value::<R>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| load_error(ApiError::Json(e)))?;

        info!("loaded {} {}", records.len(), kind.plural());
        self.records = records;
        self.loaded = true;
        Ok(self.records.len())
    }

    /// Same contract as [`CollectionStore::load`]; called after each mutation.
    pub fn refresh(&mut self, backend: &dyn Backend) -> ConsoleResult<usize> {
        self.load(backend)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether at least one load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, document_id: &str) -> Option<&R> {
        self.records
            .iter()
            .find(|r| r.document_id() == Some(document_id))
    }
}
