//! In-process backend.
//!
//! Holds collections in memory, assigns `documentId`s, records every call in
//! order, and can be told to fail selected operations. Used by tests and by
//! front-ends running without a server.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use log::debug;
use serde_json::{Map, Value};

use super::{ApiError, ApiResult, Backend};
use crate::models::ResourceKind;

/// Backend operation, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    FetchAll,
    Create,
    Update,
    Delete,
}

/// One call received by the memory backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    FetchAll(ResourceKind),
    Create(ResourceKind, Value),
    Update(ResourceKind, String, Value),
    Delete(ResourceKind, String),
}

impl BackendCall {
    pub fn kind(&self) -> CallKind {
        match self {
            BackendCall::FetchAll(_) => CallKind::FetchAll,
            BackendCall::Create(..) => CallKind::Create,
            BackendCall::Update(..) => CallKind::Update,
            BackendCall::Delete(..) => CallKind::Delete,
        }
    }
}

#[derive(Default)]
struct MemoryState {
    collections: HashMap<ResourceKind, Vec<Map<String, Value>>>,
    calls: Vec<BackendCall>,
    failing: HashSet<(ResourceKind, CallKind)>,
}

/// Thread-safe in-memory backend.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a collection. Rows without a `documentId` get one.
    pub fn seed(&self, resource: ResourceKind, rows: Vec<Value>) {
        let rows = rows
            .into_iter()
            .filter_map(|row| match row {
                Value::Object(mut map) => {
                    if !map.contains_key("documentId") {
                        map.insert("documentId".into(), Value::String(new_document_id()));
                    }
                    Some(map)
                }
                _ => None,
            })
            .collect();
        self.lock().collections.insert(resource, rows);
    }

    /// Make every `call` on `resource` fail until [`MemoryBackend::recover`].
    pub fn fail(&self, resource: ResourceKind, call: CallKind) {
        self.lock().failing.insert((resource, call));
    }

    pub fn recover(&self, resource: ResourceKind, call: CallKind) {
        self.lock().failing.remove(&(resource, call));
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Current rows of a collection.
    pub fn rows(&self, resource: ResourceKind) -> Vec<Value> {
        self.lock()
            .collections
            .get(&resource)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // Poisoning is ignored; the state is plain data.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: BackendCall) -> ApiResult<MutexGuard<'_, MemoryState>> {
        let mut state = self.lock();
        let resource = match &call {
            BackendCall::FetchAll(r)
            | BackendCall::Create(r, _)
            | BackendCall::Update(r, _, _)
            | BackendCall::Delete(r, _) => *r,
        };
        let kind = call.kind();
        debug!("memory backend: {:?} {}", kind, resource);
        state.calls.push(call);
        if state.failing.contains(&(resource, kind)) {
            return Err(ApiError::Unavailable(format!(
                "simulated {:?} failure on {}",
                kind, resource
            )));
        }
        Ok(state)
    }
}

impl Backend for MemoryBackend {
    fn fetch_all(&self, resource: ResourceKind) -> ApiResult<Vec<Value>> {
        let state = self.record(BackendCall::FetchAll(resource))?;
        Ok(state
            .collections
            .get(&resource)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default())
    }

    fn create(&self, resource: ResourceKind, body: &Value) -> ApiResult<()> {
        let mut state = self.record(BackendCall::Create(resource, body.clone()))?;
        let mut row = as_object(body)?;
        row.insert("documentId".into(), Value::String(new_document_id()));
        state.collections.entry(resource).or_default().push(row);
        Ok(())
    }

    fn update(&self, resource: ResourceKind, document_id: &str, body: &Value) -> ApiResult<()> {
        let mut state = self.record(BackendCall::Update(
            resource,
            document_id.to_string(),
            body.clone(),
        ))?;
        let fields = as_object(body)?;
        let row = state
            .collections
            .get_mut(&resource)
            .and_then(|rows| rows.iter_mut().find(|r| has_id(r, document_id)))
            .ok_or_else(|| ApiError::NotFound(document_id.to_string()))?;
        for (key, value) in fields {
            if key != "documentId" {
                row.insert(key, value);
            }
        }
        Ok(())
    }

    fn delete(&self, resource: ResourceKind, document_id: &str) -> ApiResult<()> {
        let mut state = self.record(BackendCall::Delete(resource, document_id.to_string()))?;
        let rows = state
            .collections
            .get_mut(&resource)
            .ok_or_else(|| ApiError::NotFound(document_id.to_string()))?;
        let before = rows.len();
        rows.retain(|r| !has_id(r, document_id));
        if rows.len() == before {
            return Err(ApiError::NotFound(document_id.to_string()));
        }
        Ok(())
    }
}

fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn has_id(row: &Map<String, Value>, document_id: &str) -> bool {
    row.get("documentId").and_then(Value::as_str) == Some(document_id)
}

fn as_object(body: &Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(ApiError::InvalidResponse("record body must be an object".into())),
    }
}
