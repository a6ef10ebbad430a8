//! Console error types.

use thiserror::Error;

use crate::api::ApiError;
use crate::models::ResourceKind;
use crate::validation::ValidationErrors;

/// A mutating backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Verb used in failure messages ("Failed to add pet").
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Participle used in success messages ("Pet added successfully").
    pub fn past(&self) -> &'static str {
        match self {
            Operation::Create => "added",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        }
    }
}

/// Errors surfaced by screens and their components.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Failed to load {}: {}", .resource.plural(), .source)]
    Load {
        resource: ResourceKind,
        source: ApiError,
    },

    #[error("Failed to {} {}: {}", .operation.verb(), .resource.noun(), .source)]
    Mutation {
        resource: ResourceKind,
        operation: Operation,
        source: ApiError,
    },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Unknown {kind} '{name}'{}", .suggestion.map(|s| format!(" (did you mean '{}'?)", s)).unwrap_or_default())]
    Unknown {
        kind: &'static str,
        name: String,
        suggestion: Option<&'static str>,
    },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid editor state: {0}")]
    InvalidState(String),

    #[error("A submission is already in flight")]
    SubmitInFlight,

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ConsoleError {
    pub(crate) fn unknown_field(name: &str, suggestion: Option<&'static str>) -> Self {
        ConsoleError::Unknown {
            kind: "field",
            name: name.to_string(),
            suggestion,
        }
    }

    pub(crate) fn unknown_filter(name: &str, suggestion: Option<&'static str>) -> Self {
        ConsoleError::Unknown {
            kind: "filter",
            name: name.to_string(),
            suggestion,
        }
    }

    pub(crate) fn unknown_column(name: &str, suggestion: Option<&'static str>) -> Self {
        ConsoleError::Unknown {
            kind: "column",
            name: name.to_string(),
            suggestion,
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
