//! Filter engine.
//!
//! Derives the visible subset of a collection from per-field query values.
//! Active predicates combine with AND; the output keeps collection order.

use std::collections::BTreeMap;

use crate::datetime;
use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{FilterSpec, MatchMode, Resource, ResourceSchema};

/// Current query values for one screen, keyed by filter key.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    schema: &'static ResourceSchema,
    values: BTreeMap<&'static str, String>,
}

impl FilterCriteria {
    /// Empty criteria for a schema. Every record matches.
    pub fn new(schema: &'static ResourceSchema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    pub fn for_resource<R: Resource>() -> Self {
        Self::new(R::schema())
    }

    /// Set one query value. An empty value deactivates the filter.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> ConsoleResult<()> {
        let spec = self
            .schema
            .filter(key)
            .ok_or_else(|| ConsoleError::unknown_filter(key, self.schema.suggest_filter(key)))?;
        let value = value.into();
        if value.is_empty() {
            self.values.remove(spec.key);
        } else {
            self.values.insert(spec.key, value);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Active filters with their query values.
    pub fn active(&self) -> impl Iterator<Item = (&'static FilterSpec, &str)> + '_ {
        self.schema
            .filters
            .iter()
            .filter_map(|spec| self.values.get(spec.key).map(|v| (spec, v.as_str())))
    }
}

/// True when a record satisfies every active predicate.
pub fn matches<R: Resource>(record: &R, criteria: &FilterCriteria) -> bool {
    criteria
        .active()
        .all(|(spec, query)| field_matches(spec.mode, record.field(spec.field), query))
}

/// Records that satisfy the criteria, in collection order.
pub fn apply<'a, R: Resource>(records: &'a [R], criteria: &FilterCriteria) -> Vec<&'a R> {
    records.iter().filter(|r| matches(*r, criteria)).collect()
}

/// Indices of matching records, in collection order.
pub fn matching_indices<R: Resource>(records: &[R], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(*r, criteria))
        .map(|(i, _)| i)
        .collect()
}

fn field_matches(mode: MatchMode, value: Option<&str>, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    // A field missing from the record cannot satisfy a non-empty query.
    let Some(value) = value else {
        return false;
    };
    match mode {
        MatchMode::Contains => value.to_lowercase().contains(&query.to_lowercase()),
        MatchMode::Exact => value.to_lowercase() == query.to_lowercase(),
        MatchMode::SameDay => datetime::same_day(value, query),
    }
}
