//! Column sorting for tabular views.
//!
//! Applied after filtering and independent of it. Sorting is stable, so rows
//! with equal keys keep their collection order.

use std::cmp::Ordering;

use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{Resource, ResourceSchema, SortColumn};

/// Requested ordering on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    /// Parse `column`, `column:asc` or `column:desc`.
    pub fn parse(input: &str) -> Option<Self> {
        let (column, direction) = match input.split_once(':') {
            Some((column, direction)) => (column, direction),
            None => (input, "asc"),
        };
        if column.is_empty() {
            return None;
        }
        match direction.to_lowercase().as_str() {
            "asc" => Some(Self::ascending(column)),
            "desc" => Some(Self::descending(column)),
            _ => None,
        }
    }

    /// Resolve the column against a schema.
    pub fn resolve(&self, schema: &ResourceSchema) -> ConsoleResult<&'static SortColumn> {
        schema.sort_column(&self.column).ok_or_else(|| {
            ConsoleError::unknown_column(&self.column, schema.suggest_sort_column(&self.column))
        })
    }
}

/// Sort key of a record for a column: its fields joined with a space.
pub fn sort_key<R: Resource>(record: &R, column: &SortColumn) -> String {
    column
        .fields
        .iter()
        .map(|f| record.field(f).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compare two keys. Numbers order numerically and before all text; text
/// orders case-insensitively.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

fn as_number(key: &str) -> Option<f64> {
    key.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Sort record references in place.
pub fn sort_records<'a, R: Resource>(records: &mut [&'a R], spec: &SortSpec) -> ConsoleResult<()> {
    let column = spec.resolve(R::schema())?;
    sort_by_column(records, column, spec.descending);
    Ok(())
}

/// Sort record references on an already resolved column.
pub fn sort_by_column<'a, R: Resource>(records: &mut [&'a R], column: &SortColumn, descending: bool) {
    let mut keyed: Vec<(String, &'a R)> = records.iter().map(|r| (sort_key(*r, column), *r)).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_keys(a, b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    for (slot, (_, record)) in records.iter_mut().zip(keyed) {
        *slot = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Pet};

    fn pet(name: &str, age: &str) -> Pet {
        Pet {
            name: name.into(),
            age: age.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_spec() {
        assert_eq!(SortSpec::parse("name"), Some(SortSpec::ascending("name")));
        assert_eq!(SortSpec::parse("age:DESC"), Some(SortSpec::descending("age")));
        assert_eq!(SortSpec::parse("age:sideways"), None);
        assert_eq!(SortSpec::parse(":asc"), None);
    }

    #[test]
    fn test_numeric_columns_sort_numerically() {
        let pets = vec![pet("a", "10"), pet("b", "9"), pet("c", "2")];
        let mut refs: Vec<&Pet> = pets.iter().collect();
        sort_records(&mut refs, &SortSpec::ascending("age")).unwrap();
        let names: Vec<_> = refs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive_and_stable() {
        let pets = vec![pet("bella", "1"), pet("Alfie", "2"), pet("Bella", "3")];
        let mut refs: Vec<&Pet> = pets.iter().collect();
        sort_records(&mut refs, &SortSpec::descending("name")).unwrap();
        let ages: Vec<_> = refs.iter().map(|p| p.age.as_str()).collect();
        assert_eq!(ages, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_multi_field_column() {
        let visit = |date: &str, time: &str| Appointment {
            date: date.into(),
            time: time.into(),
            ..Default::default()
        };
        let visits = vec![
            visit("2024-05-02", "09:00"),
            visit("2024-05-01", "14:30"),
            visit("2024-05-01", "09:30"),
        ];
        let mut refs: Vec<&Appointment> = visits.iter().collect();
        sort_records(&mut refs, &SortSpec::ascending("appointmentDateTime")).unwrap();
        let times: Vec<_> = refs.iter().map(|a| a.time.as_str()).collect();
        assert_eq!(times, vec!["09:30", "14:30", "09:00"]);
    }

    #[test]
    fn test_mixed_column_puts_numbers_before_text() {
        let pets = vec![pet("a", "10"), pet("b", "1a"), pet("c", "2"), pet("d", "Adult")];
        let mut refs: Vec<&Pet> = pets.iter().collect();
        sort_records(&mut refs, &SortSpec::ascending("age")).unwrap();
        let ages: Vec<_> = refs.iter().map(|p| p.age.as_str()).collect();
        assert_eq!(ages, vec!["2", "10", "1a", "Adult"]);

        sort_records(&mut refs, &SortSpec::descending("age")).unwrap();
        let ages: Vec<_> = refs.iter().map(|p| p.age.as_str()).collect();
        assert_eq!(ages, vec!["Adult", "1a", "10", "2"]);
    }

    #[test]
    fn test_compare_keys_is_transitive() {
        let keys = ["2", "10", "1a", "1 year", "", "abc", "-3", "NaN"];
        for a in keys {
            for b in keys {
                for c in keys {
                    if compare_keys(a, b).is_le() && compare_keys(b, c).is_le() {
                        assert!(compare_keys(a, c).is_le(), "{} <= {} <= {}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_column() {
        let pets = vec![pet("a", "1")];
        let mut refs: Vec<&Pet> = pets.iter().collect();
        assert!(sort_records(&mut refs, &SortSpec::ascending("colour")).is_err());
    }
}
