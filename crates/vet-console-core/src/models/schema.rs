//! Declarative resource schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five backend resources the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Appointment,
    Client,
    Pet,
    LabDiagnostic,
    MedicalInventory,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Appointment,
        ResourceKind::Client,
        ResourceKind::Pet,
        ResourceKind::LabDiagnostic,
        ResourceKind::MedicalInventory,
    ];

    /// REST path segment (`GET /{path}`).
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "appointment",
            ResourceKind::Client => "client",
            ResourceKind::Pet => "pet",
            ResourceKind::LabDiagnostic => "lab",
            ResourceKind::MedicalInventory => "medical",
        }
    }

    /// Action segment used for creation. Appointments are booked.
    pub fn create_action(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "book",
            _ => "create",
        }
    }

    /// Capitalized singular noun ("Pet added successfully").
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "Appointment",
            ResourceKind::Client => "Client",
            ResourceKind::Pet => "Pet",
            ResourceKind::LabDiagnostic => "Lab diagnostic",
            ResourceKind::MedicalInventory => "Medicine",
        }
    }

    /// Lowercase singular noun ("Failed to add pet").
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "appointment",
            ResourceKind::Client => "client",
            ResourceKind::Pet => "pet",
            ResourceKind::LabDiagnostic => "lab diagnostic",
            ResourceKind::MedicalInventory => "medicine",
        }
    }

    /// Lowercase plural noun ("Failed to load pets").
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Appointment => "appointments",
            ResourceKind::Client => "clients",
            ResourceKind::Pet => "pets",
            ResourceKind::LabDiagnostic => "lab diagnostics",
            ResourceKind::MedicalInventory => "medical inventories",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "appointment" | "appointments" => Ok(ResourceKind::Appointment),
            "client" | "clients" => Ok(ResourceKind::Client),
            "pet" | "pets" => Ok(ResourceKind::Pet),
            "lab" | "lab-diagnostic" | "lab_diagnostic" | "labs" => Ok(ResourceKind::LabDiagnostic),
            "medical" | "inventory" | "medical-inventory" | "medical_inventory" => {
                Ok(ResourceKind::MedicalInventory)
            }
            other => Err(format!("unknown resource: {}", other)),
        }
    }
}

/// Input kind of an editor field, which also selects its validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    /// Numeric quantity carried as a string.
    Number,
    /// One of a fixed set of options, matched case-insensitively.
    Choice(&'static [&'static str]),
    /// Calendar date `YYYY-MM-DD`.
    Date,
    /// Editor-only composite value, stored as two separate fields.
    DateTime {
        date_field: &'static str,
        time_field: &'static str,
        minute_step: Option<u32>,
    },
}

/// One field of the editor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Message shown when a required value is missing
    pub message: &'static str,
}

impl FieldSpec {
    pub const fn required(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        message: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            message,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            message: "",
        }
    }
}

/// How a filter value is compared with the record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment
    Contains,
    /// Case-insensitive equality (categorical fields)
    Exact,
    /// Same calendar day
    SameDay,
}

/// A filter input on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub key: &'static str,
    pub field: &'static str,
    pub label: &'static str,
    pub mode: MatchMode,
}

impl FilterSpec {
    pub const fn new(
        key: &'static str,
        field: &'static str,
        label: &'static str,
        mode: MatchMode,
    ) -> Self {
        Self {
            key,
            field,
            label,
            mode,
        }
    }
}

/// A sortable table column. Multi-field columns sort on the joined values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortColumn {
    pub key: &'static str,
    pub title: &'static str,
    pub fields: &'static [&'static str],
}

/// Everything the generic screen needs to know about a resource.
#[derive(Debug)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    pub fields: &'static [FieldSpec],
    pub filters: &'static [FilterSpec],
    pub sort_columns: &'static [SortColumn],
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn filter(&self, key: &str) -> Option<&'static FilterSpec> {
        self.filters.iter().find(|f| f.key == key)
    }

    pub fn sort_column(&self, key: &str) -> Option<&'static SortColumn> {
        self.sort_columns.iter().find(|c| c.key == key)
    }

    /// Wire names of the fields persisted on the record, in schema order.
    pub fn stored_fields(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(self.fields.len() + 1);
        for spec in self.fields {
            match spec.kind {
                FieldKind::DateTime {
                    date_field,
                    time_field,
                    ..
                } => {
                    names.push(date_field);
                    names.push(time_field);
                }
                _ => names.push(spec.name),
            }
        }
        names
    }

    /// Closest editor field name, for "did you mean" hints.
    pub fn suggest_field(&self, input: &str) -> Option<&'static str> {
        closest(input, self.fields.iter().map(|f| f.name))
    }

    pub fn suggest_filter(&self, input: &str) -> Option<&'static str> {
        closest(input, self.filters.iter().map(|f| f.key))
    }

    pub fn suggest_sort_column(&self, input: &str) -> Option<&'static str> {
        closest(input, self.sort_columns.iter().map(|c| c.key))
    }
}

/// Candidate with the highest similarity, if it is similar enough.
pub fn closest<I>(input: &str, candidates: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'static str>,
{
    let needle = input.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, strsim::normalized_damerau_levenshtein(&needle, &c.to_lowercase())))
        .filter(|(_, score)| *score >= 0.6)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}
