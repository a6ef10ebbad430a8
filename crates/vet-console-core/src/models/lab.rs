//! Lab diagnostic records.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::pet::{GENDERS, PET_TYPES};
use super::{
    non_empty, FieldKind, FieldSpec, FilterSpec, MatchMode, Resource, ResourceKind,
    ResourceSchema, SortColumn,
};

/// A diagnostic test run for a pet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabDiagnostic {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner_fullname: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_gender: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub age: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub diagnostic_test: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub result: String,
    /// Test date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: String,
}

pub static LAB_DIAGNOSTIC_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::LabDiagnostic,
    fields: &[
        FieldSpec::required(
            "ownerFullname",
            "Pet Owner Fullname",
            FieldKind::Text,
            "Please enter the pet owner's fullname",
        ),
        FieldSpec::required("petName", "Pet Name", FieldKind::Text, "Please enter the pet name"),
        FieldSpec::required(
            "petGender",
            "Pet Gender",
            FieldKind::Choice(GENDERS),
            "Please select the pet's gender",
        ),
        FieldSpec::required(
            "petType",
            "Pet Type",
            FieldKind::Choice(PET_TYPES),
            "Please select the pet type",
        ),
        FieldSpec::required("age", "Pet Age", FieldKind::Text, "Please enter the pet's age"),
        FieldSpec::required(
            "diagnosticTest",
            "Diagnostic Test Type",
            FieldKind::Text,
            "Please enter the diagnostic test type",
        ),
        FieldSpec::required("result", "Test Result", FieldKind::Text, "Please enter the test result"),
        FieldSpec::required(
            "appointmentDate",
            "Test Date",
            FieldKind::DateTime {
                date_field: "date",
                time_field: "time",
                minute_step: None,
            },
            "Please select the test date",
        ),
    ],
    filters: &[
        FilterSpec::new("petOwner", "ownerFullname", "Pet Owner", MatchMode::Contains),
        FilterSpec::new("petName", "petName", "Pet Name", MatchMode::Contains),
        FilterSpec::new("petType", "petType", "Pet Type", MatchMode::Exact),
        FilterSpec::new(
            "diagnosticTest",
            "diagnosticTest",
            "Diagnostic Test",
            MatchMode::Contains,
        ),
    ],
    sort_columns: &[
        SortColumn { key: "ownerFullname", title: "Owner", fields: &["ownerFullname"] },
        SortColumn { key: "petName", title: "Pet Name", fields: &["petName"] },
        SortColumn { key: "petType", title: "Pet Type", fields: &["petType"] },
        SortColumn { key: "diagnosticTest", title: "Test", fields: &["diagnosticTest"] },
        SortColumn { key: "testDate", title: "Test Date", fields: &["date", "time"] },
    ],
};

impl Resource for LabDiagnostic {
    fn schema() -> &'static ResourceSchema {
        &LAB_DIAGNOSTIC_SCHEMA
    }

    fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "documentId" => self.document_id.as_deref(),
            "ownerFullname" => non_empty(&self.owner_fullname),
            "petName" => non_empty(&self.pet_name),
            "petGender" => non_empty(&self.pet_gender),
            "petType" => non_empty(&self.pet_type),
            "age" => non_empty(&self.age),
            "diagnosticTest" => non_empty(&self.diagnostic_test),
            "result" => non_empty(&self.result),
            "date" => non_empty(&self.date),
            "time" => non_empty(&self.time),
            _ => None,
        }
    }
}
