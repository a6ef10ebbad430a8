//! Appointment records.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::pet::PET_TYPES;
use super::{
    non_empty, FieldKind, FieldSpec, FilterSpec, MatchMode, Resource, ResourceKind,
    ResourceSchema, SortColumn,
};

/// Appointment genders are stored lowercase.
pub const APPOINTMENT_GENDERS: &[&str] = &["male", "female"];

/// Appointments are booked on half-hour slots.
pub const APPOINTMENT_MINUTE_STEP: u32 = 30;

/// A booked visit, with owner contact and pet details inline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner_fullname: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_age: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_weight: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pet_gender: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub purpose: String,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    /// `HH:mm`
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub notes: Option<String>,
}

pub static APPOINTMENT_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Appointment,
    fields: &[
        FieldSpec::required(
            "ownerFullname",
            "Owner Fullname",
            FieldKind::Text,
            "Please enter the pet owner's fullname",
        ),
        FieldSpec::required("email", "Email", FieldKind::Email, "Please enter the email"),
        FieldSpec::required(
            "phoneNumber",
            "Phone Number",
            FieldKind::Text,
            "Please enter the phone number",
        ),
        FieldSpec::required("petName", "Pet Name", FieldKind::Text, "Please enter the pet name"),
        FieldSpec::required(
            "petType",
            "Pet Type",
            FieldKind::Choice(PET_TYPES),
            "Please select the pet type",
        ),
        FieldSpec::required("petAge", "Pet Age", FieldKind::Text, "Please enter the pet age"),
        FieldSpec::required("petWeight", "Pet Weight", FieldKind::Text, "Please enter the pet weight"),
        FieldSpec::required(
            "petGender",
            "Pet Gender",
            FieldKind::Choice(APPOINTMENT_GENDERS),
            "Please select the pet gender",
        ),
        FieldSpec::required(
            "purpose",
            "Purpose",
            FieldKind::Text,
            "Please enter the appointment purpose",
        ),
        FieldSpec::required(
            "appointmentDate",
            "Appointment Date",
            FieldKind::DateTime {
                date_field: "date",
                time_field: "time",
                minute_step: Some(APPOINTMENT_MINUTE_STEP),
            },
            "Please select an appointment date",
        ),
        FieldSpec::optional("notes", "Additional Notes", FieldKind::LongText),
    ],
    filters: &[
        FilterSpec::new("ownerName", "ownerFullname", "Owner", MatchMode::Contains),
        FilterSpec::new("phoneNumber", "phoneNumber", "Phone", MatchMode::Contains),
        FilterSpec::new("petName", "petName", "Pet Name", MatchMode::Contains),
        FilterSpec::new("petType", "petType", "Pet Type", MatchMode::Exact),
    ],
    sort_columns: &[
        SortColumn { key: "ownerFullname", title: "Owner", fields: &["ownerFullname"] },
        SortColumn { key: "phoneNumber", title: "Phone", fields: &["phoneNumber"] },
        SortColumn { key: "petName", title: "Pet Name", fields: &["petName"] },
        SortColumn { key: "petType", title: "Pet Type", fields: &["petType"] },
        SortColumn {
            key: "appointmentDateTime",
            title: "Appointment",
            fields: &["date", "time"],
        },
        SortColumn { key: "purpose", title: "Purpose", fields: &["purpose"] },
    ],
};

impl Resource for Appointment {
    fn schema() -> &'static ResourceSchema {
        &APPOINTMENT_SCHEMA
    }

    fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "documentId" => self.document_id.as_deref(),
            "ownerFullname" => non_empty(&self.owner_fullname),
            "email" => non_empty(&self.email),
            "phoneNumber" => non_empty(&self.phone_number),
            "petName" => non_empty(&self.pet_name),
            "petType" => non_empty(&self.pet_type),
            "petAge" => non_empty(&self.pet_age),
            "petWeight" => non_empty(&self.pet_weight),
            "petGender" => non_empty(&self.pet_gender),
            "purpose" => non_empty(&self.purpose),
            "date" => non_empty(&self.date),
            "time" => non_empty(&self.time),
            "notes" => self.notes.as_deref(),
            _ => None,
        }
    }
}
