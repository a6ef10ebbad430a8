//! Client (pet owner) records.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::pet::GENDERS;
use super::{
    non_empty, FieldKind, FieldSpec, FilterSpec, MatchMode, Resource, ResourceKind,
    ResourceSchema, SortColumn,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fullname: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub age: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: String,
}

pub static CLIENT_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Client,
    fields: &[
        FieldSpec::required("fullname", "Fullname", FieldKind::Text, "Please enter the fullname"),
        FieldSpec::required("email", "Email", FieldKind::Email, "Please enter the email"),
        FieldSpec::required(
            "phoneNumber",
            "Phone Number",
            FieldKind::Text,
            "Please enter the phone number",
        ),
        FieldSpec::required(
            "gender",
            "Gender",
            FieldKind::Choice(GENDERS),
            "Please select the gender",
        ),
        FieldSpec::required("age", "Age", FieldKind::Text, "Please enter the age"),
        FieldSpec::required("address", "Address", FieldKind::Text, "Please enter the address"),
        FieldSpec::required("city", "City", FieldKind::Text, "Please enter the city"),
        FieldSpec::required(
            "postalCode",
            "Postal Code",
            FieldKind::Text,
            "Please enter the postal code",
        ),
        FieldSpec::required("state", "State", FieldKind::Text, "Please enter the state"),
    ],
    filters: &[
        FilterSpec::new("fullname", "fullname", "Fullname", MatchMode::Contains),
        FilterSpec::new("phoneNumber", "phoneNumber", "Phone", MatchMode::Contains),
        FilterSpec::new("email", "email", "Email", MatchMode::Contains),
        FilterSpec::new("gender", "gender", "Gender", MatchMode::Exact),
    ],
    sort_columns: &[
        SortColumn { key: "fullname", title: "Fullname", fields: &["fullname"] },
        SortColumn { key: "email", title: "Email", fields: &["email"] },
        SortColumn { key: "phoneNumber", title: "Phone", fields: &["phoneNumber"] },
        SortColumn { key: "gender", title: "Gender", fields: &["gender"] },
        SortColumn { key: "age", title: "Age", fields: &["age"] },
        SortColumn {
            key: "address",
            title: "Address",
            fields: &["address", "city", "state", "postalCode"],
        },
    ],
};

impl Resource for Client {
    fn schema() -> &'static ResourceSchema {
        &CLIENT_SCHEMA
    }

    fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "documentId" => self.document_id.as_deref(),
            "fullname" => non_empty(&self.fullname),
            "email" => non_empty(&self.email),
            "phoneNumber" => non_empty(&self.phone_number),
            "gender" => non_empty(&self.gender),
            "age" => non_empty(&self.age),
            "address" => non_empty(&self.address),
            "city" => non_empty(&self.city),
            "postalCode" => non_empty(&self.postal_code),
            "state" => non_empty(&self.state),
            _ => None,
        }
    }
}

impl Client {
    /// Single-line postal address as shown in the client table.
    pub fn full_address(&self) -> String {
        [&self.address, &self.city, &self.state, &self.postal_code]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address_skips_blank_parts() {
        let client = Client {
            address: "12 Elm St".into(),
            city: "Springfield".into(),
            postal_code: "12345".into(),
            ..Default::default()
        };
        assert_eq!(client.full_address(), "12 Elm St, Springfield, 12345");
    }

    #[test]
    fn test_postal_code_wire_name() {
        let client = Client {
            postal_code: "12345".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["postalCode"], "12345");
    }
}
