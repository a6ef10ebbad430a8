//! Pet patient records.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::{
    non_empty, FieldKind, FieldSpec, FilterSpec, MatchMode, Resource, ResourceKind,
    ResourceSchema, SortColumn,
};

pub const PET_TYPES: &[&str] = &["Dog", "Cat", "Bird"];
pub const GENDERS: &[&str] = &["Male", "Female"];

/// A pet patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub owner_fullname: String,
    /// Species category, one of [`PET_TYPES`]
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub pet_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub breed: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub age: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gender: String,
    /// Weight in kg
    #[serde(default, deserialize_with = "lenient::string")]
    pub weight: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub notes: Option<String>,
}

pub static PET_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Pet,
    fields: &[
        FieldSpec::required("name", "Pet Name", FieldKind::Text, "Please enter the pet name"),
        FieldSpec::required(
            "ownerFullname",
            "Pet Owner Fullname",
            FieldKind::Text,
            "Please enter the pet owner's fullname",
        ),
        FieldSpec::required(
            "type",
            "Pet Type",
            FieldKind::Choice(PET_TYPES),
            "Please select the pet type",
        ),
        FieldSpec::required("breed", "Pet Breed", FieldKind::Text, "Please enter the pet's breed"),
        FieldSpec::required("age", "Pet Age", FieldKind::Text, "Please enter the pet's age"),
        FieldSpec::required(
            "gender",
            "Pet Gender",
            FieldKind::Choice(GENDERS),
            "Please select the pet's gender",
        ),
        FieldSpec::required("weight", "Pet Weight", FieldKind::Text, "Please enter the pet's weight"),
        FieldSpec::optional("notes", "Additional Notes", FieldKind::LongText),
    ],
    filters: &[
        FilterSpec::new("petName", "name", "Pet Name", MatchMode::Contains),
        FilterSpec::new("petOwner", "ownerFullname", "Pet Owner", MatchMode::Contains),
        FilterSpec::new("petType", "type", "Pet Type", MatchMode::Exact),
        FilterSpec::new("petBreed", "breed", "Pet Breed", MatchMode::Contains),
        FilterSpec::new("petGender", "gender", "Pet Gender", MatchMode::Exact),
    ],
    sort_columns: &[
        SortColumn { key: "name", title: "Name", fields: &["name"] },
        SortColumn { key: "ownerFullname", title: "Owner", fields: &["ownerFullname"] },
        SortColumn { key: "type", title: "Type", fields: &["type"] },
        SortColumn { key: "breed", title: "Breed", fields: &["breed"] },
        SortColumn { key: "age", title: "Age", fields: &["age"] },
        SortColumn { key: "weight", title: "Weight", fields: &["weight"] },
    ],
};

impl Resource for Pet {
    fn schema() -> &'static ResourceSchema {
        &PET_SCHEMA
    }

    fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "documentId" => self.document_id.as_deref(),
            "name" => non_empty(&self.name),
            "ownerFullname" => non_empty(&self.owner_fullname),
            "type" => non_empty(&self.pet_type),
            "breed" => non_empty(&self.breed),
            "age" => non_empty(&self.age),
            "gender" => non_empty(&self.gender),
            "weight" => non_empty(&self.weight),
            "notes" => self.notes.as_deref(),
            _ => None,
        }
    }
}

impl Pet {
    /// Create an unsaved pet with the identifying fields set.
    pub fn new(name: impl Into<String>, owner_fullname: impl Into<String>, pet_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_fullname: owner_fullname.into(),
            pet_type: pet_type.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_field_wire_name() {
        let pet = Pet::new("Rex", "Alice Lee", "Dog");
        let value = serde_json::to_value(&pet).unwrap();
        assert_eq!(value["type"], "Dog");
        assert_eq!(value["ownerFullname"], "Alice Lee");
        assert!(value.get("documentId").is_none());
    }

    #[test]
    fn test_decode_partial_row() {
        let pet: Pet = serde_json::from_value(json!({
            "documentId": "abc",
            "name": "Rex",
            "age": 3
        }))
        .unwrap();
        assert_eq!(pet.document_id(), Some("abc"));
        assert_eq!(pet.field("age"), Some("3"));
        assert_eq!(pet.field("ownerFullname"), None);
        assert_eq!(pet.field("nonexistent"), None);
    }

    #[test]
    fn test_stored_fields_match_wire_names() {
        let pet = Pet {
            document_id: Some("id-1".into()),
            name: "Rex".into(),
            owner_fullname: "Alice".into(),
            pet_type: "Dog".into(),
            breed: "Lab".into(),
            age: "2".into(),
            gender: "Male".into(),
            weight: "30".into(),
            notes: Some("Friendly".into()),
        };
        for name in PET_SCHEMA.stored_fields() {
            assert!(pet.field(name).is_some(), "field {} not readable", name);
        }
    }
}
