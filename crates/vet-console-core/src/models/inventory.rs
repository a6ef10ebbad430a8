//! Medical inventory records.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::{
    non_empty, FieldKind, FieldSpec, FilterSpec, MatchMode, Resource, ResourceKind,
    ResourceSchema, SortColumn,
};

/// A stocked medicine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInventory {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub supplier: String,
    /// Units in stock, numeric string
    #[serde(default, deserialize_with = "lenient::string")]
    pub quantity: String,
    /// Price per unit, numeric string
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit_price: String,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient::string")]
    pub expiration_date: String,
}

pub static MEDICAL_INVENTORY_SCHEMA: ResourceSchema = ResourceSchema {
    kind: ResourceKind::MedicalInventory,
    fields: &[
        FieldSpec::required("brand", "Brand", FieldKind::Text, "Please enter the medicine brand"),
        FieldSpec::required("name", "Name", FieldKind::Text, "Please enter the medicine name"),
        FieldSpec::required("supplier", "Supplier", FieldKind::Text, "Please enter the supplier"),
        FieldSpec::required("quantity", "Quantity", FieldKind::Number, "Please enter the quantity"),
        FieldSpec::required(
            "unitPrice",
            "Unit Price",
            FieldKind::Number,
            "Please enter the unit price",
        ),
        FieldSpec::required(
            "expirationDate",
            "Expiration Date",
            FieldKind::Date,
            "Please select the expiration date",
        ),
    ],
    filters: &[
        FilterSpec::new("brand", "brand", "Brand", MatchMode::Contains),
        FilterSpec::new("name", "name", "Name", MatchMode::Contains),
        FilterSpec::new("supplier", "supplier", "Supplier", MatchMode::Contains),
        FilterSpec::new(
            "expirationDate",
            "expirationDate",
            "Expiration Date",
            MatchMode::SameDay,
        ),
    ],
    sort_columns: &[
        SortColumn { key: "brand", title: "Brand", fields: &["brand"] },
        SortColumn { key: "name", title: "Name", fields: &["name"] },
        SortColumn { key: "supplier", title: "Supplier", fields: &["supplier"] },
        SortColumn { key: "quantity", title: "Quantity", fields: &["quantity"] },
        SortColumn { key: "unitPrice", title: "Unit Price", fields: &["unitPrice"] },
        SortColumn { key: "expirationDate", title: "Expires", fields: &["expirationDate"] },
    ],
};

impl Resource for MedicalInventory {
    fn schema() -> &'static ResourceSchema {
        &MEDICAL_INVENTORY_SCHEMA
    }

    fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "documentId" => self.document_id.as_deref(),
            "brand" => non_empty(&self.brand),
            "name" => non_empty(&self.name),
            "supplier" => non_empty(&self.supplier),
            "quantity" => non_empty(&self.quantity),
            "unitPrice" => non_empty(&self.unit_price),
            "expirationDate" => non_empty(&self.expiration_date),
            _ => None,
        }
    }
}
