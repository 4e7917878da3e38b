//! SObject describe metadata
//!
//! The model follows the REST `describe` payload, so a describe response can
//! be deserialized directly. Keys the generator does not use are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::error::{SchemaError, SchemaResult};

/// Description of an SObject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescription {
    /// API name (e.g., "Account", "Custom_Object__c")
    pub name: String,
    /// Label for display
    #[serde(default)]
    pub label: String,
    /// Fields in describe order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectDescription {
    /// Create a new SObject description labelled with its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            fields: Vec::new(),
        }
    }

    /// Parse a describe payload
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        serde_json::from_str(json).map_err(SchemaError::InvalidDescription)
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a field
    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Get a field by API name (case-insensitive)
    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// Description of an SObject field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// API name (e.g., "AccountId", "Custom_Field__c")
    pub name: String,
    #[serde(default)]
    pub label: String,
    /// SOAP wire type, namespaced (e.g., "xsd:string", "tns:ID")
    pub soap_type: String,
    /// Field type as reported by describe (e.g., "picklist", "reference")
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub nillable: bool,
    /// Unknown when absent
    #[serde(default)]
    pub updateable: Option<bool>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub picklist_values: Option<Vec<PickListValue>>,
}

impl FieldDescriptor {
    /// Create a nillable field labelled with its name
    pub fn new(name: impl Into<String>, soap_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            soap_type: soap_type.into(),
            field_type: "string".to_string(),
            nillable: true,
            updateable: None,
            default_value: None,
            picklist_values: None,
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the describe field type
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        self
    }

    /// Set whether the field is nillable
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }

    pub fn with_updateable(mut self, updateable: bool) -> Self {
        self.updateable = Some(updateable);
        self
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set picklist values
    pub fn with_picklist_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.picklist_values = Some(values.into_iter().map(PickListValue::new).collect());
        self
    }

    pub fn sub_type(&self) -> FieldSubType {
        match self.field_type.as_str() {
            "picklist" => FieldSubType::Picklist,
            "multipicklist" => FieldSubType::MultiPicklist,
            _ => FieldSubType::Other,
        }
    }
}

/// Field types that add constraints to the generated schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSubType {
    Picklist,
    MultiPicklist,
    Other,
}

/// One entry of a picklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickListValue {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub default_value: Option<bool>,
    #[serde(default)]
    pub valid_for: Option<String>,
}

impl PickListValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            active: None,
            default_value: None,
            valid_for: None,
        }
    }
}
