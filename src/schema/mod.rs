//! SObject to JSON Schema generation
//!
//! This module turns SObject describe metadata into JSON Schema (draft-04)
//! documents describing valid records of that object, plus a schema for the
//! paged query result that wraps them.
//!
//! # Overview
//!
//! The generation process involves:
//! 1. Mapping each field's SOAP wire type to a schema kind
//! 2. Decorating the field schema with picklist constraints and display attributes
//! 3. Assembling all fields into one object schema, split into required and optional
//! 4. Optionally adding a `QueryRecords<Object>` schema whose records refer to it
//! 5. Wrapping the result in a draft-04 root envelope
//!
//! # Example
//!
//! ```rust
//! use sobject_jsonschema::describe::{FieldDescriptor, ObjectDescription};
//! use sobject_jsonschema::schema::{SObjectSchemaGenerator, SchemaConfig};
//!
//! let account = ObjectDescription::new("Account")
//!     .with_field(FieldDescriptor::new("Id", "tns:ID").with_nillable(false))
//!     .with_field(
//!         FieldDescriptor::new("Industry", "xsd:string")
//!             .with_type("picklist")
//!             .with_picklist_values(["Tech", "Finance"]),
//!     );
//!
//! let generator = SObjectSchemaGenerator::new(SchemaConfig::default());
//! let json = generator.json_schema_string(&account).unwrap();
//! assert!(json.contains("QueryRecordsAccount"));
//! ```
//!
//! # Wire types
//!
//! - **Text**: `ID`, `string`, `base64Binary`, `anyType`
//! - **Integer**: `integer`, `int`, `long`, `short`, `byte` and the unsigned variants
//! - **Number**: `decimal`, `float`, `double`
//! - **Date and time**: `dateTime`, `time`, `date`, `g` (string with `date-time` format)
//! - **Compound**: `address`, `location`, shared within one build
//!
//! Any other wire type fails the build with [`SchemaError::UnsupportedWireType`].

pub mod constraints;
pub mod error;
pub mod generator;
pub mod node;
pub mod root;
pub mod shapes;
pub mod shared;
pub mod wire_type;

// Re-export main types
pub use constraints::{apply_field_constraints, multipicklist_pattern, picklist_enum};
pub use error::{SchemaError, SchemaResult};
pub use generator::{
    field_schema, SObjectSchemaGenerator, SchemaConfig, DEFAULT_ID_PREFIX, RECORDS_PROPERTY,
};
pub use node::{
    Annotations, ArraySchema, ObjectSchema, Schema, SchemaKind, SchemaSet, StringFormat,
    StringSchema, SCHEMA_DRAFT_04,
};
pub use root::{
    api_json_schema_string, api_schema, compose_root, sobject_json_schema,
    sobject_json_schema_with, to_json_string, API_DTO_ID,
};
pub use shapes::{derive_schema, FixedShape, API_DTO_PREFIX, API_SHAPES};
pub use shared::SharedSchemas;
pub use wire_type::{map_wire_type, CompoundKind, TypeMapping, WireType};
