pub mod describe;
pub mod schema;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use describe::{FieldDescriptor, FieldSubType, ObjectDescription, PickListValue};
pub use schema::{
    sobject_json_schema, sobject_json_schema_with, SObjectSchemaGenerator, Schema, SchemaConfig,
    SchemaError, SchemaResult,
};
