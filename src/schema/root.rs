//! Root envelopes and encoding

use log::debug;

use crate::describe::ObjectDescription;

use super::error::{SchemaError, SchemaResult};
use super::generator::{SObjectSchemaGenerator, SchemaConfig};
use super::node::{ObjectSchema, Schema, SchemaSet, SCHEMA_DRAFT_04};
use super::shapes::{derive_schema, API_SHAPES};

/// Identifier of the whole-API root schema
pub const API_DTO_ID: &str = "org:urn:jsonschema:org:apache:camel:component:salesforce:api:dto";

/// Wrap `schemas` in a draft-04 root whose instances match one of them
pub fn compose_root(schemas: SchemaSet, id: &str) -> Schema {
    let mut root = ObjectSchema::new().with_id(id);
    root.meta_schema = Some(SCHEMA_DRAFT_04.to_string());
    root.set_one_of(schemas);
    Schema::Object(root)
}

/// Encode a schema tree as JSON text
pub fn to_json_string(schema: &Schema, pretty: bool) -> SchemaResult<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(schema)
    } else {
        serde_json::to_string(schema)
    };
    encoded.map_err(SchemaError::Encoding)
}

/// Root schema covering every concrete fixed API shape
pub fn api_schema() -> SchemaResult<Schema> {
    let schemas = API_SHAPES
        .iter()
        .map(|shape| derive_schema(*shape).map(Schema::Object))
        .collect::<SchemaResult<SchemaSet>>()?;
    debug!("composed API schema from {} shapes", schemas.len());
    Ok(compose_root(schemas, API_DTO_ID))
}

/// Encoded whole-API schema
pub fn api_json_schema_string(pretty: bool) -> SchemaResult<String> {
    to_json_string(&api_schema()?, pretty)
}

/// Encoded schema for an object and its query wrapper, with default settings
pub fn sobject_json_schema(description: &ObjectDescription) -> SchemaResult<String> {
    sobject_json_schema_with(description, &SchemaConfig::default())
}

/// Encoded schema for an object with the given settings
pub fn sobject_json_schema_with(
    description: &ObjectDescription,
    config: &SchemaConfig,
) -> SchemaResult<String> {
    SObjectSchemaGenerator::new(config.clone()).json_schema_string(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::node::SchemaKind;
    use serde_json::{json, Value};

    #[test]
    fn test_envelope_fields() {
        let mut schemas = SchemaSet::new();
        schemas.insert(Schema::of_kind(SchemaKind::Boolean));
        let root = compose_root(schemas, "urn:test");

        let value: Value = serde_json::from_str(&to_json_string(&root, false).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "$schema": "http://json-schema.org/draft-04/schema#",
                "id": "urn:test",
                "oneOf": [{ "type": "boolean" }]
            })
        );
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let root = compose_root(SchemaSet::new(), "urn:test");
        let pretty = to_json_string(&root, true).unwrap();
        assert!(pretty.contains("\n  \"id\": \"urn:test\""));
        assert!(!to_json_string(&root, false).unwrap().contains('\n'));
    }

    #[test]
    fn test_api_schema_members() {
        let root = api_schema().unwrap();
        let object = root.as_object().unwrap();
        assert_eq!(object.id.as_deref(), Some(API_DTO_ID));

        let members = object.one_of().unwrap();
        assert_eq!(members.len(), API_SHAPES.len());
        for shape in API_SHAPES {
            assert!(members.get(&shape.id()).is_some(), "{} missing", shape.name());
        }
    }
}
