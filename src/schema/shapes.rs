//! Schema literals for the fixed REST API shapes
//!
//! These are the compound value types and response wrappers whose layout is
//! known up front. Each shape is written down once as a draft-04 literal and
//! turned into a schema tree on demand.

use std::collections::BTreeSet;

use log::trace;
use serde_json::{json, Map, Value};

use super::error::{SchemaError, SchemaResult};
use super::node::{
    Annotations, ArraySchema, ObjectSchema, Schema, SchemaKind, StringFormat, StringSchema,
};

/// Identifier prefix of the fixed API shapes
pub const API_DTO_PREFIX: &str = "urn:jsonschema:org:apache:camel:component:salesforce:api:dto";

/// Fixed, statically known API shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedShape {
    Address,
    GeoLocation,
    /// Paging envelope of a query result; `records` is attached per object
    QueryRecords,
    Attributes,
    PickListValue,
    RecentItem,
    CreateSObjectResult,
    RestError,
}

/// Concrete shapes included in the whole-API schema
pub const API_SHAPES: &[FixedShape] = &[
    FixedShape::Address,
    FixedShape::GeoLocation,
    FixedShape::Attributes,
    FixedShape::PickListValue,
    FixedShape::RecentItem,
    FixedShape::CreateSObjectResult,
    FixedShape::RestError,
];

impl FixedShape {
    pub fn name(&self) -> &'static str {
        match self {
            FixedShape::Address => "Address",
            FixedShape::GeoLocation => "GeoLocation",
            FixedShape::QueryRecords => "AbstractQueryRecordsBase",
            FixedShape::Attributes => "Attributes",
            FixedShape::PickListValue => "PickListValue",
            FixedShape::RecentItem => "RecentItem",
            FixedShape::CreateSObjectResult => "CreateSObjectResult",
            FixedShape::RestError => "RestError",
        }
    }

    pub fn id(&self) -> String {
        format!("{}:{}", API_DTO_PREFIX, self.name())
    }

    /// The draft-04 literal describing this shape
    pub fn literal(&self) -> Value {
        let id = self.id();
        match self {
            FixedShape::Address => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "city": { "type": "string" },
                    "country": { "type": "string" },
                    "countryCode": { "type": "string" },
                    "geocodeAccuracy": { "type": "string" },
                    "latitude": { "type": "number" },
                    "longitude": { "type": "number" },
                    "postalCode": { "type": "string" },
                    "state": { "type": "string" },
                    "stateCode": { "type": "string" },
                    "street": { "type": "string" }
                }
            }),
            FixedShape::GeoLocation => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "latitude": { "type": "number" },
                    "longitude": { "type": "number" }
                }
            }),
            FixedShape::QueryRecords => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "totalSize": { "type": "integer" },
                    "done": { "type": "boolean" },
                    "nextRecordsUrl": { "type": "string" }
                }
            }),
            FixedShape::Attributes => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "type": { "type": "string" },
                    "url": { "type": "string" }
                }
            }),
            FixedShape::PickListValue => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "value": { "type": "string" },
                    "label": { "type": "string" },
                    "active": { "type": "boolean" },
                    "defaultValue": { "type": "boolean" },
                    "validFor": { "type": "string" }
                }
            }),
            FixedShape::RecentItem => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "attributes": FixedShape::Attributes.literal(),
                    "Id": { "type": "string" },
                    "Name": { "type": "string" }
                }
            }),
            FixedShape::CreateSObjectResult => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "id": { "type": "string" },
                    "success": { "type": "boolean" },
                    "errors": {
                        "type": "array",
                        "items": FixedShape::RestError.literal()
                    }
                }
            }),
            FixedShape::RestError => json!({
                "type": "object",
                "id": id,
                "properties": {
                    "errorCode": { "type": "string" },
                    "message": { "type": "string" },
                    "fields": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                }
            }),
        }
    }
}

/// Derive the object schema of a fixed shape
pub fn derive_schema(shape: FixedShape) -> SchemaResult<ObjectSchema> {
    trace!("deriving schema for {}", shape.name());
    match schema_from_literal(shape.name(), &shape.literal())? {
        Schema::Object(object) => Ok(object),
        other => Err(SchemaError::derivation(
            shape.name(),
            format!("expected an object schema, found {}", other.kind().as_str()),
        )),
    }
}

/// Build a schema tree from a draft-04 literal
///
/// Only the keywords the tree can represent are accepted; anything else in a
/// literal is a derivation failure rather than being silently dropped.
pub fn schema_from_literal(shape: &str, literal: &Value) -> SchemaResult<Schema> {
    let fail = |reason: String| SchemaError::derivation(shape, reason);

    let map = literal
        .as_object()
        .ok_or_else(|| fail(format!("schema literal must be an object, found {}", literal)))?;

    if let Some(reference) = map.get("$ref") {
        return reference
            .as_str()
            .map(|r| Schema::Ref(r.to_string()))
            .ok_or_else(|| fail("$ref must be a string".to_string()));
    }

    let type_name = map
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| fail("missing type".to_string()))?;
    let kind = SchemaKind::from_type_name(type_name)
        .ok_or_else(|| fail(format!("unknown type '{}'", type_name)))?;

    let annotations = Annotations {
        title: optional_str(map, "title", &fail)?,
        default: map.get("default").cloned(),
        readonly: match map.get("readonly") {
            None => None,
            Some(v) => Some(
                v.as_bool()
                    .ok_or_else(|| fail("readonly must be a boolean".to_string()))?,
            ),
        },
    };

    let mut schema = match kind {
        SchemaKind::String => {
            let mut string = StringSchema::new();
            string.format = match optional_str(map, "format", &fail)?.as_deref() {
                None => None,
                Some("date-time") => Some(StringFormat::DateTime),
                Some(other) => return Err(fail(format!("unsupported format '{}'", other))),
            };
            string.pattern = optional_str(map, "pattern", &fail)?;
            string.enums = match map.get("enum") {
                None => None,
                Some(values) => Some(string_list(values, "enum", &fail)?.into_iter().collect()),
            };
            Schema::String(string)
        }
        SchemaKind::Object => {
            let mut object = ObjectSchema::new();
            object.id = optional_str(map, "id", &fail)?;
            let required: BTreeSet<String> = match map.get("required") {
                None => BTreeSet::new(),
                Some(names) => string_list(names, "required", &fail)?.into_iter().collect(),
            };
            if let Some(properties) = map.get("properties") {
                let properties = properties
                    .as_object()
                    .ok_or_else(|| fail("properties must be an object".to_string()))?;
                for (name, property) in properties {
                    let property = schema_from_literal(shape, property)?;
                    if required.contains(name) {
                        object.put_property(name.clone(), property);
                    } else {
                        object.put_optional_property(name.clone(), property);
                    }
                }
            }
            Schema::Object(object)
        }
        SchemaKind::Array => match map.get("items") {
            Some(items) => Schema::Array(ArraySchema::of(schema_from_literal(shape, items)?)),
            None => Schema::Array(ArraySchema::default()),
        },
        other => Schema::of_kind(other),
    };

    if let Some(slot) = schema.annotations_mut() {
        *slot = annotations;
    }
    Ok(schema)
}

fn optional_str(
    map: &Map<String, Value>,
    key: &str,
    fail: &impl Fn(String) -> SchemaError,
) -> SchemaResult<Option<String>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(fail(format!("{} must be a string", key))),
    }
}

fn string_list(
    value: &Value,
    key: &str,
    fail: &impl Fn(String) -> SchemaError,
) -> SchemaResult<Vec<String>> {
    value
        .as_array()
        .ok_or_else(|| fail(format!("{} must be an array", key)))?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| fail(format!("{} entries must be strings", key)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_shape() {
        let address = derive_schema(FixedShape::Address).unwrap();
        assert_eq!(
            address.id.as_deref(),
            Some("urn:jsonschema:org:apache:camel:component:salesforce:api:dto:Address")
        );
        assert_eq!(address.properties().count(), 10);
        assert_eq!(address.property("latitude").unwrap().kind(), SchemaKind::Number);
        assert!(address.required().is_empty());
    }

    #[test]
    fn test_nested_shapes_are_inlined() {
        let result = derive_schema(FixedShape::CreateSObjectResult).unwrap();
        let errors = result.property("errors").unwrap().as_array().unwrap();
        let item = errors.items.as_deref().unwrap();
        assert_eq!(item.id(), Some(FixedShape::RestError.id().as_str()));
    }

    #[test]
    fn test_every_shape_derives() {
        for shape in API_SHAPES.iter().chain([&FixedShape::QueryRecords]) {
            assert!(derive_schema(*shape).is_ok(), "{} failed", shape.name());
        }
    }

    #[test]
    fn test_non_object_literal_fails() {
        let err = schema_from_literal("Broken", &json!({ "type": "widget" })).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::SchemaDerivation { ref shape, .. } if shape == "Broken"
        ));
    }

    #[test]
    fn test_unsupported_format_fails() {
        let literal = json!({ "type": "string", "format": "uri" });
        assert!(schema_from_literal("Broken", &literal).is_err());
    }

    #[test]
    fn test_required_names_are_honoured() {
        let literal = json!({
            "type": "object",
            "properties": { "a": { "type": "string" }, "b": { "type": "integer" } },
            "required": ["b"]
        });
        let schema = schema_from_literal("Literal", &literal).unwrap();
        let object = schema.as_object().unwrap();
        assert!(object.is_required("b"));
        assert!(!object.is_required("a"));
    }
}
