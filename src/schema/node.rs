//! In-memory JSON Schema tree
//!
//! The tree mirrors the draft-04 vocabulary the generator needs and nothing
//! more. Serialization writes keys in a fixed order so encoded output is stable
//! across runs.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Meta-schema URI placed in every root envelope
pub const SCHEMA_DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Schema kinds, one per draft-04 primitive type the generator emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Null,
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaKind {
    /// The draft-04 `type` keyword value
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Null => "null",
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
        }
    }

    /// Parse a draft-04 `type` keyword value
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(SchemaKind::Null),
            "string" => Some(SchemaKind::String),
            "integer" => Some(SchemaKind::Integer),
            "number" => Some(SchemaKind::Number),
            "boolean" => Some(SchemaKind::Boolean),
            "object" => Some(SchemaKind::Object),
            "array" => Some(SchemaKind::Array),
            _ => None,
        }
    }
}

/// String formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    DateTime,
}

impl StringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::DateTime => "date-time",
        }
    }
}

/// Display attributes every schema node may carry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub title: Option<String>,
    pub default: Option<Value>,
    pub readonly: Option<bool>,
}

impl Annotations {
    /// Annotations from `self`, falling back to `base` for unset entries
    fn or(&self, base: &Annotations) -> Annotations {
        Annotations {
            title: self.title.clone().or_else(|| base.title.clone()),
            default: self.default.clone().or_else(|| base.default.clone()),
            readonly: self.readonly.or(base.readonly),
        }
    }
}

/// String schema with its kind-specific keywords
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub annotations: Annotations,
    pub format: Option<StringFormat>,
    /// Allowed values; a set, so duplicates are impossible
    pub enums: Option<BTreeSet<String>>,
    pub pattern: Option<String>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Object schema with insertion-ordered properties
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub id: Option<String>,
    /// `$schema` keyword, only set on root envelopes
    pub meta_schema: Option<String>,
    pub annotations: Annotations,
    properties: Vec<(String, Schema)>,
    required: BTreeSet<String>,
    one_of: Option<SchemaSet>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.annotations.title = Some(title.into());
        self
    }

    /// Add or replace a required property
    pub fn put_property(&mut self, name: impl Into<String>, schema: Schema) {
        let name = name.into();
        self.required.insert(name.clone());
        self.insert_property(name, schema);
    }

    /// Add or replace an optional property
    pub fn put_optional_property(&mut self, name: impl Into<String>, schema: Schema) {
        let name = name.into();
        self.required.remove(&name);
        self.insert_property(name, schema);
    }

    fn insert_property(&mut self, name: String, schema: Schema) {
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = schema,
            None => self.properties.push((name, schema)),
        }
    }

    /// Look up a property schema by name
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    /// Properties in insertion order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.properties.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Names of required properties
    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Names of properties that are not required, in insertion order
    pub fn optional(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| !self.required.contains(*n))
    }

    pub fn one_of(&self) -> Option<&SchemaSet> {
        self.one_of.as_ref()
    }

    pub fn set_one_of(&mut self, schemas: SchemaSet) {
        self.one_of = Some(schemas);
    }
}

/// Array schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySchema {
    pub annotations: Annotations,
    pub items: Option<Box<Schema>>,
}

impl ArraySchema {
    pub fn of(items: Schema) -> Self {
        Self {
            annotations: Annotations::default(),
            items: Some(Box::new(items)),
        }
    }
}

/// A JSON Schema node
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Null(Annotations),
    String(StringSchema),
    Integer(Annotations),
    Number(Annotations),
    Boolean(Annotations),
    Object(ObjectSchema),
    Array(ArraySchema),
    /// Same-document reference: `{"$ref": id}`
    Ref(String),
    /// Compound sub-schema shared by several fields of one build, plus the
    /// annotations of the field using it
    Shared {
        schema: Arc<ObjectSchema>,
        annotations: Annotations,
    },
}

impl Schema {
    /// Fresh schema of the given kind with no keywords set
    pub fn of_kind(kind: SchemaKind) -> Self {
        match kind {
            SchemaKind::Null => Schema::Null(Annotations::default()),
            SchemaKind::String => Schema::String(StringSchema::new()),
            SchemaKind::Integer => Schema::Integer(Annotations::default()),
            SchemaKind::Number => Schema::Number(Annotations::default()),
            SchemaKind::Boolean => Schema::Boolean(Annotations::default()),
            SchemaKind::Object => Schema::Object(ObjectSchema::new()),
            SchemaKind::Array => Schema::Array(ArraySchema::default()),
        }
    }

    /// Wrap a shared compound schema for use by one field
    pub fn shared(schema: Arc<ObjectSchema>) -> Self {
        Schema::Shared {
            schema,
            annotations: Annotations::default(),
        }
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::Null(_) => SchemaKind::Null,
            Schema::String(_) => SchemaKind::String,
            Schema::Integer(_) => SchemaKind::Integer,
            Schema::Number(_) => SchemaKind::Number,
            Schema::Boolean(_) => SchemaKind::Boolean,
            Schema::Object(_) | Schema::Ref(_) | Schema::Shared { .. } => SchemaKind::Object,
            Schema::Array(_) => SchemaKind::Array,
        }
    }

    /// Identifier of an object schema
    pub fn id(&self) -> Option<&str> {
        match self {
            Schema::Object(object) => object.id.as_deref(),
            Schema::Shared { schema, .. } => schema.id.as_deref(),
            _ => None,
        }
    }

    pub fn annotations(&self) -> Option<&Annotations> {
        match self {
            Schema::Null(a) | Schema::Integer(a) | Schema::Number(a) | Schema::Boolean(a) => {
                Some(a)
            }
            Schema::String(s) => Some(&s.annotations),
            Schema::Object(o) => Some(&o.annotations),
            Schema::Array(a) => Some(&a.annotations),
            Schema::Shared { annotations, .. } => Some(annotations),
            Schema::Ref(_) => None,
        }
    }

    /// Mutable annotations; `None` for `$ref` nodes, which carry none
    pub fn annotations_mut(&mut self) -> Option<&mut Annotations> {
        match self {
            Schema::Null(a) | Schema::Integer(a) | Schema::Number(a) | Schema::Boolean(a) => {
                Some(a)
            }
            Schema::String(s) => Some(&mut s.annotations),
            Schema::Object(o) => Some(&mut o.annotations),
            Schema::Array(a) => Some(&mut a.annotations),
            Schema::Shared { annotations, .. } => Some(annotations),
            Schema::Ref(_) => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringSchema> {
        match self {
            Schema::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Schema::Object(o) => Some(o),
            Schema::Shared { schema, .. } => Some(schema),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Schema::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Coerce into a string schema, keeping annotations and any string keywords
    pub fn into_string_schema(self) -> StringSchema {
        match self {
            Schema::String(s) => s,
            Schema::Ref(_) => StringSchema::new(),
            other => StringSchema {
                annotations: other.annotations().cloned().unwrap_or_default(),
                ..StringSchema::default()
            },
        }
    }
}

/// Set of schemas, deduplicated on insert and kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSet {
    schemas: Vec<Schema>,
}

impl SchemaSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a schema; returns false if an identical one is already present
    pub fn insert(&mut self, schema: Schema) -> bool {
        if self.schemas.contains(&schema) {
            return false;
        }
        self.schemas.push(schema);
        true
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Schema> {
        self.schemas.iter()
    }

    /// Find a member by its identifier
    pub fn get(&self, id: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.id() == Some(id))
    }
}

impl<'a> IntoIterator for &'a SchemaSet {
    type Item = &'a Schema;
    type IntoIter = std::slice::Iter<'a, Schema>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemas.iter()
    }
}

impl FromIterator<Schema> for SchemaSet {
    fn from_iter<I: IntoIterator<Item = Schema>>(iter: I) -> Self {
        let mut set = SchemaSet::new();
        for schema in iter {
            set.insert(schema);
        }
        set
    }
}

impl Serialize for SchemaSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.schemas.len()))?;
        for schema in &self.schemas {
            seq.serialize_element(schema)?;
        }
        seq.end()
    }
}

fn write_annotations<M: SerializeMap>(
    map: &mut M,
    annotations: &Annotations,
) -> Result<(), M::Error> {
    if let Some(title) = &annotations.title {
        map.serialize_entry("title", title)?;
    }
    if let Some(default) = &annotations.default {
        map.serialize_entry("default", default)?;
    }
    if let Some(readonly) = annotations.readonly {
        map.serialize_entry("readonly", &readonly)?;
    }
    Ok(())
}

fn write_object<M: SerializeMap>(
    map: &mut M,
    object: &ObjectSchema,
    annotations: &Annotations,
) -> Result<(), M::Error> {
    map.serialize_entry("type", SchemaKind::Object.as_str())?;
    if let Some(meta) = &object.meta_schema {
        map.serialize_entry("$schema", meta)?;
    }
    if let Some(id) = &object.id {
        map.serialize_entry("id", id)?;
    }
    write_annotations(map, annotations)?;
    if !object.properties.is_empty() {
        map.serialize_entry("properties", &Properties(&object.properties))?;
    }
    // draft-04 requires at least one entry when `required` is present
    if !object.required.is_empty() {
        map.serialize_entry("required", &object.required)?;
    }
    if let Some(one_of) = &object.one_of {
        map.serialize_entry("oneOf", one_of)?;
    }
    Ok(())
}

struct Properties<'a>(&'a [(String, Schema)]);

impl Serialize for Properties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Schema::Ref(id) => {
                map.serialize_entry("$ref", id)?;
            }
            Schema::Object(object) => {
                write_object(&mut map, object, &object.annotations)?;
            }
            Schema::Shared {
                schema,
                annotations,
            } => {
                write_object(&mut map, schema, &annotations.or(&schema.annotations))?;
            }
            Schema::String(s) => {
                map.serialize_entry("type", SchemaKind::String.as_str())?;
                write_annotations(&mut map, &s.annotations)?;
                if let Some(format) = s.format {
                    map.serialize_entry("format", format.as_str())?;
                }
                if let Some(enums) = &s.enums {
                    map.serialize_entry("enum", enums)?;
                }
                if let Some(pattern) = &s.pattern {
                    map.serialize_entry("pattern", pattern)?;
                }
            }
            Schema::Array(array) => {
                map.serialize_entry("type", SchemaKind::Array.as_str())?;
                write_annotations(&mut map, &array.annotations)?;
                if let Some(items) = &array.items {
                    map.serialize_entry("items", items)?;
                }
            }
            Schema::Null(a) | Schema::Integer(a) | Schema::Number(a) | Schema::Boolean(a) => {
                map.serialize_entry("type", self.kind().as_str())?;
                write_annotations(&mut map, a)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_and_optional_are_disjoint() {
        let mut object = ObjectSchema::new();
        object.put_property("Id", Schema::of_kind(SchemaKind::String));
        object.put_optional_property("Name", Schema::of_kind(SchemaKind::String));
        // re-adding as optional moves the property out of the required set
        object.put_optional_property("Id", Schema::of_kind(SchemaKind::String));

        assert!(!object.is_required("Id"));
        assert_eq!(object.properties().count(), 2);
        assert_eq!(object.optional().collect::<Vec<_>>(), vec!["Id", "Name"]);
    }

    #[test]
    fn test_string_schema_serialization() {
        let mut string = StringSchema::new().with_format(StringFormat::DateTime);
        string.annotations.title = Some("Created Date".to_string());
        string.annotations.readonly = Some(true);

        let value = serde_json::to_value(Schema::String(string)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "string",
                "title": "Created Date",
                "readonly": true,
                "format": "date-time"
            })
        );
    }

    #[test]
    fn test_empty_required_is_omitted() {
        let mut object = ObjectSchema::new().with_id("urn:test:Thing");
        object.put_optional_property("Name", Schema::of_kind(SchemaKind::String));

        let value = serde_json::to_value(Schema::Object(object)).unwrap();
        assert!(value.get("required").is_none());
        assert_eq!(value["properties"]["Name"]["type"], "string");
    }

    #[test]
    fn test_shared_schema_field_annotations_take_precedence() {
        let shape = Arc::new(
            ObjectSchema::new()
                .with_id("urn:test:Address")
                .with_title("Address"),
        );
        let mut field = Schema::shared(Arc::clone(&shape));
        field.annotations_mut().unwrap().title = Some("Billing Address".to_string());

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["title"], "Billing Address");
        assert_eq!(value["id"], "urn:test:Address");
        assert_eq!(shape.annotations.title.as_deref(), Some("Address"));
    }

    #[test]
    fn test_schema_set_deduplicates() {
        let mut set = SchemaSet::new();
        assert!(set.insert(Schema::Ref("urn:test:A".to_string())));
        assert!(!set.insert(Schema::Ref("urn:test:A".to_string())));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_coerce_keeps_annotations() {
        let mut integer = Schema::of_kind(SchemaKind::Integer);
        integer.annotations_mut().unwrap().title = Some("Count".to_string());
        let string = integer.into_string_schema();
        assert_eq!(string.annotations.title.as_deref(), Some("Count"));
        assert!(string.enums.is_none());
    }
}
