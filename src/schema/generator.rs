//! JSON Schema generation for SObject descriptions

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::describe::{FieldDescriptor, ObjectDescription};

use super::constraints::apply_field_constraints;
use super::error::SchemaResult;
use super::node::{ArraySchema, ObjectSchema, Schema, SchemaSet, StringFormat, StringSchema};
use super::root::{compose_root, to_json_string};
use super::shapes::{derive_schema, FixedShape};
use super::shared::SharedSchemas;
use super::wire_type::{map_wire_type, TypeMapping};

/// Identifier prefix used when none is configured
pub const DEFAULT_ID_PREFIX: &str = "urn:jsonschema:org:apache:camel:component:salesforce:dto";

/// Name of the query result property holding the records
pub const RECORDS_PROPERTY: &str = "records";

/// Configuration for schema generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaConfig {
    /// Prefix of every generated schema identifier
    pub id_prefix: String,
    /// Whether to emit the query result wrapper next to the object schema
    pub add_query_schema: bool,
    /// Indent encoded output
    pub pretty: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            add_query_schema: true,
            pretty: true,
        }
    }
}

/// Generator for SObject JSON Schemas
#[derive(Debug, Clone, Default)]
pub struct SObjectSchemaGenerator {
    config: SchemaConfig,
}

impl SObjectSchemaGenerator {
    pub fn new(config: SchemaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Identifier of the object schema for `object_name`
    pub fn object_id(&self, object_name: &str) -> String {
        format!("{}:{}", self.config.id_prefix, object_name)
    }

    /// Identifier of the query result schema for `object_name`
    pub fn query_records_id(&self, object_name: &str) -> String {
        format!("{}:QueryRecords{}", self.config.id_prefix, object_name)
    }

    /// Generate the object schema and, if configured, its query wrapper
    ///
    /// Any field with an unsupported wire type fails the whole build.
    pub fn generate(&self, description: &ObjectDescription) -> SchemaResult<SchemaSet> {
        debug!(
            "generating JSON schema for {} ({} fields)",
            description.name,
            description.fields.len()
        );

        let mut shared = SharedSchemas::new();
        let object = self.object_schema(description, &mut shared)?;

        let mut schemas = SchemaSet::new();
        let query = if self.config.add_query_schema {
            Some(self.query_records_schema(&object, &description.name)?)
        } else {
            None
        };
        schemas.insert(Schema::Object(object));
        if let Some(query) = query {
            schemas.insert(Schema::Object(query));
        }
        Ok(schemas)
    }

    /// Generate the root envelope for an object
    pub fn root_schema(&self, description: &ObjectDescription) -> SchemaResult<Schema> {
        let schemas = self.generate(description)?;
        Ok(compose_root(schemas, &self.config.id_prefix))
    }

    /// Generate and encode the root envelope for an object
    pub fn json_schema_string(&self, description: &ObjectDescription) -> SchemaResult<String> {
        let root = self.root_schema(description)?;
        to_json_string(&root, self.config.pretty)
    }

    /// Assemble the object schema from all fields, in describe order
    pub fn object_schema(
        &self,
        description: &ObjectDescription,
        shared: &mut SharedSchemas,
    ) -> SchemaResult<ObjectSchema> {
        let mut object = ObjectSchema::new()
            .with_id(self.object_id(&description.name))
            .with_title(description.label.clone());

        for field in &description.fields {
            let schema = field_schema(field, shared)?;
            if field.nillable {
                object.put_optional_property(field.name.clone(), schema);
            } else {
                object.put_property(field.name.clone(), schema);
            }
        }
        Ok(object)
    }

    /// Build the query result schema whose records refer to `object`
    pub fn query_records_schema(
        &self,
        object: &ObjectSchema,
        object_name: &str,
    ) -> SchemaResult<ObjectSchema> {
        let mut query = derive_schema(FixedShape::QueryRecords)?;
        query.id = Some(self.query_records_id(object_name));

        let reference = object
            .id
            .clone()
            .unwrap_or_else(|| self.object_id(object_name));
        query.put_property(
            RECORDS_PROPERTY,
            Schema::Array(ArraySchema::of(Schema::Ref(reference))),
        );
        Ok(query)
    }
}

/// Map a field to its schema and apply its constraints
pub fn field_schema(field: &FieldDescriptor, shared: &mut SharedSchemas) -> SchemaResult<Schema> {
    trace!("mapping field {} ({})", field.name, field.soap_type);
    let base = match map_wire_type(&field.soap_type)? {
        TypeMapping::Kind(kind) => Schema::of_kind(kind),
        TypeMapping::DateTime => {
            Schema::String(StringSchema::new().with_format(StringFormat::DateTime))
        }
        TypeMapping::Compound(kind) => Schema::shared(shared.get(kind)?),
    };
    Ok(apply_field_constraints(base, field))
}
