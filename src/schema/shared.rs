//! Per-build memo of the shared compound sub-schemas

use std::sync::Arc;

use log::debug;

use super::error::SchemaResult;
use super::node::ObjectSchema;
use super::shapes::derive_schema;
use super::wire_type::CompoundKind;

/// Lazily derived address and geolocation schemas
///
/// One instance belongs to exactly one schema build. Every field of a
/// compound type receives a handle to the same node.
#[derive(Debug, Default)]
pub struct SharedSchemas {
    address: Option<Arc<ObjectSchema>>,
    geolocation: Option<Arc<ObjectSchema>>,
}

impl SharedSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the schema for a compound kind, deriving it on first use
    pub fn get(&mut self, kind: CompoundKind) -> SchemaResult<Arc<ObjectSchema>> {
        let slot = match kind {
            CompoundKind::Address => &mut self.address,
            CompoundKind::Geolocation => &mut self.geolocation,
        };
        if let Some(schema) = slot.as_ref() {
            return Ok(Arc::clone(schema));
        }

        debug!("deriving shared {} schema", kind.shape().name());
        let schema = Arc::new(derive_schema(kind.shape())?);
        *slot = Some(Arc::clone(&schema));
        Ok(schema)
    }

    /// Whether the schema for `kind` has been derived yet
    pub fn is_derived(&self, kind: CompoundKind) -> bool {
        match kind {
            CompoundKind::Address => self.address.is_some(),
            CompoundKind::Geolocation => self.geolocation.is_some(),
        }
    }
}
