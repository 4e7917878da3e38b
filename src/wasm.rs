//! WebAssembly bindings
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { generateSObjectSchema, generateApiSchema } from 'sobject-jsonschema';
//!
//! await init();
//!
//! const result = generateSObjectSchema(JSON.stringify(describe), true);
//! if (result.success) {
//!   console.log(result.schema);
//! } else {
//!   console.error(result.error);
//! }
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::describe::ObjectDescription;
use crate::schema::{api_json_schema_string, SObjectSchemaGenerator, SchemaConfig, SchemaResult};

/// Helper to serialize values as plain JS objects (not Maps)
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

fn to_js_result(result: SchemaResult<String>) -> JsValue {
    match result {
        Ok(schema) => to_js_value(&serde_json::json!({
            "success": true,
            "schema": schema,
        })),
        Err(e) => to_js_value(&serde_json::json!({
            "success": false,
            "error": e.to_string(),
        })),
    }
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Generate the JSON Schema text for a describe payload
///
/// Returns an object with:
/// - `success`: boolean
/// - `schema`: the encoded root schema (if successful)
/// - `error`: error message (if failed)
#[wasm_bindgen(js_name = generateSObjectSchema)]
pub fn generate_sobject_schema(describe_json: &str, add_query_schema: bool) -> JsValue {
    let result = ObjectDescription::from_json(describe_json).and_then(|description| {
        SObjectSchemaGenerator::new(SchemaConfig {
            add_query_schema,
            ..SchemaConfig::default()
        })
        .json_schema_string(&description)
    });
    to_js_result(result)
}

/// Generate the JSON Schema text for the fixed REST API shapes
#[wasm_bindgen(js_name = generateApiSchema)]
pub fn generate_api_schema() -> JsValue {
    to_js_result(api_json_schema_string(true))
}
