//! Generated object schemas checked against record instances with a draft-04 validator

use jsonschema::{Draft, Validator};
use serde_json::{json, Value};
use sobject_jsonschema::{ObjectDescription, SObjectSchemaGenerator, SchemaConfig};

const CONTACT_DESCRIBE: &str = include_str!("fixtures/contact_describe.json");

fn contact_validator() -> Validator {
    let mut description = ObjectDescription::from_json(CONTACT_DESCRIBE).expect("fixture parses");
    // one address field, so the embedded address `id` appears once
    description.fields.retain(|field| field.name != "OtherAddress");
    let generator = SObjectSchemaGenerator::new(SchemaConfig {
        add_query_schema: false,
        ..SchemaConfig::default()
    });
    let schemas = generator.generate(&description).expect("schema generation failed");
    let object = schemas.iter().next().expect("object schema missing");
    let schema: Value = serde_json::to_value(object).expect("schema encodes");

    jsonschema::options()
        .with_draft(Draft::Draft4)
        .build(&schema)
        .expect("schema compilation failed")
}

fn valid_contact() -> Value {
    json!({
        "Id": "003000000000001AAA",
        "LastName": "Lovelace",
        "HasOptedOutOfEmail": false,
        "CreatedDate": "2024-03-01T10:15:00Z",
        "Salutation": "Dr.",
        "Languages__c": "English,French",
        "MailingAddress": { "city": "London", "latitude": 51.5, "longitude": -0.12 },
        "NumberOfChildren__c": 2
    })
}

#[test]
fn test_valid_record_is_accepted() {
    let validator = contact_validator();
    assert!(validator.is_valid(&valid_contact()));
}

#[test]
fn test_missing_required_field_is_rejected() {
    let validator = contact_validator();
    let mut record = valid_contact();
    record.as_object_mut().unwrap().remove("LastName");
    assert!(!validator.is_valid(&record));
}

#[test]
fn test_nillable_fields_may_be_omitted() {
    let validator = contact_validator();
    let record = json!({
        "Id": "003000000000001AAA",
        "LastName": "Hopper",
        "HasOptedOutOfEmail": true,
        "CreatedDate": "2024-03-01T10:15:00Z"
    });
    assert!(validator.is_valid(&record));
}

#[test]
fn test_picklist_value_outside_enum_is_rejected() {
    let validator = contact_validator();
    let mut record = valid_contact();
    record["Salutation"] = json!("Sir");
    assert!(!validator.is_valid(&record));
}

#[test]
fn test_wrong_kind_is_rejected() {
    let validator = contact_validator();

    let mut record = valid_contact();
    record["HasOptedOutOfEmail"] = json!("no");
    assert!(!validator.is_valid(&record));

    let mut record = valid_contact();
    record["MailingAddress"] = json!({ "latitude": "north" });
    assert!(!validator.is_valid(&record));
}
