//! Field-level constraints layered on top of the mapped base schema

use std::collections::BTreeSet;

use crate::describe::{FieldDescriptor, FieldSubType, PickListValue};

use super::node::Schema;

/// Decorate a freshly mapped schema with the constraints of `field`
///
/// Picklists become string enums and multi-select picklists become a string
/// pattern. Title and default are always copied; read-only is only set when
/// the describe result says whether the field is updateable.
pub fn apply_field_constraints(schema: Schema, field: &FieldDescriptor) -> Schema {
    let values = field.picklist_values.as_deref();

    let mut schema = match field.sub_type() {
        FieldSubType::Picklist => {
            let mut string = schema.into_string_schema();
            string.enums = Some(picklist_enum(values));
            Schema::String(string)
        }
        FieldSubType::MultiPicklist => {
            let mut string = schema.into_string_schema();
            string.pattern = Some(multipicklist_pattern(values));
            Schema::String(string)
        }
        FieldSubType::Other => schema,
    };

    if let Some(annotations) = schema.annotations_mut() {
        annotations.title = Some(field.label.clone());
        annotations.default = field.default_value.clone();
        if let Some(updateable) = field.updateable {
            annotations.readonly = Some(!updateable);
        }
    }
    schema
}

/// Distinct picklist values
pub fn picklist_enum(values: Option<&[PickListValue]>) -> BTreeSet<String> {
    values
        .unwrap_or_default()
        .iter()
        .map(|v| v.value.clone())
        .collect()
}

/// Pattern matching comma-separated selections of picklist values
///
/// Each value becomes a `(,?(value))` alternative. The pattern does not stop
/// a value from repeating, and values are inserted verbatim.
pub fn multipicklist_pattern(values: Option<&[PickListValue]>) -> String {
    let Some(values) = values else {
        return String::new();
    };

    let mut alternatives: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let alternative = format!("(,?({}))", value.value);
        if !alternatives.contains(&alternative) {
            alternatives.push(alternative);
        }
    }
    format!("({})", alternatives.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::node::{SchemaKind, StringFormat, StringSchema};
    use serde_json::json;

    fn values(raw: &[&str]) -> Vec<PickListValue> {
        raw.iter().map(|v| PickListValue::new(*v)).collect()
    }

    #[test]
    fn test_picklist_enum_collapses_duplicates() {
        let enums = picklist_enum(Some(values(&["A", "B", "A"]).as_slice()));
        assert_eq!(enums, BTreeSet::from(["A".to_string(), "B".to_string()]));
        assert!(picklist_enum(None).is_empty());
    }

    #[test]
    fn test_multipicklist_pattern_shape() {
        assert_eq!(
            multipicklist_pattern(Some(values(&["A", "B", "A"]).as_slice())),
            "((,?(A))|(,?(B)))"
        );
        assert_eq!(multipicklist_pattern(Some(values(&[]).as_slice())), "()");
        assert_eq!(multipicklist_pattern(None), "");
    }

    #[test]
    fn test_picklist_coerces_to_string() {
        let field = FieldDescriptor::new("Rating", "xsd:int")
            .with_type("picklist")
            .with_picklist_values(["1", "2"]);
        let schema = apply_field_constraints(Schema::of_kind(SchemaKind::Integer), &field);

        let string = schema.as_string().unwrap();
        assert_eq!(string.enums.as_ref().unwrap().len(), 2);
        assert_eq!(string.annotations.title.as_deref(), Some("Rating"));
    }

    #[test]
    fn test_picklist_without_values_gets_empty_enum() {
        let field = FieldDescriptor::new("Type", "xsd:string").with_type("picklist");
        let schema = apply_field_constraints(Schema::of_kind(SchemaKind::String), &field);
        assert_eq!(schema.as_string().unwrap().enums, Some(BTreeSet::new()));
    }

    #[test]
    fn test_readonly_follows_updateable() {
        let base = || Schema::of_kind(SchemaKind::Boolean);

        let unknown = apply_field_constraints(base(), &FieldDescriptor::new("F", "xsd:boolean"));
        assert_eq!(unknown.annotations().unwrap().readonly, None);

        let locked = apply_field_constraints(
            base(),
            &FieldDescriptor::new("F", "xsd:boolean").with_updateable(false),
        );
        assert_eq!(locked.annotations().unwrap().readonly, Some(true));

        let open = apply_field_constraints(
            base(),
            &FieldDescriptor::new("F", "xsd:boolean").with_updateable(true),
        );
        assert_eq!(open.annotations().unwrap().readonly, Some(false));
    }

    #[test]
    fn test_other_sub_types_pass_through() {
        let field = FieldDescriptor::new("CreatedDate", "xsd:dateTime")
            .with_type("datetime")
            .with_label("Created Date")
            .with_default_value(json!("2024-01-01T00:00:00Z"));
        let base = Schema::String(StringSchema::new().with_format(StringFormat::DateTime));
        let schema = apply_field_constraints(base, &field);

        let string = schema.as_string().unwrap();
        assert_eq!(string.format, Some(StringFormat::DateTime));
        assert!(string.enums.is_none());
        assert!(string.pattern.is_none());
        assert_eq!(string.annotations.default, Some(json!("2024-01-01T00:00:00Z")));
    }
}
