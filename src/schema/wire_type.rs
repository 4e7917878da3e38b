//! Mapping from SOAP wire types to schema kinds

use super::error::{SchemaError, SchemaResult};
use super::node::SchemaKind;
use super::shapes::FixedShape;

/// SOAP types a describe result can report for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Id,
    String,
    Base64Binary,
    AnyType,
    Integer,
    Int,
    Long,
    Short,
    Byte,
    UnsignedInt,
    UnsignedShort,
    UnsignedByte,
    Decimal,
    Float,
    Double,
    Boolean,
    DateTime,
    Time,
    Date,
    /// Generic date (`xsd:g*` family)
    G,
    Address,
    Location,
}

/// Compound shapes shared by every field of that type within one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Address,
    Geolocation,
}

impl CompoundKind {
    /// Fixed shape the compound schema is derived from
    pub fn shape(&self) -> FixedShape {
        match self {
            CompoundKind::Address => FixedShape::Address,
            CompoundKind::Geolocation => FixedShape::GeoLocation,
        }
    }
}

/// Result of mapping a wire type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMapping {
    Kind(SchemaKind),
    /// String schema with `date-time` format
    DateTime,
    Compound(CompoundKind),
}

impl WireType {
    pub const ALL: [WireType; 22] = [
        WireType::Id,
        WireType::String,
        WireType::Base64Binary,
        WireType::AnyType,
        WireType::Integer,
        WireType::Int,
        WireType::Long,
        WireType::Short,
        WireType::Byte,
        WireType::UnsignedInt,
        WireType::UnsignedShort,
        WireType::UnsignedByte,
        WireType::Decimal,
        WireType::Float,
        WireType::Double,
        WireType::Boolean,
        WireType::DateTime,
        WireType::Time,
        WireType::Date,
        WireType::G,
        WireType::Address,
        WireType::Location,
    ];

    /// Parse a wire type tag such as `tns:ID` or `xsd:string`
    ///
    /// Everything up to and including the first `:` is ignored. Matching is
    /// case-sensitive.
    pub fn parse(tag: &str) -> SchemaResult<Self> {
        let local = tag.split_once(':').map_or(tag, |(_, local)| local);
        WireType::ALL
            .iter()
            .copied()
            .find(|wire_type| wire_type.local_name() == local)
            .ok_or_else(|| SchemaError::UnsupportedWireType(tag.to_string()))
    }

    /// Tag without namespace prefix
    pub fn local_name(&self) -> &'static str {
        match self {
            WireType::Id => "ID",
            WireType::String => "string",
            WireType::Base64Binary => "base64Binary",
            WireType::AnyType => "anyType",
            WireType::Integer => "integer",
            WireType::Int => "int",
            WireType::Long => "long",
            WireType::Short => "short",
            WireType::Byte => "byte",
            WireType::UnsignedInt => "unsignedInt",
            WireType::UnsignedShort => "unsignedShort",
            WireType::UnsignedByte => "unsignedByte",
            WireType::Decimal => "decimal",
            WireType::Float => "float",
            WireType::Double => "double",
            WireType::Boolean => "boolean",
            WireType::DateTime => "dateTime",
            WireType::Time => "time",
            WireType::Date => "date",
            WireType::G => "g",
            WireType::Address => "address",
            WireType::Location => "location",
        }
    }

    pub fn mapping(&self) -> TypeMapping {
        match self {
            // anything the API renders as text, including references and picklists
            WireType::Id | WireType::String | WireType::Base64Binary | WireType::AnyType => {
                TypeMapping::Kind(SchemaKind::String)
            }
            WireType::Integer
            | WireType::Int
            | WireType::Long
            | WireType::Short
            | WireType::Byte
            | WireType::UnsignedInt
            | WireType::UnsignedShort
            | WireType::UnsignedByte => TypeMapping::Kind(SchemaKind::Integer),
            WireType::Decimal | WireType::Float | WireType::Double => {
                TypeMapping::Kind(SchemaKind::Number)
            }
            WireType::Boolean => TypeMapping::Kind(SchemaKind::Boolean),
            WireType::DateTime | WireType::Time | WireType::Date | WireType::G => {
                TypeMapping::DateTime
            }
            WireType::Address => TypeMapping::Compound(CompoundKind::Address),
            WireType::Location => TypeMapping::Compound(CompoundKind::Geolocation),
        }
    }
}

/// Map a wire type tag straight to its schema mapping
pub fn map_wire_type(tag: &str) -> SchemaResult<TypeMapping> {
    WireType::parse(tag).map(|wire_type| wire_type.mapping())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_prefix_is_stripped() {
        assert_eq!(WireType::parse("tns:ID").unwrap(), WireType::Id);
        assert_eq!(WireType::parse("xsd:string").unwrap(), WireType::String);
        assert_eq!(WireType::parse("string").unwrap(), WireType::String);
        assert_eq!(WireType::parse("urn:address").unwrap(), WireType::Address);
    }

    #[test]
    fn test_only_first_colon_is_a_separator() {
        assert!(matches!(
            WireType::parse("a:b:string"),
            Err(SchemaError::UnsupportedWireType(tag)) if tag == "a:b:string"
        ));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(WireType::parse("xsd:String").is_err());
        assert!(WireType::parse("tns:id").is_err());
    }

    #[test]
    fn test_every_local_name_round_trips() {
        for wire_type in WireType::ALL {
            assert_eq!(WireType::parse(wire_type.local_name()).unwrap(), wire_type);
        }
    }

    #[test]
    fn test_date_types_map_to_date_time() {
        for tag in ["xsd:dateTime", "xsd:time", "xsd:date", "xsd:g"] {
            assert_eq!(map_wire_type(tag).unwrap(), TypeMapping::DateTime);
        }
    }
}
