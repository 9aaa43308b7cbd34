//! Field type enumeration for the metadata system

/// Category of field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Primitive, // String, i32, f64, bool, date
    Enum,         // Rust enum with a fixed variant list
    AggregateRef, // Reference to another aggregate by ID
    NestedTable,  // Vec<T> of embedded rows (repeater)
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Enum => "enum",
            Self::AggregateRef => "aggregate_ref",
            Self::NestedTable => "nested_table",
        }
    }
}

/// Where the field lives in the aggregate structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSource {
    #[default]
    Specific, // Field specific to this aggregate
    Base,     // Field from BaseAggregate (id)
    Metadata, // Field from EntityMetadata (created_at, updated_at, ...)
}

impl FieldSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Base => "base",
            Self::Metadata => "metadata",
        }
    }
}
