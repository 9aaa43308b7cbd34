//! Declarative field metadata for the admin resources
//!
//! Each aggregate exposes a static `FieldMetadata` table describing its form
//! and list schema. An external renderer consumes it; the services read the
//! validation rules out of it.

pub mod field_type;
pub mod types;
pub mod validation;

pub use field_type::{FieldSource, FieldType};
pub use types::{FieldMetadata, FieldUiMetadata};
pub use validation::ValidationRules;

/// Look up the validation rules declared for a field, by name.
///
/// Missing fields get empty rules so callers can validate unconditionally.
pub fn rules_for(fields: &'static [FieldMetadata], name: &str) -> ValidationRules {
    fields
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.validation)
        .unwrap_or(ValidationRules::none())
}
