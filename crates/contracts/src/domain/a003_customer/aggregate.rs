use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::metadata::{rules_for, FieldMetadata, FieldUiMetadata, ValidationRules};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub Uuid);

impl CustomerId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CustomerId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CustomerId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub base: BaseAggregate<CustomerId>,

    pub name: String,

    pub email: String,

    pub phone: Option<String>,

    pub address: Option<String>,
}

impl Customer {
    pub fn new_for_insert(
        name: String,
        email: String,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(CustomerId::new_v4()),
            name,
            email,
            phone,
            address,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CustomerDto) {
        self.name = dto.name.clone();
        self.email = dto.email.clone();
        self.phone = dto.phone.clone();
        self.address = dto.address.clone();
        self.base.metadata.increment_version();
    }

    pub fn validate(&self) -> Result<(), String> {
        rules_for(FIELDS, "name").validate_string(&self.name, "name")?;
        rules_for(FIELDS, "email").validate_string(&self.email, "email")?;
        if !self.email.contains('@') {
            return Err("email must contain @".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "customer"
    }

    fn element_name() -> &'static str {
        "Customer"
    }

    fn list_name() -> &'static str {
        "Customers"
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}

// ============================================================================
// Field schema
// ============================================================================
pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::primitive(
        "name",
        "String",
        FieldUiMetadata::labeled("Name"),
        ValidationRules::required(),
    ),
    FieldMetadata::primitive(
        "email",
        "String",
        FieldUiMetadata::labeled("Email"),
        ValidationRules::required(),
    ),
    FieldMetadata::primitive(
        "phone",
        "Option<String>",
        FieldUiMetadata::labeled("Phone"),
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "address",
        "Option<String>",
        FieldUiMetadata::form_only("Address"),
        ValidationRules::none(),
    ),
];

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerDto {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_must_contain_at() {
        let mut c = Customer::new_for_insert("Jane".into(), "jane@example.com".into(), None, None);
        assert!(c.validate().is_ok());
        c.email = "jane.example.com".into();
        assert!(c.validate().is_err());
    }
}
