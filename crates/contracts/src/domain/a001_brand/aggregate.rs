use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::metadata::{rules_for, FieldMetadata, FieldUiMetadata, ValidationRules};
use crate::shared::slug::slugify;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrandId(pub Uuid);

impl BrandId {
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

impl AggregateId for BrandId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BrandId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(flatten)]
    pub base: BaseAggregate<BrandId>,

    pub name: String,

    /// Derived from name at creation; recomputed only when the name changes
    pub slug: String,

    pub description: Option<String>,

    #[serde(rename = "isVisible", default)]
    pub is_visible: bool,

    /// Primary brand color as "#rrggbb"
    #[serde(rename = "primaryHex")]
    pub primary_hex: Option<String>,
}

impl Brand {
    pub fn new_for_insert(
        name: String,
        description: Option<String>,
        is_visible: bool,
        primary_hex: Option<String>,
    ) -> Self {
        let slug = slugify(&name);
        Self {
            base: BaseAggregate::new(BrandId::new_v4()),
            name,
            slug,
            description,
            is_visible,
            primary_hex,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Apply editable fields from a DTO. A name change recomputes the slug.
    pub fn update(&mut self, dto: &BrandDto) {
        if dto.name != self.name {
            self.slug = slugify(&dto.name);
        }
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.is_visible = dto.is_visible.unwrap_or(self.is_visible);
        self.primary_hex = dto.primary_hex.clone();
        self.base.metadata.increment_version();
    }

    pub fn validate(&self) -> Result<(), String> {
        rules_for(FIELDS, "name").validate_string(&self.name, "name")?;
        rules_for(FIELDS, "slug").validate_string(&self.slug, "slug")?;
        if let Some(hex) = &self.primary_hex {
            let body = hex.strip_prefix('#').unwrap_or("");
            if body.len() != 6 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err("primary_hex must look like #rrggbb".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Brand {
    type Id = BrandId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "brand"
    }

    fn element_name() -> &'static str {
        "Brand"
    }

    fn list_name() -> &'static str {
        "Brands"
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
        "slug",
        "String",
        FieldUiMetadata {
            hint: Some("Derived from name"),
            ..FieldUiMetadata::labeled("Slug")
        },
        ValidationRules::required(),
    ),
    FieldMetadata::primitive(
        "description",
        "Option<String>",
        FieldUiMetadata::widget("Description", "markdown"),
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "is_visible",
        "bool",
        FieldUiMetadata {
            hint: Some("Enable or disable brand"),
            ..FieldUiMetadata::widget("Visibility", "toggle")
        },
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "primary_hex",
        "Option<String>",
        FieldUiMetadata::widget("Primary Color", "color"),
        ValidationRules::none(),
    ),
];

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrandDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "isVisible")]
    pub is_visible: Option<bool>,
    #[serde(rename = "primaryHex")]
    pub primary_hex: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_derived_on_insert() {
        let brand = Brand::new_for_insert("Acme Co".into(), None, true, None);
        assert_eq!(brand.slug, "acme-co");
    }

    #[test]
    fn test_rename_recomputes_slug() {
        let mut brand = Brand::new_for_insert("Acme Co".into(), None, true, None);
        let dto = BrandDto {
            name: "New Acme".into(),
            ..Default::default()
        };
        brand.update(&dto);
        assert_eq!(brand.slug, "new-acme");
        assert_eq!(brand.base.metadata.version, 1);
    }

    #[test]
    fn test_blank_name_rejected() {
        let brand = Brand::new_for_insert("   ".into(), None, true, None);
        assert!(brand.validate().is_err());
    }

    #[test]
    fn test_primary_hex_shape() {
        let mut brand = Brand::new_for_insert("Acme".into(), None, true, Some("#a1b2c3".into()));
        assert!(brand.validate().is_ok());
        brand.primary_hex = Some("red".into());
        assert!(brand.validate().is_err());
        brand.primary_hex = Some("#12345".into());
        assert!(brand.validate().is_err());
    }
}
