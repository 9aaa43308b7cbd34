use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::ProductType;
use crate::shared::metadata::{
    rules_for, FieldMetadata, FieldSource, FieldType, FieldUiMetadata, ValidationRules,
};
use crate::shared::slug::slugify;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
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

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductId>,

    pub name: String,

    pub slug: String,

    pub description: Option<String>,

    /// Stock keeping unit
    pub sku: String,

    pub price: f64,

    /// On-hand stock; declared bounds live in the field schema
    pub quantity: i32,

    #[serde(rename = "type")]
    pub product_type: ProductType,

    #[serde(rename = "isVisible", default)]
    pub is_visible: bool,

    #[serde(rename = "isFeatured", default)]
    pub is_featured: bool,

    /// Publication date (YYYY-MM-DD)
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,

    /// Path returned by the external file store
    #[serde(rename = "imagePath")]
    pub image_path: Option<String>,

    #[serde(rename = "brandId")]
    pub brand_id: Option<String>,
}

impl Product {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        name: String,
        description: Option<String>,
        sku: String,
        price: f64,
        quantity: i32,
        product_type: ProductType,
        is_visible: bool,
        is_featured: bool,
        published_at: Option<String>,
        image_path: Option<String>,
        brand_id: Option<String>,
    ) -> Self {
        let slug = slugify(&name);
        Self {
            base: BaseAggregate::new(ProductId::new_v4()),
            name,
            slug,
            description,
            sku,
            price,
            quantity,
            product_type,
            is_visible,
            is_featured,
            published_at,
            image_path,
            brand_id,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Apply editable fields from a DTO. A name change recomputes the slug.
    pub fn update(&mut self, dto: &ProductDto) {
        if dto.name != self.name {
            self.slug = slugify(&dto.name);
        }
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.sku = dto.sku.clone();
        self.price = dto.price;
        self.quantity = dto.quantity;
        self.product_type = dto.product_type;
        self.is_visible = dto.is_visible.unwrap_or(self.is_visible);
        self.is_featured = dto.is_featured.unwrap_or(self.is_featured);
        self.published_at = dto.published_at.clone();
        if dto.image_path.is_some() {
            self.image_path = dto.image_path.clone();
        }
        self.brand_id = dto.brand_id.clone();
        self.base.metadata.increment_version();
    }

    /// Out-of-range values are rejected here, never clamped.
    pub fn validate(&self) -> Result<(), String> {
        rules_for(FIELDS, "name").validate_string(&self.name, "name")?;
        rules_for(FIELDS, "slug").validate_string(&self.slug, "slug")?;
        rules_for(FIELDS, "sku").validate_string(&self.sku, "sku")?;
        rules_for(FIELDS, "price").validate_number(self.price, "price")?;
        rules_for(FIELDS, "quantity").validate_number(self.quantity as f64, "quantity")?;
        if let Some(brand) = &self.brand_id {
            if Uuid::parse_str(brand).is_err() {
                return Err("brand_id must be a valid brand ID".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
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
        "sku",
        "String",
        FieldUiMetadata::labeled("SKU (Stock Keeping Unit)"),
        ValidationRules::required(),
    ),
    FieldMetadata::primitive(
        "price",
        "f64",
        FieldUiMetadata::labeled("Price"),
        ValidationRules::required_min(0.0),
    ),
    FieldMetadata::primitive(
        "quantity",
        "i32",
        FieldUiMetadata::labeled("Quantity"),
        ValidationRules::required_range(0.0, 100.0),
    ),
    FieldMetadata {
        name: "type",
        rust_type: "ProductType",
        field_type: FieldType::Enum,
        source: FieldSource::Specific,
        ui: FieldUiMetadata::labeled("Type"),
        validation: ValidationRules::required(),
        ref_aggregate: None,
        enum_values: Some(&["downloadable", "deliverable"]),
    },
    FieldMetadata::primitive(
        "is_visible",
        "bool",
        FieldUiMetadata {
            hint: Some("Enable or disable product visibility"),
            ..FieldUiMetadata::widget("Visibility", "toggle")
        },
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "is_featured",
        "bool",
        FieldUiMetadata {
            hint: Some("Enable or disable product featured status"),
            ..FieldUiMetadata::widget("Featured", "toggle")
        },
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "published_at",
        "Option<String>",
        FieldUiMetadata::widget("Published Date", "date"),
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "image_path",
        "Option<String>",
        FieldUiMetadata::form_only("Image"),
        ValidationRules::none(),
    ),
    FieldMetadata {
        name: "brand_id",
        rust_type: "Option<String>",
        field_type: FieldType::AggregateRef,
        source: FieldSource::Specific,
        ui: FieldUiMetadata::labeled("Brand"),
        validation: ValidationRules::none(),
        ref_aggregate: Some("a001"),
        enum_values: None,
    },
];

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(rename = "isVisible")]
    pub is_visible: Option<bool>,
    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "imagePath")]
    pub image_path: Option<String>,
    #[serde(rename = "brandId")]
    pub brand_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new_for_insert(
            "Widget Pro".into(),
            None,
            "WID-001".into(),
            19.99,
            10,
            ProductType::Deliverable,
            true,
            false,
            None,
            None,
            None,
        )
    }

    #[test]
    fn test_slug_derived_on_insert() {
        assert_eq!(sample().slug, "widget-pro");
    }

    #[test]
    fn test_quantity_bounds_rejected_not_clamped() {
        let mut p = sample();
        p.quantity = 101;
        assert!(p.validate().is_err());
        assert_eq!(p.quantity, 101);
        p.quantity = -1;
        assert!(p.validate().is_err());
        p.quantity = 0;
        assert!(p.validate().is_ok());
        p.quantity = 100;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut p = sample();
        p.price = -0.01;
        assert!(p.validate().is_err());
        p.price = 0.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_type_enum_round_trips_through_json() {
        let p = sample();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "deliverable");
        assert!(ProductType::from_code("downloadable").is_some());
        assert!(ProductType::from_code("subscription").is_none());
    }
}
