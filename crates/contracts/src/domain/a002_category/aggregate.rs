use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::metadata::{rules_for, FieldMetadata, FieldSource, FieldType, FieldUiMetadata, ValidationRules};
use crate::shared::slug::slugify;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
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

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub base: BaseAggregate<CategoryId>,

    pub name: String,

    pub slug: String,

    pub description: Option<String>,

    #[serde(rename = "isVisible", default)]
    pub is_visible: bool,

    /// Parent category ID; None for roots. The schema itself does not forbid
    /// cycles, the service-level ancestor walk does.
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl Category {
    pub fn new_for_insert(
        name: String,
        description: Option<String>,
        is_visible: bool,
        parent_id: Option<String>,
    ) -> Self {
        let slug = slugify(&name);
        Self {
            base: BaseAggregate::new(CategoryId::new_v4()),
            name,
            slug,
            description,
            is_visible,
            parent_id,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &CategoryDto) {
        if dto.name != self.name {
            self.slug = slugify(&dto.name);
        }
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.is_visible = dto.is_visible.unwrap_or(self.is_visible);
        self.parent_id = dto.parent_id.clone();
        self.base.metadata.increment_version();
    }

    pub fn validate(&self) -> Result<(), String> {
        rules_for(FIELDS, "name").validate_string(&self.name, "name")?;
        rules_for(FIELDS, "slug").validate_string(&self.slug, "slug")?;
        if let Some(parent) = &self.parent_id {
            if Uuid::parse_str(parent).is_err() {
                return Err("parent_id must be a valid category ID".into());
            }
            if *parent == self.to_string_id() {
                return Err("category cannot be its own parent".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }

    /// Proposed parent as a UUID, if any
    pub fn parent_uuid(&self) -> Option<Uuid> {
        self.parent_id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}

/// Whether pointing `category` at `new_parent` would make it its own ancestor.
///
/// `parent_of` maps every live category to its current parent. Walks bounded
/// by the map size, so pre-existing bad data cannot loop forever; a walk that
/// exceeds the bound is reported as a cycle.
pub fn creates_cycle(
    category: Uuid,
    new_parent: Uuid,
    parent_of: &HashMap<Uuid, Option<Uuid>>,
) -> bool {
    let mut current = Some(new_parent);
    let mut hops = 0usize;
    while let Some(node) = current {
        if node == category {
            return true;
        }
        hops += 1;
        if hops > parent_of.len() {
            return true;
        }
        current = parent_of.get(&node).copied().flatten();
    }
    false
}

impl AggregateRoot for Category {
    type Id = CategoryId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn element_name() -> &'static str {
        "Category"
    }

    fn list_name() -> &'static str {
        "Categories"
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
    FieldMetadata {
        name: "parent_id",
        rust_type: "Option<String>",
        field_type: FieldType::AggregateRef,
        source: FieldSource::Specific,
        ui: FieldUiMetadata::labeled("Parent"),
        validation: ValidationRules::none(),
        ref_aggregate: Some("a002"),
        enum_values: None,
    },
    FieldMetadata::primitive(
        "description",
        "Option<String>",
        FieldUiMetadata::widget("Description", "markdown"),
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "is_visible",
        "bool",
        FieldUiMetadata::widget("Visibility", "toggle"),
        ValidationRules::none(),
    ),
];

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "isVisible")]
    pub is_visible: Option<bool>,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_self_parent_rejected() {
        let mut cat = Category::new_for_insert("Tools".into(), None, true, None);
        cat.parent_id = Some(cat.to_string_id());
        assert!(cat.validate().is_err());
    }

    #[test]
    fn test_direct_cycle_detected() {
        // A -> B, then B -> A
        let (a, b) = (uuid(1), uuid(2));
        let mut parents = HashMap::new();
        parents.insert(a, Some(b));
        parents.insert(b, None);
        assert!(creates_cycle(b, a, &parents));
    }

    #[test]
    fn test_deep_cycle_detected() {
        // A -> B -> C, then C -> A closes the loop at depth 2
        let (a, b, c) = (uuid(1), uuid(2), uuid(3));
        let mut parents = HashMap::new();
        parents.insert(a, Some(b));
        parents.insert(b, Some(c));
        parents.insert(c, None);
        assert!(creates_cycle(c, b, &parents));
        assert!(creates_cycle(c, a, &parents));
    }

    #[test]
    fn test_reparenting_within_tree_allowed() {
        let (root, left, right) = (uuid(1), uuid(2), uuid(3));
        let mut parents = HashMap::new();
        parents.insert(root, None);
        parents.insert(left, Some(root));
        parents.insert(right, Some(root));
        // moving "right" under "left" is fine
        assert!(!creates_cycle(right, left, &parents));
    }

    #[test]
    fn test_corrupted_chain_treated_as_cycle() {
        // pre-existing loop not involving the candidate still terminates
        let (a, b, c) = (uuid(1), uuid(2), uuid(3));
        let mut parents = HashMap::new();
        parents.insert(a, Some(b));
        parents.insert(b, Some(a));
        parents.insert(c, None);
        assert!(creates_cycle(c, a, &parents));
    }
}
