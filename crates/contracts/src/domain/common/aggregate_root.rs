use super::EntityMetadata;
use crate::shared::metadata::FieldMetadata;

/// Trait implemented by every aggregate root
///
/// Instance accessors plus the static metadata that describes the aggregate
/// class to the rest of the system (storage names, UI names, field schema).
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    // ============================================================================
    // Instance accessors
    // ============================================================================

    /// Record ID
    fn id(&self) -> Self::Id;

    /// Lifecycle metadata
    fn metadata(&self) -> &EntityMetadata;

    /// Mutable lifecycle metadata
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Class-level metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for storage (e.g. "brand")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Brand")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Brands")
    fn list_name() -> &'static str;

    /// Declarative field schema consumed by the external form/table renderer
    ///
    /// Compile-time constant; also the source of the numeric/length bounds
    /// the services enforce, so the declared schema is the enforced one.
    fn field_metadata() -> &'static [FieldMetadata];

    // ============================================================================
    // Default implementations
    // ============================================================================

    /// Full system name (e.g. "a001_brand"), used as the table name
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
