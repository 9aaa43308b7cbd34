use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Base carried by every aggregate: identity plus lifecycle metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Unique record identifier
    pub id: Id,
    /// Lifecycle metadata
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// New aggregate with fresh metadata
    pub fn new(id: Id) -> Self {
        Self {
            id,
            metadata: EntityMetadata::new(),
        }
    }

    /// Aggregate rebuilt from storage with existing metadata
    pub fn with_metadata(id: Id, metadata: EntityMetadata) -> Self {
        Self { id, metadata }
    }

    /// Refresh the update timestamp
    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
