pub mod metadata;
pub mod slug;
