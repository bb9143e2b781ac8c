// ABOUTME: Tag data access for Zen notes
// ABOUTME: Usage-ranked listing, prefix-boosted search, rename and cascading delete

pub mod error;
pub mod storage;
pub mod types;

// Re-export main types
pub use error::{TagError, TagResult};
pub use storage::{TagStorage, TagStorageOptions};
pub use types::Tag;
