//! Brandhub Storage Library
//!
//! Storage abstraction and the local filesystem backend for asset bytes.
//!
//! # Storage key format
//!
//! Keys are generated, never user-supplied: `assets/{gym_id}/{stamp}.{ext}`
//! for gym-scoped assets and `assets/admin/{stamp}.{ext}` for unassigned
//! ones, where `{stamp}` combines a millisecond timestamp and a random
//! fragment. Keys must not contain `..` or a leading `/`. Key generation is
//! centralized in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::generate_asset_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
