//! Brandhub database layer
//!
//! Postgres repositories for the gym registry and the two asset tables,
//! plus the [`SqlxAssetCatalog`] adapter the ingestion pipeline writes
//! through.

pub mod catalog;
pub mod db;

pub use catalog::SqlxAssetCatalog;
pub use db::{GymElementRepository, GymLogoRepository, GymRepository};
