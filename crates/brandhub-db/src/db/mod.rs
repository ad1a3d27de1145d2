//! Database repositories for data access layer
//!
//! Each repository is responsible for a specific table and provides CRUD
//! operations and specialized queries.

pub mod elements;
pub mod gyms;
pub mod logos;

pub use elements::GymElementRepository;
pub use gyms::GymRepository;
pub use logos::GymLogoRepository;
