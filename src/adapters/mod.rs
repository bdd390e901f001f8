//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory providers and the YAML seed loader
//! - `http` - Axum REST endpoints

pub mod http;
pub mod memory;

pub use memory::{InMemoryCriteriaStore, InMemoryScoreStore, SeedData, StaticCategoryThresholds};
