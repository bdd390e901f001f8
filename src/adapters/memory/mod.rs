//! In-memory providers.
//!
//! Back the engine's ports with process-local state, optionally seeded
//! from a YAML file.

mod criteria_store;
mod score_store;
mod seed;
mod thresholds;

pub use criteria_store::InMemoryCriteriaStore;
pub use score_store::InMemoryScoreStore;
pub use seed::SeedData;
pub use thresholds::StaticCategoryThresholds;
