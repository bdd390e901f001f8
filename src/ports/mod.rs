//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input Ports
//!
//! - `CriteriaMatrixProvider` - Criteria, pairwise judgments and weight persistence
//! - `EntityScoreProvider` - Normalized per-criterion entity scores
//! - `CategoryThresholdProvider` - Decision category bands

mod criteria_provider;
mod score_provider;
mod threshold_provider;

pub use criteria_provider::CriteriaMatrixProvider;
pub use score_provider::EntityScoreProvider;
pub use threshold_provider::CategoryThresholdProvider;
