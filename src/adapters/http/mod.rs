//! HTTP adapters - REST API implementations.

pub mod ranking;

pub use ranking::{ranking_router, RankingAppState};
