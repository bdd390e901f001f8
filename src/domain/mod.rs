//! Domain layer containing the decision engine's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, state machine)
//! - `ahp` - Pairwise comparison matrices, priority weights and consistency
//! - `ranking` - Composite scoring, dense ranking and category bands
//! - `computation` - Run lifecycle, history and the ranking pipeline

pub mod ahp;
pub mod computation;
pub mod foundation;
pub mod ranking;
