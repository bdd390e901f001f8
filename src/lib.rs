//! AHP Ranker - Multi-criteria ranking engine
//!
//! Derives criterion weights from pairwise comparison judgments, checks their
//! consistency, scores entities against the weighted criteria and ranks them
//! into decision categories. Runs are single-flight with a bounded history.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
