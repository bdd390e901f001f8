//! Ranking Module - Composite scoring, dense ranking and classification.
//!
//! All functions are pure and stateless: they take a priority vector and
//! entity scores and return ordered, categorized results.
//!
//! # Components
//!
//! - `CompositeScorer` - Weighted sum of normalized criterion scores
//! - `Ranker` - Dense ranking with deterministic tie presentation
//! - `CategoryBands` - Named thresholds mapping score/rank to a category

mod category;
mod composite;
mod ranker;

pub use category::{BandThreshold, CategoryBand, CategoryBands};
pub use composite::{to_percentage, CompositeScore, CompositeScorer, EntityScores, PERCENT_SCALE};
pub use ranker::{RankedEntity, Ranker, TIE_TOLERANCE};
