//! Mock ports shared by handler tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::ahp::{Criterion, PairwiseJudgments, PriorityVector};
use crate::domain::foundation::{CriterionId, DomainError, EntityId, ErrorCode};
use crate::domain::ranking::{CategoryBands, EntityScores};
use crate::ports::{CategoryThresholdProvider, CriteriaMatrixProvider, EntityScoreProvider};

pub fn criterion_ids() -> Vec<CriterionId> {
    ["cost", "quality", "speed"]
        .iter()
        .map(|id| CriterionId::new(*id).unwrap())
        .collect()
}

pub fn saaty_judgments() -> PairwiseJudgments {
    PairwiseJudgments::new(
        criterion_ids(),
        vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 2.0],
            vec![1.0 / 5.0, 1.0 / 2.0, 1.0],
        ],
    )
}

pub fn contradictory_judgments() -> PairwiseJudgments {
    PairwiseJudgments::new(
        criterion_ids(),
        vec![
            vec![1.0, 9.0, 1.0 / 9.0],
            vec![1.0 / 9.0, 1.0, 9.0],
            vec![9.0, 1.0 / 9.0, 1.0],
        ],
    )
}

pub fn entity(id: &str, scores: [f64; 3]) -> EntityScores {
    criterion_ids()
        .into_iter()
        .zip(scores)
        .fold(EntityScores::new(EntityId::new(id).unwrap()), |e, (c, s)| {
            e.with_score(c, s)
        })
}

// ─────────────────────────────────────────────────────────────────────
// Criteria
// ─────────────────────────────────────────────────────────────────────

pub struct MockCriteria {
    judgments: Mutex<PairwiseJudgments>,
    saved: Mutex<Vec<PriorityVector>>,
    failures_remaining: AtomicU32,
    fail_save: bool,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl MockCriteria {
    pub fn new(judgments: PairwiseJudgments) -> Self {
        Self {
            judgments: Mutex::new(judgments),
            saved: Mutex::new(Vec::new()),
            failures_remaining: AtomicU32::new(0),
            fail_save: false,
            gate: None,
        }
    }

    /// Fails the next `count` judgment reads.
    pub fn failing_reads(self, count: u32) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_save = true;
        self
    }

    /// Blocks judgment reads until `release` is notified; signals `entered` first.
    pub fn gated(mut self, entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        self.gate = Some((entered, release));
        self
    }

    pub fn saved(&self) -> Vec<PriorityVector> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl CriteriaMatrixProvider for MockCriteria {
    async fn current_judgments(&self) -> Result<PairwiseJudgments, DomainError> {
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(DomainError::new(
                ErrorCode::ProviderUnavailable,
                "Simulated read failure",
            ));
        }
        Ok(self.judgments.lock().unwrap().clone())
    }

    async fn list_criteria(&self) -> Result<Vec<Criterion>, DomainError> {
        let saved = self.saved.lock().unwrap();
        Ok(criterion_ids()
            .into_iter()
            .map(|id| {
                let weight = saved.last().and_then(|pv| pv.weight_of(&id)).unwrap_or(0.0);
                let mut criterion = Criterion::new(id.clone(), id.as_str());
                criterion.weight = weight;
                criterion
            })
            .collect())
    }

    async fn save_weights(&self, weights: &PriorityVector) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::new(
                ErrorCode::ProviderUnavailable,
                "Simulated write failure",
            ));
        }
        self.saved.lock().unwrap().push(weights.clone());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Scores and bands
// ─────────────────────────────────────────────────────────────────────

pub struct MockScores(pub Vec<EntityScores>);

#[async_trait]
impl EntityScoreProvider for MockScores {
    async fn current_scores(&self) -> Result<Vec<EntityScores>, DomainError> {
        Ok(self.0.clone())
    }
}

pub struct MockBands(pub CategoryBands);

#[async_trait]
impl CategoryThresholdProvider for MockBands {
    async fn current_bands(&self) -> Result<CategoryBands, DomainError> {
        Ok(self.0.clone())
    }
}
