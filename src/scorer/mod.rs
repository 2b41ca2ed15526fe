pub mod bigrams;
pub mod engine;
pub mod physics;
pub mod types;

pub use self::bigrams::{Bigram, BigramModel};
pub use self::types::{
    BigramBreakdown, BigramHit, CostVector, MetricBreakdown, MetricTally, ScoreDetails,
    METRIC_COUNT,
};

use crate::config::LanguageWeights;
use crate::core_types::Layout;
use crate::corpus::Corpus;
use crate::error::{KeyParetoError, KpResult};
use tracing::info;

/// Both languages' metrics side by side.
pub const OBJECTIVE_COUNT: usize = 2 * METRIC_COUNT;
pub type Objectives = [f64; OBJECTIVE_COUNT];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutScore {
    pub primary: CostVector,
    pub secondary: CostVector,
    pub weighted_score: f64,
}

/// Evaluates layouts against two read-only bigram models.
#[derive(Debug, Clone)]
pub struct Scorer {
    primary: BigramModel,
    secondary: BigramModel,
    pub weights: LanguageWeights,
}

impl Scorer {
    /// Refuses models whose total length is zero.
    pub fn new(
        primary: BigramModel,
        secondary: BigramModel,
        weights: LanguageWeights,
    ) -> KpResult<Self> {
        for model in [&primary, &secondary] {
            if model.is_empty() {
                return Err(KeyParetoError::EmptyCorpus(model.name().to_string()));
            }
        }
        Ok(Self {
            primary,
            secondary,
            weights,
        })
    }

    /// Builds both bigram models concurrently.
    pub fn from_corpora(
        primary: &Corpus,
        secondary: &Corpus,
        weights: LanguageWeights,
    ) -> KpResult<Self> {
        let (p, s) = rayon::join(|| primary.bigram_model(), || secondary.bigram_model());
        let (p, s) = (p?, s?);
        info!(
            "📚 Bigram models: '{}' ({} pairs, length {}), '{}' ({} pairs, length {})",
            p.name(),
            p.bigrams().len(),
            p.total_length(),
            s.name(),
            s.bigrams().len(),
            s.total_length()
        );
        Self::new(p, s, weights)
    }

    pub fn primary(&self) -> &BigramModel {
        &self.primary
    }

    pub fn secondary(&self) -> &BigramModel {
        &self.secondary
    }

    pub fn score(&self, layout: &Layout) -> LayoutScore {
        let primary = engine::to_costs(
            &engine::tally(layout, &self.primary),
            self.primary.total_length(),
        );
        let secondary = engine::to_costs(
            &engine::tally(layout, &self.secondary),
            self.secondary.total_length(),
        );
        LayoutScore {
            primary,
            secondary,
            weighted_score: self.weighted_score(&primary, &secondary),
        }
    }

    /// Presentation scalar; never used for selection.
    pub fn weighted_score(&self, primary: &CostVector, secondary: &CostVector) -> f64 {
        self.weights.primary_weight * primary.total()
            + self.weights.secondary_weight * secondary.total()
    }

    /// The `top` worst bigrams per metric, primary language first.
    pub fn breakdown(
        &self,
        layout: &Layout,
        top: usize,
    ) -> KpResult<(BigramBreakdown, BigramBreakdown)> {
        Ok((
            engine::breakdown(layout, &self.primary, top)?,
            engine::breakdown(layout, &self.secondary, top)?,
        ))
    }

    pub fn score_details(&self, layout: &Layout) -> (ScoreDetails, ScoreDetails) {
        (
            engine::to_details(
                &engine::tally(layout, &self.primary),
                self.primary.total_length(),
            ),
            engine::to_details(
                &engine::tally(layout, &self.secondary),
                self.secondary.total_length(),
            ),
        )
    }
}
