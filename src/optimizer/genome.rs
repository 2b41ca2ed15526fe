use super::mutation;
use crate::core_types::Layout;
use crate::geometry::KeyboardGeometry;
use crate::scorer::{CostVector, Objectives, Scorer, METRIC_COUNT};
use fastrand::Rng;

/// A scored candidate layout. Only constructible through evaluation, so
/// every genome carries its costs.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    layout: Layout,
    primary: CostVector,
    secondary: CostVector,
    weighted_score: f64,
}

impl Genome {
    pub fn evaluate(layout: Layout, scorer: &Scorer) -> Self {
        let score = scorer.score(&layout);
        Self {
            layout,
            primary: score.primary,
            secondary: score.secondary,
            weighted_score: score.weighted_score,
        }
    }

    pub fn random(rng: &mut Rng, geom: &KeyboardGeometry, scorer: &Scorer) -> Self {
        Self::evaluate(mutation::random_layout(rng, geom), scorer)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn primary(&self) -> &CostVector {
        &self.primary
    }

    pub fn secondary(&self) -> &CostVector {
        &self.secondary
    }

    pub fn weighted_score(&self) -> f64 {
        self.weighted_score
    }

    /// Primary metrics followed by secondary metrics, all minimized.
    pub fn objectives(&self) -> Objectives {
        let mut out = [0.0; 2 * METRIC_COUNT];
        out[..METRIC_COUNT].copy_from_slice(&self.primary.to_array());
        out[METRIC_COUNT..].copy_from_slice(&self.secondary.to_array());
        out
    }
}
