use serde::{Deserialize, Serialize};

/// Number of metrics per language.
pub const METRIC_COUNT: usize = 4;

/// Per-language ergonomic cost, each value a percentage of the corpus length.
/// All components are minimized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostVector {
    pub sfb: f64,
    pub scissors: f64,
    pub lat_stretch: f64,
    /// Mirrors `scissors`; no true skip-bigram detector exists yet.
    pub skip_bigrams: f64,
}

impl CostVector {
    pub fn to_array(&self) -> [f64; METRIC_COUNT] {
        [self.sfb, self.scissors, self.lat_stretch, self.skip_bigrams]
    }

    /// Sum of all four components. `skip_bigrams` mirrors `scissors`, so
    /// scissors count twice here.
    pub fn total(&self) -> f64 {
        self.sfb + self.scissors + self.lat_stretch + self.skip_bigrams
    }
}

/// Raw weighted sums gathered over a bigram table, before normalization.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MetricTally {
    pub sfb: f64,
    pub scissors: f64,
    pub lat_stretch: f64,

    // Diagnostics (never objectives)
    pub wide_scissors: f64,
    pub pinky_sfb: f64,
    pub ring_sfb: f64,
}

/// Full statistics for one language, as shown by the `stats` report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub costs: CostVector,
    pub wide_scissors: f64,
    pub pinky_sfb: f64,
    pub ring_sfb: f64,
    pub total_length: u64,
}

/// One offending bigram and its share of the corpus length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigramHit {
    pub bigram: String,
    pub count: u64,
    /// Share of the count charged to the metric (0.5 for partial stretches).
    pub multiplier: f64,
    pub percentage: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    /// Sum over every offending bigram, not just the listed ones.
    pub total: f64,
    /// Highest percentage first.
    pub worst: Vec<BigramHit>,
}

/// Worst bigrams per metric for one language.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigramBreakdown {
    pub sfb: MetricBreakdown,
    pub scissors: MetricBreakdown,
    pub lat_stretch: MetricBreakdown,
    pub skip_bigrams: MetricBreakdown,
}
