use crate::config::LanguageWeights;
use crate::core_types::{Layout, EMPTY_CELL};
use crate::error::{KeyParetoError, KpResult};
use crate::geometry::{Anchor, KeyboardGeometry};
use crate::optimizer::{Genome, OptimizationOptions, OptimizationResult};
use crate::scorer::{BigramBreakdown, CostVector, Scorer};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const DEFAULT_RESULTS_FILE: &str = "pareto_results.json";
pub const DEFAULT_DETAILED_FILE: &str = "detailed_results.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub primary_language: String,
    pub secondary_language: String,
    pub anchors: Vec<Anchor>,
    pub population_size: usize,
    pub generations: usize,
    pub seed: Option<u64>,
    pub weights: LanguageWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageMetrics {
    #[serde(flatten)]
    pub costs: CostVector,
    pub total_penalty: f64,
}

impl From<&CostVector> for LanguageMetrics {
    fn from(costs: &CostVector) -> Self {
        Self {
            costs: *costs,
            total_penalty: costs.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub id: usize,
    /// Main 3x12 block; empty strings where no character sits.
    pub layout: Vec<Vec<String>>,
    pub typing_string: String,
    pub primary: LanguageMetrics,
    pub secondary: LanguageMetrics,
    pub weighted_score: f64,
}

impl SolutionRecord {
    pub fn from_genome(id: usize, genome: &Genome) -> Self {
        let layout = genome
            .layout()
            .grid()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(String::from).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            id,
            layout,
            typing_string: genome.layout().typing_string(),
            primary: genome.primary().into(),
            secondary: genome.secondary().into(),
            weighted_score: genome.weighted_score(),
        }
    }

    /// Rebuilds the layout on `geom`. Thumb anchors come from the geometry.
    pub fn to_layout(&self, geom: &KeyboardGeometry) -> KpResult<Layout> {
        let rows = self
            .layout
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .map(|cell| {
                        let mut chars = cell.chars();
                        match (chars.next(), chars.next()) {
                            (None, _) => Ok(EMPTY_CELL),
                            (Some(c), None) => Ok(c),
                            _ => Err(KeyParetoError::Validation(format!(
                                "Solution {}: cell {:?} in row {} holds more than one character",
                                self.id, cell, r
                            ))),
                        }
                    })
                    .collect::<KpResult<String>>()
            })
            .collect::<KpResult<Vec<String>>>()?;

        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        Layout::from_grid(&rows, geom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoResults {
    pub metadata: RunMetadata,
    pub solutions: Vec<SolutionRecord>,
}

impl ParetoResults {
    pub fn new(
        result: &OptimizationResult,
        scorer: &Scorer,
        geom: &KeyboardGeometry,
        options: &OptimizationOptions,
    ) -> Self {
        let metadata = RunMetadata {
            primary_language: scorer.primary().name().to_string(),
            secondary_language: scorer.secondary().name().to_string(),
            anchors: geom.anchors.clone(),
            population_size: options.population_size,
            generations: result.generations,
            seed: options.seed,
            weights: scorer.weights,
        };

        let solutions = result
            .pareto_front
            .iter()
            .enumerate()
            .map(|(i, g)| SolutionRecord::from_genome(i + 1, g))
            .collect();

        Self {
            metadata,
            solutions,
        }
    }
}

/// Worst-bigram listing of one evaluated layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedRecord {
    pub name: String,
    pub typing_string: String,
    pub weighted_score: f64,
    pub primary: BigramBreakdown,
    pub secondary: BigramBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedResults {
    pub primary_language: String,
    pub secondary_language: String,
    pub layouts: Vec<DetailedRecord>,
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> KpResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn write_results<P: AsRef<Path>>(path: P, results: &ParetoResults) -> KpResult<()> {
    let path = path.as_ref();
    write_pretty(path, results)?;
    info!(
        "💾 Saved {} solutions to {}",
        results.solutions.len(),
        path.display()
    );
    Ok(())
}

pub fn write_detailed<P: AsRef<Path>>(path: P, results: &DetailedResults) -> KpResult<()> {
    let path = path.as_ref();
    write_pretty(path, results)?;
    info!(
        "💾 Saved bigram breakdown of {} layouts to {}",
        results.layouts.len(),
        path.display()
    );
    Ok(())
}

pub fn load_results<P: AsRef<Path>>(path: P) -> KpResult<ParetoResults> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        KeyParetoError::Config(format!(
            "Failed to read results file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(serde_json::from_str(&content)?)
}
