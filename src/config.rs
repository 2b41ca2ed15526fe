use crate::error::{KeyParetoError, KpResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: LanguageWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(short = 'p', long, default_value_t = 100)]
    pub population_size: usize,
    #[arg(short = 'g', long, default_value_t = 100)]
    pub generations: usize,
    #[arg(long, default_value_t = 0.8)]
    pub mutation_probability: f64,

    /// Fixes every random draw of the run.
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Worker threads for evaluation and ranking (defaults to all cores).
    #[arg(long)]
    pub threads: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            mutation_probability: 0.8,
            seed: None,
            threads: None,
        }
    }
}

/// Weights of the presentation score only. Selection never reads them.
#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageWeights {
    #[arg(long, default_value_t = 0.8)]
    pub primary_weight: f64,
    #[arg(long, default_value_t = 0.2)]
    pub secondary_weight: f64,
}

impl Default for LanguageWeights {
    fn default() -> Self {
        Self {
            primary_weight: 0.8,
            secondary_weight: 0.2,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KpResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyParetoError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies over every value the user typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.search.merge_from_cli(&cli.search, matches);
        self.weights.merge_from_cli(&cli.weights, matches);
    }

    pub fn validate(&self) -> KpResult<()> {
        self.search.validate()?;
        self.weights.validate()
    }
}

macro_rules! update_if_present {
    ($self:ident, $cli:ident, $matches:ident, $field:ident) => {
        if $matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
            $self.$field = $cli.$field.clone();
        }
    };
}

impl SearchParams {
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        update_if_present!(self, cli, matches, population_size);
        update_if_present!(self, cli, matches, generations);
        update_if_present!(self, cli, matches, mutation_probability);
        update_if_present!(self, cli, matches, seed);
        update_if_present!(self, cli, matches, threads);
    }

    pub fn validate(&self) -> KpResult<()> {
        if self.population_size == 0 {
            return Err(KeyParetoError::Config(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(KeyParetoError::Config(format!(
                "mutation_probability must lie in [0, 1], got {}",
                self.mutation_probability
            )));
        }
        if self.threads == Some(0) {
            return Err(KeyParetoError::Config(
                "threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl LanguageWeights {
    pub fn merge_from_cli(&mut self, cli: &LanguageWeights, matches: &ArgMatches) {
        update_if_present!(self, cli, matches, primary_weight);
        update_if_present!(self, cli, matches, secondary_weight);
    }

    pub fn validate(&self) -> KpResult<()> {
        for (name, w) in [
            ("primary_weight", self.primary_weight),
            ("secondary_weight", self.secondary_weight),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(KeyParetoError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, w
                )));
            }
        }
        Ok(())
    }
}
