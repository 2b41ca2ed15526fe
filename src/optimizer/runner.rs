use super::crowding::crowding_distances;
use super::genome::Genome;
use super::mutation;
use super::pareto::fast_non_dominated_sort;
use crate::config::{Config, SearchParams};
use crate::core_types::Layout;
use crate::error::{KeyParetoError, KpResult};
use crate::geometry::KeyboardGeometry;
use crate::scorer::{Objectives, Scorer};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use strum_macros::Display;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Initializing,
    Evaluating,
    Selecting,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_probability: f64,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

impl From<&SearchParams> for OptimizationOptions {
    fn from(params: &SearchParams) -> Self {
        Self {
            population_size: params.population_size,
            generations: params.generations,
            mutation_probability: params.mutation_probability,
            seed: params.seed,
            threads: params.threads,
        }
    }
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self::from(&cfg.search)
    }
}

impl OptimizationOptions {
    pub fn validate(&self) -> KpResult<()> {
        SearchParams {
            population_size: self.population_size,
            generations: self.generations,
            mutation_probability: self.mutation_probability,
            seed: self.seed,
            threads: self.threads,
        }
        .validate()
    }
}

/// Generation-scoped annotations for one member of the combined pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionEntry {
    pub rank: usize,
    pub crowding_distance: f64,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Rank-0 front of the last generation, by ascending weighted score.
    pub pareto_front: Vec<Genome>,
    pub generations: usize,
    pub best_weighted_score: f64,
}

/// Observes a run. Cannot stop it.
pub trait ProgressCallback: Send + Sync {
    fn on_phase(&self, _phase: Phase) {}
    fn on_generation(&self, generation: usize, best_weighted_score: f64, front_size: usize);
}

/// A callback that ignores everything.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_generation(&self, _: usize, _: f64, _: usize) {}
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    geometry: Arc<KeyboardGeometry>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(
        scorer: Arc<Scorer>,
        geometry: Arc<KeyboardGeometry>,
        options: OptimizationOptions,
    ) -> KpResult<Self> {
        options.validate()?;
        geometry.validate()?;
        Ok(Self {
            scorer,
            geometry,
            options,
        })
    }

    pub fn run<CB: ProgressCallback>(&self, callback: &CB) -> KpResult<OptimizationResult> {
        match self.options.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| KeyParetoError::Config(format!("Thread pool: {}", e)))?;
                Ok(pool.install(|| self.evolve(callback)))
            }
            None => Ok(self.evolve(callback)),
        }
    }

    fn evolve<CB: ProgressCallback>(&self, callback: &CB) -> OptimizationResult {
        let opts = &self.options;
        let geom = &*self.geometry;
        let mut rng = match opts.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        let start_time = Instant::now();

        info!(
            "🧬 Starting optimization: {} population, {} generations, p(mutate) = {}",
            opts.population_size, opts.generations, opts.mutation_probability
        );

        // 1. Initial population
        enter(callback, Phase::Initializing);
        let layouts: Vec<_> = (0..opts.population_size)
            .map(|_| mutation::random_layout(&mut rng, geom))
            .collect();
        let mut population = self.evaluate_all(layouts);

        let mut best_weighted_score = f64::INFINITY;

        // 2. Main Loop
        for generation in 0..opts.generations {
            // A. Offspring (random draws stay on this thread)
            enter(callback, Phase::Evaluating);
            let mut children = Vec::new();
            for parent in &population {
                if rng.f64() < opts.mutation_probability {
                    children.push(mutation::swap_mutation(&mut rng, parent.layout(), geom));
                }
            }
            let offspring_count = children.len();
            let offspring = self.evaluate_all(children);

            // B. Rank, crowd, truncate
            enter(callback, Phase::Selecting);
            let mut pool = population;
            pool.extend(offspring);
            let (next, front_size) = select(pool, opts.population_size);
            population = next;

            // C. Progress
            let current_best = population
                .iter()
                .map(Genome::weighted_score)
                .fold(f64::INFINITY, f64::min);
            if current_best < best_weighted_score {
                best_weighted_score = current_best;
                info!(
                    "Generation {}: Best weighted score = {:.3}",
                    generation, best_weighted_score
                );
            }
            debug!(
                "Gen {:4} | offspring {:3} | front {:3} | best {:.3}",
                generation, offspring_count, front_size, best_weighted_score
            );
            callback.on_generation(generation, best_weighted_score, front_size);
        }

        // 3. Final front
        enter(callback, Phase::Terminated);
        let pareto_front = final_front(population);
        if best_weighted_score.is_infinite() {
            best_weighted_score = pareto_front
                .first()
                .map(Genome::weighted_score)
                .unwrap_or(f64::INFINITY);
        }

        info!(
            "🏁 Optimization complete in {:.1}s. Found {} Pareto-optimal solutions.",
            start_time.elapsed().as_secs_f32(),
            pareto_front.len()
        );

        OptimizationResult {
            pareto_front,
            generations: opts.generations,
            best_weighted_score,
        }
    }

    fn evaluate_all(&self, layouts: Vec<Layout>) -> Vec<Genome> {
        let scorer = &*self.scorer;
        layouts
            .into_par_iter()
            .map(|layout| Genome::evaluate(layout, scorer))
            .collect()
    }
}

fn enter<CB: ProgressCallback>(callback: &CB, phase: Phase) {
    match phase {
        Phase::Initializing | Phase::Terminated => info!("⏩ {}", phase),
        _ => debug!("⏩ {}", phase),
    }
    callback.on_phase(phase);
}

/// Ranks and crowds the pool, then annotates every member.
pub fn annotate(objectives: &[Objectives]) -> (Vec<Vec<usize>>, Vec<SelectionEntry>) {
    let fronts = fast_non_dominated_sort(objectives);
    let mut entries = vec![
        SelectionEntry {
            rank: 0,
            crowding_distance: 0.0,
        };
        objectives.len()
    ];

    for (rank, front) in fronts.iter().enumerate() {
        let distances = crowding_distances(front, objectives);
        for (&i, d) in front.iter().zip(distances) {
            entries[i] = SelectionEntry {
                rank,
                crowding_distance: d,
            };
        }
    }

    (fronts, entries)
}

/// Keeps whole fronts while they fit, then fills the remainder from the
/// overflowing front by descending crowding distance. Returns the survivors
/// and the size of the pool's rank-0 front.
pub fn select(pool: Vec<Genome>, target: usize) -> (Vec<Genome>, usize) {
    let objectives: Vec<Objectives> = pool.iter().map(Genome::objectives).collect();
    let (fronts, entries) = annotate(&objectives);
    let front_size = fronts.first().map(Vec::len).unwrap_or(0);

    let mut chosen: Vec<usize> = Vec::with_capacity(target);
    for front in &fronts {
        let room = target - chosen.len();
        if room == 0 {
            break;
        }
        if front.len() <= room {
            chosen.extend_from_slice(front);
            continue;
        }

        let mut by_crowding = front.clone();
        by_crowding.sort_by(|&a, &b| {
            entries[b]
                .crowding_distance
                .total_cmp(&entries[a].crowding_distance)
        });
        chosen.extend_from_slice(&by_crowding[..room]);
        break;
    }

    let mut slots: Vec<Option<Genome>> = pool.into_iter().map(Some).collect();
    let survivors = chosen
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    (survivors, front_size)
}

/// Rank-0 front of `population`, by ascending weighted score.
pub fn final_front(population: Vec<Genome>) -> Vec<Genome> {
    let objectives: Vec<Objectives> = population.iter().map(Genome::objectives).collect();
    let fronts = fast_non_dominated_sort(&objectives);
    let Some(first) = fronts.into_iter().next() else {
        return Vec::new();
    };

    let mut slots: Vec<Option<Genome>> = population.into_iter().map(Some).collect();
    let mut front: Vec<Genome> = first.into_iter().filter_map(|i| slots[i].take()).collect();
    front.sort_by(|a, b| a.weighted_score().total_cmp(&b.weighted_score()));
    front
}
