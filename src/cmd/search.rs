use crate::reports;
use clap::Args;
use keypareto::config::Config;
use keypareto::error::KpResult;
use keypareto::export::{self, ParetoResults, DEFAULT_RESULTS_FILE};
use keypareto::geometry::KeyboardGeometry;
use keypareto::html;
use keypareto::optimizer::{OptimizationOptions, Optimizer, ProgressCallback};
use keypareto::scorer::Scorer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long, default_value = DEFAULT_RESULTS_FILE)]
    pub output: PathBuf,

    /// Solutions shown in the summary table.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Also render the front as an HTML page.
    #[arg(long)]
    pub html: Option<PathBuf>,
}

struct GenerationReport {
    interval: usize,
    last_print: std::sync::Mutex<Instant>,
}

impl ProgressCallback for GenerationReport {
    fn on_generation(&self, generation: usize, best_weighted_score: f64, front_size: usize) {
        if generation % self.interval != 0 {
            return;
        }
        let Ok(mut last) = self.last_print.lock() else {
            return;
        };
        let now = Instant::now();
        println!(
            "Gen {:5} | Best: {:.3} | Front: {:4} | {:.2}s",
            generation,
            best_weighted_score,
            front_size,
            now.duration_since(*last).as_secs_f32()
        );
        *last = now;
    }
}

pub fn run(
    args: &SearchArgs,
    config: &Config,
    scorer: Arc<Scorer>,
    geometry: Arc<KeyboardGeometry>,
    debug: bool,
) -> KpResult<()> {
    let options = OptimizationOptions::from(config);
    let optimizer = Optimizer::new(scorer.clone(), geometry.clone(), options.clone())?;

    println!(
        "🔥 Evolving {} layouts for {} generations ({} vs {})",
        options.population_size,
        options.generations,
        scorer.primary().name(),
        scorer.secondary().name()
    );

    let progress = GenerationReport {
        interval: if debug { 1 } else { 10 },
        last_print: std::sync::Mutex::new(Instant::now()),
    };
    let result = optimizer.run(&progress)?;

    let results = ParetoResults::new(&result, &scorer, &geometry, &options);

    println!("\n=== 🏆 PARETO FRONT ({} solutions) ===", results.solutions.len());
    reports::print_front_report(
        &results.solutions,
        (scorer.primary().name(), scorer.secondary().name()),
        args.top,
    );
    if let Some(best) = result.pareto_front.first() {
        println!("Best weighted score: {:.3}", best.weighted_score());
        reports::print_layout_grid("BEST WEIGHTED", best.layout());
    }

    export::write_results(&args.output, &results)?;
    println!("Results: {}", args.output.display());

    if let Some(path) = &args.html {
        html::write_html(path, &results, None)?;
        println!("HTML: {}", path.display());
    }
    Ok(())
}
