use crate::reports::{self, LayoutStats};
use clap::Args;
use keypareto::config::LanguageWeights;
use keypareto::core_types::Layout;
use keypareto::error::{KeyParetoError, KpResult};
use keypareto::export::{self, DetailedRecord, DetailedResults};
use keypareto::geometry::KeyboardGeometry;
use keypareto::layouts::{get_all_layouts, KnownLayout};
use keypareto::scorer::Scorer;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub weights: LanguageWeights,

    /// Known layouts to evaluate (all of them when neither this nor
    /// `--results` is given).
    #[arg(short, long, value_delimiter = ',')]
    pub layout: Vec<String>,

    /// A saved `pareto_results.json`.
    #[arg(short, long)]
    pub results: Option<PathBuf>,

    /// Solutions taken from `--results`.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// List the worst bigrams of every metric per layout.
    #[arg(long, default_value_t = false)]
    pub detailed: bool,

    /// Bigrams listed per metric.
    #[arg(long, default_value_t = 10)]
    pub worst: usize,

    /// Write the bigram breakdown as JSON (e.g. `detailed_results.json`).
    #[arg(long)]
    pub detailed_output: Option<PathBuf>,
}

fn collect_layouts(args: &StatsArgs, geom: &KeyboardGeometry) -> KpResult<Vec<(String, Layout)>> {
    let mut out = Vec::new();

    for name in &args.layout {
        let known = KnownLayout::from_str(name.trim()).map_err(|_| {
            KeyParetoError::Config(format!("Unknown layout '{}'", name))
        })?;
        out.push((known.to_string(), known.to_layout(geom)?));
    }

    if let Some(path) = &args.results {
        let saved = export::load_results(path)?;
        for sol in saved.solutions.iter().take(args.top) {
            out.push((format!("solution_{}", sol.id), sol.to_layout(geom)?));
        }
    }

    if out.is_empty() {
        for (known, layout) in get_all_layouts(geom)? {
            out.push((known.to_string(), layout));
        }
    }
    Ok(out)
}

pub fn run(args: &StatsArgs, scorer: &Scorer, geom: &KeyboardGeometry) -> KpResult<()> {
    let layouts = collect_layouts(args, geom)?;

    println!(
        "\n🔎 === LAYOUT STATS: {} / {} === 🔎",
        scorer.primary().name(),
        scorer.secondary().name()
    );

    let want_breakdown = args.detailed || args.detailed_output.is_some();
    let languages = (scorer.primary().name(), scorer.secondary().name());

    let mut results = Vec::with_capacity(layouts.len());
    let mut detailed = Vec::new();
    for (name, layout) in layouts {
        reports::print_layout_grid(&name, &layout);

        let (primary, secondary) = scorer.score_details(&layout);
        let weighted_score = scorer.weighted_score(&primary.costs, &secondary.costs);

        if want_breakdown {
            let (p, s) = scorer.breakdown(&layout, args.worst)?;
            if args.detailed {
                reports::print_breakdown(&name, languages.0, &p);
                reports::print_breakdown(&name, languages.1, &s);
            }
            detailed.push(DetailedRecord {
                name: name.clone(),
                typing_string: layout.typing_string(),
                weighted_score,
                primary: p,
                secondary: s,
            });
        }

        results.push(LayoutStats {
            name,
            primary,
            secondary,
            weighted_score,
        });
    }

    results.sort_by(|a, b| a.weighted_score.total_cmp(&b.weighted_score));
    reports::print_stats_report(&results, languages);

    if let Some(path) = &args.detailed_output {
        detailed.sort_by(|a, b| a.weighted_score.total_cmp(&b.weighted_score));
        export::write_detailed(
            path,
            &DetailedResults {
                primary_language: languages.0.to_string(),
                secondary_language: languages.1.to_string(),
                layouts: detailed,
            },
        )?;
        println!("Breakdown: {}", path.display());
    }
    Ok(())
}
