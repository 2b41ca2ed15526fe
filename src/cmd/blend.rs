use clap::Args;
use keypareto::corpus::{self, Corpus};
use keypareto::error::KpResult;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct BlendArgs {
    /// Share of the primary corpus, in percent.
    #[arg(long, default_value_t = 90.0)]
    pub primary_pct: f64,

    #[arg(long, default_value_t = 10.0)]
    pub secondary_pct: f64,

    /// Defaults to `words-<blend name>.json`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &BlendArgs, primary: &Corpus, secondary: &Corpus) -> KpResult<()> {
    let mixed = corpus::blend(primary, args.primary_pct, secondary, args.secondary_pct)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("words-{}.json", mixed.name())));
    mixed.save_json(&output)?;

    println!(
        "🧪 Blended '{}': {} words, {} occurrences -> {}",
        mixed.name(),
        mixed.len(),
        mixed.total_count(),
        output.display()
    );
    Ok(())
}
