use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keypareto::config::Config;
use keypareto::corpus::Corpus;
use keypareto::error::KpResult;
use keypareto::geometry::KeyboardGeometry;
use keypareto::scorer::Scorer;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word-count corpus of the primary language (JSON object or TSV).
    #[arg(global = true, long, default_value = "data/words-english.json")]
    primary: String,

    #[arg(global = true, long, default_value = "english")]
    primary_name: String,

    #[arg(global = true, long, default_value = "data/words-finnish.json")]
    secondary: String,

    #[arg(global = true, long, default_value = "finnish")]
    secondary_name: String,

    /// Keyboard geometry JSON; the built-in board when omitted.
    #[arg(global = true, short = 'k', long)]
    geometry: Option<String>,

    /// JSON run configuration. Flags given on the command line win.
    #[arg(global = true, short, long)]
    config: Option<String>,

    /// Lower-case corpus words before building bigrams.
    #[arg(global = true, long, default_value_t = false)]
    fold_case: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve a Pareto front of layouts.
    Search(cmd::search::SearchArgs),
    /// Evaluate known or saved layouts.
    Stats(cmd::stats::StatsArgs),
    /// Mix the two corpora into one.
    Blend(cmd::blend::BlendArgs),
    /// Render a saved results file as an HTML page.
    Html(cmd::html::HtmlArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    if let Err(e) = execute(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli, matches: &ArgMatches) -> KpResult<()> {
    info!("🚀 Initializing KeyPareto...");

    if let Commands::Html(args) = &cli.command {
        return cmd::html::run(args);
    }

    let (primary, secondary) = load_corpora(cli)?;

    if let Commands::Blend(args) = &cli.command {
        return cmd::blend::run(args, &primary, &secondary);
    }

    let sub_matches = matches
        .subcommand()
        .map(|(_, m)| m)
        .unwrap_or(matches);

    let mut config = match &cli.config {
        Some(path) => {
            info!("⚖️  Loading Config from: {}", path);
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };
    match &cli.command {
        Commands::Search(args) => config.merge_from_cli(&args.config, sub_matches),
        Commands::Stats(args) => config.weights.merge_from_cli(&args.weights, sub_matches),
        Commands::Blend(_) | Commands::Html(_) => {}
    }
    config.validate()?;

    let geometry = match &cli.geometry {
        Some(path) => {
            info!("📂 Loading Geometry: {}", path);
            KeyboardGeometry::load_from_file(path)?
        }
        None => KeyboardGeometry::standard(),
    };
    geometry.validate()?;

    let scorer = Scorer::from_corpora(&primary, &secondary, config.weights)?;

    match &cli.command {
        Commands::Search(args) => cmd::search::run(
            args,
            &config,
            Arc::new(scorer),
            Arc::new(geometry),
            cli.debug,
        ),
        Commands::Stats(args) => cmd::stats::run(args, &scorer, &geometry),
        Commands::Blend(_) | Commands::Html(_) => Ok(()),
    }
}

fn load_corpora(cli: &Cli) -> KpResult<(Corpus, Corpus)> {
    let primary = Corpus::load(&cli.primary, &cli.primary_name)?;
    let secondary = Corpus::load(&cli.secondary, &cli.secondary_name)?;
    if cli.fold_case {
        info!("🔡 Folding corpus words to lower case");
        return Ok((primary.fold_case(), secondary.fold_case()));
    }
    Ok((primary, secondary))
}
