use clap::Args;
use keypareto::error::KpResult;
use keypareto::export::{self, DEFAULT_RESULTS_FILE};
use keypareto::html::{self, DEFAULT_HTML_FILE};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct HtmlArgs {
    /// A saved `pareto_results.json`.
    #[arg(short, long, default_value = DEFAULT_RESULTS_FILE)]
    pub results: PathBuf,

    #[arg(short, long, default_value = DEFAULT_HTML_FILE)]
    pub output: PathBuf,

    /// Solutions rendered; the whole front when omitted.
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run(args: &HtmlArgs) -> KpResult<()> {
    let results = export::load_results(&args.results)?;
    html::write_html(&args.output, &results, args.top)?;
    println!("HTML: {}", args.output.display());
    Ok(())
}
