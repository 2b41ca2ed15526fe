use keypareto::export::load_results;
use regex::Regex;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

mod common;

struct TestContext {
    dir: TempDir,
    primary: PathBuf,
    secondary: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let primary = common::write_json_corpus(dir.path(), "words-english.json", common::ENGLISH);
        let lines: Vec<String> = common::FINNISH
            .iter()
            .map(|(w, c)| format!("{}\t{}", w, c))
            .collect();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let secondary = common::write_tsv_corpus(dir.path(), "words-finnish.tsv", &lines);

        Self {
            dir,
            primary,
            secondary,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_keypareto"))
            .args(args)
            .arg("--primary")
            .arg(&self.primary)
            .arg("--secondary")
            .arg(&self.secondary)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute binary")
    }
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn test_cli_search_writes_results() {
    let ctx = TestContext::new();
    let out_path = ctx.dir.path().join("front.json");
    let out = ctx.run(&[
        "search",
        "-p",
        "12",
        "-g",
        "3",
        "-S",
        "42",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    let text = stdout(&out);
    assert!(out.status.success(), "STDOUT:\n{}", text);

    let re = Regex::new(r"Best weighted score: (\d+\.\d+)").unwrap();
    let caps = re.captures(&text).expect("no best score line");
    let best: f64 = caps[1].parse().unwrap();
    assert!(best >= 0.0);

    let results = load_results(&out_path).unwrap();
    assert!(!results.solutions.is_empty());
    assert_eq!(results.metadata.population_size, 12);
    assert_eq!(results.metadata.generations, 3);
}

#[test]
fn test_cli_search_is_reproducible() {
    let ctx = TestContext::new();
    let a = ctx.dir.path().join("a.json");
    let b = ctx.dir.path().join("b.json");
    for path in [&a, &b] {
        let out = ctx.run(&["search", "-p", "10", "-g", "2", "-S", "9", "-o", path.to_str().unwrap()]);
        assert!(out.status.success());
    }
    assert_eq!(
        load_results(&a).unwrap().solutions,
        load_results(&b).unwrap().solutions
    );
}

#[test]
fn test_cli_stats_known_layout() {
    let ctx = TestContext::new();
    let out = ctx.run(&["stats", "--layout", "baseline,qwerty"]);
    let text = stdout(&out);
    assert!(out.status.success(), "STDOUT:\n{}", text);

    // Name column followed by the SFB percentage.
    let re = Regex::new(r"\|\s*baseline\s*\|\s*(\d+\.\d{2})\s*\|").unwrap();
    let sfb: f64 = re.captures(&text).expect("no baseline row")[1]
        .parse()
        .unwrap();
    assert!(sfb >= 0.0);
    assert!(text.contains("qwerty"));
    assert!(text.contains("Comparison vs Best"));
}

#[test]
fn test_cli_stats_unknown_layout_fails() {
    let ctx = TestContext::new();
    let out = ctx.run(&["stats", "--layout", "dvorak"]);
    assert!(!out.status.success());
}

#[test]
fn test_cli_blend() {
    let ctx = TestContext::new();
    let out = ctx.run(&["blend", "--primary-pct", "50", "--secondary-pct", "50"]);
    assert!(out.status.success(), "STDOUT:\n{}", stdout(&out));

    let path = ctx.dir.path().join("words-english50-finnish50.json");
    let raw = std::fs::read_to_string(path).unwrap();
    // "the" scales to 250, "ja" to 200: both present, "the" first.
    let the = raw.find("\"the\"").unwrap();
    let ja = raw.find("\"ja\"").unwrap();
    assert!(the < ja);
}

#[test]
fn test_cli_rejects_bad_probability() {
    let ctx = TestContext::new();
    let out = ctx.run(&["search", "-p", "5", "-g", "1", "--mutation-probability", "2.0"]);
    assert!(!out.status.success());
}

#[test]
fn test_cli_missing_corpus_fails() {
    let ctx = TestContext::new();
    let out = Command::new(env!("CARGO_BIN_EXE_keypareto"))
        .args(["stats", "--primary", "does-not-exist.json"])
        .current_dir(ctx.dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn test_cli_stats_detailed_breakdown() {
    let ctx = TestContext::new();
    let json = ctx.dir.path().join("detailed_results.json");
    let out = ctx.run(&[
        "stats",
        "--layout",
        "baseline",
        "--detailed",
        "--worst",
        "3",
        "--detailed-output",
        json.to_str().unwrap(),
    ]);
    let text = stdout(&out);
    assert!(out.status.success(), "STDOUT:\n{}", text);
    assert!(text.contains("Worst bigrams: baseline (english)"));
    assert!(text.contains("Worst bigrams: baseline (finnish)"));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    let layout = &raw["layouts"][0];
    assert_eq!(layout["name"], "baseline");
    let worst = layout["primary"]["sfb"]["worst"].as_array().unwrap();
    assert!(worst.len() <= 3);
    assert!(layout["primary"]["sfb"]["total"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_cli_html_from_search_results() {
    let ctx = TestContext::new();
    let results = ctx.dir.path().join("front.json");
    let direct = ctx.dir.path().join("direct.html");
    let out = ctx.run(&[
        "search",
        "-p",
        "10",
        "-g",
        "2",
        "-S",
        "3",
        "-o",
        results.to_str().unwrap(),
        "--html",
        direct.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "STDOUT:\n{}", stdout(&out));

    let page = ctx.dir.path().join("page.html");
    let out = ctx.run(&[
        "html",
        "-r",
        results.to_str().unwrap(),
        "-o",
        page.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "STDOUT:\n{}", stdout(&out));

    let rendered = std::fs::read_to_string(&page).unwrap();
    assert_eq!(rendered, std::fs::read_to_string(&direct).unwrap());
    assert!(rendered.starts_with("<!DOCTYPE html>"));
    // Home-row anchor 'n' is styled as fixed.
    assert!(rendered.contains("<div class=\"key fixed\">n</div>"));
}

#[test]
fn test_cli_html_missing_results_fails() {
    let ctx = TestContext::new();
    let out = ctx.run(&["html", "-r", "absent.json"]);
    assert!(!out.status.success());
}
