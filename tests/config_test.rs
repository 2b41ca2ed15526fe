use clap::{CommandFactory, FromArgMatches, Parser};
use keypareto::config::Config;
use std::io::Write;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(args);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

fn file_config(json: &str) -> Config {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    Config::load_from_file(file.path()).unwrap()
}

#[test]
fn test_cli_overrides_file() {
    let mut cfg = file_config(r#"{ "search": { "generations": 50, "population_size": 40 } }"#);
    let (cli, matches) = parse(&["test", "--generations", "7"]);

    cfg.merge_from_cli(&cli, &matches);

    assert_eq!(cfg.search.generations, 7);
    // Not typed on the command line, so the file value stays.
    assert_eq!(cfg.search.population_size, 40);
}

#[test]
fn test_cli_defaults_do_not_override_file() {
    let mut cfg = file_config(r#"{ "weights": { "primary_weight": 0.6, "secondary_weight": 0.4 } }"#);
    let (cli, matches) = parse(&["test"]);

    cfg.merge_from_cli(&cli, &matches);

    assert_eq!(cfg.weights.primary_weight, 0.6);
    assert_eq!(cfg.weights.secondary_weight, 0.4);
}

#[test]
fn test_seed_and_threads_flags() {
    let (cli, matches) = parse(&["test", "-S", "42", "--threads", "2", "-p", "8"]);
    let mut cfg = Config::default();
    cfg.merge_from_cli(&cli, &matches);

    assert_eq!(cfg.search.seed, Some(42));
    assert_eq!(cfg.search.threads, Some(2));
    assert_eq!(cfg.search.population_size, 8);
}

#[test]
fn test_validation() {
    let mut cfg = Config::default();
    assert!(cfg.validate().is_ok());

    cfg.search.population_size = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.weights.secondary_weight = -0.1;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.search.threads = Some(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(Config::load_from_file(file.path()).is_err());
}
