// Tests for command-line argument parsing.
use shiftblocks::cli::{parse_args, parse_day_range};
use shiftblocks::config::Config;
use shiftblocks::extract::ModeKind;
use shiftblocks::model::DayRange;
use std::path::PathBuf;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_full_dated_invocation() {
    let parsed = parse_args(args(&[
        "form.csv", "--mode", "Dated", "--year", "2025", "--month", "10", "--days", "1-28",
        "-o", "out.json", "--labels", "-v",
    ]))
    .unwrap();
    assert_eq!(parsed.input, Some(PathBuf::from("form.csv")));
    assert_eq!(parsed.mode, Some(ModeKind::Dated));
    assert_eq!(parsed.year, Some(2025));
    assert_eq!(parsed.month, Some(10));
    assert_eq!(parsed.days, DayRange::new(1, 28));
    assert_eq!(parsed.output, Some(PathBuf::from("out.json")));
    assert!(parsed.labels);
    assert_eq!(parsed.verbosity, 1);
}

#[test]
fn test_flags_override_config() {
    let parsed = parse_args(args(&["-", "--mode", "dated", "--month", "11", "--compact"])).unwrap();
    let mut config = Config {
        year: Some(2024),
        month: Some(3),
        ..Config::default()
    };
    parsed.apply_to(&mut config);
    assert_eq!(config.mode, ModeKind::Dated);
    assert_eq!(config.year, Some(2024));
    assert_eq!(config.month, Some(11));
    assert!(!config.pretty);
    assert_eq!(parsed.input, Some(PathBuf::from("-")));
}

#[test]
fn test_bad_arguments() {
    assert!(parse_args(args(&["--mode", "monthly"])).is_err());
    assert!(parse_args(args(&["--month", "13"])).is_err());
    assert!(parse_args(args(&["--year"])).is_err());
    assert!(parse_args(args(&["--bogus"])).is_err());
    assert!(parse_args(args(&["a.csv", "b.csv"])).is_err());
}

#[test]
fn test_day_range_forms() {
    assert_eq!(parse_day_range("1-28").unwrap(), DayRange { start: 1, end: 28 });
    assert_eq!(parse_day_range(" 5 ").unwrap(), DayRange { start: 5, end: 5 });
    assert!(parse_day_range("28-1").is_err());
    assert!(parse_day_range("0-10").is_err());
    assert!(parse_day_range("x").is_err());
}

#[test]
fn test_help_flag() {
    assert!(parse_args(args(&["--help"])).unwrap().help);
    assert!(parse_args(args(&["-q", "-q"])).unwrap().verbosity < 0);
}
