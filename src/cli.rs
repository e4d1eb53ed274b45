// File: ./src/cli.rs
//! Command-line argument parsing and help text.
use crate::config::Config;
use crate::extract::ModeKind;
use crate::model::DayRange;
use anyhow::{Result, anyhow};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// Input CSV; `-` reads stdin.
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub mode: Option<ModeKind>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub days: Option<DayRange>,
    pub labels: bool,
    pub compact: bool,
    pub records: bool,
    /// Net count of `-v` minus `-q`.
    pub verbosity: i8,
    pub help: bool,
}

impl CliArgs {
    /// Command-line flags override config values.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.year.is_some() {
            config.year = self.year;
        }
        if self.month.is_some() {
            config.month = self.month;
        }
        if let Some(days) = self.days {
            config.valid_days = days;
        }
        if self.labels {
            config.labels = true;
        }
        if self.compact {
            config.pretty = false;
        }
    }
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| anyhow!("Missing value for {}", flag));
        match a.as_str() {
            "-h" | "--help" | "help" => out.help = true,
            "--mode" => {
                let v = value("--mode")?;
                out.mode = Some(
                    ModeKind::from_str(&v)
                        .map_err(|_| anyhow!("Unknown mode: {} (expected weekly or dated)", v))?,
                );
            }
            "--year" => out.year = Some(value("--year")?.parse()?),
            "--month" => {
                let m: u32 = value("--month")?.parse()?;
                if !(1..=12).contains(&m) {
                    return Err(anyhow!("Month out of range (1..12): {}", m));
                }
                out.month = Some(m);
            }
            "--days" => out.days = Some(parse_day_range(&value("--days")?)?),
            "-o" | "--out" => out.output = Some(PathBuf::from(value("--out")?)),
            "-c" | "--config" => out.config_path = Some(PathBuf::from(value("--config")?)),
            "-r" | "--root" => out.root = Some(PathBuf::from(value("--root")?)),
            "--labels" => out.labels = true,
            "--compact" => out.compact = true,
            "--records" => out.records = true,
            "-v" => out.verbosity += 1,
            "-vv" => out.verbosity += 2,
            "-q" | "--quiet" => out.verbosity -= 1,
            "-" => out.input = Some(PathBuf::from("-")),
            flag if flag.starts_with('-') => return Err(anyhow!("Unknown arg: {}", flag)),
            path => {
                if out.input.is_some() {
                    return Err(anyhow!("Only one input file may be given (extra: {})", path));
                }
                out.input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(out)
}

/// Parses `START-END` (inclusive) or a single day.
pub fn parse_day_range(s: &str) -> Result<DayRange> {
    let (a, b) = match s.split_once('-') {
        Some((a, b)) => (a.trim().parse::<u32>()?, b.trim().parse::<u32>()?),
        None => {
            let d = s.trim().parse::<u32>()?;
            (d, d)
        }
    };
    DayRange::new(a, b).ok_or_else(|| anyhow!("Invalid day range: {}", s))
}

/// Adjusts the configured level by the `-v`/`-q` count.
pub fn effective_level(base: LevelFilter, verbosity: i8) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    if verbosity < 0 {
        return LevelFilter::Off;
    }
    let idx = LEVELS.iter().position(|l| *l == base).unwrap_or(2);
    LEVELS[(idx + verbosity as usize).min(LEVELS.len() - 1)]
}

pub fn print_help(binary_name: &str) {
    println!(
        "Shiftblocks v{} - Extract shift time blocks from spreadsheet CSV exports",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} <input.csv> [OPTIONS]", binary_name);
    println!("    {} - [OPTIONS]            Read CSV from stdin", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    --mode <weekly|dated>  Weekly templates or blocks bound to dates");
    println!("    --year <N>             Target year (dated mode)");
    println!("    --month <1-12>         Target month (dated mode)");
    println!("    --days <START-END>     Keep only these days of the month (dated mode)");
    println!("    --labels               Attach the source header text to each block");
    println!("    --compact              Single-line JSON output");
    println!("    --records              Dump every tokenized CSV record instead");
    println!("    -o, --out <path>       Write JSON to a file instead of stdout");
    println!("    -c, --config <path>    Use this config file");
    println!("    -r, --root <path>      Read config from <path>/config/config.toml");
    println!("    -v, -vv, -q            More / less log output on stderr");
    println!("    -h, --help             Show this help message.");
    println!();
    println!("HEADER LAYOUTS:");
    println!("    \"Thursday, October 2\\n7AM - 10AM\"         One cell, date and time on two lines");
    println!("    \"7AM - 10AM\",\"Thursday, October 2\"       Two neighbouring cells, either order");
    println!("    \"Sunday, October 5 CLASS\"                 CLASS marks a class block");
    println!();
    println!("EXAMPLES:");
    println!("    {} availability.csv", binary_name);
    println!(
        "    {} form.csv --mode dated --year 2025 --month 10 --days 1-28 -o blocks.json",
        binary_name
    );
}
