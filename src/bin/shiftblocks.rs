use anyhow::{Context, Result};
use shiftblocks::cli::{self, CliArgs};
use shiftblocks::config::Config;
use shiftblocks::context::StandardContext;
use shiftblocks::{csv, extract_from_bytes};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

fn main() -> Result<()> {
    let args = cli::parse_args(std::env::args().skip(1))?;

    if args.help || args.input.is_none() {
        cli::print_help("shiftblocks");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    let mut config = match &args.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load(&ctx)?,
    };
    args.apply_to(&mut config);

    init_logging(&config, &args)?;
    run(&config, &args)
}

fn init_logging(config: &Config, args: &CliArgs) -> Result<()> {
    let level = cli::effective_level(config.level_filter()?, args.verbosity);
    // Everything goes to stderr so JSON on stdout stays clean.
    TermLogger::init(
        level,
        ConfigBuilder::new().set_time_level(log::LevelFilter::Off).build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read CSV from stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("Failed to read CSV file '{}'", path.display()))
}

fn run(config: &Config, args: &CliArgs) -> Result<()> {
    let Some(input) = &args.input else {
        return Ok(());
    };
    let bytes = read_input(input)?;

    let json = if args.records {
        let text = String::from_utf8_lossy(&bytes);
        to_json(&csv::parse_records(&text), config.pretty)?
    } else {
        let options = config.to_options()?;
        log::info!("Extracting {} blocks from '{}'", options.mode.kind(), input.display());
        let blocks = extract_from_bytes(&bytes, &options)
            .with_context(|| format!("Failed to extract blocks from '{}'", input.display()))?;
        if blocks.is_empty() {
            log::warn!("No schedule columns recognized in '{}'", input.display());
        }
        to_json(&blocks, config.pretty)?
    };

    match &args.output {
        Some(path) => fs::write(path, format!("{}\n", json))
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
