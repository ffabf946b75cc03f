use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use financial_adventure::{AppConfig, Assessment, FinancialInputs, LayoutMode};

#[derive(Debug, PartialEq)]
enum Mode {
    Ui,
    Classify([String; 4]),
}

#[derive(Debug)]
struct CliArgs {
    mode: Mode,
    config_path: Option<PathBuf>,
    layout: Option<LayoutMode>,
    seed: Option<u64>,
}

fn parse_args<I: Iterator<Item = String>>(mut it: I) -> Result<CliArgs> {
    let mut args = CliArgs {
        mode: Mode::Ui,
        config_path: None,
        layout: None,
        seed: None,
    };

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                let path = it.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                args.config_path = Some(PathBuf::from(path));
            }
            "--layout" => {
                let value = it.next().ok_or_else(|| anyhow!("--layout needs a value"))?;
                args.layout = Some(value.parse()?);
            }
            "--seed" => {
                let value = it.next().ok_or_else(|| anyhow!("--seed needs a number"))?;
                args.seed = Some(value.parse().context("--seed must be a number")?);
            }
            "classify" => {
                let mut values: [String; 4] = Default::default();
                for slot in values.iter_mut() {
                    *slot = it.next().ok_or_else(|| {
                        anyhow!("usage: classify INCOME EXPENSES SAVINGS LIABILITIES")
                    })?;
                }
                args.mode = Mode::Classify(values);
            }
            other => return Err(anyhow!("unknown argument '{}'", other)),
        }
    }

    Ok(args)
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match &args.config_path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    if let Some(layout) = args.layout {
        config.layout = layout;
    }
    if let Some(seed) = args.seed {
        config.rng_seed = Some(seed);
    }
    Ok(config)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = load_config(&args)?;

    match &args.mode {
        Mode::Classify(values) => {
            // Headless mode logs to stderr so stdout stays valid JSON
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
            run_classify(values)
        }
        Mode::Ui => {
            // The UI owns the terminal, so logs go to a file or nowhere
            match &config.log_file {
                Some(path) => {
                    let file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)
                        .with_context(|| format!("Failed to open log file: {:?}", path))?;
                    tracing_subscriber::fmt()
                        .with_env_filter(env_filter())
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .init();
                }
                None => {
                    tracing_subscriber::fmt()
                        .with_env_filter(env_filter())
                        .with_writer(std::io::sink)
                        .init();
                }
            }
            run_ui_mode(config)
        }
    }
}

fn run_classify(values: &[String; 4]) -> Result<()> {
    let inputs = FinancialInputs::parse(&values[0], &values[1], &values[2], &values[3])?;
    let assessment = Assessment::new(inputs);
    info!(stage = assessment.stage.name(), "classified from command line");

    let json = serde_json::to_string_pretty(&assessment.report())
        .context("Failed to serialize assessment")?;
    println!("{}", json);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: AppConfig) -> Result<()> {
    info!(layout = ?config.layout, "starting UI");

    let mut app = financial_adventure::App::new(config);
    financial_adventure::ui::run_ui(&mut app)?;

    info!("UI closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run headless: financial-adventure classify INCOME EXPENSES SAVINGS LIABILITIES");
    std::process::exit(1);
}
