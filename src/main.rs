//! abrp2gpx cli - Convert an ABRP trip export into a GPX track

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use abrp2gpx::{convert, default_output, Configs, ConvertOptions};

/// CLI of abrp2gpx - Convert your ABRP trip export (.xlsx) into a GPX file
#[derive(Parser, Debug)]
#[command(name = "abrp2gpx", version, disable_version_flag = true)]
struct Cli {
    /// Input excel file
    #[arg(short, long)]
    input: PathBuf,
    /// Output gpx file (default: input file with .gpx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Configuration file. Default: .abrp2gpx.yaml, ~/.abrp2gpx.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Debug mode - print debug output to console
    #[arg(short, long)]
    debug: bool,
    /// Quiet mode - print only errors to console
    #[arg(short, long, conflicts_with = "debug")]
    quiet: bool,
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    _version: (),
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.debug {
        EnvFilter::new("warn,abrp2gpx=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,abrp2gpx=info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// Load the current config
fn load_configs(provided: Option<PathBuf>) -> Result<Configs> {
    if let Some(path) = provided {
        return Ok(Configs::load(&path)?);
    }

    let mut options = vec![PathBuf::from(".abrp2gpx.yaml")];

    if let Some(home) = dirs::home_dir() {
        options.push(home.join(".abrp2gpx.yaml"));
    }

    Ok(Configs::discover(options)?)
}

fn run(cli: Cli) -> Result<()> {
    let configs = load_configs(cli.config)?;

    let output = match cli.output {
        Some(output) => output,
        None => default_output(&cli.input),
    };

    let options = ConvertOptions {
        input: cli.input,
        output,
        configs,
    };

    convert(&options)?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#} - aborting!", e);
            ExitCode::from(1)
        }
    }
}
