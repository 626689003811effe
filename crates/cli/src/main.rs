//! Command-line front end for the client generator.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Generate a typed Go HTTP client from an OpenAPI-style document.
#[derive(Parser, Debug)]
#[command(name = "httpgen", version)]
struct Cli {
    /// Client type name; canonicalized before use.
    #[arg(long = "client-name", value_name = "NAME")]
    client_name: String,

    /// Where to write the generated source; stdout when omitted.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Input document, JSON or YAML.
    #[arg(value_name = "SPEC_PATH")]
    spec: PathBuf,
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::from_default_env());

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing already initialized");
    }
}

fn run(cli: &Cli, invocation: &str) -> Result<(), String> {
    let raw = std::fs::read_to_string(&cli.spec)
        .map_err(|err| format!("could not read {}: {err}", cli.spec.display()))?;

    let source = httpgen_core::generate(&raw, &cli.client_name, invocation)
        .map_err(|err| err.to_string())?;

    match &cli.output {
        Some(path) => std::fs::write(path, &source)
            .map_err(|err| format!("could not write {}: {err}", path.display()))?,
        None => print!("{source}"),
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let invocation = std::env::args().collect::<Vec<_>>().join(" ");
    let cli = Cli::parse();

    match run(&cli, &invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
