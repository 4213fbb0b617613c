//! `simplex MODEL.s3d` — parse, analyze, and run the products of a Simplex
//! source file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "simplex")]
#[command(version)]
#[command(about = "Static analyzer and evaluator for the Simplex solid-modeling language")]
struct Cli {
    /// Source file to run (`.s3d`)
    model: PathBuf,

    /// Output filename prefix; defaults to `<model-basename>-out`
    #[arg(long, value_name = "PFX")]
    prefix: Option<String>,

    /// Comma-separated subset of products to run; all products if absent
    #[arg(long, value_name = "p1,p2,...")]
    products: Option<String>,

    /// Verbosity: 0 silent, 1 default, 2 analyzer traces, 3 per-expression traces
    #[arg(long, default_value_t = 1)]
    verbosity: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let source = match std::fs::read_to_string(&cli.model) {
        Ok(s) => s,
        Err(e) => {
            log::error!("failed to read '{}': {e}", cli.model.display());
            return ExitCode::from(4);
        }
    };

    let base_dir = cli.model.parent().unwrap_or_else(|| std::path::Path::new("."));
    let prefix = cli.prefix.clone().unwrap_or_else(|| default_prefix(&cli.model));
    let selected: Vec<String> = cli
        .products
        .as_deref()
        .map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default();

    match run(&source, base_dir, &prefix, &selected) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(source: &str, base_dir: &std::path::Path, prefix: &str, selected: &[String]) -> Result<(), simplex::error::SimplexError> {
    let (module, env) = simplex::prepare_module(source, base_dir)?;
    simplex::driver::run(&module, &env, prefix, selected)?;
    Ok(())
}

fn default_prefix(model: &std::path::Path) -> String {
    let stem = model.file_stem().and_then(|s| s.to_str()).unwrap_or("model");
    format!("{stem}-out")
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}
