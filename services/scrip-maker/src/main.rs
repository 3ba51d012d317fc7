//! SCRIP grid maker
//!
//! Reads a model grid (and optionally a land-sea mask) and writes the SCRIP
//! grid description used by regridding tools.
//!
//! Exit codes: 0 success, 1 configuration, 2 grid source, 3 mask source,
//! 4 destination, 5 grid geometry.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use scrip_maker::{load_config, make_scrip, MakerConfig, MakerError, MakerRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

/// SCRIP grid maker
#[derive(Parser, Debug)]
#[command(name = "scrip-maker")]
#[command(about = "Convert NEMO or WRF model grids into SCRIP grid description files")]
#[command(version)]
struct Args {
    /// Grid file (NEMO mesh_mask or WRF geo_em)
    #[arg(short, long, env = "SCRIP_GRID_FILE")]
    grid: PathBuf,

    /// Land-sea mask file; every cell is sea without one
    #[arg(short, long, env = "SCRIP_MASK_FILE")]
    mask: Option<PathBuf>,

    /// Destination SCRIP file
    #[arg(short, long, env = "SCRIP_OUTPUT_FILE")]
    output: PathBuf,

    /// Grid convention: ocean (nemo) or atmosphere (wrf) [env: SCRIP_CONVENTION]
    #[arg(short, long)]
    convention: Option<String>,

    /// YAML run configuration
    #[arg(long, env = "SCRIP_CONFIG")]
    config: Option<PathBuf>,

    /// Duplicated east columns skipped when wrapping latitudes at the west seam
    #[arg(long)]
    west_seam_overlap: Option<usize>,

    /// Omit grid_area when the grid file has no cell metrics
    #[arg(long)]
    no_area_fallback: bool,

    /// Print the grid summary as JSON on stdout
    #[arg(long)]
    print_summary: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_tracing(&args.log_level, args.log_format);
    netcdf_io::silence_hdf5_errors();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, exit_code = e.exit_code(), "SCRIP conversion failed");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn run(args: &Args) -> Result<(), MakerError> {
    let request = build_request(args)?;

    info!(
        grid = %request.grid.display(),
        mask = ?request.mask,
        output = %request.output.display(),
        convention = %request.config.convention,
        west_seam_overlap = request.config.west_seam_overlap,
        "Starting SCRIP grid maker"
    );

    let summary = make_scrip(&request)?;

    if args.print_summary {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "Failed to serialize grid summary"),
        }
    }

    Ok(())
}

/// Layer defaults, the YAML file, `SCRIP_*` environment variables and
/// command-line flags, in increasing precedence.
fn build_request(args: &Args) -> Result<MakerRequest, MakerError> {
    let file_config = match &args.config {
        Some(path) => load_config(path).map_err(|e| MakerError::Config(format!("{e:#}")))?,
        None => MakerConfig::default(),
    };

    let mut config = file_config.grid;
    config.apply_env()?;
    if let Some(convention) = &args.convention {
        config.convention = convention.parse()?;
    }
    if let Some(overlap) = args.west_seam_overlap {
        config.west_seam_overlap = overlap;
    }
    if args.no_area_fallback {
        config.uniform_area_fallback = false;
    }

    let mut request = MakerRequest::new(
        args.grid.clone(),
        args.mask.clone(),
        args.output.clone(),
        config,
    );
    request.variables = file_config.variables.apply(request.variables);
    request.attributes = file_config.attributes;
    Ok(request)
}
