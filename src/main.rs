use clap::{ArgAction, Args, Parser, Subcommand};
use imgr::config::{self, ConfigError, ImgrConfig};
use imgr::imaging::{self, ClipParams, ImagingError, RustBackend, TransformParams};
use imgr::output;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "imgr")]
#[command(about = "Resize, rotate, clip and convert images")]
#[command(long_about = "\
Resize, rotate, clip and convert images

The output format follows the output file's extension (png, gif, jpg/jpeg,
tif/tiff, bmp). Any other extension keeps the input's format where it can be
written, and falls back to JPEG otherwise.

Examples:

  imgr transform -w 800 -h 600 photo.heic photo.jpg   # fit within 800x600
  imgr transform -w 1200 --no-enlarge in.png out.png  # shrink only
  imgr transform -r 90 scan.tif scan.png              # rotate clockwise
  imgr clip --x1 10 --y1 10 --x2 210 --y2 110 a.png b.png
  imgr --json info photo.jpg

Run 'imgr gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Print results as a JSON envelope
    #[arg(long, global = true)]
    json: bool,

    /// Config file with defaults for quality, no-enlarge and JSON output
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
#[command(disable_help_flag = true, allow_negative_numbers = true)]
struct TransformArgs {
    /// Maximum output width in pixels (0 = unconstrained)
    #[arg(short, long, default_value_t = 0)]
    width: i64,

    /// Maximum output height in pixels (0 = unconstrained)
    #[arg(short = 'h', long, default_value_t = 0)]
    height: i64,

    /// JPEG quality, 0-100 [default: 90]
    #[arg(short, long)]
    quality: Option<i64>,

    /// Never scale up
    #[arg(long)]
    no_enlarge: bool,

    /// Clockwise rotation in degrees: 0, 90, 180 or 270
    #[arg(short, long, default_value_t = 0)]
    rotate: i64,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    input: PathBuf,
    output: PathBuf,
}

#[derive(Args)]
#[command(allow_negative_numbers = true)]
struct ClipArgs {
    /// Left edge (inclusive)
    #[arg(long)]
    x1: i64,
    /// Top edge (inclusive)
    #[arg(long)]
    y1: i64,
    /// Right edge (exclusive)
    #[arg(long)]
    x2: i64,
    /// Bottom edge (exclusive)
    #[arg(long)]
    y2: i64,

    /// JPEG quality, 0-100 [default: 90]
    #[arg(short, long)]
    quality: Option<i64>,

    input: PathBuf,
    output: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Rotate, fit within bounds and re-encode an image
    Transform(TransformArgs),
    /// Extract a rectangular region of an image
    Clip(ClipArgs),
    /// Describe an image without writing anything
    Info {
        input: PathBuf,
    },
    /// Print a stock config file with all options documented
    GenConfig,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Imaging(#[from] ImagingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn kind(&self) -> &'static str {
        match self {
            CliError::Imaging(e) => e.kind().as_str(),
            CliError::Config(_) => "config",
            CliError::Json(_) => "io",
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(&CliError::from(e), cli.json),
    };
    let json = cli.json || config.output.json;

    match run(cli.command, &config, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, json),
    }
}

fn report(error: &CliError, json: bool) -> ExitCode {
    log::debug!("failed: {error:?}");
    if json {
        output::print_json_error(&error.to_string(), error.kind());
    } else {
        eprintln!("Error: {error}");
    }
    ExitCode::FAILURE
}

fn run(command: Command, config: &ImgrConfig, json: bool) -> Result<(), CliError> {
    let backend = RustBackend::new();
    let default_quality = i64::from(config.transform.quality);

    match command {
        Command::Transform(args) => {
            let params = TransformParams::new(
                args.width,
                args.height,
                args.quality.unwrap_or(default_quality),
                args.rotate,
                args.no_enlarge || config.transform.no_enlarge,
            )?;
            let outcome = imaging::transform(&backend, &args.input, &args.output, &params)?;
            if json {
                output::print_json_success(&outcome)?;
            } else {
                output::print_outcome(&outcome);
            }
        }
        Command::Clip(args) => {
            let params = ClipParams::new(
                args.x1,
                args.y1,
                args.x2,
                args.y2,
                args.quality.unwrap_or(default_quality),
            )?;
            let outcome = imaging::clip(&backend, &args.input, &args.output, &params)?;
            if json {
                output::print_json_success(&outcome)?;
            } else {
                output::print_outcome(&outcome);
            }
        }
        Command::Info { input } => {
            let info = imaging::identify(&backend, &input)?;
            if json {
                output::print_json_success(&info)?;
            } else {
                output::print_info(&info);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
