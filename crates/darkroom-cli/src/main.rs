//! darkroom: command-line driver for the photo adjustment engine.
//!
//! Three modes:
//!
//! - `apply`: run one parameter payload through normalize, clamp, and
//!   the filter chain, printing per-tool diagnostics.
//! - `replay`: upload an image and feed a file of recorded suggestions
//!   through an editing session, optionally branching from earlier
//!   outputs.
//! - `semantic`: render an image at positions on two semantic axes.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin darkroom -- apply photo.jpg --params '{"adjust_exposure": 10}' -o out.png
//! cargo run --release --bin darkroom -- replay photo.jpg --goal "moody" suggestions.json
//! cargo run --release --bin darkroom -- semantic photo.jpg --goal "warm" --at Cool-Warm=0.6
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use darkroom_pipeline::{
    CanonicalParams, ChainDiagnostics, PreviewFilter, RawParams, apply_chain, decode_rgb, encode_png,
    prepare,
};
use darkroom_session::{EngineConfig, IterationOutcome, SessionEngine, Suggestion};
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

/// Suggestion-driven photo adjustment.
#[derive(Parser)]
#[command(name = "darkroom", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output results as JSON instead of human-readable reports.
    #[arg(long, global = true)]
    json: bool,

    /// Iterations allowed per session.
    #[arg(long, global = true, default_value_t = EngineConfig::DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// Maximum preview width in pixels.
    #[arg(long, global = true, default_value_t = EngineConfig::DEFAULT_PREVIEW_WIDTH, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    preview_width: u32,

    /// Preview resampling filter.
    #[arg(long, global = true, value_enum, default_value_t = CLI_DEFAULT_FILTER)]
    preview_filter: Filter,

    /// Full engine config as a JSON string.
    ///
    /// When provided, the individual engine flags are ignored. The JSON
    /// must be a valid `EngineConfig` serialization.
    #[arg(long, global = true)]
    config_json: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply one parameter payload to an image.
    Apply {
        /// Input image (PNG, JPEG, BMP, WebP).
        image: PathBuf,

        /// Parameter payload as JSON, or `@path` to read it from a file.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Write the adjusted image here as PNG.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay recorded suggestions as an editing session.
    ///
    /// The suggestions file holds a JSON array of
    /// `{"parameters": ..., "reason": ..., "status": ...}` objects. An
    /// entry may carry `"base": "<file>"` to branch from an earlier output.
    Replay {
        image: PathBuf,

        /// Editing goal for the session.
        #[arg(long)]
        goal: String,

        /// JSON file of suggestions, applied in order.
        suggestions: PathBuf,

        /// Directory that receives the session folder.
        #[arg(long, default_value = "darkroom-sessions")]
        root: PathBuf,
    },

    /// Render semantic-axis edits for an image.
    Semantic {
        image: PathBuf,

        #[arg(long)]
        goal: String,

        /// Axis descriptor JSON file. The default axes are used when
        /// omitted or invalid.
        #[arg(long)]
        descriptor: Option<PathBuf>,

        /// Axis coordinate as `NAME=VALUE` (repeatable), e.g. `Cool-Warm=0.5`.
        #[arg(long = "at", value_parser = parse_coordinate)]
        coordinates: Vec<(String, f64)>,

        #[arg(long, default_value = "darkroom-sessions")]
        root: PathBuf,
    },
}

/// Preview resampling filter selection.
#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    /// Nearest-neighbor (fastest, blocky).
    Nearest,
    /// Bilinear interpolation (fast, decent quality).
    Triangle,
    /// Bicubic Catmull-Rom (moderate, good quality).
    CatmullRom,
    /// Gaussian (moderate, smooth).
    Gaussian,
    /// Lanczos with 3 lobes (slowest, sharpest).
    Lanczos3,
}

const fn filter_from_pipeline(f: PreviewFilter) -> Filter {
    match f {
        PreviewFilter::Nearest => Filter::Nearest,
        PreviewFilter::Triangle => Filter::Triangle,
        PreviewFilter::CatmullRom => Filter::CatmullRom,
        PreviewFilter::Gaussian => Filter::Gaussian,
        PreviewFilter::Lanczos3 => Filter::Lanczos3,
    }
}

const CLI_DEFAULT_FILTER: Filter = filter_from_pipeline(PreviewFilter::Triangle);

fn parse_coordinate(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {arg:?}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid coordinate {value:?}: {e}"))?;
    Ok((name.trim().to_owned(), value))
}

/// Build an [`EngineConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual engine flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<EngineConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(EngineConfig {
        max_iterations: cli.max_iterations,
        preview_width: cli.preview_width,
        preview_filter: match cli.preview_filter {
            Filter::Nearest => PreviewFilter::Nearest,
            Filter::Triangle => PreviewFilter::Triangle,
            Filter::CatmullRom => PreviewFilter::CatmullRom,
            Filter::Gaussian => PreviewFilter::Gaussian,
            Filter::Lanczos3 => PreviewFilter::Lanczos3,
        },
        ..EngineConfig::default()
    })
}

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("Error reading {}: {e}", path.display()))
}

/// JSON text, or the contents of the file named after a leading `@`.
fn read_json_arg(arg: &str) -> Result<serde_json::Value, String> {
    let text = match arg.strip_prefix('@') {
        Some(path) => String::from_utf8_lossy(&read_file(Path::new(path))?).into_owned(),
        None => arg.to_owned(),
    };
    serde_json::from_str(&text).map_err(|e| format!("Error parsing parameters: {e}"))
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Error serializing output: {e}"))?;
    println!("{json}");
    Ok(())
}

// ───── Subcommands ─────────────────────────────────────────────────

#[derive(Serialize)]
struct ApplyOutput<'a> {
    parameters: &'a CanonicalParams,
    diagnostics: &'a ChainDiagnostics,
}

fn run_apply(cli: &Cli, image: &Path, params: &str, output: Option<&Path>) -> Result<(), String> {
    let bytes = read_file(image)?;
    eprintln!("Image: {} ({} bytes)", image.display(), bytes.len());

    let decoded = decode_rgb(&bytes).map_err(|e| format!("Pipeline error: {e}"))?;
    let prepared = prepare(&RawParams::from(read_json_arg(params)?));
    let result = apply_chain(&decoded, &prepared);

    if cli.json {
        print_json(&ApplyOutput {
            parameters: &prepared,
            diagnostics: &result.diagnostics,
        })?;
    } else {
        println!("{}", result.diagnostics.report());
    }

    if let Some(path) = output {
        let png = encode_png(&result.image).map_err(|e| format!("Pipeline error: {e}"))?;
        std::fs::write(path, png).map_err(|e| format!("Error writing {}: {e}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn run_replay(
    cli: &Cli,
    config: EngineConfig,
    image: &Path,
    goal: &str,
    suggestions: &Path,
    root: &Path,
) -> Result<(), String> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&read_file(suggestions)?)
        .map_err(|e| format!("Error parsing {}: {e}", suggestions.display()))?;

    let engine = SessionEngine::new(root, config);
    let id = engine
        .upload(&read_file(image)?, goal)
        .map_err(|e| format!("Session error: {e}"))?;
    eprintln!("Session: {id} ({})", engine.session_dir(id).display());

    for (index, entry) in entries.into_iter().enumerate() {
        let base = entry
            .get("base")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        let suggestion: Suggestion = serde_json::from_value(entry)
            .map_err(|e| format!("Error parsing suggestion {}: {e}", index + 1))?;

        let outcome = if index == 0 {
            engine.start(id, &suggestion).map(IterationOutcome::Applied)
        } else {
            engine.iterate(id, &suggestion, base.as_deref())
        };
        let outcome = outcome.map_err(|e| format!("Session error: {e}"))?;

        if cli.json {
            print_json(&outcome)?;
        } else {
            match &outcome {
                IterationOutcome::Applied(report) => {
                    println!(
                        "Iteration {}: {} <- {} [{:?}] {}",
                        report.iteration,
                        report.output,
                        report.base,
                        report.signal,
                        report.rationale
                    );
                    println!("{}", report.diagnostics.report());
                }
                IterationOutcome::CeilingReached { iteration, current } => {
                    println!("Iteration ceiling reached at {iteration}; current image {current}");
                }
            }
        }
    }

    let info = engine
        .session_info(id)
        .map_err(|e| format!("Session error: {e}"))?;
    if cli.json {
        print_json(&info)?;
    } else {
        println!(
            "Session {}: {} of {} iterations, phase {:?}, current {}",
            info.session_id, info.iteration, info.max_iterations, info.phase, info.current_image
        );
    }
    Ok(())
}

fn run_semantic(
    cli: &Cli,
    config: EngineConfig,
    image: &Path,
    goal: &str,
    descriptor: Option<&Path>,
    coordinates: &[(String, f64)],
    root: &Path,
) -> Result<(), String> {
    let descriptor_text = descriptor
        .map(|path| read_file(path).map(|b| String::from_utf8_lossy(&b).into_owned()))
        .transpose()?;

    let engine = SessionEngine::new(root, config);
    let session_error = |e: darkroom_session::SessionError| format!("Session error: {e}");
    let id = engine
        .upload(&read_file(image)?, goal)
        .map_err(session_error)?;
    let axes = engine
        .semantic_init(id, descriptor_text.as_deref())
        .map_err(session_error)?;
    eprintln!(
        "Session: {id} (axes: {}, {})",
        axes.axes[0].axis, axes.axes[1].axis
    );

    let coordinates: BTreeMap<String, f64> = coordinates.iter().cloned().collect();
    let report = engine
        .semantic_edit(id, &coordinates, None)
        .map_err(session_error)?;

    if cli.json {
        print_json(&report)?;
    } else {
        println!("{}: {}", report.output, report.rationale);
        println!("{}", report.diagnostics.report());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_for(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "engine config");

    let result = match &cli.command {
        Command::Apply {
            image,
            params,
            output,
        } => run_apply(&cli, image, params, output.as_deref()),
        Command::Replay {
            image,
            goal,
            suggestions,
            root,
        } => run_replay(&cli, config, image, goal, suggestions, root),
        Command::Semantic {
            image,
            goal,
            descriptor,
            coordinates,
            root,
        } => run_semantic(
            &cli,
            config,
            image,
            goal,
            descriptor.as_deref(),
            coordinates,
            root,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
