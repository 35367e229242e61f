use clap::{Parser, Subcommand};
use image_merger::imaging::{Quality, supported_input_extensions, supported_output_extensions};
use image_merger::merge::{self, MergeError, MergeOutcome};
use image_merger::types::{MergeMode, MergeRequest};
use image_merger::{config, output};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_LOG_ENV: &str = "image_merger=warn";

#[derive(Parser)]
#[command(name = "image-merger")]
#[command(about = "Merge 2-4 images into one strip or grid")]
#[command(long_about = "\
Merge 2-4 images into one strip or grid

Images are scaled to a common height (horizontal strips), a common width
(vertical strips) or a common height per row (2x2 grid), separated by a
colored gap and optionally framed by a border.

Modes:
  2-horizontal, 3-horizontal  side by side, scaled to the shortest image
  2-vertical, 3-vertical      stacked, scaled to the narrowest image
  4-grid                      [top-left, top-right, bottom-left, bottom-right]

The output format follows the destination extension (.png when none is
given). Settings resolve as: flags > --config file > defaults.

Run 'image-merger gen-config' to generate a documented config file.
Set RUST_LOG=image_merger=debug for diagnostics.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge images into a single file
    Merge(MergeArgs),
    /// List merge modes and how many images each needs
    Modes,
    /// List readable and writable file extensions
    Formats,
    /// Print a stock config file with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Input images, in slot order
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Destination file; the extension picks the format
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Layout mode (see `modes`)
    #[arg(short, long)]
    mode: Option<MergeMode>,

    /// Gap between images, in pixels
    #[arg(long, allow_hyphen_values = true)]
    gap: Option<String>,

    /// Gap color
    #[arg(long)]
    gap_color: Option<String>,

    /// Border width in pixels (0 disables it)
    #[arg(long, allow_hyphen_values = true)]
    border: Option<String>,

    /// Border color
    #[arg(long)]
    border_color: Option<String>,

    /// JPEG quality, 1-100
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    /// Read settings from this TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of progress lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(DEFAULT_LOG_ENV));
    let cli = Cli::parse();

    match cli.command {
        Command::Merge(args) => return run_merge(args),
        Command::Modes => output::print_modes(),
        Command::Formats => {
            output::print_formats(supported_input_extensions(), supported_output_extensions())
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_merge(args: MergeArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = config::load_config(args.config.as_deref())?;
    let mut request = settings.to_request(args.images, args.output);

    if let Some(mode) = args.mode {
        request.mode = mode;
    }
    if let Some(color) = args.gap_color {
        request.gap.color = color;
    }
    if let Some(color) = args.border_color {
        request.border.color = color;
    }
    if let Some(quality) = args.quality {
        request.jpeg_quality = Quality::new(quality);
    }
    if let Err(err) = apply_widths(&mut request, args.gap.as_deref(), args.border.as_deref()) {
        output::print_error(&err);
        return Ok(ExitCode::FAILURE);
    }

    let events = if args.json {
        None
    } else {
        let (tx, rx) = std::sync::mpsc::channel();
        let printer = std::thread::spawn(move || {
            for event in rx {
                for line in output::format_event(&event) {
                    println!("{}", line);
                }
            }
        });
        Some((tx, printer))
    };
    let (tx, printer) = events.unzip();

    let result = merge::merge(&request, tx);
    if let Some(printer) = printer {
        printer
            .join()
            .map_err(|_| "progress printer thread panicked")?;
    }

    match result {
        Ok(MergeOutcome::Written(report)) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_report(&report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(MergeOutcome::Cancelled) => {
            println!("{}", output::format_cancelled());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            output::print_error(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Textual widths from the command line override the config values.
fn apply_widths(
    request: &mut MergeRequest,
    gap: Option<&str>,
    border: Option<&str>,
) -> Result<(), MergeError> {
    if let Some(raw) = gap {
        request.gap.width = merge::parse_width("gap", raw)?;
    }
    if let Some(raw) = border {
        request.border.width = merge::parse_width("border", raw)?;
    }
    Ok(())
}
