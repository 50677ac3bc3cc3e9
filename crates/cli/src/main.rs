use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use colorbars_core::composition::domain::barcode_images::{BarcodeImages, BarcodeKind};
use colorbars_core::composition::domain::interpolator::Interpolation;
use colorbars_core::pipeline::create_barcode_use_case::CreateBarcodeUseCase;
use colorbars_core::pipeline::progress_reporter::LogProgressReporter;
use colorbars_core::shared::config::{BarcodeConfig, OutputOptions};
use colorbars_core::shared::constants::{
    BLUR_HEIGHT, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, INPUT_LIST_EXTENSION,
};
use colorbars_core::shared::error::BarcodeError;
use colorbars_core::shared::time_format::humanize_duration;
use colorbars_core::video::domain::image_writer::ImageWriter;
use colorbars_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use colorbars_core::video::infrastructure::png_image_writer::PngImageWriter;

const APP_NAME: &str = "Color Bars";
const INDENT: &str = "    ";

/// Creates a movie barcode of the given video files.
#[derive(Parser)]
#[command(name = "colorbars", version)]
struct Cli {
    /// Input video files. A `.txt` file is read as a list of video paths, one per line.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output image width.
    #[arg(short = 'x', long, default_value_t = DEFAULT_OUTPUT_WIDTH as i64, allow_negative_numbers = true)]
    width: i64,

    /// Output image height.
    #[arg(short = 'y', long, default_value_t = DEFAULT_OUTPUT_HEIGHT as i64, allow_negative_numbers = true)]
    height: i64,

    /// Output directory (created if missing).
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Resampling method: area, lanczos3, catmull-rom, triangle or nearest.
    #[arg(long, default_value = "area")]
    interpolation: String,

    /// Height in pixels of the vertical blur kernel.
    #[arg(long, default_value_t = BLUR_HEIGHT)]
    blur_height: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    println!(
        "{APP_NAME} {}, {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    );
    println!();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = validate(&cli)?;

    println!("(The time format used in the progress indication is \"HH:MM:SS\".)");
    println!();

    let inputs = expand_inputs(&cli.inputs)?;
    if inputs.is_empty() {
        return Err("No input files were given.".into());
    }
    println!("Found {} input video file(s).", inputs.len());

    prepare_output_dir(&cli.output)?;

    let cancelled = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(cancelled.clone())?;

    let options = OutputOptions::default();
    let writer = PngImageWriter::new();
    let mut failed = 0;

    for input in &inputs {
        println!();
        println!("Current file: {}.", input.display());
        println!();

        let result = process_file(input, &cli.output, &options, &config, &writer, &cancelled);
        if let Err(e) = result {
            eprintln!("{INDENT}ERROR: {e}");
            failed += 1;
        }
        if cancelled.load(Ordering::Relaxed) {
            return Err(BarcodeError::Cancelled.into());
        }
    }

    if failed > 0 {
        log::warn!("{failed} of {} file(s) could not be processed", inputs.len());
    }
    Ok(())
}

/// Creates and saves the barcodes of one video.
///
/// Every failure here is local to `input`; the caller moves on to the next file.
fn process_file(
    input: &Path,
    output_dir: &Path,
    options: &OutputOptions,
    config: &BarcodeConfig,
    writer: &dyn ImageWriter,
    cancelled: &Arc<AtomicBool>,
) -> Result<(), Box<dyn std::error::Error>> {
    if cancelled.load(Ordering::Relaxed) {
        return Err(BarcodeError::Cancelled.into());
    }
    if !input.is_file() {
        return Err("The given input file DOES NOT EXIST.".into());
    }

    let output_paths = options.output_paths(output_dir, input);
    if output_paths.iter().any(|(_, path)| path.exists()) {
        return Err("Some (or all) of the output files ALREADY EXIST.".into());
    }

    let mut use_case = CreateBarcodeUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(LogProgressReporter::default()),
        config.clone(),
        Some(cancelled.clone()),
    )?;
    let outcome = use_case.execute(input)?;
    log::debug!(
        "{} columns from {} frames in {} ({:?})",
        outcome.columns_sampled,
        outcome.frames_read,
        humanize_duration(outcome.sampling_time),
        outcome.stride
    );

    println!("{INDENT}Saving the generated images...");
    save_images(&outcome.images, &output_paths, writer, cancelled)
}

/// Writes every image, checking for an interrupt before each one.
///
/// On an interrupt or a failed write the images already saved for this
/// input are removed again, so a later run does not skip it.
fn save_images(
    images: &BarcodeImages,
    output_paths: &[(BarcodeKind, PathBuf)],
    writer: &dyn ImageWriter,
    cancelled: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut saved: Vec<&Path> = Vec::new();

    for (kind, path) in output_paths {
        let result: Result<(), Box<dyn std::error::Error>> = if cancelled.load(Ordering::Relaxed) {
            Err(BarcodeError::Cancelled.into())
        } else {
            writer.write(path, images.get(*kind)).map_err(|e| {
                format!("Failed to save an output image: {}: {e}", path.display()).into()
            })
        };

        if let Err(e) = result {
            for written in saved {
                if let Err(remove_err) = std::fs::remove_file(written) {
                    log::warn!("Could not remove {}: {remove_err}", written.display());
                }
            }
            return Err(e);
        }
        saved.push(path.as_path());
    }

    Ok(())
}

/// Raises `cancelled` on the first Ctrl-C; a second one exits immediately.
fn install_interrupt_handler(
    cancelled: Arc<AtomicBool>,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    std::thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_err() {
                    return;
                }
                cancelled.store(true, Ordering::Relaxed);
                eprintln!();
                eprintln!("{INDENT}Interrupted, stopping. Press Ctrl+C again to quit at once.");

                if tokio::signal::ctrl_c().await.is_ok() {
                    process::exit(130);
                }
            });
        })?;
    Ok(())
}

/// Replaces list files with the paths they contain and drops duplicates,
/// keeping the order of first appearance.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut seen = HashSet::new();
    let mut expanded = Vec::new();

    for input in inputs {
        let paths = if is_input_list(input) {
            read_input_list(input)?
        } else {
            vec![input.clone()]
        };
        for path in paths {
            if seen.insert(path.clone()) {
                expanded.push(path);
            }
        }
    }

    Ok(expanded)
}

fn is_input_list(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(INPUT_LIST_EXTENSION))
        .unwrap_or(false)
}

fn read_input_list(path: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read the input list {}: {e}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

fn prepare_output_dir(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err("The given output directory ALREADY EXISTS and IS NOT A DIRECTORY.".into());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        format!("The given output directory DOES NOT EXIST and CANNOT BE CREATED: {e}")
    })?;
    log::info!("Created output directory {}", dir.display());
    Ok(())
}

fn validate(cli: &Cli) -> Result<BarcodeConfig, Box<dyn std::error::Error>> {
    let (width, height) = match (u32::try_from(cli.width), u32::try_from(cli.height)) {
        (Ok(w), Ok(h)) if w >= 1 && h >= 1 => (w, h),
        _ => {
            return Err(format!(
                "Invalid given output image dimensions: {}x{}.",
                cli.width, cli.height
            )
            .into())
        }
    };
    let interpolation: Interpolation = cli.interpolation.parse()?;

    let config = BarcodeConfig::new(width, height)
        .with_interpolation(interpolation)
        .with_blur_height(cli.blur_height);
    config.validate()?;
    Ok(config)
}
