//!
//! Command-line interface for blood smear cell detection.
#![allow(clippy::uninlined_format_args, clippy::cast_possible_truncation)]

use clap::{Parser, Subcommand};

use hemoscan_algorithms::{process_batch, Detector};
use hemoscan_core::{ColorRaster, DetectorConfig, PeakSeparation};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("core error: {0}")]
    Core(#[from] hemoscan_core::Error),

    #[error("cannot encode annotated raster for {0}")]
    Encode(PathBuf),
}

/// Blood smear cell counter: morphology plus circular Hough transform.
#[derive(Parser)]
#[command(name = "hemoscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and count cells in microscope images
    Detect {
        /// Input image file(s) (PNG/JPEG)
        #[arg(required = true)]
        input: Vec<PathBuf>,

        /// Directory for annotated output images
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Binarization threshold for the parasite class (equalized hue)
        #[arg(long, default_value = "245")]
        parasite_threshold: u8,

        /// Binarization threshold for the red-cell class (raw hue)
        #[arg(long, default_value = "120")]
        red_cell_threshold: u8,

        /// Dilation radius for removing the parasite footprint (pixels)
        #[arg(long, default_value = "20")]
        separation_radius: usize,

        /// Minimum center distance between reported circles (pixels)
        #[arg(long, default_value = "50")]
        min_peak_distance: usize,

        /// Skip writing annotated images, only print counts
        #[arg(long)]
        counts_only: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about an image file
    Info {
        /// Input image file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect {
            input,
            output_dir,
            parasite_threshold,
            red_cell_threshold,
            separation_radius,
            min_peak_distance,
            counts_only,
            verbose,
        } => {
            let mut config = DetectorConfig::default()
                .with_separation_radius(separation_radius)
                .with_peak_separation(PeakSeparation {
                    min_center_distance: min_peak_distance,
                    ..PeakSeparation::default()
                });
            config.parasite.threshold = parasite_threshold;
            config.red_cell.threshold = red_cell_threshold;
            let detector = Detector::new(config)?;

            if verbose {
                eprintln!("Processing {} file(s)...", input.len());
                eprintln!("Parasite threshold: {}", parasite_threshold);
                eprintln!("Red cell threshold: {}", red_cell_threshold);
                eprintln!("Separation radius: {} pixels", separation_radius);
            }

            let start = Instant::now();

            // Decode phase. A file that fails to decode is reported and
            // skipped; it must not keep the rest of the batch from running.
            let mut images: Vec<(PathBuf, ColorRaster)> = Vec::with_capacity(input.len());
            for path in &input {
                match load_raster(path) {
                    Ok(raster) => images.push((path.clone(), raster)),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }

            let rasters: Vec<ColorRaster> =
                images.iter().map(|(_, raster)| raster.clone()).collect();
            let results = process_batch(&detector, &rasters);

            let mut total_parasites = 0usize;
            let mut total_red_cells = 0usize;
            let mut failed = 0usize;

            for ((path, _), result) in images.iter().zip(results) {
                match result {
                    Ok(report) => {
                        total_parasites += report.parasite_count();
                        total_red_cells += report.red_cell_count();
                        println!(
                            "{}: {} parasite-infected cells, {} red blood cells",
                            path.display(),
                            report.parasite_count(),
                            report.red_cell_count()
                        );

                        if !counts_only {
                            let out_path = annotated_path(&output_dir, path);
                            save_raster(&report.annotated, &out_path)?;
                            if verbose {
                                eprintln!("  wrote {}", out_path.display());
                            }
                        }
                    }
                    Err(err) => {
                        failed += 1;
                        eprintln!("Failed {}: {}", path.display(), err);
                    }
                }
            }

            let elapsed = start.elapsed();
            println!(
                "Processed {} images in {:.2}s",
                images.len() - failed,
                elapsed.as_secs_f64()
            );
            println!("Total parasite-infected cells: {}", total_parasites);
            println!("Total red blood cells: {}", total_red_cells);
        }

        Commands::Info { input } => {
            let raster = load_raster(&input)?;
            println!("File: {}", input.display());
            println!("Dimensions: {}x{}", raster.width(), raster.height());
            println!("Channels: 3 (RGB)");
        }
    }

    Ok(())
}

/// Decodes an image file into an RGB raster.
fn load_raster(path: &Path) -> Result<ColorRaster> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    Ok(ColorRaster::from_raw(width, height, rgb.into_raw())?)
}

/// Encodes an annotated raster as PNG.
fn save_raster(raster: &ColorRaster, path: &Path) -> Result<()> {
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    let buffer = image::RgbImage::from_raw(width, height, raster.data().to_vec())
        .ok_or_else(|| CliError::Encode(path.to_path_buf()))?;
    buffer.save(path)?;
    Ok(())
}

/// Output path for an annotated image: `<output_dir>/<stem>_detected.png`.
fn annotated_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");
    output_dir.join(format!("{}_detected.png", stem))
}
