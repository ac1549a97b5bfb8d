//! Parallel batch processing.
//!
//! Images are independent: no state is shared between them and each worker
//! owns its output raster, so the batch parallelizes without
//! synchronization. Per-image isolation holds: a failed image yields its
//! own error slot and never aborts its neighbors.

use hemoscan_core::{ColorRaster, ImageReport, Result};
use rayon::prelude::*;

use crate::pipeline::Detector;

/// Processes a batch of decoded rasters across worker threads.
///
/// Results are returned in input order, one slot per image. The caller
/// decides whether a failed slot is skipped, logged, or surfaced.
pub fn process_batch(detector: &Detector, images: &[ColorRaster]) -> Vec<Result<ImageReport>> {
    images
        .par_iter()
        .map(|image| detector.process(image))
        .collect()
}
