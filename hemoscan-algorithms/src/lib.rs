//! hemoscan-algorithms: Detection pipeline for blood smear images.
//!
//! Morphological mask cleaning, Sobel edge extraction, circular Hough
//! voting with peak de-duplication, center validation, and annotation,
//! composed into a per-image pipeline and a rayon-parallel batch driver.
//!

pub mod annotate;
pub mod batch;
pub mod channels;
pub mod edges;
pub mod hough;
pub mod mask;
pub mod morphology;
pub mod pipeline;
pub mod separator;

pub use annotate::{annotate_circles, validate_center};
pub use batch::process_batch;
pub use channels::{binarize, equalize_hist, hsv_channels, HsvChannels};
pub use edges::sobel_edges;
pub use hough::{accumulate, extract_peaks, hough_circles, CircleAccumulator};
pub use mask::MaskPipeline;
pub use morphology::{close, dilate, erode, open};
pub use pipeline::Detector;
pub use separator::remove_class_footprint;
