//! hemoscan-core: Core types for blood smear cell detection.
//!
//! This crate provides the raster containers, circle candidate types,
//! configuration, and error taxonomy shared by the detection pipeline.
//!

pub mod circle;
pub mod config;
pub mod error;
pub mod raster;

pub use circle::{Circle, ClassReport, ImageReport};
pub use config::{ClassConfig, DetectorConfig, MorphOp, MorphStep, PeakSeparation, RadiusRange};
pub use error::{Error, Result};
pub use raster::{BinaryMask, ColorRaster, EdgeMap, GrayRaster};
