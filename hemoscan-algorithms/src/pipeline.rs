//! Per-image detection pipeline.
//!
//! Straight-line flow, run once per class: binarize, morph-clean, extract
//! edges, Hough-vote, validate, annotate. The parasite pass must complete
//! before the red-cell pass starts: the red-cell raw mask has the dilated
//! parasite footprint removed so the same physical region is never counted
//! under both class labels.

use hemoscan_core::{
    ClassReport, ColorRaster, DetectorConfig, Error, GrayRaster, ImageReport, Result,
};

use crate::annotate::annotate_circles;
use crate::channels::{binarize, equalize_hist, hsv_channels};
use crate::hough::hough_circles;
use crate::mask::MaskPipeline;
use crate::separator::remove_class_footprint;

/// Blood smear cell detector for one validated configuration.
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Creates a detector, validating the configuration up front.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] so malformed parameters are rejected
    /// before any image is processed.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a detector with the default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Processes one decoded RGB raster.
    ///
    /// Splits the image into HSV channels, thresholds the equalized hue
    /// channel for parasites and the raw hue channel for red cells, then
    /// runs both detection passes onto a copy of the input raster.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] for a zero-dimension raster; no
    /// partial processing happens in that case.
    pub fn process(&self, input: &ColorRaster) -> Result<ImageReport> {
        if input.is_empty() {
            return Err(Error::invalid_input("raster has zero dimensions"));
        }

        let hsv = hsv_channels(input);
        let equalized_hue = equalize_hist(&hsv.hue);
        self.process_channels(&equalized_hue, &hsv.hue, input)
    }

    /// Processes pre-split class channels against the original raster.
    ///
    /// This is the seam below color-space conversion: callers with their own
    /// channel preparation supply the parasite and red-cell intensity
    /// channels directly.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the raster is empty or the channel
    /// dimensions disagree with it.
    pub fn process_channels(
        &self,
        parasite_channel: &GrayRaster,
        red_cell_channel: &GrayRaster,
        original: &ColorRaster,
    ) -> Result<ImageReport> {
        if original.is_empty() {
            return Err(Error::invalid_input("raster has zero dimensions"));
        }
        for channel in [parasite_channel, red_cell_channel] {
            if channel.width() != original.width() || channel.height() != original.height() {
                return Err(Error::invalid_input(format!(
                    "channel dimensions {}x{} do not match raster {}x{}",
                    channel.width(),
                    channel.height(),
                    original.width(),
                    original.height()
                )));
            }
        }

        // Parasite class first; its final mask feeds the separator.
        let parasite_pipeline = MaskPipeline::from_class(&self.config.parasite);
        let (parasite_mask, parasite_edges) = parasite_pipeline.run(parasite_channel);

        let red_raw = binarize(red_cell_channel, self.config.red_cell.threshold);
        let red_separated =
            remove_class_footprint(&parasite_mask, &red_raw, self.config.separation_radius);
        let red_pipeline = MaskPipeline::from_class(&self.config.red_cell);
        let (red_mask, red_edges) = red_pipeline.run_mask(red_separated);

        let mut annotated = original.clone();

        let parasite_candidates = hough_circles(
            &parasite_edges,
            &self.config.parasite.radii,
            &self.config.peak_separation,
            self.config.parasite.max_peaks,
        );
        let parasites = ClassReport {
            candidates: parasite_candidates.len(),
            accepted: annotate_circles(
                &mut annotated,
                &parasite_candidates,
                &parasite_mask,
                self.config.parasite.color,
            ),
        };

        let red_candidates = hough_circles(
            &red_edges,
            &self.config.red_cell.radii,
            &self.config.peak_separation,
            self.config.red_cell.max_peaks,
        );
        let red_cells = ClassReport {
            candidates: red_candidates.len(),
            accepted: annotate_circles(
                &mut annotated,
                &red_candidates,
                &red_mask,
                self.config.red_cell.color,
            ),
        };

        Ok(ImageReport {
            annotated,
            parasites,
            red_cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected_before_processing() {
        let mut config = DetectorConfig::default();
        config.parasite.radii.step = 0;
        assert!(matches!(Detector::new(config), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_empty_raster_rejected() {
        let detector = Detector::with_defaults();
        let result = detector.process(&ColorRaster::new(0, 0));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_channel_dimension_mismatch_rejected() {
        let detector = Detector::with_defaults();
        let result = detector.process_channels(
            &GrayRaster::new(10, 10),
            &GrayRaster::new(8, 10),
            &ColorRaster::new(10, 10),
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_blank_image_reports_zero_counts() {
        let detector = Detector::with_defaults();
        let report = detector
            .process_channels(
                &GrayRaster::new(64, 64),
                &GrayRaster::new(64, 64),
                &ColorRaster::new(64, 64),
            )
            .unwrap();
        assert_eq!(report.parasite_count(), 0);
        assert_eq!(report.red_cell_count(), 0);
        assert_eq!(report.annotated, ColorRaster::new(64, 64));
    }
}
