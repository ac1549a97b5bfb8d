//! Detection pipeline configuration.
//!
//! All tunables are fixed configuration, never derived from image content.
//! [`DetectorConfig::validate`] rejects malformed values at load time so the
//! per-image pipeline never has to re-check them.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Morphological operation applied in a mask-cleaning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MorphOp {
    /// Erosion then dilation: removes small specks and thin bridges.
    Open,
    /// Dilation then erosion: fills small holes and gaps.
    Close,
}

/// One mask-cleaning step: an operation with its disk radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MorphStep {
    /// Operation to apply.
    pub op: MorphOp,
    /// Disk structuring element radius in pixels.
    pub radius: usize,
}

impl MorphStep {
    /// Creates a new step.
    #[inline]
    pub fn new(op: MorphOp, radius: usize) -> Self {
        Self { op, radius }
    }
}

/// Inclusive radius search range for Hough voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadiusRange {
    /// Smallest radius searched, in pixels.
    pub min: usize,
    /// Largest radius searched (inclusive), in pixels.
    pub max: usize,
    /// Step between consecutive radii, in pixels.
    pub step: usize,
}

impl RadiusRange {
    /// Creates a new range.
    pub fn new(min: usize, max: usize, step: usize) -> Self {
        Self { min, max, step }
    }

    /// Radii in the range, smallest first.
    pub fn radii(&self) -> Vec<usize> {
        (self.min..=self.max).step_by(self.step.max(1)).collect()
    }

    /// Checks the range is non-empty with a nonzero step.
    pub fn validate(&self) -> Result<()> {
        if self.step == 0 {
            return Err(Error::config("radius step must be nonzero"));
        }
        if self.min == 0 {
            return Err(Error::config("minimum radius must be nonzero"));
        }
        if self.min > self.max {
            return Err(Error::config(format!(
                "radius range is inverted: {} > {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Minimum separation between reported Hough peaks.
///
/// Two candidates closer than both thresholds describe the same physical
/// object and collapse to the stronger peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeakSeparation {
    /// Minimum Euclidean distance between peak centers, in pixels.
    pub min_center_distance: usize,
    /// Minimum difference between peak radii, in pixels.
    pub min_radius_distance: usize,
}

impl Default for PeakSeparation {
    fn default() -> Self {
        Self {
            min_center_distance: 50,
            min_radius_distance: 50,
        }
    }
}

/// Per-class detection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassConfig {
    /// Binarization threshold: pixels strictly below it are background.
    pub threshold: u8,
    /// Mask-cleaning steps applied after binarization, in order.
    pub morph_steps: Vec<MorphStep>,
    /// Radius prior for this class's typical physical size.
    pub radii: RadiusRange,
    /// Maximum number of Hough peaks reported per image.
    pub max_peaks: usize,
    /// Annotation color drawn for accepted circles.
    pub color: [u8; 3],
}

impl ClassConfig {
    /// Defaults for parasite-infected cells: near-white cluster of the
    /// equalized hue channel, aggressive hole filling, larger radius prior.
    pub fn parasite_defaults() -> Self {
        Self {
            threshold: 245,
            morph_steps: vec![
                MorphStep::new(MorphOp::Open, 5),
                MorphStep::new(MorphOp::Close, 20),
                MorphStep::new(MorphOp::Open, 20),
            ],
            radii: RadiusRange::new(30, 80, 2),
            max_peaks: 60,
            color: [220, 20, 20],
        }
    }

    /// Defaults for red blood cells: broad hue range, single smoothing pass
    /// (the raw mask has already had the parasite footprint removed), and a
    /// higher peak budget since red cells dominate each image.
    pub fn red_cell_defaults() -> Self {
        Self {
            threshold: 120,
            morph_steps: vec![MorphStep::new(MorphOp::Open, 20)],
            radii: RadiusRange::new(30, 70, 2),
            max_peaks: 200,
            color: [20, 220, 20],
        }
    }

    fn validate(&self, class: &str) -> Result<()> {
        if let Err(Error::ConfigError(reason)) = self.radii.validate() {
            return Err(Error::config(format!("{class}: {reason}")));
        }
        if self.max_peaks == 0 {
            return Err(Error::config(format!("{class}: max peaks must be nonzero")));
        }
        Ok(())
    }
}

/// Full detector configuration: both object classes plus the parameters
/// shared between their passes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Parasite-infected cell class.
    pub parasite: ClassConfig,
    /// Red blood cell class.
    pub red_cell: ClassConfig,
    /// Dilation radius applied to the parasite mask before it is removed
    /// from the red-cell raw mask.
    pub separation_radius: usize,
    /// Minimum separation between reported Hough peaks.
    pub peak_separation: PeakSeparation,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            parasite: ClassConfig::parasite_defaults(),
            red_cell: ClassConfig::red_cell_defaults(),
            separation_radius: 20,
            peak_separation: PeakSeparation::default(),
        }
    }
}

impl DetectorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parasite class configuration.
    #[must_use]
    pub fn with_parasite(mut self, class: ClassConfig) -> Self {
        self.parasite = class;
        self
    }

    /// Sets the red-cell class configuration.
    #[must_use]
    pub fn with_red_cell(mut self, class: ClassConfig) -> Self {
        self.red_cell = class;
        self
    }

    /// Sets the parasite footprint dilation radius.
    #[must_use]
    pub fn with_separation_radius(mut self, radius: usize) -> Self {
        self.separation_radius = radius;
        self
    }

    /// Sets the peak separation thresholds.
    #[must_use]
    pub fn with_peak_separation(mut self, separation: PeakSeparation) -> Self {
        self.peak_separation = separation;
        self
    }

    /// Validates the configuration before any image is processed.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] for an empty or inverted radius range,
    /// a zero radius step, or a zero peak budget.
    pub fn validate(&self) -> Result<()> {
        self.parasite.validate("parasite class")?;
        self.red_cell.validate("red cell class")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_radius_range_enumeration() {
        let range = RadiusRange::new(30, 36, 2);
        assert_eq!(range.radii(), vec![30, 32, 34, 36]);

        let single = RadiusRange::new(40, 40, 2);
        assert_eq!(single.radii(), vec![40]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = DetectorConfig::default().with_red_cell(ClassConfig {
            radii: RadiusRange::new(70, 30, 2),
            ..ClassConfig::red_cell_defaults()
        });
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_zero_step_rejected() {
        let config = DetectorConfig::default().with_parasite(ClassConfig {
            radii: RadiusRange::new(30, 80, 0),
            ..ClassConfig::parasite_defaults()
        });
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_zero_peak_budget_rejected() {
        let config = DetectorConfig::default().with_parasite(ClassConfig {
            max_peaks: 0,
            ..ClassConfig::parasite_defaults()
        });
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_builder_setters() {
        let config = DetectorConfig::new()
            .with_separation_radius(25)
            .with_peak_separation(PeakSeparation {
                min_center_distance: 30,
                min_radius_distance: 10,
            });
        assert_eq!(config.separation_radius, 25);
        assert_eq!(config.peak_separation.min_center_distance, 30);
    }
}
