//! Circle candidates and detection reports.

use crate::raster::ColorRaster;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A circle candidate produced by Hough voting.
///
/// Created by peak extraction, consumed by center validation, optionally
/// promoted to a drawn annotation. Never persisted beyond one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    /// Center row in pixels.
    pub center_row: usize,
    /// Center column in pixels.
    pub center_col: usize,
    /// Radius in pixels.
    pub radius: usize,
    /// Accumulated Hough votes backing this candidate.
    pub votes: u32,
}

impl Circle {
    /// Creates a new circle candidate.
    #[inline]
    pub fn new(center_row: usize, center_col: usize, radius: usize, votes: u32) -> Self {
        Self {
            center_row,
            center_col,
            radius,
            votes,
        }
    }

    /// Squared Euclidean distance between two circle centers.
    #[inline]
    pub fn center_distance_squared(&self, other: &Self) -> u64 {
        let dr = self.center_row.abs_diff(other.center_row) as u64;
        let dc = self.center_col.abs_diff(other.center_col) as u64;
        dr * dr + dc * dc
    }

    /// Absolute radius difference between two candidates.
    #[inline]
    pub fn radius_distance(&self, other: &Self) -> usize {
        self.radius.abs_diff(other.radius)
    }
}

/// Detection outcome for one object class on one image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassReport {
    /// Candidates returned by Hough peak extraction.
    pub candidates: usize,
    /// Candidates that passed center validation and were drawn.
    pub accepted: usize,
}

/// Full detection outcome for one image.
///
/// The annotated raster is mutated cumulatively: the parasite pass draws
/// first, the red-cell pass draws on top of the same raster.
#[derive(Debug, Clone)]
pub struct ImageReport {
    /// Input raster with accepted circles drawn on it.
    pub annotated: ColorRaster,
    /// Parasite-infected cell detections.
    pub parasites: ClassReport,
    /// Red blood cell detections.
    pub red_cells: ClassReport,
}

impl ImageReport {
    /// Number of parasite-infected cells found. Zero is a valid result.
    #[inline]
    pub fn parasite_count(&self) -> usize {
        self.parasites.accepted
    }

    /// Number of red blood cells found. Zero is a valid result.
    #[inline]
    pub fn red_cell_count(&self) -> usize {
        self.red_cells.accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_distance() {
        let a = Circle::new(10, 10, 40, 100);
        let b = Circle::new(13, 14, 42, 90);
        assert_eq!(a.center_distance_squared(&b), 25);
        assert_eq!(b.center_distance_squared(&a), 25);
        assert_eq!(a.radius_distance(&b), 2);
    }

    #[test]
    fn test_report_counts() {
        let report = ImageReport {
            annotated: ColorRaster::new(1, 1),
            parasites: ClassReport {
                candidates: 7,
                accepted: 3,
            },
            red_cells: ClassReport::default(),
        };
        assert_eq!(report.parasite_count(), 3);
        assert_eq!(report.red_cell_count(), 0);
    }
}
