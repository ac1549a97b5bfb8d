//! Circular Hough transform: voting and peak extraction.
//!
//! Every nonzero edge pixel casts one vote per candidate radius at each
//! rasterized perimeter point around it; a true circle center collects a
//! vote from every edge pixel on its perimeter. The accumulator is sized
//! once from the image dimensions and radius count, never grown.

use hemoscan_core::{Circle, EdgeMap, PeakSeparation, RadiusRange};

/// Rasterized perimeter offsets of a circle via the midpoint algorithm.
///
/// Offsets are deduplicated so octant seams never double-vote a cell.
/// Radius 0 degenerates to the single center offset.
pub fn circle_perimeter_offsets(radius: usize) -> Vec<(isize, isize)> {
    if radius == 0 {
        return vec![(0, 0)];
    }

    let mut offsets = Vec::with_capacity(radius * 8);
    let r = radius as isize;
    let mut dc = 0isize;
    let mut dr = r;
    let mut error = 1 - r;
    while dc <= dr {
        offsets.extend_from_slice(&[
            (dr, dc),
            (dr, -dc),
            (-dr, dc),
            (-dr, -dc),
            (dc, dr),
            (dc, -dr),
            (-dc, dr),
            (-dc, -dr),
        ]);
        if error < 0 {
            error += 2 * dc + 3;
        } else {
            error += 2 * (dc - dr) + 5;
            dr -= 1;
        }
        dc += 1;
    }
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

/// Vote accumulator over (row, col, radius) cells.
#[derive(Debug, Clone)]
pub struct CircleAccumulator {
    width: usize,
    height: usize,
    radii: Vec<usize>,
    votes: Vec<u32>,
}

impl CircleAccumulator {
    /// Creates a zeroed accumulator for the given image size and radii.
    pub fn new(width: usize, height: usize, radii: Vec<usize>) -> Self {
        let votes = vec![0; width * height * radii.len()];
        Self {
            width,
            height,
            radii,
            votes,
        }
    }

    /// Radii covered by this accumulator, smallest first.
    #[inline]
    pub fn radii(&self) -> &[usize] {
        &self.radii
    }

    #[inline]
    fn index(&self, radius_idx: usize, row: usize, col: usize) -> usize {
        (radius_idx * self.height + row) * self.width + col
    }

    /// Votes for the cell at `(row, col)` in the given radius plane.
    #[inline]
    pub fn votes_at(&self, radius_idx: usize, row: usize, col: usize) -> u32 {
        self.votes[self.index(radius_idx, row, col)]
    }

    /// Adds one vote to a cell. Used by voting and by synthetic tests.
    #[inline]
    pub fn cast_vote(&mut self, radius_idx: usize, row: usize, col: usize) {
        let idx = self.index(radius_idx, row, col);
        self.votes[idx] += 1;
    }
}

/// Runs Hough voting for every edge pixel over the radius range.
///
/// An edge map with zero edges yields an all-zero accumulator.
pub fn accumulate(edges: &EdgeMap, range: &RadiusRange) -> CircleAccumulator {
    let radii = range.radii();
    let mut acc = CircleAccumulator::new(edges.width(), edges.height(), radii.clone());
    let (width, height) = (edges.width() as isize, edges.height() as isize);
    let edge_pixels: Vec<(usize, usize)> = edges.edge_pixels().collect();

    for (radius_idx, &radius) in radii.iter().enumerate() {
        let offsets = circle_perimeter_offsets(radius);
        for &(row, col) in &edge_pixels {
            for &(dr, dc) in &offsets {
                // Any point at distance `radius` from the edge pixel could
                // be the center of a circle through it.
                let (r, c) = (row as isize + dr, col as isize + dc);
                if r >= 0 && r < height && c >= 0 && c < width {
                    acc.cast_vote(radius_idx, r as usize, c as usize);
                }
            }
        }
    }
    acc
}

/// Extracts up to `max_peaks` top-voted circles with duplicate suppression.
///
/// Cells are visited in descending vote order; a candidate is suppressed
/// when an already-accepted peak lies closer than the minimum center
/// distance and differs in radius by less than the minimum radius distance.
/// Output is ordered by descending votes.
pub fn extract_peaks(
    acc: &CircleAccumulator,
    separation: &PeakSeparation,
    max_peaks: usize,
) -> Vec<Circle> {
    let mut candidates: Vec<Circle> = Vec::new();
    for (radius_idx, &radius) in acc.radii.iter().enumerate() {
        for row in 0..acc.height {
            for col in 0..acc.width {
                let votes = acc.votes_at(radius_idx, row, col);
                if votes > 0 {
                    candidates.push(Circle::new(row, col, radius, votes));
                }
            }
        }
    }

    // Descending votes; ties broken by position and radius for determinism.
    candidates.sort_unstable_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then(a.center_row.cmp(&b.center_row))
            .then(a.center_col.cmp(&b.center_col))
            .then(a.radius.cmp(&b.radius))
    });

    let min_center_sq =
        (separation.min_center_distance as u64) * (separation.min_center_distance as u64);
    let mut peaks: Vec<Circle> = Vec::with_capacity(max_peaks);
    for candidate in candidates {
        if peaks.len() == max_peaks {
            break;
        }
        let duplicate = peaks.iter().any(|peak| {
            peak.center_distance_squared(&candidate) < min_center_sq
                && peak.radius_distance(&candidate) < separation.min_radius_distance
        });
        if !duplicate {
            peaks.push(candidate);
        }
    }
    peaks
}

/// Convenience wrapper: voting followed by peak extraction.
pub fn hough_circles(
    edges: &EdgeMap,
    range: &RadiusRange,
    separation: &PeakSeparation,
    max_peaks: usize,
) -> Vec<Circle> {
    let acc = accumulate(edges, range);
    extract_peaks(&acc, separation, max_peaks)
}
