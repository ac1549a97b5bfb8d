//! Candidate validation and circle annotation.
//!
//! Hough voting can produce geometrically plausible circles whose center
//! falls in background noise; intersecting the center with the filled class
//! mask is a cheap, effective filter. Accepted circles are drawn onto a
//! shared output raster passed in by exclusive reference, so the red-cell
//! pass draws on top of the parasite pass's output.

use hemoscan_core::{BinaryMask, Circle, ColorRaster};

use crate::hough::circle_perimeter_offsets;

/// True if the candidate's center lies inside the filled class mask.
///
/// Out-of-bounds centers are rejected, never an error: candidates near the
/// image border are an expected artifact of Hough voting.
pub fn validate_center(circle: &Circle, mask: &BinaryMask) -> bool {
    mask.foreground_at(circle.center_row as isize, circle.center_col as isize)
        .unwrap_or(false)
}

/// Draws one circle outline, clipping perimeter pixels at the raster bounds.
fn draw_outline(output: &mut ColorRaster, row: usize, col: usize, radius: usize, color: [u8; 3]) {
    let (width, height) = (output.width() as isize, output.height() as isize);
    for (dr, dc) in circle_perimeter_offsets(radius) {
        let (r, c) = (row as isize + dr, col as isize + dc);
        if r >= 0 && r < height && c >= 0 && c < width {
            output.set_pixel(r as usize, c as usize, color);
        }
    }
}

/// Validates candidates against the class mask and draws the accepted ones.
///
/// Each accepted circle is drawn as three concentric outlines at radius-1,
/// radius, and radius+1 for visibility. Returns the accepted count; zero is
/// a valid result, reported to the caller as-is.
pub fn annotate_circles(
    output: &mut ColorRaster,
    candidates: &[Circle],
    mask: &BinaryMask,
    color: [u8; 3],
) -> usize {
    let mut accepted = 0;
    for circle in candidates {
        if !validate_center(circle, mask) {
            continue;
        }
        for radius in [circle.radius.saturating_sub(1), circle.radius, circle.radius + 1] {
            draw_outline(output, circle.center_row, circle.center_col, radius, color);
        }
        accepted += 1;
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered_mask(size: usize, row: usize, col: usize) -> BinaryMask {
        let mut mask = BinaryMask::new(size, size);
        mask.set_foreground(row, col);
        mask
    }

    #[test]
    fn test_validator_accepts_foreground_center() {
        let mask = centered_mask(100, 50, 50);
        assert!(validate_center(&Circle::new(50, 50, 40, 10), &mask));
    }

    #[test]
    fn test_validator_rejects_background_center() {
        let mask = centered_mask(100, 50, 50);
        assert!(!validate_center(&Circle::new(51, 50, 40, 10), &mask));
    }

    #[test]
    fn test_validator_rejects_out_of_bounds_center() {
        let mask = centered_mask(20, 10, 10);
        assert!(!validate_center(&Circle::new(20, 10, 5, 10), &mask));
        assert!(!validate_center(&Circle::new(10, 25, 5, 10), &mask));
    }

    #[test]
    fn test_annotate_draws_three_rings() {
        let mut output = ColorRaster::new(100, 100);
        let mask = centered_mask(100, 50, 50);
        let candidates = [Circle::new(50, 50, 20, 30)];

        let accepted = annotate_circles(&mut output, &candidates, &mask, [220, 20, 20]);
        assert_eq!(accepted, 1);

        // All three concentric outlines along the center row, east side.
        assert_eq!(output.pixel(50, 69), [220, 20, 20]);
        assert_eq!(output.pixel(50, 70), [220, 20, 20]);
        assert_eq!(output.pixel(50, 71), [220, 20, 20]);
        // Interior and far background untouched.
        assert_eq!(output.pixel(50, 50), [0, 0, 0]);
        assert_eq!(output.pixel(10, 10), [0, 0, 0]);
    }

    #[test]
    fn test_annotate_skips_rejected_candidates() {
        let mut output = ColorRaster::new(100, 100);
        let mask = centered_mask(100, 50, 50);
        let candidates = [
            Circle::new(50, 50, 20, 30),
            Circle::new(80, 80, 20, 25), // background center
        ];

        let accepted = annotate_circles(&mut output, &candidates, &mask, [20, 220, 20]);
        assert_eq!(accepted, 1);
        assert_eq!(output.pixel(80, 100 - 1), [0, 0, 0]);
    }

    #[test]
    fn test_annotate_clips_at_border() {
        // Circle overlapping the border: out-of-bounds perimeter pixels are
        // dropped, the rest are drawn.
        let mut output = ColorRaster::new(60, 60);
        let mask = centered_mask(60, 5, 5);
        let candidates = [Circle::new(5, 5, 20, 12)];

        let accepted = annotate_circles(&mut output, &candidates, &mask, [220, 20, 20]);
        assert_eq!(accepted, 1);
        assert_eq!(output.pixel(5, 25), [220, 20, 20]);
    }

    #[test]
    fn test_zero_candidates_is_zero_count() {
        let mut output = ColorRaster::new(10, 10);
        let mask = BinaryMask::new(10, 10);
        assert_eq!(annotate_circles(&mut output, &[], &mask, [20, 220, 20]), 0);
    }
}
