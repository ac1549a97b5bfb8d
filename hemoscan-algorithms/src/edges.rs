//! Sobel gradient-magnitude edge extraction from binary masks.
//!
//! Convolves the 3x3 Sobel kernel pair with border clamping and scales the
//! Euclidean magnitude into the 8-bit range. The interior of a solid blob
//! has zero gradient, so the output traces blob boundaries.

use hemoscan_core::{BinaryMask, EdgeMap};

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Largest possible magnitude for a {0,255} input: both kernels saturate at
/// 4*255, combined Euclidean length 4*255*sqrt(2).
const MAX_MAGNITUDE: f64 = 4.0 * 255.0 * std::f64::consts::SQRT_2;

/// Computes the Sobel gradient magnitude of a binary mask.
pub fn sobel_edges(mask: &BinaryMask) -> EdgeMap {
    let (width, height) = (mask.width(), mask.height());
    let mut edges = EdgeMap::new(width, height);
    if width == 0 || height == 0 {
        return edges;
    }

    for row in 0..height {
        let row_idx = [row.saturating_sub(1), row, (row + 1).min(height - 1)];
        for col in 0..width {
            let col_idx = [col.saturating_sub(1), col, (col + 1).min(width - 1)];

            let mut sum_x = 0i32;
            let mut sum_y = 0i32;
            for ky in 0..3 {
                for kx in 0..3 {
                    let sample = i32::from(mask.data()[row_idx[ky] * width + col_idx[kx]]);
                    sum_x += sample * SOBEL_KERNEL_X[ky][kx];
                    sum_y += sample * SOBEL_KERNEL_Y[ky][kx];
                }
            }

            if sum_x == 0 && sum_y == 0 {
                continue;
            }
            let magnitude = f64::from(sum_x * sum_x + sum_y * sum_y).sqrt();
            let scaled = (magnitude / MAX_MAGNITUDE * 255.0).round().min(255.0);
            edges.set(row, col, scaled as u8);
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mask_has_no_edges() {
        let edges = sobel_edges(&BinaryMask::new(20, 20));
        assert_eq!(edges.edge_count(), 0);
    }

    #[test]
    fn test_square_blob_edges_trace_boundary() {
        let mut mask = BinaryMask::new(20, 20);
        for row in 5..15 {
            for col in 5..15 {
                mask.set_foreground(row, col);
            }
        }
        let edges = sobel_edges(&mask);

        // Interior is flat, boundary is not.
        assert_eq!(edges.get(10, 10), 0);
        assert!(edges.get(5, 10) > 0);
        assert!(edges.get(10, 14) > 0);
        // Far outside the blob nothing happens.
        assert_eq!(edges.get(1, 1), 0);
    }

    #[test]
    fn test_uniform_foreground_is_flat() {
        let mut mask = BinaryMask::new(10, 10);
        for row in 0..10 {
            for col in 0..10 {
                mask.set_foreground(row, col);
            }
        }
        // Border clamping keeps a uniform mask gradient-free at the borders.
        let edges = sobel_edges(&mask);
        assert_eq!(edges.edge_count(), 0);
    }

    #[test]
    fn test_weakest_step_survives_scaling() {
        // A single corner-touching transition must not round down to zero,
        // otherwise Hough voting would lose faint edges.
        let mut mask = BinaryMask::new(5, 5);
        mask.set_foreground(0, 0);
        let edges = sobel_edges(&mask);
        assert!(edges.get(1, 1) > 0);
    }
}
