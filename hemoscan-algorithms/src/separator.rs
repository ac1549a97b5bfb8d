//! Removal of one object class's footprint from another class's raw mask.
//!
//! Parasite-infected cells are a subset of all cells in the raw red-cell
//! mask. Subtracting a generously dilated parasite footprint keeps the same
//! physical region from being counted under both class labels.

use hemoscan_core::BinaryMask;

use crate::morphology::dilate;

/// Removes the dilated `footprint` from `raw` by pixel-wise set difference.
///
/// The result stays in `{0, 255}`: this is set subtraction, not arithmetic,
/// so it can never underflow. Both masks must share dimensions.
pub fn remove_class_footprint(
    footprint: &BinaryMask,
    raw: &BinaryMask,
    dilation_radius: usize,
) -> BinaryMask {
    let buffer = dilate(footprint, dilation_radius);
    let mut out = raw.clone();
    for (row, col) in buffer.foreground_pixels() {
        out.set_background(row, col);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::disk_offsets;

    fn disk_mask(size: usize, row: usize, col: usize, radius: usize) -> BinaryMask {
        let mut mask = BinaryMask::new(size, size);
        for (dr, dc) in disk_offsets(radius) {
            let (r, c) = (row as isize + dr, col as isize + dc);
            if r >= 0 && c >= 0 && (r as usize) < size && (c as usize) < size {
                mask.set_foreground(r as usize, c as usize);
            }
        }
        mask
    }

    #[test]
    fn test_no_dilated_footprint_pixel_survives() {
        let footprint = disk_mask(80, 30, 30, 8);
        let raw = disk_mask(80, 35, 35, 20);

        let separated = remove_class_footprint(&footprint, &raw, 5);
        let buffer = dilate(&footprint, 5);
        for (row, col) in buffer.foreground_pixels() {
            assert!(!separated.is_foreground(row, col));
        }
    }

    #[test]
    fn test_distant_foreground_is_untouched() {
        let footprint = disk_mask(100, 20, 20, 5);
        let raw = disk_mask(100, 75, 75, 10);

        let separated = remove_class_footprint(&footprint, &raw, 5);
        assert_eq!(separated, raw);
    }

    #[test]
    fn test_result_stays_binary() {
        let footprint = disk_mask(60, 30, 30, 10);
        let raw = disk_mask(60, 30, 30, 15);

        let separated = remove_class_footprint(&footprint, &raw, 20);
        assert!(separated.data().iter().all(|&v| v == 0 || v == 255));
        // Footprint dilated past the raw blob: nothing remains.
        assert_eq!(separated.foreground_count(), 0);
    }

    #[test]
    fn test_empty_footprint_is_identity() {
        let raw = disk_mask(50, 25, 25, 12);
        let separated = remove_class_footprint(&BinaryMask::new(50, 50), &raw, 20);
        assert_eq!(separated, raw);
    }
}
