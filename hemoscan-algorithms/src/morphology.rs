//! Binary morphology with disk structuring elements.
//!
//! All operators treat pixels outside the image bounds as background
//! (zero padding) and return a mask of the same dimensions. Erosion and
//! dilation iterate over foreground pixels only, so cost scales with mask
//! occupancy rather than image area.

use hemoscan_core::BinaryMask;

/// Offsets of a disk structuring element of the given pixel radius.
///
/// The disk contains every offset with `dr*dr + dc*dc <= radius*radius`;
/// radius 0 degenerates to the single center pixel.
pub fn disk_offsets(radius: usize) -> Vec<(isize, isize)> {
    let r = radius as isize;
    let r2 = r * r;
    let mut offsets = Vec::new();
    for dr in -r..=r {
        for dc in -r..=r {
            if dr * dr + dc * dc <= r2 {
                offsets.push((dr, dc));
            }
        }
    }
    offsets
}

/// Erodes the mask: a pixel stays foreground only if the whole disk
/// neighborhood around it is foreground (out-of-bounds counts as background).
pub fn erode(mask: &BinaryMask, radius: usize) -> BinaryMask {
    let offsets = disk_offsets(radius);
    erode_with(mask, &offsets)
}

fn erode_with(mask: &BinaryMask, offsets: &[(isize, isize)]) -> BinaryMask {
    let mut out = BinaryMask::new(mask.width(), mask.height());
    for (row, col) in mask.foreground_pixels() {
        let survives = offsets.iter().all(|&(dr, dc)| {
            mask.foreground_at(row as isize + dr, col as isize + dc)
                .unwrap_or(false)
        });
        if survives {
            out.set_foreground(row, col);
        }
    }
    out
}

/// Dilates the mask: every pixel within the disk of a foreground pixel
/// becomes foreground. Stamps clip at the image bounds.
pub fn dilate(mask: &BinaryMask, radius: usize) -> BinaryMask {
    let offsets = disk_offsets(radius);
    dilate_with(mask, &offsets)
}

fn dilate_with(mask: &BinaryMask, offsets: &[(isize, isize)]) -> BinaryMask {
    let (width, height) = (mask.width() as isize, mask.height() as isize);
    let mut out = BinaryMask::new(mask.width(), mask.height());
    for (row, col) in mask.foreground_pixels() {
        for &(dr, dc) in offsets {
            let (r, c) = (row as isize + dr, col as isize + dc);
            if r >= 0 && r < height && c >= 0 && c < width {
                out.set_foreground(r as usize, c as usize);
            }
        }
    }
    out
}

/// Morphological opening: erosion then dilation.
///
/// Removes foreground specks smaller than the disk and thin bridges between
/// blobs; never adds foreground pixels.
pub fn open(mask: &BinaryMask, radius: usize) -> BinaryMask {
    let offsets = disk_offsets(radius);
    dilate_with(&erode_with(mask, &offsets), &offsets)
}

/// Morphological closing: dilation then erosion.
///
/// Fills background holes smaller than the disk and merges nearby blobs;
/// never removes foreground pixels.
pub fn close(mask: &BinaryMask, radius: usize) -> BinaryMask {
    let offsets = disk_offsets(radius);
    erode_with(&dilate_with(mask, &offsets), &offsets)
}
