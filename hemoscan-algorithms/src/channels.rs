//! Channel preparation: HSV decomposition, histogram equalization, and
//! threshold binarization.
//!
//! The parasite class thresholds the equalized hue channel (the infected
//! cells form a distinct hue cluster that equalization pushes to the top of
//! the range); the red-cell class thresholds the raw hue channel.

use hemoscan_core::{BinaryMask, ColorRaster, GrayRaster};

/// Hue, saturation, and value channels of an RGB raster, each scaled to
/// the 0-255 range (hue 0-360 degrees maps to 0-255).
#[derive(Debug, Clone)]
pub struct HsvChannels {
    /// Hue channel.
    pub hue: GrayRaster,
    /// Saturation channel.
    pub saturation: GrayRaster,
    /// Value (brightness) channel.
    pub value: GrayRaster,
}

/// Splits an RGB raster into scaled HSV channels.
pub fn hsv_channels(rgb: &ColorRaster) -> HsvChannels {
    let (width, height) = (rgb.width(), rgb.height());
    let mut hue = GrayRaster::new(width, height);
    let mut saturation = GrayRaster::new(width, height);
    let mut value = GrayRaster::new(width, height);

    for row in 0..height {
        for col in 0..width {
            let [r, g, b] = rgb.pixel(row, col);
            let (h, s, v) = rgb_to_hsv(r, g, b);
            hue.set(row, col, scale_unit(h / 360.0));
            saturation.set(row, col, scale_unit(s));
            value.set(row, col, scale_unit(v));
        }
    }

    HsvChannels {
        hue,
        saturation,
        value,
    }
}

/// Converts one RGB sample to (hue in degrees, saturation 0-1, value 0-1).
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (hue, saturation, max)
}

#[inline]
fn scale_unit(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Classic 256-bin CDF histogram equalization.
///
/// The lowest occupied bin maps to 0 and the highest to 255, stretching the
/// channel's contrast over the full range. A constant raster maps to 0.
pub fn equalize_hist(channel: &GrayRaster) -> GrayRaster {
    let total = channel.data().len();
    let mut out = GrayRaster::new(channel.width(), channel.height());
    if total == 0 {
        return out;
    }

    let mut histogram = [0usize; 256];
    for &sample in channel.data() {
        histogram[sample as usize] += 1;
    }

    let mut cdf = [0usize; 256];
    let mut running = 0usize;
    for (bin, &count) in histogram.iter().enumerate() {
        running += count;
        cdf[bin] = running;
    }

    // Smallest nonzero CDF value: the lowest occupied bin.
    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);

    let span = total.saturating_sub(cdf_min);
    let mut lut = [0u8; 256];
    for bin in 0..256 {
        lut[bin] = if span == 0 {
            0
        } else {
            let scaled = cdf[bin].saturating_sub(cdf_min) as f64 / span as f64 * 255.0;
            scaled.round().clamp(0.0, 255.0) as u8
        };
    }

    for row in 0..channel.height() {
        for col in 0..channel.width() {
            out.set(row, col, lut[channel.get(row, col) as usize]);
        }
    }
    out
}

/// Binarizes a channel with a fixed threshold: pixels strictly below the
/// threshold become background, all others foreground.
pub fn binarize(channel: &GrayRaster, threshold: u8) -> BinaryMask {
    let mut mask = BinaryMask::new(channel.width(), channel.height());
    for row in 0..channel.height() {
        for col in 0..channel.width() {
            if channel.get(row, col) >= threshold {
                mask.set_foreground(row, col);
            }
        }
    }
    mask
}
