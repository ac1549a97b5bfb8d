//! Typed raster containers.
//!
//! Masks, edge maps, and color images are deliberately distinct types so a
//! binary mask is never passed where intensity data is expected (and vice
//! versa). All containers are row-major with `u8` samples.

use crate::error::{Error, Result};

/// Foreground value of a [`BinaryMask`].
pub const FOREGROUND: u8 = 255;
/// Background value of a [`BinaryMask`].
pub const BACKGROUND: u8 = 0;

/// Single-channel 8-bit intensity raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayRaster {
    /// Creates a zero-filled raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Creates a raster from an existing buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the buffer length does not equal
    /// `width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::invalid_input(format!(
                "gray buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intensity at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    /// Sets the intensity at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.data[row * self.width + col] = value;
    }

    /// Raw sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Binary raster with every sample in `{0, 255}`.
///
/// Semantically a set of foreground pixel coordinates. Binarization and
/// morphology steps uphold the two-value invariant; no intermediate gray
/// values persist past any step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Creates an all-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![BACKGROUND; width * height],
        }
    }

    /// Mask width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True if `(row, col)` is foreground. Panics out of bounds.
    #[inline]
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.data[row * self.width + col] == FOREGROUND
    }

    /// Foreground test with bounds checking; out-of-bounds reads are `None`.
    #[inline]
    pub fn foreground_at(&self, row: isize, col: isize) -> Option<bool> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.is_foreground(row, col))
    }

    /// Marks `(row, col)` as foreground.
    #[inline]
    pub fn set_foreground(&mut self, row: usize, col: usize) {
        self.data[row * self.width + col] = FOREGROUND;
    }

    /// Marks `(row, col)` as background.
    #[inline]
    pub fn set_background(&mut self, row: usize, col: usize) {
        self.data[row * self.width + col] = BACKGROUND;
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// Iterator over foreground pixel coordinates in row-major order.
    pub fn foreground_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == FOREGROUND)
            .map(move |(idx, _)| (idx / width, idx % width))
    }

    /// Raw sample buffer (every value is 0 or 255).
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Single-channel raster of gradient magnitudes derived from a mask.
///
/// Unlike [`BinaryMask`] the samples are not restricted to `{0, 255}`; any
/// nonzero sample counts as an edge pixel for Hough voting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl EdgeMap {
    /// Creates an edge map with no edges.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Map width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gradient magnitude at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    /// Sets the magnitude at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.data[row * self.width + col] = value;
    }

    /// Iterator over edge pixel coordinates (nonzero magnitude).
    pub fn edge_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(idx, _)| (idx / width, idx % width))
    }

    /// Number of edge pixels.
    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Three-channel interleaved RGB raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ColorRaster {
    /// Creates a black raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Creates a raster from an interleaved RGB buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if the buffer length does not equal
    /// `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height * 3 {
            return Err(Error::invalid_input(format!(
                "rgb buffer length {} does not match {width}x{height}x3",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGB triple at `(row, col)`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let idx = (row * self.width + col) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Sets the RGB triple at `(row, col)`.
    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, rgb: [u8; 3]) {
        let idx = (row * self.width + col) * 3;
        self.data[idx] = rgb[0];
        self.data[idx + 1] = rgb[1];
        self.data[idx + 2] = rgb[2];
    }

    /// Raw interleaved buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the raster, returning the interleaved buffer.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
