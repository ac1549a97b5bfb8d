//! Per-class mask pipeline: binarize, clean, extract edges.

use hemoscan_core::{BinaryMask, ClassConfig, EdgeMap, GrayRaster, MorphOp};

use crate::channels::binarize;
use crate::edges::sobel_edges;
use crate::morphology::{close, open};

/// Cleans one object class's mask and derives its edge map.
///
/// The pipeline binarizes the source channel with the class threshold,
/// applies the configured morphology steps in order, and extracts a Sobel
/// edge map from the final mask. Deterministic; no external state.
#[derive(Debug, Clone)]
pub struct MaskPipeline {
    threshold: u8,
    steps: Vec<(MorphOp, usize)>,
}

impl MaskPipeline {
    /// Builds the pipeline for a class configuration.
    pub fn from_class(config: &ClassConfig) -> Self {
        Self {
            threshold: config.threshold,
            steps: config
                .morph_steps
                .iter()
                .map(|step| (step.op, step.radius))
                .collect(),
        }
    }

    /// Binarizes the channel with the class threshold.
    pub fn binarize(&self, channel: &GrayRaster) -> BinaryMask {
        binarize(channel, self.threshold)
    }

    /// Runs the full pipeline on an intensity channel.
    pub fn run(&self, channel: &GrayRaster) -> (BinaryMask, EdgeMap) {
        self.run_mask(self.binarize(channel))
    }

    /// Runs the morphology steps and edge extraction on an already
    /// binarized mask (used for the red-cell mask after separation).
    pub fn run_mask(&self, raw: BinaryMask) -> (BinaryMask, EdgeMap) {
        let mut mask = raw;
        for &(op, radius) in &self.steps {
            mask = match op {
                MorphOp::Open => open(&mask, radius),
                MorphOp::Close => close(&mask, radius),
            };
        }
        let edges = sobel_edges(&mask);
        (mask, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemoscan_core::MorphStep;

    fn noisy_disk_channel() -> GrayRaster {
        // Bright disk of radius 10 at (20, 20) with speckle noise and a
        // pinhole, on a 48x48 dark background.
        let mut channel = GrayRaster::new(48, 48);
        for row in 0..48usize {
            for col in 0..48usize {
                let dr = row.abs_diff(20);
                let dc = col.abs_diff(20);
                if dr * dr + dc * dc <= 100 {
                    channel.set(row, col, 200);
                }
            }
        }
        channel.set(20, 20, 0); // pinhole
        channel.set(2, 40, 220); // speck
        channel.set(40, 2, 220); // speck
        channel
    }

    #[test]
    fn test_pipeline_cleans_and_extracts_edges() {
        let config = ClassConfig {
            threshold: 128,
            morph_steps: vec![
                MorphStep::new(MorphOp::Open, 2),
                MorphStep::new(MorphOp::Close, 4),
            ],
            ..ClassConfig::parasite_defaults()
        };
        let pipeline = MaskPipeline::from_class(&config);
        let (mask, edges) = pipeline.run(&noisy_disk_channel());

        // Specks removed by opening, pinhole filled by closing.
        assert!(!mask.is_foreground(2, 40));
        assert!(!mask.is_foreground(40, 2));
        assert!(mask.is_foreground(20, 20));

        // Mask stays strictly two-valued.
        assert!(mask.data().iter().all(|&v| v == 0 || v == 255));

        // Edge map traces the blob boundary, not its interior.
        assert_eq!(edges.get(20, 20), 0);
        assert!(edges.edge_count() > 0);
    }

    #[test]
    fn test_empty_channel_yields_empty_outputs() {
        let pipeline = MaskPipeline::from_class(&ClassConfig::parasite_defaults());
        let (mask, edges) = pipeline.run(&GrayRaster::new(32, 32));
        assert_eq!(mask.foreground_count(), 0);
        assert_eq!(edges.edge_count(), 0);
    }
}
