//! Executor boundary: raster image handles and the bundled CPU executor.
//!
//! The pipeline drives anything implementing [`Raster`]. [`SoftwareRaster`]
//! is the built-in implementation over plain RGBA buffers; a canvas or GPU
//! host can implement the same contract instead.

mod primitives;
mod software;

pub use software::{Bounds, SoftwareRaster};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ops::Operation;

/// Error types for raster executor operations.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The pixel buffer length does not match the declared dimensions.
    #[error("Pixel buffer of {actual} bytes does not match a {width}x{height} RGBA image")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// The image has no pixels to operate on.
    #[error("Image dimensions must be non-zero")]
    EmptyImage,
}

/// Horizontal anchor for placement coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OriginX {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor for placement coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OriginY {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Geometric placement of an image in the host scene.
///
/// Applying operations must never disturb these values as observed by the
/// caller; the pipeline snapshots and restores them around every
/// application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Horizontal position of the origin anchor.
    pub left: f32,
    /// Vertical position of the origin anchor.
    pub top: f32,
    /// Horizontal scale factor (1 = natural size).
    pub scale_x: f32,
    /// Vertical scale factor (1 = natural size).
    pub scale_y: f32,
    /// Which horizontal edge `left` is measured from.
    pub origin_x: OriginX,
    /// Which vertical edge `top` is measured from.
    pub origin_y: OriginY,
    /// Declared width in scene units.
    pub width: f32,
    /// Declared height in scene units.
    pub height: f32,
}

impl Placement {
    /// Placement at the scene origin with natural size and no scaling.
    pub fn at_origin(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            origin_x: OriginX::default(),
            origin_y: OriginY::default(),
            width,
            height,
        }
    }
}

/// A mutable raster image handle the pipeline can drive.
///
/// Conforming implementations apply operations in list order against the
/// unfiltered source pixels, so repeated applications of the same list
/// never accumulate. Applying may clobber the placement as a side effect
/// of re-rasterizing; callers are expected to snapshot and restore it.
pub trait Raster {
    /// Current geometric placement in the host scene.
    fn placement(&self) -> Placement;

    /// Overwrite the geometric placement.
    fn set_placement(&mut self, placement: Placement);

    /// Replace the current pixels with the unfiltered source transformed
    /// by `operations`, in order. An empty list restores the source.
    fn apply_operations(&mut self, operations: &[Operation]) -> Result<(), RasterError>;

    /// Recompute any cached bounding-box or coordinate state from the
    /// current placement.
    fn update_coords(&mut self);

    /// Ask the host to redraw. Only the preview copy ever receives this.
    fn request_redraw(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_at_origin() {
        let placement = Placement::at_origin(640.0, 480.0);
        assert_eq!(placement.left, 0.0);
        assert_eq!(placement.top, 0.0);
        assert_eq!(placement.scale_x, 1.0);
        assert_eq!(placement.scale_y, 1.0);
        assert_eq!(placement.origin_x, OriginX::Left);
        assert_eq!(placement.origin_y, OriginY::Top);
        assert_eq!(placement.width, 640.0);
        assert_eq!(placement.height, 480.0);
    }

    #[test]
    fn test_raster_error_display() {
        let err = RasterError::BufferSizeMismatch {
            width: 2,
            height: 2,
            actual: 15,
        };
        assert_eq!(
            err.to_string(),
            "Pixel buffer of 15 bytes does not match a 2x2 RGBA image"
        );

        let err = RasterError::EmptyImage;
        assert_eq!(err.to_string(), "Image dimensions must be non-zero");
    }
}
