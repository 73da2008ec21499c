//! Pure-CPU raster executor over RGBA buffers.

use image::RgbaImage;

use super::{primitives, OriginX, OriginY, Placement, Raster, RasterError};
use crate::ops::Operation;

/// CPU-backed raster image with scene placement.
///
/// Keeps the unfiltered source alongside the current pixels: every
/// [`Raster::apply_operations`] call re-renders from the source, so
/// repeated applications of the same list never accumulate.
#[derive(Debug, Clone)]
pub struct SoftwareRaster {
    width: u32,
    height: u32,
    /// Pristine pixels, untouched by any operation.
    source: Vec<u8>,
    /// Result of the most recent application.
    current: Vec<u8>,
    placement: Placement,
    bounds: Bounds,
    redraw_requests: u32,
}

/// Axis-aligned bounding box derived from a placement, in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    fn from_placement(placement: &Placement) -> Self {
        let width = placement.width * placement.scale_x;
        let height = placement.height * placement.scale_y;
        let left = placement.left
            - match placement.origin_x {
                OriginX::Left => 0.0,
                OriginX::Center => width / 2.0,
                OriginX::Right => width,
            };
        let top = placement.top
            - match placement.origin_y {
                OriginY::Top => 0.0,
                OriginY::Center => height / 2.0,
                OriginY::Bottom => height,
            };
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl SoftwareRaster {
    /// Create a raster from raw RGBA pixels (4 bytes per pixel, row-major).
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyImage);
        }
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        let placement = Placement::at_origin(width as f32, height as f32);
        Ok(Self {
            width,
            height,
            current: pixels.clone(),
            source: pixels,
            bounds: Bounds::from_placement(&placement),
            placement,
            redraw_requests: 0,
        })
    }

    /// Create a raster from an image::RgbaImage.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self, RasterError> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    /// Convert the current pixels to an image::RgbaImage.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.current.clone())
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current (filtered) pixels, RGBA row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.current
    }

    /// Unfiltered source pixels, RGBA row-major.
    pub fn source_pixels(&self) -> &[u8] {
        &self.source
    }

    /// Bounding box as of the last [`Raster::update_coords`].
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// How many redraw requests this raster has received.
    pub fn redraw_requests(&self) -> u32 {
        self.redraw_requests
    }
}

impl Raster for SoftwareRaster {
    fn placement(&self) -> Placement {
        self.placement
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    fn apply_operations(&mut self, operations: &[Operation]) -> Result<(), RasterError> {
        self.current.copy_from_slice(&self.source);
        for operation in operations {
            primitives::apply_operation(&mut self.current, self.width, self.height, operation);
        }
        // Re-rasterizing resets the declared geometry to the buffer's
        // natural size. The pipeline snapshots and restores around this.
        self.placement = Placement::at_origin(self.width as f32, self.height as f32);
        Ok(())
    }

    fn update_coords(&mut self) {
        self.bounds = Bounds::from_placement(&self.placement);
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 40 } else { 215 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        pixels
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            SoftwareRaster::new(0, 10, vec![]),
            Err(RasterError::EmptyImage)
        ));
        assert!(matches!(
            SoftwareRaster::new(10, 0, vec![]),
            Err(RasterError::EmptyImage)
        ));
    }

    #[test]
    fn test_new_rejects_wrong_buffer_size() {
        let err = SoftwareRaster::new(2, 2, vec![0u8; 15]).unwrap_err();
        match err {
            RasterError::BufferSizeMismatch {
                width,
                height,
                actual,
            } => {
                assert_eq!(width, 2);
                assert_eq!(height, 2);
                assert_eq!(actual, 15);
            }
            other => panic!("expected buffer size mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_operation_list_restores_source() {
        let mut raster = SoftwareRaster::new(4, 4, checker(4, 4)).unwrap();
        raster
            .apply_operations(&[Operation::Brightness { amount: 0.5 }])
            .unwrap();
        assert_ne!(raster.pixels(), raster.source_pixels());

        raster.apply_operations(&[]).unwrap();
        assert_eq!(raster.pixels(), raster.source_pixels());
    }

    #[test]
    fn test_reapplication_does_not_accumulate() {
        let ops = [Operation::Brightness { amount: 0.2 }];
        let mut raster = SoftwareRaster::new(4, 4, checker(4, 4)).unwrap();

        raster.apply_operations(&ops).unwrap();
        let first = raster.pixels().to_vec();
        raster.apply_operations(&ops).unwrap();
        assert_eq!(raster.pixels(), first.as_slice());
    }

    #[test]
    fn test_operations_apply_in_list_order() {
        // Saturation after a red-boosting matrix sees the boosted red.
        #[rustfmt::skip]
        let boost_red = Operation::ColorMatrix {
            matrix: [
                2.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 1.0, 0.0,
            ],
        };
        let desaturate = Operation::Saturation { amount: -1.0 };

        let pixels = vec![60, 50, 50, 255];
        let mut forward = SoftwareRaster::new(1, 1, pixels.clone()).unwrap();
        forward
            .apply_operations(&[boost_red.clone(), desaturate.clone()])
            .unwrap();
        // Red doubles to 120, then full desaturation flattens to the max.
        assert_eq!(&forward.pixels()[..3], &[120, 120, 120]);

        let mut reverse = SoftwareRaster::new(1, 1, pixels).unwrap();
        reverse.apply_operations(&[desaturate, boost_red]).unwrap();
        // Flatten to 60 first, then the red gain doubles only red.
        assert_eq!(&reverse.pixels()[..3], &[120, 60, 60]);
    }

    #[test]
    fn test_apply_resets_placement_to_natural() {
        let mut raster = SoftwareRaster::new(4, 2, checker(4, 2)).unwrap();
        let mut moved = raster.placement();
        moved.left = 33.0;
        moved.scale_x = 2.0;
        raster.set_placement(moved);

        raster.apply_operations(&[]).unwrap();
        assert_eq!(raster.placement(), Placement::at_origin(4.0, 2.0));
    }

    #[test]
    fn test_update_coords_recomputes_bounds() {
        let mut raster = SoftwareRaster::new(100, 50, vec![0u8; 100 * 50 * 4]).unwrap();
        let placement = Placement {
            left: 10.0,
            top: 20.0,
            scale_x: 2.0,
            scale_y: 2.0,
            origin_x: OriginX::Center,
            origin_y: OriginY::Center,
            width: 100.0,
            height: 50.0,
        };
        raster.set_placement(placement);
        raster.update_coords();

        let bounds = raster.bounds();
        assert_eq!(bounds.width, 200.0);
        assert_eq!(bounds.height, 100.0);
        assert_eq!(bounds.left, -90.0);
        assert_eq!(bounds.top, -30.0);
    }

    #[test]
    fn test_redraw_counter() {
        let mut raster = SoftwareRaster::new(2, 2, vec![0u8; 16]).unwrap();
        assert_eq!(raster.redraw_requests(), 0);
        raster.request_redraw();
        raster.request_redraw();
        assert_eq!(raster.redraw_requests(), 2);
    }

    #[test]
    fn test_rgba_image_interop() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        let raster = SoftwareRaster::from_rgba_image(img).unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);

        let out = raster.to_rgba_image().unwrap();
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.get_pixel(0, 0), &image::Rgba([10, 20, 30, 255]));
    }
}
