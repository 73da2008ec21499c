//! WASM-compatible wrapper types for raster images.
//!
//! This module provides the JavaScript-friendly image handle that the
//! filter pipeline operates on, wrapping the core software raster and
//! handling conversion between Rust and JavaScript data representations.

use photograde_core::{Placement, Raster, SoftwareRaster};
use wasm_bindgen::prelude::*;

/// A filterable RGBA image for JavaScript.
///
/// The image keeps two pixel buffers in WASM memory: the untouched source
/// and the current filtered output. Applying a pipeline always starts
/// from the source, so repeated applications never accumulate.
///
/// # Memory Management
///
/// Pixel data lives in WASM memory. `pixels()` and `source_pixels()` copy
/// it out to a JavaScript `Uint8Array`; for large images keep the handle
/// in WASM memory and only extract pixels when needed.
///
/// The `free()` method can be called to explicitly release WASM memory,
/// but this is optional as wasm-bindgen's finalizer will handle cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: SoftwareRaster,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new image from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the buffer length
    /// does not equal `width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRasterImage, JsValue> {
        SoftwareRaster::new(width, height, pixels)
            .map(|inner| JsRasterImage { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// How many redraws the pipeline has requested for this image.
    ///
    /// Only ever incremented for preview images; export copies stay at 0.
    #[wasm_bindgen(getter)]
    pub fn redraw_requests(&self) -> u32 {
        self.inner.redraw_requests()
    }

    /// Returns the current (filtered) RGBA pixel data as a Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns the untouched source RGBA pixel data as a Uint8Array.
    pub fn source_pixels(&self) -> Vec<u8> {
        self.inner.source_pixels().to_vec()
    }

    /// Get the image's geometric placement as a plain object
    /// `{left, top, scaleX, scaleY, originX, originY, width, height}`.
    pub fn placement(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.placement())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set the image's geometric placement from a plain object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not match the placement shape.
    pub fn set_placement(&mut self, value: JsValue) -> Result<(), JsValue> {
        let placement: Placement = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid placement: {}", e)))?;
        self.inner.set_placement(placement);
        Ok(())
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this to immediately release a large image.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    /// Shared reference to the wrapped raster.
    pub(crate) fn inner(&self) -> &SoftwareRaster {
        &self.inner
    }

    /// Mutable reference to the wrapped raster, for the pipeline bindings.
    pub(crate) fn inner_mut(&mut self) -> &mut SoftwareRaster {
        &mut self.inner
    }
}
