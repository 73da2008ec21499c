//! Filter controls and pipeline application for JavaScript.
//!
//! Wraps the core filter settings in a wasm-bindgen type with per-control
//! accessors, and exposes the pipeline entry points that render those
//! settings onto a `JsRasterImage`.

use photograde_core::{
    apply_pipeline, apply_to_preview_and_export, build_pipeline, reset, FilterSettings, HueBand,
};
use wasm_bindgen::prelude::*;

use crate::types::JsRasterImage;

/// The full set of filter controls for a photo edit.
///
/// All controls default to 0 (no effect). Values outside a control's range
/// are accepted and only coerced when `clamped()` is called or the pipeline
/// compiles them.
///
/// # Example (TypeScript)
/// ```typescript
/// const settings = new JsFilterSettings();
/// settings.exposure = 20;
/// settings.temperature = 15;
/// settings.set_band_sat(5, 40);  // boost the blue band
/// console.log(settings.is_default());  // false
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsFilterSettings {
    inner: FilterSettings,
}

#[wasm_bindgen]
impl JsFilterSettings {
    /// Create settings with every control at its neutral value.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsFilterSettings {
        JsFilterSettings {
            inner: FilterSettings::new(),
        }
    }

    /// Get the exposure control value
    #[wasm_bindgen(getter)]
    pub fn exposure(&self) -> f32 {
        self.inner.exposure
    }

    /// Set the exposure control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_exposure(&mut self, value: f32) {
        self.inner.exposure = value;
    }

    /// Get the brightness control value
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    /// Set the brightness control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    /// Get the contrast control value
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    /// Set the contrast control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    /// Get the highlights control value
    #[wasm_bindgen(getter)]
    pub fn highlights(&self) -> f32 {
        self.inner.highlights
    }

    /// Set the highlights control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_highlights(&mut self, value: f32) {
        self.inner.highlights = value;
    }

    /// Get the shadows control value
    #[wasm_bindgen(getter)]
    pub fn shadows(&self) -> f32 {
        self.inner.shadows
    }

    /// Set the shadows control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_shadows(&mut self, value: f32) {
        self.inner.shadows = value;
    }

    /// Get the white point control value
    #[wasm_bindgen(getter)]
    pub fn whites(&self) -> f32 {
        self.inner.whites
    }

    /// Set the white point control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_whites(&mut self, value: f32) {
        self.inner.whites = value;
    }

    /// Get the black point control value
    #[wasm_bindgen(getter)]
    pub fn blacks(&self) -> f32 {
        self.inner.blacks
    }

    /// Set the black point control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_blacks(&mut self, value: f32) {
        self.inner.blacks = value;
    }

    /// Get the white balance temperature control value
    #[wasm_bindgen(getter)]
    pub fn temperature(&self) -> f32 {
        self.inner.temperature
    }

    /// Set the white balance temperature control value (-100 cool to 100 warm)
    #[wasm_bindgen(setter)]
    pub fn set_temperature(&mut self, value: f32) {
        self.inner.temperature = value;
    }

    /// Get the tint control value
    #[wasm_bindgen(getter)]
    pub fn tint(&self) -> f32 {
        self.inner.tint
    }

    /// Set the tint control value (-100 green to 100 magenta)
    #[wasm_bindgen(setter)]
    pub fn set_tint(&mut self, value: f32) {
        self.inner.tint = value;
    }

    /// Get the vibrance control value
    #[wasm_bindgen(getter)]
    pub fn vibrance(&self) -> f32 {
        self.inner.vibrance
    }

    /// Set the vibrance control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_vibrance(&mut self, value: f32) {
        self.inner.vibrance = value;
    }

    /// Get the saturation control value
    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    /// Set the saturation control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Get the global hue rotation in degrees
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> f32 {
        self.inner.hue
    }

    /// Set the global hue rotation in degrees (-180 to 180)
    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: f32) {
        self.inner.hue = value;
    }

    /// Get the clarity control value
    #[wasm_bindgen(getter)]
    pub fn clarity(&self) -> f32 {
        self.inner.clarity
    }

    /// Set the clarity control value (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_clarity(&mut self, value: f32) {
        self.inner.clarity = value;
    }

    /// Get the sharpness control value
    #[wasm_bindgen(getter)]
    pub fn sharpness(&self) -> f32 {
        self.inner.sharpness
    }

    /// Set the sharpness control value (0 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_sharpness(&mut self, value: f32) {
        self.inner.sharpness = value;
    }

    /// Get the blur control value
    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f32 {
        self.inner.blur
    }

    /// Set the blur control value (0 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: f32) {
        self.inner.blur = value;
    }

    /// Get the vignette control value
    #[wasm_bindgen(getter)]
    pub fn vignette(&self) -> f32 {
        self.inner.vignette
    }

    /// Set the vignette control value (-100 darken to 100 lighten)
    #[wasm_bindgen(setter)]
    pub fn set_vignette(&mut self, value: f32) {
        self.inner.vignette = value;
    }

    /// Get the noise control value
    #[wasm_bindgen(getter)]
    pub fn noise(&self) -> f32 {
        self.inner.noise
    }

    /// Set the noise control value (0 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_noise(&mut self, value: f32) {
        self.inner.noise = value;
    }

    /// Get the film grain control value
    #[wasm_bindgen(getter)]
    pub fn grain(&self) -> f32 {
        self.inner.grain
    }

    /// Set the film grain control value (0 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_grain(&mut self, value: f32) {
        self.inner.grain = value;
    }

    /// Get the fade control value
    #[wasm_bindgen(getter)]
    pub fn fade(&self) -> f32 {
        self.inner.fade
    }

    /// Set the fade control value (0 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_fade(&mut self, value: f32) {
        self.inner.fade = value;
    }

    /// Get a per-band hue shift.
    ///
    /// Bands are indexed 0 through 7: red, orange, yellow, green, cyan,
    /// blue, purple, magenta.
    ///
    /// # Errors
    ///
    /// Returns an error for an index outside 0-7.
    pub fn band_hue(&self, band: u8) -> Result<f32, JsValue> {
        Ok(self.inner.band_hue(band_from_index(band)?))
    }

    /// Set a per-band hue shift (-100 to 100). Bands are indexed as in
    /// `band_hue`.
    pub fn set_band_hue(&mut self, band: u8, value: f32) -> Result<(), JsValue> {
        self.inner.set_band_hue(band_from_index(band)?, value);
        Ok(())
    }

    /// Get a per-band saturation shift. Bands are indexed as in `band_hue`.
    pub fn band_sat(&self, band: u8) -> Result<f32, JsValue> {
        Ok(self.inner.band_sat(band_from_index(band)?))
    }

    /// Set a per-band saturation shift (-100 to 100). Bands are indexed as
    /// in `band_hue`.
    pub fn set_band_sat(&mut self, band: u8, value: f32) -> Result<(), JsValue> {
        self.inner.set_band_sat(band_from_index(band)?, value);
        Ok(())
    }

    /// Check whether every control is at its neutral value.
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Reset every control to its neutral value.
    pub fn reset(&mut self) {
        self.inner = FilterSettings::new();
    }

    /// Return a copy with every control coerced into its valid range.
    pub fn clamped(&self) -> JsFilterSettings {
        JsFilterSettings {
            inner: self.inner.clamped(),
        }
    }

    /// Serialize to a plain JavaScript object with camelCase keys.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JavaScript object.
    ///
    /// Missing keys fall back to neutral, so partial objects are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or a key holds the
    /// wrong type.
    pub fn from_json(value: JsValue) -> Result<JsFilterSettings, JsValue> {
        serde_wasm_bindgen::from_value(value)
            .map(|inner| JsFilterSettings { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for JsFilterSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl JsFilterSettings {
    /// Shared reference to the wrapped settings.
    pub(crate) fn inner(&self) -> &FilterSettings {
        &self.inner
    }
}

fn band_from_index(index: u8) -> Result<HueBand, JsValue> {
    HueBand::from_index(index)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid hue band index: {}", index)))
}

/// Apply the filter pipeline to an image for interactive display.
///
/// Compiles the settings into the fixed-order operation list, renders it
/// against the image's source pixels, and requests a redraw. The image's
/// placement survives unchanged.
///
/// # Arguments
/// * `image` - The image to filter in place
/// * `settings` - The filter controls to apply
///
/// # Errors
///
/// Returns an error if rendering fails; the image's placement is restored
/// even then.
///
/// # Example (TypeScript)
/// ```typescript
/// const image = new JsRasterImage(width, height, rgbaBytes);
/// const settings = new JsFilterSettings();
/// settings.exposure = 20;
/// settings.contrast = 10;
/// apply_filters(image, settings);
///
/// const data = new Uint8ClampedArray(image.pixels());
/// ctx.putImageData(new ImageData(data, image.width, image.height), 0, 0);
/// ```
#[wasm_bindgen]
pub fn apply_filters(
    image: &mut JsRasterImage,
    settings: &JsFilterSettings,
) -> Result<(), JsValue> {
    apply_pipeline(image.inner_mut(), settings.inner(), true)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply the same settings to a preview image and its full-size export copy.
///
/// The preview gets a redraw request; the export copy is rendered silently.
/// Both end up with identical filtering so an export never needs a second
/// pass.
///
/// # Arguments
/// * `preview` - The on-screen image
/// * `export` - The full-resolution copy kept for export
/// * `settings` - The filter controls to apply to both
///
/// # Errors
///
/// Returns an error if rendering either image fails.
#[wasm_bindgen]
pub fn apply_filters_to_both(
    preview: &mut JsRasterImage,
    export: &mut JsRasterImage,
    settings: &JsFilterSettings,
) -> Result<(), JsValue> {
    apply_to_preview_and_export(preview.inner_mut(), export.inner_mut(), settings.inner())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Restore an image to its unfiltered source pixels and request a redraw.
///
/// # Errors
///
/// Returns an error if rendering fails.
#[wasm_bindgen]
pub fn reset_filters(image: &mut JsRasterImage) -> Result<(), JsValue> {
    reset(image.inner_mut()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compile filter settings into the ordered operation list without
/// rendering, for hosts that drive their own filter backend.
///
/// Returns an array of plain objects tagged by `kind`, in application
/// order. Neutral controls contribute no entry, so neutral settings
/// compile to an empty array.
///
/// # Example (TypeScript)
/// ```typescript
/// const settings = new JsFilterSettings();
/// settings.contrast = 20;
/// const ops = compile_operations(settings);
/// console.log(ops);  // [{ kind: 'contrast', amount: 0.2 }]
/// ```
#[wasm_bindgen]
pub fn compile_operations(settings: &JsFilterSettings) -> Result<JsValue, JsValue> {
    let operations = build_pipeline(settings.inner());
    serde_wasm_bindgen::to_value(&operations).map_err(|e| JsValue::from_str(&e.to_string()))
}
