//! Photograde WASM - WebAssembly bindings for Photograde
//!
//! This crate provides WASM bindings to expose the photograde-core filter
//! pipeline to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `filters` - Filter controls and pipeline application
//! - `presets` - Built-in preset catalogue and Lightroom preset import
//! - `types` - WASM-compatible wrapper types for raster images
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRasterImage, JsFilterSettings, apply_filters } from '@photograde/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Filter an image from a canvas
//! const data = ctx.getImageData(0, 0, width, height);
//! const image = new JsRasterImage(width, height, new Uint8Array(data.data.buffer));
//! const settings = new JsFilterSettings();
//! settings.exposure = 20;
//! apply_filters(image, settings);
//! ```

use wasm_bindgen::prelude::*;

mod filters;
mod presets;
mod types;

// Re-export public types
pub use filters::{
    apply_filters, apply_filters_to_both, compile_operations, reset_filters, JsFilterSettings,
};
pub use presets::{builtin_presets, import_lightroom_preset, preset_by_id};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Simple function to verify WASM is working
#[wasm_bindgen]
pub fn greet(name: &str) -> String {
    format!("Hello, {}! Photograde WASM is ready.", name)
}
