//! Photograde Core - Filter pipeline library
//!
//! This crate provides the core filter processing functionality for Photograde:
//! the slider-value model, the stage compiler that turns slider values into
//! concrete pixel operations, pipeline assembly and application, a software
//! raster executor, and Lightroom preset import.

pub mod import;
pub mod ops;
pub mod pipeline;
pub mod preset;
pub mod raster;
pub mod stages;

pub use import::{
    import_preset, import_preset_with_format, ImportError, ImportOptions, PresetFormat,
};
pub use ops::Operation;
pub use pipeline::{apply_pipeline, apply_to_preview_and_export, build_pipeline, reset};
pub use preset::{builtin_presets, preset_by_id, NamedPreset};
pub use raster::{OriginX, OriginY, Placement, Raster, RasterError, SoftwareRaster};

/// The full set of filter controls for a photo edit.
///
/// All values default to 0 (no effect). Serialized field names are camelCase
/// to stay compatible with presets saved by the web UI.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSettings {
    /// Exposure (-100 to 100)
    pub exposure: f32,
    /// Brightness (-100 to 100)
    pub brightness: f32,
    /// Contrast (-100 to 100)
    pub contrast: f32,
    /// Highlights (-100 to 100)
    pub highlights: f32,
    /// Shadows (-100 to 100)
    pub shadows: f32,
    /// White point (-100 to 100)
    pub whites: f32,
    /// Black point (-100 to 100)
    pub blacks: f32,

    /// White balance temperature (-100 cool to 100 warm)
    pub temperature: f32,
    /// Tint (-100 green to 100 magenta)
    pub tint: f32,
    /// Vibrance (-100 to 100)
    pub vibrance: f32,
    /// Saturation (-100 to 100)
    pub saturation: f32,
    /// Global hue rotation in degrees (-180 to 180)
    pub hue: f32,

    /// Red band hue shift (-100 to 100)
    pub hue_red: f32,
    /// Orange band hue shift (-100 to 100)
    pub hue_orange: f32,
    /// Yellow band hue shift (-100 to 100)
    pub hue_yellow: f32,
    /// Green band hue shift (-100 to 100)
    pub hue_green: f32,
    /// Cyan band hue shift (-100 to 100)
    pub hue_cyan: f32,
    /// Blue band hue shift (-100 to 100)
    pub hue_blue: f32,
    /// Purple band hue shift (-100 to 100)
    pub hue_purple: f32,
    /// Magenta band hue shift (-100 to 100)
    pub hue_magenta: f32,

    /// Red band saturation shift (-100 to 100)
    pub sat_red: f32,
    /// Orange band saturation shift (-100 to 100)
    pub sat_orange: f32,
    /// Yellow band saturation shift (-100 to 100)
    pub sat_yellow: f32,
    /// Green band saturation shift (-100 to 100)
    pub sat_green: f32,
    /// Cyan band saturation shift (-100 to 100)
    pub sat_cyan: f32,
    /// Blue band saturation shift (-100 to 100)
    pub sat_blue: f32,
    /// Purple band saturation shift (-100 to 100)
    pub sat_purple: f32,
    /// Magenta band saturation shift (-100 to 100)
    pub sat_magenta: f32,

    /// Clarity / local contrast (-100 to 100)
    pub clarity: f32,
    /// Sharpness (0 to 100)
    pub sharpness: f32,
    /// Blur (0 to 100)
    pub blur: f32,
    /// Vignette (-100 darken to 100 lighten); rendered by the overlay layer
    pub vignette: f32,
    /// Digital noise, monochrome (0 to 100)
    pub noise: f32,
    /// Film grain, softer than noise (0 to 100)
    pub grain: f32,
    /// Fade / lifted blacks (0 to 100)
    pub fade: f32,
}

impl FilterSettings {
    /// Create a new FilterSettings with all controls neutral.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all controls are at their neutral values.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy with every control coerced into its valid range.
    ///
    /// NaN becomes 0 (neutral). Out-of-range values clamp to the control's
    /// bounds: hue to [-180, 180], the strength-only effects to [0, 100],
    /// everything else to [-100, 100].
    pub fn clamped(&self) -> Self {
        let mut s = self.clone();
        for field in [
            &mut s.exposure,
            &mut s.brightness,
            &mut s.contrast,
            &mut s.highlights,
            &mut s.shadows,
            &mut s.whites,
            &mut s.blacks,
            &mut s.temperature,
            &mut s.tint,
            &mut s.vibrance,
            &mut s.saturation,
            &mut s.hue_red,
            &mut s.hue_orange,
            &mut s.hue_yellow,
            &mut s.hue_green,
            &mut s.hue_cyan,
            &mut s.hue_blue,
            &mut s.hue_purple,
            &mut s.hue_magenta,
            &mut s.sat_red,
            &mut s.sat_orange,
            &mut s.sat_yellow,
            &mut s.sat_green,
            &mut s.sat_cyan,
            &mut s.sat_blue,
            &mut s.sat_purple,
            &mut s.sat_magenta,
            &mut s.clarity,
            &mut s.vignette,
        ] {
            *field = clamp_control(*field, -100.0, 100.0);
        }
        s.hue = clamp_control(s.hue, -180.0, 180.0);
        for field in [
            &mut s.sharpness,
            &mut s.blur,
            &mut s.noise,
            &mut s.grain,
            &mut s.fade,
        ] {
            *field = clamp_control(*field, 0.0, 100.0);
        }
        s
    }

    /// Get the hue shift for a color band.
    pub fn band_hue(&self, band: HueBand) -> f32 {
        match band {
            HueBand::Red => self.hue_red,
            HueBand::Orange => self.hue_orange,
            HueBand::Yellow => self.hue_yellow,
            HueBand::Green => self.hue_green,
            HueBand::Cyan => self.hue_cyan,
            HueBand::Blue => self.hue_blue,
            HueBand::Purple => self.hue_purple,
            HueBand::Magenta => self.hue_magenta,
        }
    }

    /// Get the saturation shift for a color band.
    pub fn band_sat(&self, band: HueBand) -> f32 {
        match band {
            HueBand::Red => self.sat_red,
            HueBand::Orange => self.sat_orange,
            HueBand::Yellow => self.sat_yellow,
            HueBand::Green => self.sat_green,
            HueBand::Cyan => self.sat_cyan,
            HueBand::Blue => self.sat_blue,
            HueBand::Purple => self.sat_purple,
            HueBand::Magenta => self.sat_magenta,
        }
    }

    /// Set the hue shift for a color band.
    pub fn set_band_hue(&mut self, band: HueBand, value: f32) {
        match band {
            HueBand::Red => self.hue_red = value,
            HueBand::Orange => self.hue_orange = value,
            HueBand::Yellow => self.hue_yellow = value,
            HueBand::Green => self.hue_green = value,
            HueBand::Cyan => self.hue_cyan = value,
            HueBand::Blue => self.hue_blue = value,
            HueBand::Purple => self.hue_purple = value,
            HueBand::Magenta => self.hue_magenta = value,
        }
    }

    /// Set the saturation shift for a color band.
    pub fn set_band_sat(&mut self, band: HueBand, value: f32) {
        match band {
            HueBand::Red => self.sat_red = value,
            HueBand::Orange => self.sat_orange = value,
            HueBand::Yellow => self.sat_yellow = value,
            HueBand::Green => self.sat_green = value,
            HueBand::Cyan => self.sat_cyan = value,
            HueBand::Blue => self.sat_blue = value,
            HueBand::Purple => self.sat_purple = value,
            HueBand::Magenta => self.sat_magenta = value,
        }
    }
}

/// Clamp a control value into range, treating NaN as neutral.
#[inline]
pub(crate) fn clamp_control(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}

/// One of the eight color bands with per-band hue and saturation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HueBand {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Magenta,
}

impl HueBand {
    /// All bands in pipeline application order.
    pub const ALL: [HueBand; 8] = [
        HueBand::Red,
        HueBand::Orange,
        HueBand::Yellow,
        HueBand::Green,
        HueBand::Cyan,
        HueBand::Blue,
        HueBand::Purple,
        HueBand::Magenta,
    ];

    /// Band for a 0-based index in pipeline order.
    pub fn from_index(index: u8) -> Option<HueBand> {
        Self::ALL.get(index as usize).copied()
    }

    /// Per-band (hue, saturation) input scale factors.
    ///
    /// The red, green, and blue primaries cover wide hue ranges and get the
    /// stronger scales; the in-between bands (cyan included) get the gentler
    /// ones.
    pub fn scale_factors(self) -> (f32, f32) {
        match self {
            HueBand::Red | HueBand::Green | HueBand::Blue => (0.2, 0.3),
            HueBand::Orange
            | HueBand::Yellow
            | HueBand::Cyan
            | HueBand::Purple
            | HueBand::Magenta => (0.15, 0.25),
        }
    }
}
