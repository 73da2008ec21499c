//! Raw key/value maps to [`FilterSettings`].
//!
//! One table drives the whole translation. Each row lists the external
//! keys that feed a field (first one present wins, so the modern `*2012`
//! keys shadow their legacy spellings), how to remap the value into this
//! library's range, and where it lands.

use std::collections::HashMap;

use super::ImportError;
use crate::{clamp_control, FilterSettings};

/// How an external value is remapped into a control range.
#[derive(Debug, Clone, Copy)]
enum Conversion {
    /// Exposure stops, -5..+5, scaled onto -100..100.
    Stops,
    /// Color temperature in kelvin, recentered on 5000K daylight.
    Kelvin,
    /// Already on a -100..100 scale, clamped.
    Signed,
    /// Already on a 0..100 scale, clamped.
    Unsigned,
}

fn convert(conversion: Conversion, value: f32) -> f32 {
    match conversion {
        Conversion::Stops => clamp_control(value * 20.0, -100.0, 100.0),
        Conversion::Kelvin => clamp_control((value - 5000.0) / 200.0, -100.0, 100.0),
        Conversion::Signed => clamp_control(value, -100.0, 100.0),
        Conversion::Unsigned => clamp_control(value, 0.0, 100.0),
    }
}

type Setter = fn(&mut FilterSettings, f32);

#[rustfmt::skip]
const FIELD_MAPPINGS: &[(&[&str], Conversion, Setter)] = &[
    (&["Exposure2012", "Exposure"],       Conversion::Stops,    |s, v| s.exposure = v),
    (&["Contrast2012", "Contrast"],       Conversion::Signed,   |s, v| s.contrast = v),
    (&["Highlights2012", "Highlights"],   Conversion::Signed,   |s, v| s.highlights = v),
    (&["Shadows2012", "Shadows"],         Conversion::Signed,   |s, v| s.shadows = v),
    (&["Whites2012", "Whites"],           Conversion::Signed,   |s, v| s.whites = v),
    (&["Blacks2012", "Blacks"],           Conversion::Signed,   |s, v| s.blacks = v),
    (&["Temperature"],                    Conversion::Kelvin,   |s, v| s.temperature = v),
    (&["Tint"],                           Conversion::Signed,   |s, v| s.tint = v),
    (&["Vibrance"],                       Conversion::Signed,   |s, v| s.vibrance = v),
    (&["Saturation"],                     Conversion::Signed,   |s, v| s.saturation = v),
    (&["Clarity2012", "Clarity"],         Conversion::Signed,   |s, v| s.clarity = v),
    (&["Sharpness"],                      Conversion::Unsigned, |s, v| s.sharpness = v),
    (&["GrainAmount"],                    Conversion::Unsigned, |s, v| s.grain = v),
    (&["PostCropVignetteAmount"],         Conversion::Signed,   |s, v| s.vignette = v),
    // Per-band hue shifts. Lightroom calls the cyan band "aqua".
    (&["HueAdjustmentRed"],               Conversion::Signed,   |s, v| s.hue_red = v),
    (&["HueAdjustmentOrange"],            Conversion::Signed,   |s, v| s.hue_orange = v),
    (&["HueAdjustmentYellow"],            Conversion::Signed,   |s, v| s.hue_yellow = v),
    (&["HueAdjustmentGreen"],             Conversion::Signed,   |s, v| s.hue_green = v),
    (&["HueAdjustmentAqua", "HueAdjustmentCyan"], Conversion::Signed, |s, v| s.hue_cyan = v),
    (&["HueAdjustmentBlue"],              Conversion::Signed,   |s, v| s.hue_blue = v),
    (&["HueAdjustmentPurple"],            Conversion::Signed,   |s, v| s.hue_purple = v),
    (&["HueAdjustmentMagenta"],           Conversion::Signed,   |s, v| s.hue_magenta = v),
    // Per-band saturation.
    (&["SaturationAdjustmentRed"],        Conversion::Signed,   |s, v| s.sat_red = v),
    (&["SaturationAdjustmentOrange"],     Conversion::Signed,   |s, v| s.sat_orange = v),
    (&["SaturationAdjustmentYellow"],     Conversion::Signed,   |s, v| s.sat_yellow = v),
    (&["SaturationAdjustmentGreen"],      Conversion::Signed,   |s, v| s.sat_green = v),
    (&["SaturationAdjustmentAqua", "SaturationAdjustmentCyan"], Conversion::Signed, |s, v| s.sat_cyan = v),
    (&["SaturationAdjustmentBlue"],       Conversion::Signed,   |s, v| s.sat_blue = v),
    (&["SaturationAdjustmentPurple"],     Conversion::Signed,   |s, v| s.sat_purple = v),
    (&["SaturationAdjustmentMagenta"],    Conversion::Signed,   |s, v| s.sat_magenta = v),
];

/// Map a raw import map onto [`FilterSettings`].
///
/// Unrecognized keys are ignored. Fails only when not a single key was
/// recognized; a recognized key with value zero still counts.
pub(crate) fn map_raw_values(raw: &HashMap<String, f32>) -> Result<FilterSettings, ImportError> {
    let mut settings = FilterSettings::new();
    let mut applied = 0usize;

    for (aliases, conversion, set) in FIELD_MAPPINGS {
        if let Some(value) = pick(raw, aliases) {
            set(&mut settings, convert(*conversion, value));
            applied += 1;
        }
    }

    if applied == 0 {
        return Err(ImportError::NoRecognizedFields);
    }
    Ok(settings)
}

/// First alias present in the raw map.
fn pick(raw: &HashMap<String, f32>, aliases: &[&str]) -> Option<f32> {
    aliases.iter().find_map(|key| raw.get(*key).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, f32)]) -> HashMap<String, f32> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    // ===== Conversion Tests =====

    #[test]
    fn test_exposure_stops_scale() {
        let settings = map_raw_values(&raw(&[("Exposure2012", 1.0)])).unwrap();
        assert_eq!(settings.exposure, 20.0);

        let settings = map_raw_values(&raw(&[("Exposure2012", -2.5)])).unwrap();
        assert_eq!(settings.exposure, -50.0);

        // Beyond +-5 stops clamps.
        let settings = map_raw_values(&raw(&[("Exposure2012", 7.0)])).unwrap();
        assert_eq!(settings.exposure, 100.0);
    }

    #[test]
    fn test_temperature_kelvin_scale() {
        let settings = map_raw_values(&raw(&[("Temperature", 5000.0)])).unwrap();
        assert_eq!(settings.temperature, 0.0);

        let settings = map_raw_values(&raw(&[("Temperature", 6500.0)])).unwrap();
        assert_eq!(settings.temperature, 7.5);

        let settings = map_raw_values(&raw(&[("Temperature", 2000.0)])).unwrap();
        assert_eq!(settings.temperature, -15.0);

        let settings = map_raw_values(&raw(&[("Temperature", 50000.0)])).unwrap();
        assert_eq!(settings.temperature, 100.0);
    }

    #[test]
    fn test_signed_fields_clamp() {
        let settings = map_raw_values(&raw(&[("Contrast", 250.0)])).unwrap();
        assert_eq!(settings.contrast, 100.0);

        let settings = map_raw_values(&raw(&[("Tint", -250.0)])).unwrap();
        assert_eq!(settings.tint, -100.0);
    }

    #[test]
    fn test_unsigned_fields_clamp_at_zero() {
        let settings = map_raw_values(&raw(&[("Sharpness", -10.0)])).unwrap();
        assert_eq!(settings.sharpness, 0.0);

        let settings = map_raw_values(&raw(&[("GrainAmount", 150.0)])).unwrap();
        assert_eq!(settings.grain, 100.0);
    }

    // ===== Alias Tests =====

    #[test]
    fn test_modern_key_shadows_legacy() {
        let settings =
            map_raw_values(&raw(&[("Exposure2012", 1.0), ("Exposure", 5.0)])).unwrap();
        assert_eq!(settings.exposure, 20.0);

        let settings =
            map_raw_values(&raw(&[("Clarity2012", 30.0), ("Clarity", 90.0)])).unwrap();
        assert_eq!(settings.clarity, 30.0);
    }

    #[test]
    fn test_legacy_key_alone_applies() {
        let settings = map_raw_values(&raw(&[("Exposure", 2.0)])).unwrap();
        assert_eq!(settings.exposure, 40.0);
    }

    #[test]
    fn test_aqua_shadows_cyan() {
        let settings = map_raw_values(&raw(&[
            ("HueAdjustmentAqua", 15.0),
            ("HueAdjustmentCyan", 90.0),
        ]))
        .unwrap();
        assert_eq!(settings.hue_cyan, 15.0);

        let settings = map_raw_values(&raw(&[("SaturationAdjustmentCyan", -20.0)])).unwrap();
        assert_eq!(settings.sat_cyan, -20.0);
    }

    #[test]
    fn test_all_bands_route_to_their_fields() {
        let settings = map_raw_values(&raw(&[
            ("HueAdjustmentRed", 1.0),
            ("HueAdjustmentOrange", 2.0),
            ("HueAdjustmentYellow", 3.0),
            ("HueAdjustmentGreen", 4.0),
            ("HueAdjustmentAqua", 5.0),
            ("HueAdjustmentBlue", 6.0),
            ("HueAdjustmentPurple", 7.0),
            ("HueAdjustmentMagenta", 8.0),
            ("SaturationAdjustmentRed", -1.0),
            ("SaturationAdjustmentMagenta", -8.0),
        ]))
        .unwrap();
        assert_eq!(settings.hue_red, 1.0);
        assert_eq!(settings.hue_orange, 2.0);
        assert_eq!(settings.hue_yellow, 3.0);
        assert_eq!(settings.hue_green, 4.0);
        assert_eq!(settings.hue_cyan, 5.0);
        assert_eq!(settings.hue_blue, 6.0);
        assert_eq!(settings.hue_purple, 7.0);
        assert_eq!(settings.hue_magenta, 8.0);
        assert_eq!(settings.sat_red, -1.0);
        assert_eq!(settings.sat_magenta, -8.0);
    }

    // ===== Recognition Tests =====

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let settings = map_raw_values(&raw(&[
            ("Version", 15.0),
            ("ProcessVersion", 11.0),
            ("ShadowTint", 5.0),
            ("Contrast2012", 10.0),
        ]))
        .unwrap();
        assert_eq!(settings.contrast, 10.0);
        assert_eq!(settings.tint, 0.0);
    }

    #[test]
    fn test_zero_value_still_counts_as_recognized() {
        let settings = map_raw_values(&raw(&[("Saturation", 0.0)])).unwrap();
        assert!(settings.is_default());
    }

    #[test]
    fn test_nothing_recognized_is_an_error() {
        assert!(matches!(
            map_raw_values(&raw(&[])),
            Err(ImportError::NoRecognizedFields)
        ));
        assert!(matches!(
            map_raw_values(&raw(&[("Version", 15.0), ("ToneCurveName", 3.0)])),
            Err(ImportError::NoRecognizedFields)
        ));
    }

    #[test]
    fn test_untouched_fields_keep_defaults() {
        let settings = map_raw_values(&raw(&[("Vibrance", 25.0)])).unwrap();
        assert_eq!(settings.vibrance, 25.0);
        assert_eq!(settings.exposure, 0.0);
        assert_eq!(settings.blur, 0.0);
        assert!(!settings.is_default());
    }
}
