//! Named presets and the built-in look catalogue.
//!
//! A preset is a snapshot of a complete [`FilterSettings`]: selecting one
//! replaces the current settings wholesale rather than layering on top of
//! them. Presets own their settings by value, so editing the active
//! settings after applying a preset never mutates the catalogue.

use serde::{Deserialize, Serialize};

use crate::FilterSettings;

/// A named, user-facing bundle of filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedPreset {
    /// Stable identifier, unique within a collection.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Single-glyph icon shown next to the name.
    pub icon: String,
    /// One-line description.
    pub description: String,
    /// The settings this preset applies.
    pub filters: FilterSettings,
}

fn preset(
    id: &str,
    name: &str,
    icon: &str,
    description: &str,
    filters: FilterSettings,
) -> NamedPreset {
    NamedPreset {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        filters,
    }
}

/// The built-in looks, in display order. The first entry is the neutral
/// "Original" look with every control at zero.
pub fn builtin_presets() -> Vec<NamedPreset> {
    vec![
        preset(
            "original",
            "Original",
            "📷",
            "The unedited image",
            FilterSettings::new(),
        ),
        preset(
            "vivid",
            "Vivid",
            "🌈",
            "Punchy, saturated color",
            FilterSettings {
                exposure: 5.0,
                contrast: 15.0,
                vibrance: 35.0,
                saturation: 20.0,
                clarity: 10.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "warm",
            "Warm",
            "🌅",
            "Golden-hour warmth",
            FilterSettings {
                exposure: 5.0,
                temperature: 40.0,
                tint: 10.0,
                vibrance: 15.0,
                saturation: 10.0,
                highlights: -10.0,
                shadows: 15.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "cool",
            "Cool",
            "❄️",
            "Crisp, cool tones",
            FilterSettings {
                temperature: -35.0,
                tint: -5.0,
                contrast: 10.0,
                vibrance: 10.0,
                highlights: 5.0,
                clarity: 5.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "vintage",
            "Vintage",
            "📻",
            "Faded retro film",
            FilterSettings {
                exposure: 5.0,
                contrast: -10.0,
                saturation: -25.0,
                temperature: 15.0,
                fade: 30.0,
                grain: 20.0,
                vignette: -25.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "dramatic",
            "Dramatic",
            "🎭",
            "High contrast and presence",
            FilterSettings {
                exposure: -5.0,
                contrast: 45.0,
                highlights: -20.0,
                shadows: 25.0,
                clarity: 30.0,
                vibrance: 15.0,
                vignette: -30.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "soft",
            "Soft",
            "🌸",
            "Gentle, dreamy light",
            FilterSettings {
                exposure: 10.0,
                contrast: -20.0,
                highlights: -15.0,
                shadows: 20.0,
                saturation: -15.0,
                clarity: -20.0,
                fade: 15.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "bw",
            "B&W",
            "🖤",
            "Classic black and white",
            FilterSettings {
                saturation: -100.0,
                contrast: 25.0,
                clarity: 15.0,
                grain: 10.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "cinematic",
            "Cinema",
            "🎬",
            "Muted film grade",
            FilterSettings {
                contrast: 20.0,
                temperature: -10.0,
                tint: 5.0,
                highlights: -15.0,
                shadows: 10.0,
                saturation: -10.0,
                fade: 10.0,
                vignette: -35.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "portrait",
            "Portrait",
            "👤",
            "Tuned for skin and faces",
            FilterSettings {
                exposure: 5.0,
                contrast: 5.0,
                highlights: -10.0,
                shadows: 15.0,
                temperature: 10.0,
                vibrance: 10.0,
                clarity: -10.0,
                sharpness: 20.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "landscape",
            "Landscape",
            "🏔️",
            "Tuned for scenery",
            FilterSettings {
                exposure: 5.0,
                contrast: 15.0,
                highlights: -20.0,
                shadows: 30.0,
                vibrance: 25.0,
                clarity: 25.0,
                sharpness: 15.0,
                ..FilterSettings::new()
            },
        ),
        preset(
            "moody",
            "Moody",
            "🌙",
            "Dark and atmospheric",
            FilterSettings {
                exposure: -15.0,
                contrast: 20.0,
                highlights: -30.0,
                shadows: -10.0,
                temperature: -15.0,
                saturation: -20.0,
                clarity: 15.0,
                vignette: -40.0,
                ..FilterSettings::new()
            },
        ),
    ]
}

/// Look up a built-in preset by its identifier.
pub fn preset_by_id(id: &str) -> Option<NamedPreset> {
    builtin_presets().into_iter().find(|preset| preset.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_starts_with_neutral_original() {
        let presets = builtin_presets();
        assert_eq!(presets.len(), 12);
        assert_eq!(presets[0].id, "original");
        assert!(presets[0].filters.is_default());
    }

    #[test]
    fn test_ids_are_unique() {
        let presets = builtin_presets();
        for (i, a) in presets.iter().enumerate() {
            for b in &presets[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_every_look_except_original_changes_something() {
        for preset in builtin_presets().iter().skip(1) {
            assert!(!preset.filters.is_default(), "{} is a no-op", preset.id);
        }
    }

    #[test]
    fn test_all_values_already_in_range() {
        for preset in builtin_presets() {
            assert_eq!(preset.filters.clamped(), preset.filters, "{}", preset.id);
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let vivid = preset_by_id("vivid").unwrap();
        assert_eq!(vivid.name, "Vivid");
        assert_eq!(vivid.filters.vibrance, 35.0);
        assert_eq!(vivid.filters.saturation, 20.0);

        let bw = preset_by_id("bw").unwrap();
        assert_eq!(bw.name, "B&W");
        assert_eq!(bw.filters.saturation, -100.0);

        assert!(preset_by_id("no-such-look").is_none());
    }

    #[test]
    fn test_presets_are_value_copies() {
        let mut first = preset_by_id("warm").unwrap();
        first.filters.temperature = 0.0;
        let second = preset_by_id("warm").unwrap();
        assert_eq!(second.filters.temperature, 40.0);
    }
}
