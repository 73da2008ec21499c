//! Pipeline assembly and application.
//!
//! [`build_pipeline`] compiles a [`FilterSettings`] into the ordered
//! operation list; [`apply_pipeline`] drives a [`Raster`] with it while
//! guarding the image's geometry. Stage order is fixed: tone, then global
//! color, then per-band HSL, then finishing effects. Later stages see the
//! output of earlier ones, so reordering changes the rendered result.

use crate::ops::Operation;
use crate::raster::{Raster, RasterError};
use crate::stages;
use crate::{FilterSettings, HueBand};

/// Compile and assemble the ordered operation list for `settings`.
///
/// Neutral stages are omitted entirely rather than included as identity
/// operations, so all-neutral settings produce an empty list.
pub fn build_pipeline(settings: &FilterSettings) -> Vec<Operation> {
    let mut operations = Vec::new();

    // Tone
    operations.extend(stages::compile_exposure(settings.exposure));
    operations.extend(stages::compile_shadows(settings.shadows));
    operations.extend(stages::compile_highlights(settings.highlights));
    operations.extend(stages::compile_whites(settings.whites));
    operations.extend(stages::compile_blacks(settings.blacks));
    operations.extend(stages::compile_brightness(settings.brightness));
    operations.extend(stages::compile_contrast(settings.contrast));

    // Global color
    operations.extend(stages::compile_temperature(settings.temperature));
    operations.extend(stages::compile_tint(settings.tint));
    operations.extend(stages::compile_vibrance(settings.vibrance));
    operations.extend(stages::compile_saturation(settings.saturation));
    operations.extend(stages::compile_hue(settings.hue));

    // Per-band HSL, red through magenta
    for band in HueBand::ALL {
        operations.extend(stages::compile_hue_band(
            band,
            settings.band_hue(band),
            settings.band_sat(band),
        ));
    }

    // Finishing effects. Vignette stays in the list of stages even though
    // it compiles to nothing here; the overlay layer renders it.
    operations.extend(stages::compile_clarity(settings.clarity));
    operations.extend(stages::compile_fade(settings.fade));
    operations.extend(stages::compile_sharpness(settings.sharpness));
    operations.extend(stages::compile_blur(settings.blur));
    operations.extend(stages::compile_vignette(settings.vignette));
    operations.extend(stages::compile_noise(settings.noise));
    operations.extend(stages::compile_grain(settings.grain));

    operations
}

/// Apply `settings` to an image, preserving its geometric placement.
///
/// The placement is snapshotted before the operations run and restored
/// afterward, then cached coordinates are recomputed. Restoration happens
/// even when an operation fails, so a partial failure never leaves the
/// image misplaced. A zero scale factor is treated as unset and comes
/// back as 1.
///
/// `redraw` asks the host to re-render afterward; pass `false` for an
/// off-screen export copy.
pub fn apply_pipeline<R: Raster>(
    image: &mut R,
    settings: &FilterSettings,
    redraw: bool,
) -> Result<(), RasterError> {
    let mut snapshot = image.placement();
    if snapshot.scale_x == 0.0 {
        snapshot.scale_x = 1.0;
    }
    if snapshot.scale_y == 0.0 {
        snapshot.scale_y = 1.0;
    }

    let operations = build_pipeline(settings);
    let result = image.apply_operations(&operations);

    image.set_placement(snapshot);
    image.update_coords();

    if redraw {
        image.request_redraw();
    }
    result
}

/// Apply the same settings to the on-screen preview and the off-screen
/// export copy, in that order.
///
/// Only the preview is asked to redraw. Both images end up with identical
/// pixels for identical sources, noise included.
pub fn apply_to_preview_and_export<R: Raster>(
    preview: &mut R,
    export: &mut R,
    settings: &FilterSettings,
) -> Result<(), RasterError> {
    apply_pipeline(preview, settings, true)?;
    apply_pipeline(export, settings, false)
}

/// Restore an image to its unfiltered state.
///
/// Defined as applying the all-neutral settings, which compile to an
/// empty operation list.
pub fn reset<R: Raster>(image: &mut R) -> Result<(), RasterError> {
    apply_pipeline(image, &FilterSettings::default(), true)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::raster::SoftwareRaster;
    use proptest::prelude::*;

    fn settings_strategy() -> impl Strategy<Value = FilterSettings> {
        (
            -100.0f32..=100.0,
            -100.0f32..=100.0,
            -100.0f32..=100.0,
            -180.0f32..=180.0,
            -100.0f32..=100.0,
            -100.0f32..=100.0,
            0.0f32..=100.0,
            0.0f32..=100.0,
        )
            .prop_map(
                |(exposure, contrast, temperature, hue, sat_blue, clarity, blur, grain)| {
                    FilterSettings {
                        exposure,
                        contrast,
                        temperature,
                        hue,
                        sat_blue,
                        clarity,
                        blur,
                        grain,
                        ..Default::default()
                    }
                },
            )
    }

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 31 % 256) as u8,
                    (y * 57 % 256) as u8,
                    ((x + y) * 13 % 256) as u8,
                    255,
                ]);
            }
        }
        pixels
    }

    proptest! {
        /// Property: the pipeline never exceeds one operation per stage.
        #[test]
        fn prop_pipeline_is_bounded(settings in settings_strategy()) {
            prop_assert!(build_pipeline(&settings).len() <= 26);
        }

        /// Property: applying then resetting restores the source exactly.
        #[test]
        fn prop_apply_then_reset_round_trips(settings in settings_strategy()) {
            let mut image = SoftwareRaster::new(8, 8, gradient(8, 8)).unwrap();
            apply_pipeline(&mut image, &settings, false).unwrap();
            reset(&mut image).unwrap();
            prop_assert_eq!(image.pixels(), image.source_pixels());
        }

        /// Property: placement survives any settings, byte for byte.
        #[test]
        fn prop_placement_always_preserved(
            settings in settings_strategy(),
            left in -1000.0f32..1000.0,
            top in -1000.0f32..1000.0,
            scale in 0.1f32..8.0,
        ) {
            let mut image = SoftwareRaster::new(8, 8, gradient(8, 8)).unwrap();
            let mut placement = image.placement();
            placement.left = left;
            placement.top = top;
            placement.scale_x = scale;
            placement.scale_y = scale;
            image.set_placement(placement);

            apply_pipeline(&mut image, &settings, false).unwrap();
            prop_assert_eq!(image.placement(), placement);
        }

        /// Property: two independent copies always render identically.
        #[test]
        fn prop_copies_render_identically(settings in settings_strategy()) {
            let mut preview = SoftwareRaster::new(8, 8, gradient(8, 8)).unwrap();
            let mut export = SoftwareRaster::new(8, 8, gradient(8, 8)).unwrap();
            apply_to_preview_and_export(&mut preview, &mut export, &settings).unwrap();
            prop_assert_eq!(preview.pixels(), export.pixels());
        }
    }
}
