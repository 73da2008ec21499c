//! Stage compiler: one pure function per slider.
//!
//! Each `compile_*` function maps a single slider value to at most one
//! [`Operation`]. Inputs are coerced into the slider's range first (NaN
//! becomes neutral), and the neutral value compiles to `None` so the
//! pipeline never carries inert stages.
//!
//! The tone mappings are deliberate approximations: highlights, shadows,
//! whites, and blacks nudge a uniform gamma rather than masking by
//! luminance. Preset values are calibrated against these exact formulas,
//! so the coefficients here are contractual.

use crate::ops::Operation;
use crate::HueBand;

/// Coerce a -100..100 slider value, mapping NaN to neutral.
#[inline]
fn signed_input(value: f32) -> f32 {
    crate::clamp_control(value, -100.0, 100.0)
}

/// Coerce a 0..100 slider value, mapping NaN to neutral.
#[inline]
fn strength_input(value: f32) -> f32 {
    crate::clamp_control(value, 0.0, 100.0)
}

// ============================================================================
// Tone
// ============================================================================

/// Exposure as a gamma triple.
///
/// Value 100 compiles to gamma 0.5; value -100 compiles to gamma 2.
pub fn compile_exposure(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    let gamma = if value > 0.0 {
        1.0 - (value / 100.0) * 0.5
    } else {
        1.0 + value.abs() / 100.0
    };
    Some(Operation::Gamma {
        gamma: [gamma, gamma, gamma],
    })
}

/// Brightness as a linear channel offset.
pub fn compile_brightness(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Brightness {
        amount: value / 100.0,
    })
}

/// Contrast around the channel midpoint.
pub fn compile_contrast(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Contrast {
        amount: value / 100.0,
    })
}

/// Highlights as a small uniform gamma nudge on all channels.
pub fn compile_highlights(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    let factor = value / 200.0;
    let gamma = 1.0 - factor * 0.3;
    Some(Operation::Gamma {
        gamma: [gamma, gamma, gamma],
    })
}

/// Shadows as a gamma lift (positive) or crush (negative).
pub fn compile_shadows(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    let factor = value / 100.0;
    let gamma = if factor > 0.0 {
        1.0 + factor * 0.5
    } else {
        1.0 - factor.abs() * 0.3
    };
    Some(Operation::Gamma {
        gamma: [gamma, gamma, gamma],
    })
}

/// White point as a gentle brightness offset.
pub fn compile_whites(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Brightness {
        amount: value / 300.0,
    })
}

/// Black point as a gamma lift (positive, faded look) or crush (negative).
pub fn compile_blacks(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    let factor = value / 100.0;
    let gamma = if factor > 0.0 {
        1.0 - factor * 0.3
    } else {
        1.0 + factor.abs() * 0.5
    };
    Some(Operation::Gamma {
        gamma: [gamma, gamma, gamma],
    })
}

// ============================================================================
// Color
// ============================================================================

/// White balance temperature as a color matrix.
///
/// Positive warms the image (more red, less blue); negative cools it.
#[rustfmt::skip]
pub fn compile_temperature(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    let f = value / 100.0;
    Some(Operation::ColorMatrix {
        matrix: [
            1.0 + f * 0.1, 0.0, 0.0,           0.0, f * 0.05,
            0.0,           1.0, 0.0,           0.0, f * 0.02,
            0.0,           0.0, 1.0 - f * 0.1, 0.0, -f * 0.05,
            0.0,           0.0, 0.0,           1.0, 0.0,
        ],
    })
}

/// Tint as a color matrix. Positive shifts magenta, negative shifts green.
#[rustfmt::skip]
pub fn compile_tint(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    let f = value / 100.0;
    Some(Operation::ColorMatrix {
        matrix: [
            1.0 + f * 0.05, 0.0,                  0.0,            0.0, 0.0,
            0.0,            1.0 - f.abs() * 0.05, 0.0,            0.0, 0.0,
            0.0,            0.0,                  1.0 + f * 0.05, 0.0, 0.0,
            0.0,            0.0,                  0.0,            1.0, 0.0,
        ],
    })
}

/// Vibrance, the saturation variant whose strength follows color spread.
pub fn compile_vibrance(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Vibrance {
        amount: value / 100.0,
    })
}

/// Uniform saturation.
pub fn compile_saturation(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Saturation {
        amount: value / 100.0,
    })
}

/// Global hue rotation. The slider is in degrees, the operation in radians.
pub fn compile_hue(value: f32) -> Option<Operation> {
    let value = crate::clamp_control(value, -180.0, 180.0);
    if value == 0.0 {
        return None;
    }
    Some(Operation::HueRotate {
        radians: value.to_radians(),
    })
}

// ============================================================================
// Per-band HSL
// ============================================================================

/// Per-band HSL adjustment as a color matrix.
///
/// `hue` and `sat` are the band's two sliders, each -100..100. Every band
/// couples the RGB channels in its own fixed pattern, scaled by the band's
/// [`HueBand::scale_factors`]. A band with both sliders neutral compiles
/// to `None` and stays out of the pipeline entirely.
#[rustfmt::skip]
pub fn compile_hue_band(band: HueBand, hue: f32, sat: f32) -> Option<Operation> {
    let hue = signed_input(hue);
    let sat = signed_input(sat);
    if hue == 0.0 && sat == 0.0 {
        return None;
    }
    let (hue_scale, sat_scale) = band.scale_factors();
    let h = hue / 100.0 * hue_scale;
    let s = sat / 100.0 * sat_scale;

    let matrix = match band {
        HueBand::Red => [
            1.0 + s,  h * 0.5,  -h * 0.3, 0.0, 0.0,
            -h * 0.2, 1.0,      h * 0.2,  0.0, 0.0,
            h * 0.3,  -h * 0.2, 1.0,      0.0, 0.0,
            0.0,      0.0,      0.0,      1.0, 0.0,
        ],
        HueBand::Orange => [
            1.0 + s * 0.7, h * 0.3,       0.0, 0.0, 0.0,
            -h * 0.2,      1.0 + s * 0.3, 0.0, 0.0, 0.0,
            0.0,           0.0,           1.0, 0.0, 0.0,
            0.0,           0.0,           0.0, 1.0, 0.0,
        ],
        HueBand::Yellow => [
            1.0 + s * 0.5, h * 0.2,       0.0,           0.0, 0.0,
            h * 0.1,       1.0 + s * 0.5, 0.0,           0.0, 0.0,
            0.0,           0.0,           1.0 - s * 0.2, 0.0, 0.0,
            0.0,           0.0,           0.0,           1.0, 0.0,
        ],
        HueBand::Green => [
            1.0,      -h * 0.3, h * 0.2,  0.0, 0.0,
            h * 0.2,  1.0 + s,  -h * 0.2, 0.0, 0.0,
            -h * 0.1, h * 0.3,  1.0,      0.0, 0.0,
            0.0,      0.0,      0.0,      1.0, 0.0,
        ],
        HueBand::Cyan => [
            1.0 - s * 0.2, 0.0,           0.0,           0.0, 0.0,
            h * 0.1,       1.0 + s * 0.5, h * 0.2,       0.0, 0.0,
            -h * 0.1,      h * 0.2,       1.0 + s * 0.5, 0.0, 0.0,
            0.0,           0.0,           0.0,           1.0, 0.0,
        ],
        HueBand::Blue => [
            1.0,      h * 0.2,  -h * 0.3, 0.0, 0.0,
            -h * 0.2, 1.0,      h * 0.2,  0.0, 0.0,
            h * 0.3,  -h * 0.2, 1.0 + s,  0.0, 0.0,
            0.0,      0.0,      0.0,      1.0, 0.0,
        ],
        HueBand::Purple => [
            1.0 + s * 0.3, 0.0,           h * 0.2,       0.0, 0.0,
            0.0,           1.0 - s * 0.1, 0.0,           0.0, 0.0,
            h * 0.2,       0.0,           1.0 + s * 0.4, 0.0, 0.0,
            0.0,           0.0,           0.0,           1.0, 0.0,
        ],
        HueBand::Magenta => [
            1.0 + s * 0.4, h * 0.1,       h * 0.2,       0.0, 0.0,
            0.0,           1.0 - s * 0.2, 0.0,           0.0, 0.0,
            h * 0.1,       0.0,           1.0 + s * 0.3, 0.0, 0.0,
            0.0,           0.0,           0.0,           1.0, 0.0,
        ],
    };

    Some(Operation::ColorMatrix { matrix })
}

// ============================================================================
// Effects
// ============================================================================

/// Clarity as a small contrast move standing in for local contrast.
pub fn compile_clarity(value: f32) -> Option<Operation> {
    let value = signed_input(value);
    if value == 0.0 {
        return None;
    }
    let factor = value / 100.0;
    Some(Operation::Contrast {
        amount: factor * 0.3,
    })
}

/// Sharpness as a 3x3 unsharp kernel. The kernel always sums to 1.
#[rustfmt::skip]
pub fn compile_sharpness(value: f32) -> Option<Operation> {
    let value = strength_input(value);
    if value == 0.0 {
        return None;
    }
    let amount = value / 100.0;
    Some(Operation::Convolve {
        kernel: [
            0.0,           -amount * 0.5,      0.0,
            -amount * 0.5, 1.0 + amount * 2.0, -amount * 0.5,
            0.0,           -amount * 0.5,      0.0,
        ],
    })
}

/// Blur with magnitude 0..0.5 as a fraction of image size.
pub fn compile_blur(value: f32) -> Option<Operation> {
    let value = strength_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Blur {
        amount: value / 200.0,
    })
}

/// Vignette never reaches the pixel pipeline.
///
/// The control stays in the settings model for the UI and for presets,
/// but its rendering belongs to the canvas overlay layer, so it compiles
/// to no operation here.
pub fn compile_vignette(_value: f32) -> Option<Operation> {
    None
}

/// Digital noise, scaled 0..500.
pub fn compile_noise(value: f32) -> Option<Operation> {
    let value = strength_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Noise {
        amount: value * 5.0,
    })
}

/// Film grain: the same noise primitive at a softer 0..150 scale.
/// Noise and grain may both be present and compose additively.
pub fn compile_grain(value: f32) -> Option<Operation> {
    let value = strength_input(value);
    if value == 0.0 {
        return None;
    }
    Some(Operation::Noise {
        amount: value * 1.5,
    })
}

/// Fade lifts the black point of all three color channels.
#[rustfmt::skip]
pub fn compile_fade(value: f32) -> Option<Operation> {
    let value = strength_input(value);
    if value == 0.0 {
        return None;
    }
    let f = value / 100.0;
    Some(Operation::ColorMatrix {
        matrix: [
            1.0, 0.0, 0.0, 0.0, f * 0.15,
            0.0, 1.0, 0.0, 0.0, f * 0.15,
            0.0, 0.0, 1.0, 0.0, f * 0.15,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Anything a caller could plausibly hand us, including garbage.
    fn any_input() -> impl Strategy<Value = f32> {
        prop_oneof![
            Just(f32::NAN),
            Just(f32::INFINITY),
            Just(f32::NEG_INFINITY),
            -1.0e6f32..1.0e6,
        ]
    }

    fn operation_params_finite(op: &Operation) -> bool {
        match op {
            Operation::Gamma { gamma } => gamma.iter().all(|v| v.is_finite()),
            Operation::Brightness { amount }
            | Operation::Contrast { amount }
            | Operation::Saturation { amount }
            | Operation::Vibrance { amount }
            | Operation::Blur { amount }
            | Operation::Noise { amount } => amount.is_finite(),
            Operation::HueRotate { radians } => radians.is_finite(),
            Operation::ColorMatrix { matrix } => matrix.iter().all(|v| v.is_finite()),
            Operation::Convolve { kernel } => kernel.iter().all(|v| v.is_finite()),
        }
    }

    proptest! {
        /// Property: exposure gamma always lands in [0.5, 2].
        #[test]
        fn prop_exposure_gamma_bounded(value in any_input()) {
            if let Some(Operation::Gamma { gamma }) = compile_exposure(value) {
                for g in gamma {
                    prop_assert!((0.5..=2.0).contains(&g));
                }
            }
        }

        /// Property: nonzero in-range sliders always compile to an operation.
        #[test]
        fn prop_nonzero_signed_input_compiles(value in -100.0f32..=100.0) {
            prop_assume!(value != 0.0);
            prop_assert!(compile_brightness(value).is_some());
            prop_assert!(compile_contrast(value).is_some());
            prop_assert!(compile_temperature(value).is_some());
            prop_assert!(compile_clarity(value).is_some());
        }

        /// Property: band matrices never touch the alpha row.
        #[test]
        fn prop_band_alpha_row_untouched(
            band_index in 0u8..8,
            hue in any_input(),
            sat in any_input(),
        ) {
            let band = HueBand::from_index(band_index).unwrap();
            if let Some(Operation::ColorMatrix { matrix }) = compile_hue_band(band, hue, sat) {
                prop_assert_eq!(&matrix[15..20], [0.0, 0.0, 0.0, 1.0, 0.0].as_slice());
            }
        }

        /// Property: no input, however malformed, panics the compiler or
        /// produces a non-finite operation parameter.
        #[test]
        fn prop_compiler_is_total(value in any_input()) {
            let compiled = [
                compile_exposure(value),
                compile_brightness(value),
                compile_contrast(value),
                compile_highlights(value),
                compile_shadows(value),
                compile_whites(value),
                compile_blacks(value),
                compile_temperature(value),
                compile_tint(value),
                compile_vibrance(value),
                compile_saturation(value),
                compile_hue(value),
                compile_clarity(value),
                compile_sharpness(value),
                compile_blur(value),
                compile_vignette(value),
                compile_noise(value),
                compile_grain(value),
                compile_fade(value),
            ];
            for op in compiled.into_iter().flatten() {
                prop_assert!(operation_params_finite(&op));
            }
        }
    }
}
