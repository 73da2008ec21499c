//! CPU implementations of the primitive pixel operations.
//!
//! All functions work on tightly packed RGBA buffers in row-major order.
//! Channel write-back rounds and clamps to 0..255 except where noted.

use crate::ops::Operation;

/// Fixed seed for the noise generator. Reseeding on every application keeps
/// two rasters fed the same operation list pixel-identical.
const NOISE_SEED: u64 = 1234567890;

/// Run one operation over the buffer in place. Convolution and blur read
/// from a snapshot so neighborhood samples see pre-operation pixels.
pub(crate) fn apply_operation(pixels: &mut [u8], width: u32, height: u32, operation: &Operation) {
    match operation {
        Operation::Gamma { gamma } => apply_gamma(pixels, *gamma),
        Operation::Brightness { amount } => apply_brightness(pixels, *amount),
        Operation::Contrast { amount } => apply_contrast(pixels, *amount),
        Operation::Saturation { amount } => apply_saturation(pixels, *amount),
        Operation::Vibrance { amount } => apply_vibrance(pixels, *amount),
        Operation::HueRotate { radians } => apply_hue_rotation(pixels, *radians),
        Operation::ColorMatrix { matrix } => apply_color_matrix(pixels, matrix),
        Operation::Convolve { kernel } => apply_convolution(pixels, width, height, kernel),
        Operation::Blur { amount } => apply_box_blur(pixels, width, height, *amount),
        Operation::Noise { amount } => apply_noise(pixels, *amount),
    }
}

/// Round and clamp a channel value for write-back.
#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Per-channel gamma via a 256-entry lookup table.
///
/// Each entry is `(i/255)^(1/gamma) * 255`, truncated on store.
fn apply_gamma(pixels: &mut [u8], gamma: [f32; 3]) {
    let mut luts = [[0u8; 256]; 3];
    for (channel, lut) in luts.iter_mut().enumerate() {
        let exponent = 1.0 / gamma[channel];
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = ((i as f32 / 255.0).powf(exponent) * 255.0) as u8;
        }
    }
    for px in pixels.chunks_exact_mut(4) {
        px[0] = luts[0][px[0] as usize];
        px[1] = luts[1][px[1] as usize];
        px[2] = luts[2][px[2] as usize];
    }
}

/// Uniform offset of `amount * 255` on the color channels.
fn apply_brightness(pixels: &mut [u8], amount: f32) {
    let offset = amount * 255.0;
    for px in pixels.chunks_exact_mut(4) {
        for channel in &mut px[..3] {
            *channel = to_channel(*channel as f32 + offset);
        }
    }
}

/// Contrast with the 259-based factor around midpoint 128.
fn apply_contrast(pixels: &mut [u8], amount: f32) {
    let contrast = (amount * 255.0).floor();
    let factor = (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast));
    for px in pixels.chunks_exact_mut(4) {
        for channel in &mut px[..3] {
            *channel = to_channel(factor * (*channel as f32 - 128.0) + 128.0);
        }
    }
}

/// Push color channels toward (negative) or away from (positive) the
/// pixel's maximum channel.
fn apply_saturation(pixels: &mut [u8], amount: f32) {
    let adjust = -amount;
    for px in pixels.chunks_exact_mut(4) {
        let max = px[0].max(px[1]).max(px[2]) as f32;
        for channel in &mut px[..3] {
            let value = *channel as f32;
            if value != max {
                *channel = to_channel(value + (max - value) * adjust);
            }
        }
    }
}

/// Saturation whose per-pixel strength follows the spread between the max
/// channel and the channel mean. Near-gray pixels barely move.
fn apply_vibrance(pixels: &mut [u8], amount: f32) {
    let adjust = -amount;
    for px in pixels.chunks_exact_mut(4) {
        let r = px[0] as f32;
        let g = px[1] as f32;
        let b = px[2] as f32;
        let max = r.max(g).max(b);
        let avg = (r + g + b) / 3.0;
        let amt = (max - avg).abs() * 2.0 / 255.0 * adjust;
        for channel in &mut px[..3] {
            let value = *channel as f32;
            if value != max {
                *channel = to_channel(value + (max - value) * amt);
            }
        }
    }
}

/// Rotation around the gray axis with equal channel weights, expressed as
/// a color matrix. The matrix is circulant: every row sums to 1, so grays
/// are preserved.
fn apply_hue_rotation(pixels: &mut [u8], radians: f32) {
    let cosine = radians.cos();
    let sine = radians.sin();
    let third = 1.0 / 3.0f32;
    let one_minus_cos = 1.0 - cosine;
    let sqrt_third_sin = third.sqrt() * sine;

    let diag = cosine + third * one_minus_cos;
    let rise = third * one_minus_cos + sqrt_third_sin;
    let fall = third * one_minus_cos - sqrt_third_sin;

    #[rustfmt::skip]
    let matrix = [
        diag, fall, rise, 0.0, 0.0,
        rise, diag, fall, 0.0, 0.0,
        fall, rise, diag, 0.0, 0.0,
        0.0,  0.0,  0.0,  1.0, 0.0,
    ];
    apply_color_matrix(pixels, &matrix);
}

/// 4x5 affine matrix over RGBA. The fifth column is an offset in 0..1
/// units and is scaled by 255 here.
fn apply_color_matrix(pixels: &mut [u8], matrix: &[f32; 20]) {
    for px in pixels.chunks_exact_mut(4) {
        let r = px[0] as f32;
        let g = px[1] as f32;
        let b = px[2] as f32;
        let a = px[3] as f32;
        px[0] = to_channel(
            r * matrix[0] + g * matrix[1] + b * matrix[2] + a * matrix[3] + matrix[4] * 255.0,
        );
        px[1] = to_channel(
            r * matrix[5] + g * matrix[6] + b * matrix[7] + a * matrix[8] + matrix[9] * 255.0,
        );
        px[2] = to_channel(
            r * matrix[10] + g * matrix[11] + b * matrix[12] + a * matrix[13] + matrix[14] * 255.0,
        );
        px[3] = to_channel(
            r * matrix[15] + g * matrix[16] + b * matrix[17] + a * matrix[18] + matrix[19] * 255.0,
        );
    }
}

/// 3x3 convolution over all four channels. Samples outside the image
/// contribute nothing.
fn apply_convolution(pixels: &mut [u8], width: u32, height: u32, kernel: &[f32; 9]) {
    let w = width as i64;
    let h = height as i64;
    let source = pixels.to_vec();

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for ky in 0..3i64 {
                for kx in 0..3i64 {
                    let sy = y + ky - 1;
                    let sx = x + kx - 1;
                    if sy < 0 || sy >= h || sx < 0 || sx >= w {
                        continue;
                    }
                    let weight = kernel[(ky * 3 + kx) as usize];
                    let offset = ((sy * w + sx) * 4) as usize;
                    acc[0] += source[offset] as f32 * weight;
                    acc[1] += source[offset + 1] as f32 * weight;
                    acc[2] += source[offset + 2] as f32 * weight;
                    acc[3] += source[offset + 3] as f32 * weight;
                }
            }
            let offset = ((y * w + x) * 4) as usize;
            for (channel, value) in acc.iter().enumerate() {
                pixels[offset + channel] = to_channel(*value);
            }
        }
    }
}

/// Separable box blur. `amount` is a fraction of image size; the window
/// radius is `amount * min(width, height) / 4`, at least one pixel.
fn apply_box_blur(pixels: &mut [u8], width: u32, height: u32, amount: f32) {
    let min_dim = width.min(height) as f32;
    let radius = ((amount * min_dim * 0.25).round() as i64).max(1);
    let w = width as i64;
    let h = height as i64;

    let mut scratch = pixels.to_vec();
    box_blur_pass(pixels, &mut scratch, w, h, radius, true);
    box_blur_pass(&scratch, pixels, w, h, radius, false);
}

/// One horizontal or vertical pass of the box blur, edge-clamped.
fn box_blur_pass(source: &[u8], dest: &mut [u8], w: i64, h: i64, radius: i64, horizontal: bool) {
    let window = (2 * radius + 1) as f32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for d in -radius..=radius {
                let (sx, sy) = if horizontal {
                    ((x + d).clamp(0, w - 1), y)
                } else {
                    (x, (y + d).clamp(0, h - 1))
                };
                let offset = ((sy * w + sx) * 4) as usize;
                for (channel, value) in acc.iter_mut().enumerate() {
                    *value += source[offset + channel] as f32;
                }
            }
            let offset = ((y * w + x) * 4) as usize;
            for (channel, value) in acc.iter().enumerate() {
                dest[offset + channel] = to_channel(*value / window);
            }
        }
    }
}

/// Monochrome noise: one delta in [-amount/2, amount/2] per pixel, added
/// to all three color channels.
fn apply_noise(pixels: &mut [u8], amount: f32) {
    let mut rng = Lcg::new(NOISE_SEED);
    for px in pixels.chunks_exact_mut(4) {
        let delta = (0.5 - rng.next_f32()) * amount;
        for channel in &mut px[..3] {
            *channel = to_channel(*channel as f32 + delta);
        }
    }
}

/// Linear congruential generator with Numerical Recipes constants.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f32(&mut self) -> f32 {
        const A: u64 = 1664525;
        const C: u64 = 1013904223;
        self.state = self.state.wrapping_mul(A).wrapping_add(C);
        (self.state as f32) / (u64::MAX as f32)
    }
}
