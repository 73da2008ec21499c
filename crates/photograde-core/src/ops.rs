//! Concrete pixel operations produced by the stage compiler.
//!
//! An `Operation` carries everything an executor needs to run one pass over
//! the image. Slider semantics live in [`crate::stages`]; by the time a value
//! reaches an `Operation` it is already scaled into the executor's domain.

/// A single pixel operation, tagged for JSON interchange with the web UI.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Operation {
    /// Per-channel gamma correction, applied as `channel^(1 / gamma)`.
    Gamma { gamma: [f32; 3] },
    /// Uniform channel offset. `amount` is in -1 to 1, scaled to the
    /// channel range by the executor.
    Brightness { amount: f32 },
    /// Contrast around the channel midpoint. `amount` is in -1 to 1.
    Contrast { amount: f32 },
    /// Uniform saturation scale. `amount` is in -1 to 1.
    Saturation { amount: f32 },
    /// Saturation whose per-pixel strength follows the pixel's color
    /// spread. `amount` is in -1 to 1.
    Vibrance { amount: f32 },
    /// Hue rotation by `radians` around the color wheel.
    HueRotate { radians: f32 },
    /// 4x5 color matrix in row-major order. Each output channel is a linear
    /// combination of RGBA plus the row's fifth (offset) entry.
    ColorMatrix { matrix: [f32; 20] },
    /// 3x3 convolution kernel in row-major order. Taps that fall outside
    /// the image are skipped.
    Convolve { kernel: [f32; 9] },
    /// Box blur. `amount` is the radius as a fraction of image size.
    Blur { amount: f32 },
    /// Monochrome noise. `amount` is the full delta range in channel units.
    Noise { amount: f32 },
}

impl Operation {
    /// The serialized tag for this operation.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Gamma { .. } => "gamma",
            Operation::Brightness { .. } => "brightness",
            Operation::Contrast { .. } => "contrast",
            Operation::Saturation { .. } => "saturation",
            Operation::Vibrance { .. } => "vibrance",
            Operation::HueRotate { .. } => "hueRotate",
            Operation::ColorMatrix { .. } => "colorMatrix",
            Operation::Convolve { .. } => "convolve",
            Operation::Blur { .. } => "blur",
            Operation::Noise { .. } => "noise",
        }
    }
}
