use crate::matrix::Matrix;
use serde::{Serialize, Serializer};
use std::fmt;

/// 8-bit RGB triple.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey level in, grey-to-blue ramp out.
    pub const fn from_intensity(intensity: u8) -> Self {
        Self::new(intensity, intensity, 255)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `value / max`, or 0 when that is not a finite number (max of 0, empty
/// matrix, NaN cells).
pub fn normalize(value: f64, max: Option<f64>) -> f64 {
    let Some(max) = max else {
        return 0.0;
    };
    if max == 0.0 {
        return 0.0;
    }

    let n = value / max;
    if n.is_finite() { n } else { 0.0 }
}

/// floor(255 * (1 - normalized)) clamped to the u8 range.
pub fn intensity(normalized: f64) -> u8 {
    let raw = (255.0 * (1.0 - normalized)).floor();
    if raw.is_nan() {
        return 255;
    }
    raw.clamp(0.0, 255.0) as u8
}

/// Cell color for `value` relative to the largest cell in `matrix`.
pub fn color_for(value: f64, matrix: &Matrix) -> Rgb {
    Rgb::from_intensity(intensity(normalize(value, matrix.max_value())))
}
