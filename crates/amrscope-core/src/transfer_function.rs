//! One-dimensional transfer functions for volume rendering.
//!
//! Color and opacity are independent sequences of stops, each spread evenly
//! over `[0, 1]` in the order given. A [`ValueRange`] maps field values onto
//! that parameter before lookup.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::color_maps::ColorMapRegistry;
use crate::error::{AmrError, Result, StopKind};

/// Scalar domain a transfer function is stretched over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Field value mapped to parameter 0.
    pub min: f32,
    /// Field value mapped to parameter 1.
    pub max: f32,
}

impl ValueRange {
    /// Creates a new value range. Validity is checked when a transfer function is built.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if `min < max` (false for NaN bounds).
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Maps `value` into `[0, 1]`, clamping values outside the range.
    ///
    /// The arithmetic runs in `f64`, so ranges spanning most of `f32` do not
    /// overflow. A NaN `value` yields NaN.
    pub fn normalize(&self, value: f32) -> f32 {
        let min = f64::from(self.min);
        let t = (f64::from(value) - min) / (f64::from(self.max) - min);
        t.clamp(0.0, 1.0) as f32
    }

    /// Returns the range as a `(min, max)` pair.
    pub fn to_array(self) -> [f32; 2] {
        [self.min, self.max]
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl From<(f32, f32)> for ValueRange {
    fn from((min, max): (f32, f32)) -> Self {
        Self { min, max }
    }
}

/// Piecewise-linear color and opacity mapping over a scalar range.
///
/// Deserialization runs the same validation as [`TransferFunction::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTransferFunction")]
pub struct TransferFunction {
    colors: Vec<Vec3>,
    opacities: Vec<f32>,
    value_range: ValueRange,
}

impl TransferFunction {
    /// Builds a transfer function.
    ///
    /// Stops are kept exactly as given: no sorting, deduplication, or
    /// resampling. The two sequences may differ in length.
    ///
    /// # Errors
    ///
    /// [`AmrError::EmptyStops`] if either sequence is empty,
    /// [`AmrError::InvalidRange`] unless `value_range.min < value_range.max`.
    pub fn build(
        colors: Vec<Vec3>,
        opacities: Vec<f32>,
        value_range: impl Into<ValueRange>,
    ) -> Result<Self> {
        let value_range = value_range.into();
        if colors.is_empty() {
            return Err(AmrError::EmptyStops(StopKind::Color));
        }
        if opacities.is_empty() {
            return Err(AmrError::EmptyStops(StopKind::Opacity));
        }
        if !value_range.is_valid() {
            return Err(AmrError::InvalidRange {
                min: value_range.min,
                max: value_range.max,
            });
        }
        Ok(Self {
            colors,
            opacities,
            value_range,
        })
    }

    /// Builds a transfer function whose colors come from a named color map.
    pub fn from_color_map(
        registry: &ColorMapRegistry,
        name: &str,
        opacities: Vec<f32>,
        value_range: impl Into<ValueRange>,
    ) -> Result<Self> {
        let color_map = registry
            .get(name)
            .ok_or_else(|| AmrError::UnknownColorMap(name.to_string()))?;
        Self::build(color_map.colors.clone(), opacities, value_range)
    }

    /// Returns the color stops in the order given.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Returns the opacity stops in the order given.
    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Returns the scalar range the stops are stretched over.
    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    /// Returns the color stops as packed `float3` values.
    pub fn color_array(&self) -> Vec<[f32; 3]> {
        self.colors.iter().map(|c| c.to_array()).collect()
    }

    /// Evaluates the transfer function at a field value, returning RGBA.
    ///
    /// NaN values produce NaN channels wherever more than one stop is involved.
    pub fn sample(&self, value: f32) -> Vec4 {
        let t = self.value_range.normalize(value);
        let color = interpolate(&self.colors, t, Vec3::lerp);
        let opacity = interpolate(&self.opacities, t, |a, b, s| a + (b - a) * s);
        color.extend(opacity)
    }
}

#[derive(Deserialize)]
struct RawTransferFunction {
    colors: Vec<Vec3>,
    opacities: Vec<f32>,
    value_range: ValueRange,
}

impl TryFrom<RawTransferFunction> for TransferFunction {
    type Error = AmrError;

    fn try_from(raw: RawTransferFunction) -> Result<Self> {
        Self::build(raw.colors, raw.opacities, raw.value_range)
    }
}

/// Linear interpolation between evenly spaced stops at parameter `t` in `[0, 1]`.
fn interpolate<T: Copy>(stops: &[T], t: f32, lerp: impl Fn(T, T, f32) -> T) -> T {
    if stops.len() == 1 {
        return stops[0];
    }
    let n = stops.len() - 1;
    let idx = ((t * n as f32).floor() as usize).min(n - 1);
    let frac = t * n as f32 - idx as f32;
    lerp(stops[idx], stops[idx + 1], frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    #[test]
    fn test_build_preserves_stop_order() {
        let tf = TransferFunction::build(vec![BLUE, GREEN, RED, RED], vec![0.5, 1.0], (0.0, 1.0))
            .unwrap();
        assert_eq!(tf.colors(), &[BLUE, GREEN, RED, RED]);
        assert_eq!(tf.opacities(), &[0.5, 1.0]);
        assert_eq!(tf.value_range(), ValueRange::new(0.0, 1.0));
    }

    #[test]
    fn test_build_does_not_sort() {
        let tf = TransferFunction::build(vec![RED, BLUE], vec![1.0, 0.2, 0.7], (0.0, 1.0)).unwrap();
        assert_eq!(tf.colors(), &[RED, BLUE]);
        assert_eq!(tf.opacities(), &[1.0, 0.2, 0.7]);
    }

    #[test]
    fn test_empty_stops() {
        let err = TransferFunction::build(vec![], vec![1.0], (0.0, 1.0)).unwrap_err();
        assert!(matches!(err, AmrError::EmptyStops(StopKind::Color)));
        let err = TransferFunction::build(vec![RED], vec![], (0.0, 1.0)).unwrap_err();
        assert!(matches!(err, AmrError::EmptyStops(StopKind::Opacity)));
    }

    #[test]
    fn test_invalid_range() {
        for (min, max) in [(1.0, 1.0), (2.0, 1.0), (f32::NAN, 1.0)] {
            let err = TransferFunction::build(vec![RED], vec![1.0], (min, max)).unwrap_err();
            assert!(matches!(err, AmrError::InvalidRange { .. }));
        }
    }

    #[test]
    fn test_sample_interpolates_independently() {
        let tf = TransferFunction::build(vec![BLUE, GREEN, RED, RED], vec![0.5, 1.0], (0.0, 1.0))
            .unwrap();
        assert_eq!(tf.sample(0.0), Vec4::new(0.0, 0.0, 1.0, 0.5));
        assert_eq!(tf.sample(1.0), Vec4::new(1.0, 0.0, 0.0, 1.0));

        let mid = tf.sample(0.5);
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.y - 0.5).abs() < 1e-6);
        assert!((mid.w - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_sample_respects_value_range() {
        let tf = TransferFunction::build(vec![BLUE, RED], vec![0.0, 1.0], (10.0, 20.0)).unwrap();
        assert_eq!(tf.sample(10.0), BLUE.extend(0.0));
        assert_eq!(tf.sample(-5.0), BLUE.extend(0.0));
        assert_eq!(tf.sample(30.0), RED.extend(1.0));
        assert!((tf.sample(15.0).w - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_wide_range() {
        let range = ValueRange::new(-3.0e38, 3.0e38);
        assert!((range.normalize(0.0) - 0.5).abs() < 1e-6);
        assert_eq!(range.normalize(-3.0e38), 0.0);
        assert_eq!(range.normalize(f32::MAX), 1.0);
        assert_eq!(range.normalize(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_normalize_nan() {
        let range = ValueRange::default();
        assert!(range.normalize(f32::NAN).is_nan());

        let tf = TransferFunction::build(vec![BLUE, RED], vec![0.0, 1.0], range).unwrap();
        assert!(tf.sample(f32::NAN).w.is_nan());
    }

    #[test]
    fn test_single_stop_is_constant() {
        let tf = TransferFunction::build(vec![GREEN], vec![0.3], (0.0, 1.0)).unwrap();
        assert_eq!(tf.sample(0.1), GREEN.extend(0.3));
        assert_eq!(tf.sample(0.9), GREEN.extend(0.3));
    }

    #[test]
    fn test_from_color_map() {
        let registry = ColorMapRegistry::new();
        let tf = TransferFunction::from_color_map(&registry, "coolwarm", vec![1.0], (0.0, 1.0))
            .unwrap();
        assert_eq!(tf.colors().len(), 5);

        let err = TransferFunction::from_color_map(&registry, "nope", vec![1.0], (0.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, AmrError::UnknownColorMap(_)));
    }

    #[test]
    fn test_wire_arrays() {
        let tf = TransferFunction::build(vec![BLUE, RED], vec![0.5], (0.0, 2.0)).unwrap();
        assert_eq!(tf.color_array(), vec![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0]]);
        assert_eq!(tf.value_range().to_array(), [0.0, 2.0]);
    }

    #[test]
    fn test_json_roundtrip() {
        let tf = TransferFunction::build(vec![BLUE, RED], vec![0.5, 1.0], (0.0, 2.0)).unwrap();
        let json = serde_json::to_string(&tf).unwrap();
        let back: TransferFunction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tf);

        let bad = r#"{"colors":[[1.0,0.0,0.0]],"opacities":[],"value_range":{"min":0.0,"max":1.0}}"#;
        assert!(serde_json::from_str::<TransferFunction>(bad).is_err());
    }
}
