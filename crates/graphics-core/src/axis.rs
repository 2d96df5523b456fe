// File: crates/graphics-core/src/axis.rs
// Summary: Tick axes laid out from a scale (bottom X axis, left Y axis).

use crate::scale::{tick_step, LinearScale};

/// Ticks requested per axis.
pub const TICK_COUNT: usize = 10;
/// Tick mark length in pixels.
pub const TICK_SIZE: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Position along the axis, in the scale's pixel range.
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    /// Pixel extent of the domain line `(start, end)`.
    pub extent: (f64, f64),
    pub ticks: Vec<AxisTick>,
}

impl Axis {
    pub fn new(orient: AxisOrient, scale: &LinearScale) -> Self {
        let values = scale.ticks(TICK_COUNT);
        let (lo, hi) = scale.domain;
        let step = tick_step(lo.min(hi), lo.max(hi), TICK_COUNT);
        let ticks = values
            .into_iter()
            .map(|value| AxisTick { value, offset: scale.apply(value), label: format_tick(value, step) })
            .collect();
        Self { orient, extent: scale.range, ticks }
    }

    pub fn bottom(scale: &LinearScale) -> Self {
        Self::new(AxisOrient::Bottom, scale)
    }

    pub fn left(scale: &LinearScale) -> Self {
        Self::new(AxisOrient::Left, scale)
    }
}

/// Format a tick value with just enough decimals for `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 { (-step.log10().floor()) as usize } else { 0 };
    let v = if value == 0.0 { 0.0 } else { value }; // no "-0"
    format!("{:.*}", decimals, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_axis_ticks_follow_scale() {
        let x = LinearScale::new((0.0, 10.0), (0.0, 410.0));
        let axis = Axis::bottom(&x);
        assert_eq!(axis.ticks.len(), 11);
        assert_eq!(axis.ticks[5].offset, 205.0);
        assert_eq!(axis.ticks[5].label, "5");
        assert_eq!(axis.extent, (0.0, 410.0));
    }

    #[test]
    fn left_axis_labels_use_step_precision() {
        let y = LinearScale::new((0.0, 1.0), (270.0, 0.0));
        let axis = Axis::left(&y);
        assert_eq!(axis.ticks.first().map(|t| t.label.as_str()), Some("0.0"));
        assert_eq!(axis.ticks.last().map(|t| t.offset), Some(0.0));
    }
}
