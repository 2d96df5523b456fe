// File: crates/graphics-core/src/path.rs
// Summary: Screen-space polyline data and the line generator cached by Line primitives.

use std::fmt;

use crate::scale::LinearScale;

/// Polyline in screen coordinates (first point is a move-to, the rest line-to).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    pub points: Vec<(f64, f64)>,
}

impl PathData {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for PathData {
    /// SVG `d` attribute.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (x, y)) in self.points.iter().enumerate() {
            write!(f, "{}{},{}", if i == 0 { 'M' } else { 'L' }, x, y)?;
        }
        Ok(())
    }
}

/// Maps `[x, y]` data pairs through a scene's scales into a [`PathData`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineGenerator {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl LineGenerator {
    pub fn new(x: LinearScale, y: LinearScale) -> Self {
        Self { x, y }
    }

    pub fn path(&self, data: &[[f64; 2]]) -> PathData {
        PathData { points: data.iter().map(|d| (self.x.apply(d[0]), self.y.apply(d[1]))).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_svg_path() {
        let g = LineGenerator::new(
            LinearScale::new((0.0, 1.0), (0.0, 100.0)),
            LinearScale::new((0.0, 1.0), (50.0, 0.0)),
        );
        let p = g.path(&[[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(p.points, vec![(0.0, 50.0), (100.0, 0.0)]);
        assert_eq!(p.to_string(), "M0,50L100,0");
    }
}
