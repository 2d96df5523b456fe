// File: crates/graphics-core/src/types.rs
// Summary: Shared layout constants (default size, golden aspect, margins) and image size resolution.

use serde::{Deserialize, Serialize};

/// Default image width in pixels when no `ImageSize` is given.
pub const DEFAULT_WIDTH: f64 = 500.0;
/// Height/width ratio used when only a width is known.
pub const GOLDEN_ASPECT: f64 = 0.618034;

/// Screen margins around the plotting area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
    /// Margin applied to every side.
    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Margin {
    /// Scene margins: room on the left for Y tick labels, below for X.
    fn default() -> Self {
        Self::new(10.0, 30.0, 30.0, 60.0)
    }
}

/// Declared image size: a width alone (height follows the aspect ratio) or both.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSize {
    Width(f64),
    Size([f64; 2]),
}

impl ImageSize {
    /// Resolve to `[width, height]`.
    pub fn resolve(size: Option<ImageSize>, aspect: Option<f64>) -> [f64; 2] {
        let aspect = aspect.unwrap_or(GOLDEN_ASPECT);
        match size {
            Some(ImageSize::Size(wh)) => wh,
            Some(ImageSize::Width(w)) => [w, w * aspect],
            None => [DEFAULT_WIDTH, DEFAULT_WIDTH * GOLDEN_ASPECT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_only_uses_aspect() {
        assert_eq!(ImageSize::resolve(Some(ImageSize::Width(400.0)), None), [400.0, 400.0 * GOLDEN_ASPECT]);
        assert_eq!(ImageSize::resolve(Some(ImageSize::Width(400.0)), Some(0.5)), [400.0, 200.0]);
        assert_eq!(ImageSize::resolve(Some(ImageSize::Size([300.0, 100.0])), Some(0.5)), [300.0, 100.0]);
        assert_eq!(ImageSize::resolve(None, Some(1.0)), [DEFAULT_WIDTH, DEFAULT_WIDTH * GOLDEN_ASPECT]);
    }
}
