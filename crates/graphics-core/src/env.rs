// File: crates/graphics-core/src/env.rs
// Summary: Inherited drawing context (style, scales, behaviours) passed down the graphics tree.

use crate::color::Color;
use crate::error::Result;
use crate::interaction::InteractionBinding;
use crate::path::LineGenerator;
use crate::scale::LinearScale;
use crate::surface::{ElementId, Paint, Transition};

#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub color: Color,
    pub opacity: f64,
    pub stroke_width: f64,
    /// Marker size as a fraction; markers are drawn with radius `point_size * 100`.
    pub point_size: f64,
    /// `None` renders as "none".
    pub fill: Option<Color>,
    pub transition: Transition,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::black(),
            opacity: 1.0,
            stroke_width: 1.5,
            point_size: 0.013,
            fill: None,
            transition: Transition::new(300),
        }
    }
}

impl Style {
    pub fn marker_radius(&self) -> f64 {
        self.point_size * 100.0
    }

    /// Paint for a stroked, unfilled line.
    pub fn line_paint(&self) -> Paint {
        Paint {
            stroke: Some(self.color.clone()),
            stroke_width: self.stroke_width,
            fill: self.fill.clone(),
            opacity: self.opacity,
        }
    }

    /// Paint for a filled marker.
    pub fn marker_paint(&self) -> Paint {
        Paint { stroke: None, stroke_width: self.stroke_width, fill: Some(self.color.clone()), opacity: self.opacity }
    }
}

/// Drawing context of one evaluation subtree.
///
/// Cloning is the inheritance mechanism: a child receives a copy and its
/// mutations never reach the parent or its siblings. Per-primitive state is
/// not kept here; it lives in the handle a primitive returns from `create`.
#[derive(Clone, Debug)]
pub struct Environment {
    pub style: Style,
    pub x: LinearScale,
    pub y: LinearScale,
    /// Group that primitives append their elements to.
    pub layer: Option<ElementId>,
    pub behaviors: Vec<InteractionBinding>,
}

impl Environment {
    pub fn new(x: LinearScale, y: LinearScale, layer: Option<ElementId>) -> Self {
        Self { style: Style::default(), x, y, layer, behaviors: Vec::new() }
    }

    /// Copy of `self` carrying `behaviors` for the subtree it is handed to.
    pub fn with_behaviors(&self, behaviors: Vec<InteractionBinding>) -> Self {
        Self { behaviors, ..self.clone() }
    }

    pub fn line_generator(&self) -> LineGenerator {
        LineGenerator::new(self.x, self.y)
    }

    pub fn set_thickness(&mut self, width: f64) {
        self.style.stroke_width = width;
    }

    pub fn set_point_size(&mut self, size: f64) {
        self.style.point_size = size;
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.style.opacity = opacity;
    }

    /// `RGBColor`; on arity error the current color is kept.
    pub fn set_rgb(&mut self, channels: &[f64]) -> Result<()> {
        self.style.color = Color::from_rgb_channels(channels)?;
        Ok(())
    }

    /// `Hue`; on arity error the current color is kept.
    pub fn set_hue(&mut self, channels: &[f64]) -> Result<()> {
        self.style.color = Color::from_hue(channels)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment {
        let s = LinearScale::new((-1.0, 1.0), (0.0, 100.0));
        Environment::new(s, s, None)
    }

    #[test]
    fn defaults() {
        let e = env();
        assert_eq!(e.style.color, Color::black());
        assert_eq!(e.style.stroke_width, 1.5);
        assert_eq!(e.style.point_size, 0.013);
        assert_eq!(e.style.transition.duration_ms, 300);
        assert!((e.style.marker_radius() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn child_copy_does_not_leak() {
        let parent = env();
        let mut child = parent.clone();
        child.set_thickness(4.0);
        child.set_rgb(&[0.0, 0.0, 1.0]).unwrap();
        assert_eq!(parent.style.stroke_width, 1.5);
        assert_eq!(parent.style.color, Color::black());
    }

    #[test]
    fn bad_color_keeps_previous() {
        let mut e = env();
        e.set_rgb(&[1.0, 0.0, 0.0]).unwrap();
        assert!(e.set_hue(&[0.3, 0.2]).is_err());
        assert_eq!(e.style.color, Color::Rgb(255.0, 0.0, 0.0));
    }
}
