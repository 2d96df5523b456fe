// File: crates/graphics-core/src/options.rs
// Summary: Parsed option rules for Graphics scenes and chart widgets (JSON-loadable).

use serde::Deserialize;

use crate::error::Result;
use crate::expr::GraphicsExpr;
use crate::types::ImageSize;

/// `Axes -> True` or `Axes -> {True, False}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Axes {
    All(bool),
    Each([bool; 2]),
}

impl Axes {
    /// Visibility of the `[x, y]` axes.
    pub fn flags(self) -> [bool; 2] {
        match self {
            Axes::All(v) => [v, v],
            Axes::Each(xy) => xy,
        }
    }
}

/// Options of a `Graphics` scene.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GraphicsOptions {
    pub image_size: Option<ImageSize>,
    pub aspect_ratio: Option<f64>,
    /// `[[xmin, xmax], [ymin, ymax]]`; defaults to `[-1, 1]` on both axes.
    pub plot_range: Option<[[f64; 2]; 2]>,
    pub axes: Option<Axes>,
    /// Milliseconds; defaults to 300.
    pub transition_duration: Option<u64>,
    /// Drawn before the main expression.
    pub epilog: Option<GraphicsExpr>,
    /// Drawn after the main expression.
    pub prolog: Option<GraphicsExpr>,
}

impl GraphicsOptions {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn plot_range_or_default(&self) -> [[f64; 2]; 2] {
        self.plot_range.unwrap_or([[-1.0, 1.0], [-1.0, 1.0]])
    }

    pub fn axis_flags(&self) -> [bool; 2] {
        self.axes.map_or([false, false], Axes::flags)
    }
}

/// Options of a `ListPlot`/`ListLinePlot` chart widget.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChartOptions {
    pub image_size: Option<ImageSize>,
    pub aspect_ratio: Option<f64>,
    /// `(host event name, update symbol name)`: drive the chart from animation ticks.
    pub request_animation_frame: Option<(String, String)>,
}

impl ChartOptions {
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphics_options_from_rules() {
        let o = GraphicsOptions::from_json_str(
            r#"{"ImageSize": 400, "PlotRange": [[0, 10], [0, 1]], "Axes": true, "TransitionDuration": 120,
                "Epilog": {"head": "Point", "args": "marks"}}"#,
        )
        .unwrap();
        assert_eq!(o.image_size, Some(ImageSize::Width(400.0)));
        assert_eq!(o.plot_range_or_default(), [[0.0, 10.0], [0.0, 1.0]]);
        assert_eq!(o.axis_flags(), [true, true]);
        assert_eq!(o.transition_duration, Some(120));
        assert_eq!(o.epilog, Some(GraphicsExpr::point("marks")));
    }

    #[test]
    fn defaults_and_axis_pairs() {
        let o = GraphicsOptions::from_json_str(r#"{"Axes": [true, false], "ImageSize": [300, 200]}"#).unwrap();
        assert_eq!(o.axis_flags(), [true, false]);
        assert_eq!(o.image_size, Some(ImageSize::Size([300.0, 200.0])));
        assert_eq!(GraphicsOptions::default().plot_range_or_default(), [[-1.0, 1.0], [-1.0, 1.0]]);
        assert_eq!(GraphicsOptions::default().axis_flags(), [false, false]);
    }

    #[test]
    fn chart_animation_rule() {
        let o = ChartOptions::from_json_str(r#"{"RequestAnimationFrame": ["frame", "renderer"]}"#).unwrap();
        assert_eq!(o.request_animation_frame, Some(("frame".to_string(), "renderer".to_string())));
        assert!(ChartOptions::from_json_str(r#"{"RequestAnimationFrame": "frame"}"#).is_err());
    }
}
