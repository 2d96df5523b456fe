// File: crates/graphics-core/src/chart.rs
// Summary: Chart-widget path: ListPlot/ListLinePlot series building and the backend that draws them.

use serde::Serialize;
use tracing::{debug, warn};

use crate::animation::{AnimationDriver, AnimationHandle, TickOutcome};
use crate::error::Result;
use crate::host::{DataExpr, DataSource, EventBus};
use crate::options::ChartOptions;
use crate::surface::Easing;
use crate::tensor::{transpose, Shape};
use crate::types::{ImageSize, Margin, DEFAULT_WIDTH, GOLDEN_ASPECT};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMode {
    Markers,
    Lines,
}

/// One trace handed to the chart backend. `x` absent means implicit indices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SeriesMode>,
}

impl ChartSeries {
    pub fn values(y: Vec<f64>, mode: Option<SeriesMode>) -> Self {
        Self { x: None, y, mode }
    }

    pub fn pairs(points: &[[f64; 2]], mode: Option<SeriesMode>) -> Self {
        let mut cols = transpose(points).into_iter();
        let x = cols.next().unwrap_or_default();
        let y = cols.next().unwrap_or_default();
        Self { x: Some(x), y, mode }
    }

    /// `(x, y)` for each sample, with implicit x starting at 0.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.y.iter().enumerate().map(move |(i, &y)| {
            let x = self.x.as_ref().and_then(|xs| xs.get(i).copied()).unwrap_or(i as f64);
            (x, y)
        })
    }
}

/// Series for a classified tensor: a flat series becomes one trace, pairs are
/// split into x/y columns, and multi-series data yields one trace per row.
pub fn series_from_shape(shape: &Shape, mode: Option<SeriesMode>) -> Vec<ChartSeries> {
    match shape {
        Shape::Series(y) => vec![ChartSeries::values(y.clone(), mode)],
        Shape::Pairs(pts) => vec![ChartSeries::pairs(pts, mode)],
        Shape::MultiSeries(rows) => rows.iter().map(|r| ChartSeries::values(r.clone(), mode)).collect(),
        Shape::MultiPairs(sets) => sets.iter().map(|s| ChartSeries::pairs(s, mode)).collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Gap between the plot area and the axis lines.
    pub pad: f64,
}

impl ChartLayout {
    pub fn new(size: [f64; 2]) -> Self {
        Self { width: size[0], height: size[1], margin: Margin::uniform(30.0), pad: 4.0 }
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::new([DEFAULT_WIDTH, DEFAULT_WIDTH * GOLDEN_ASPECT])
    }
}

/// How a backend should move from the current traces to a new frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTransition {
    pub transition_ms: u64,
    pub easing: Easing,
    pub frame_ms: u64,
    /// Whether the backend must redraw axes and layout as well as traces.
    pub redraw: bool,
}

impl FrameTransition {
    /// Explicit widget update.
    pub const UPDATE: Self = Self { transition_ms: 300, easing: Easing::CubicInOut, frame_ms: 300, redraw: true };
    /// One animation tick.
    pub const TICK: Self = Self { transition_ms: 30, easing: Easing::CubicInOut, frame_ms: 0, redraw: false };
}

/// High-level chart renderer.
pub trait ChartBackend: Send {
    fn render(&mut self, series: &[ChartSeries], layout: &ChartLayout) -> Result<()>;
    fn animate(&mut self, frame: &[ChartSeries], transition: &FrameTransition) -> Result<()>;
}

/// Backend that keeps every call for inspection.
#[derive(Debug, Default)]
pub struct RecordingChartBackend {
    pub renders: Vec<(Vec<ChartSeries>, ChartLayout)>,
    pub frames: Vec<(Vec<ChartSeries>, FrameTransition)>,
}

impl RecordingChartBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartBackend for RecordingChartBackend {
    fn render(&mut self, series: &[ChartSeries], layout: &ChartLayout) -> Result<()> {
        self.renders.push((series.to_vec(), *layout));
        Ok(())
    }

    fn animate(&mut self, frame: &[ChartSeries], transition: &FrameTransition) -> Result<()> {
        self.frames.push((frame.to_vec(), *transition));
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    /// Scatter of markers; may be driven by animation ticks.
    ListPlot,
    /// Line chart; honours `ImageSize`/`AspectRatio` and animates on update.
    ListLinePlot,
}

impl ChartKind {
    fn mode(self) -> Option<SeriesMode> {
        match self {
            ChartKind::ListPlot => Some(SeriesMode::Markers),
            ChartKind::ListLinePlot => None,
        }
    }

    fn layout(self, options: &ChartOptions) -> ChartLayout {
        match self {
            ChartKind::ListPlot => ChartLayout::default(),
            ChartKind::ListLinePlot => ChartLayout::new(ImageSize::resolve(options.image_size, options.aspect_ratio)),
        }
    }
}

/// A chart drawn through a [`ChartBackend`] from one data expression.
pub struct ChartWidget<B: ChartBackend> {
    kind: ChartKind,
    expr: DataExpr,
    layout: ChartLayout,
    series: Vec<ChartSeries>,
    backend: B,
    driver: Option<AnimationDriver>,
}

fn shape_or_warn(kind: ChartKind, expr: &DataExpr, data: &crate::tensor::Tensor) -> Option<Shape> {
    let shape = Shape::of(data);
    if shape.is_none() {
        warn!(?kind, %expr, "unsupported data shape; chart left empty");
    }
    shape
}

impl<B: ChartBackend> ChartWidget<B> {
    /// Retrieve `expr`, draw it and, for a ListPlot carrying
    /// `RequestAnimationFrame`, arm an animation driver.
    pub async fn create(
        kind: ChartKind,
        expr: DataExpr,
        options: &ChartOptions,
        mut backend: B,
        source: &dyn DataSource,
    ) -> Result<Self> {
        let data = source.retrieve(&expr).await?;
        let shape = shape_or_warn(kind, &expr, &data);
        let series = shape.as_ref().map(|s| series_from_shape(s, kind.mode())).unwrap_or_default();
        let layout = kind.layout(options);
        backend.render(&series, &layout)?;
        debug!(?kind, traces = series.len(), width = layout.width, height = layout.height, "chart rendered");

        let driver = match (kind, &options.request_animation_frame, &shape) {
            (ChartKind::ListPlot, Some((event, symbol)), Some(shape)) => {
                Some(AnimationDriver::start(event.clone(), symbol.clone(), expr.clone(), shape.rank()))
            }
            (ChartKind::ListPlot, Some(_), None) => {
                warn!(%expr, "animation requested for unclassifiable data; not started");
                None
            }
            _ => None,
        };

        Ok(Self { kind, expr, layout, series, backend, driver })
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Traces of the last render or update.
    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn animation(&self) -> Option<AnimationHandle> {
        self.driver.as_ref().map(AnimationDriver::handle)
    }

    /// Re-retrieve the data and animate to it.
    pub async fn update(&mut self, source: &dyn DataSource) -> Result<()> {
        let data = source.retrieve(&self.expr).await?;
        let Some(shape) = shape_or_warn(self.kind, &self.expr, &data) else {
            return Ok(());
        };
        self.series = series_from_shape(&shape, None);
        self.backend.animate(&self.series, &FrameTransition::UPDATE)
    }

    /// Advance the animation by one host tick. Without a driver this is `Stopped`.
    pub async fn tick(&mut self, source: &dyn DataSource, bus: &dyn EventBus) -> Result<TickOutcome> {
        match self.driver.as_mut() {
            Some(driver) => driver.tick(&mut self.backend, source, bus).await,
            None => Ok(TickOutcome::Stopped),
        }
    }

    /// Run the animation over `ticks`; returns the number of frames pushed.
    pub async fn run<T>(
        &mut self,
        ticks: impl futures::Stream<Item = T> + Unpin,
        source: &dyn DataSource,
        bus: &dyn EventBus,
    ) -> Result<u64> {
        match self.driver.as_mut() {
            Some(driver) => driver.run(ticks, &mut self.backend, source, bus).await,
            None => Ok(0),
        }
    }

    /// Stop any animation and hand the backend back.
    pub fn destroy(self) -> B {
        if let Some(driver) = &self.driver {
            driver.handle().stop();
        }
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_become_columns() {
        let s = series_from_shape(&Shape::Pairs(vec![[0.0, 1.0], [2.0, 3.0]]), Some(SeriesMode::Markers));
        assert_eq!(
            s,
            vec![ChartSeries { x: Some(vec![0.0, 2.0]), y: vec![1.0, 3.0], mode: Some(SeriesMode::Markers) }]
        );
    }

    #[test]
    fn multiseries_one_trace_per_row() {
        let s = series_from_shape(&Shape::MultiSeries(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]), None);
        assert_eq!(s.len(), 2);
        assert!(s.iter().all(|t| t.x.is_none() && t.mode.is_none()));
        assert_eq!(s[1].y, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn implicit_x_is_index() {
        let t = ChartSeries::values(vec![5.0, 6.0], None);
        assert_eq!(t.points().collect::<Vec<_>>(), vec![(0.0, 5.0), (1.0, 6.0)]);
    }

    #[test]
    fn series_serializes_without_absent_fields() {
        let t = ChartSeries::values(vec![1.0], Some(SeriesMode::Markers));
        assert_eq!(serde_json::to_string(&t).unwrap(), r#"{"y":[1.0],"mode":"markers"}"#);
    }
}
