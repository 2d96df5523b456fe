// File: crates/graphics-render-skia/src/chart.rs
// Summary: Chart-widget backend drawing ListPlot/ListLinePlot traces to PNG with autoscaled axes.

use anyhow::{anyhow, Result};
use skia_safe as skia;
use tracing::debug;

use graphics_core::axis::{format_tick, TICK_COUNT};
use graphics_core::scale::tick_step;
use graphics_core::{ChartBackend, ChartLayout, ChartSeries, FrameTransition, GraphicsError, LinearScale, SeriesMode};

use crate::paint::palette;
use crate::text::{Anchor, TextShaper};

/// Visible data ranges, fitted to the traces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewRange {
    /// Bounds over every finite sample, with 2% headroom on Y.
    /// Empty input gives the unit square; a flat range is widened by one.
    pub fn fit(series: &[ChartSeries]) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in series {
            for (x, y) in s.points().filter(|(x, y)| x.is_finite() && y.is_finite()) {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
        if !x_min.is_finite() || !y_min.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
        let ym = (y_max - y_min) * 0.02;
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }
}

/// Raster [`ChartBackend`]; every render and frame produces a fresh PNG.
///
/// A frame without `redraw` keeps the axes of the previous render and only
/// repaints the traces.
pub struct SkiaChartBackend {
    pub background: skia::Color,
    pub draw_labels: bool,
    layout: ChartLayout,
    view: ViewRange,
    traces: Vec<ChartSeries>,
    png: Option<Vec<u8>>,
    frames: u64,
}

impl Default for SkiaChartBackend {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SkiaChartBackend {
    pub fn new(draw_labels: bool) -> Self {
        Self {
            background: skia::Color::WHITE,
            draw_labels,
            layout: ChartLayout::default(),
            view: ViewRange::fit(&[]),
            traces: Vec::new(),
            png: None,
            frames: 0,
        }
    }

    /// PNG of the most recent render or frame.
    pub fn png(&self) -> Option<&[u8]> {
        self.png.as_deref()
    }

    pub fn view(&self) -> ViewRange {
        self.view
    }

    /// Frames animated since the last full render.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn write_png(&self, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.png.as_ref().ok_or_else(|| anyhow!("nothing rendered yet"))?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn paint(&mut self) -> Result<()> {
        let (w, h) = (self.layout.width.round() as i32, self.layout.height.round() as i32);
        let mut surface = skia::surfaces::raster_n32_premul((w.max(1), h.max(1)))
            .ok_or_else(|| anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(self.background);

        let m = self.layout.margin;
        let (l, t) = (m.left, m.top);
        let (r, b) = (self.layout.width - m.right, self.layout.height - m.bottom);
        let x = LinearScale::new((self.view.x_min, self.view.x_max), (l, r));
        let y = LinearScale::new((self.view.y_min, self.view.y_max), (b, t));

        let text = self.draw_labels.then(|| TextShaper::new(11.0, skia::Color::from_rgb(68, 68, 68)));
        self.draw_grid(canvas, text.as_ref(), &x, &y, (l, t, r, b));
        for (i, s) in self.traces.iter().enumerate() {
            draw_trace(canvas, s, &x, &y, palette(i));
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        self.png = Some(data.as_bytes().to_vec());
        Ok(())
    }

    fn draw_grid(
        &self,
        canvas: &skia::Canvas,
        text: Option<&TextShaper>,
        x: &LinearScale,
        y: &LinearScale,
        (l, t, r, b): (f64, f64, f64, f64),
    ) {
        let mut grid = skia::Paint::default();
        grid.set_color(skia::Color::from_rgb(235, 235, 240));
        grid.set_anti_alias(true);
        grid.set_stroke_width(1.0);
        let mut axis = grid.clone();
        axis.set_color(skia::Color::from_rgb(68, 68, 68));

        let pad = self.layout.pad;
        let x_step = tick_step(self.view.x_min, self.view.x_max, TICK_COUNT);
        for v in x.ticks(TICK_COUNT) {
            let px = x.apply(v) as f32;
            canvas.draw_line((px, t as f32), (px, b as f32), &grid);
            if let Some(text) = text {
                text.draw(canvas, &format_tick(v, x_step), px, (b + pad + 10.0) as f32, Anchor::Middle);
            }
        }
        let y_step = tick_step(self.view.y_min, self.view.y_max, TICK_COUNT);
        for v in y.ticks(TICK_COUNT) {
            let py = y.apply(v) as f32;
            canvas.draw_line((l as f32, py), (r as f32, py), &grid);
            if let Some(text) = text {
                text.draw(canvas, &format_tick(v, y_step), (l - pad - 2.0) as f32, py, Anchor::End);
            }
        }
        canvas.draw_line(((l - pad) as f32, (b + pad) as f32), (r as f32, (b + pad) as f32), &axis);
        canvas.draw_line(((l - pad) as f32, t as f32), ((l - pad) as f32, (b + pad) as f32), &axis);
    }
}

fn draw_trace(canvas: &skia::Canvas, series: &ChartSeries, x: &LinearScale, y: &LinearScale, color: skia::Color) {
    let pts: Vec<(f32, f32)> = series
        .points()
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (x.apply(a) as f32, y.apply(b) as f32))
        .collect();
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(color);

    match series.mode {
        Some(SeriesMode::Markers) => {
            paint.set_style(skia::paint::Style::Fill);
            for p in &pts {
                canvas.draw_circle(*p, 3.0, &paint);
            }
        }
        Some(SeriesMode::Lines) | None => {
            let Some((first, rest)) = pts.split_first() else { return };
            let mut path = skia::Path::new();
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            paint.set_style(skia::paint::Style::Stroke);
            paint.set_stroke_width(2.0);
            canvas.draw_path(&path, &paint);
        }
    }
}

fn backend_error(e: anyhow::Error) -> GraphicsError {
    GraphicsError::Backend(e.to_string())
}

impl ChartBackend for SkiaChartBackend {
    fn render(&mut self, series: &[ChartSeries], layout: &ChartLayout) -> graphics_core::Result<()> {
        self.layout = *layout;
        self.traces = series.to_vec();
        self.view = ViewRange::fit(series);
        self.frames = 0;
        self.paint().map_err(backend_error)?;
        debug!(traces = series.len(), view = ?self.view, "chart rendered");
        Ok(())
    }

    /// Traces in `frame` replace the current ones by index; the mode of a
    /// replaced trace is kept when the frame does not carry one.
    fn animate(&mut self, frame: &[ChartSeries], transition: &FrameTransition) -> graphics_core::Result<()> {
        let mut next = frame.to_vec();
        for (i, s) in next.iter_mut().enumerate() {
            if s.mode.is_none() {
                s.mode = self.traces.get(i).and_then(|t| t.mode);
            }
        }
        self.traces = next;
        if transition.redraw {
            self.view = ViewRange::fit(&self.traces);
        }
        self.frames += 1;
        self.paint().map_err(backend_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_adds_y_headroom() {
        let v = ViewRange::fit(&[ChartSeries::values(vec![0.0, 10.0], None)]);
        assert_eq!((v.x_min, v.x_max), (0.0, 1.0));
        assert!((v.y_min + 0.2).abs() < 1e-9 && (v.y_max - 10.2).abs() < 1e-9);
    }

    #[test]
    fn fit_of_nothing_is_unit() {
        assert_eq!(ViewRange::fit(&[]), ViewRange { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 });
    }

    #[test]
    fn frame_without_redraw_keeps_view() {
        let mut b = SkiaChartBackend::new(false);
        b.render(&[ChartSeries::values(vec![0.0, 1.0], Some(SeriesMode::Markers))], &ChartLayout::default()).unwrap();
        let view = b.view();
        b.animate(&[ChartSeries::values(vec![5.0, 9.0], None)], &FrameTransition::TICK).unwrap();
        assert_eq!(b.view(), view);
        assert_eq!(b.frames(), 1);
        b.animate(&[ChartSeries::values(vec![5.0, 9.0], None)], &FrameTransition::UPDATE).unwrap();
        assert_ne!(b.view(), view);
        assert!(b.png().is_some_and(|p| p.starts_with(&[137, 80, 78, 71])));
    }
}
