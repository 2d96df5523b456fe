// File: crates/graphics-render-skia/src/scene.rs
// Summary: Rasterizes a retained scene tree (groups, paths, circles, axes) to PNG with a CPU surface.

use anyhow::{anyhow, Result};
use skia_safe as skia;

use graphics_core::axis::{AxisOrient, TICK_SIZE};
use graphics_core::surface::Element;
use graphics_core::{Axis, ElementId, Geometry, RetainedSurface};

use crate::paint::{fill, stroke, to_skia};
use crate::text::{Anchor, TextShaper};

pub struct SceneRenderOptions {
    pub background: skia::Color,
    /// Tick labels depend on installed fonts; snapshot tests turn them off.
    pub draw_labels: bool,
    pub label_size: f32,
}

impl Default for SceneRenderOptions {
    fn default() -> Self {
        Self { background: skia::Color::WHITE, draw_labels: true, label_size: 10.0 }
    }
}

/// Paints the current state of a [`RetainedSurface`].
///
/// Transitions have already jumped to their end state in the retained tree,
/// so a render shows where every element is headed.
pub struct SkiaSceneRenderer {
    opts: SceneRenderOptions,
    text: Option<TextShaper>,
}

impl SkiaSceneRenderer {
    pub fn new(opts: SceneRenderOptions) -> Self {
        let text = opts.draw_labels.then(|| TextShaper::new(opts.label_size, skia::Color::BLACK));
        Self { opts, text }
    }

    pub fn render_png_bytes(&self, surface: &RetainedSurface) -> Result<Vec<u8>> {
        let (w, h) = surface.size();
        let (w, h) = (w.ceil().max(1.0) as i32, h.ceil().max(1.0) as i32);
        let mut raster = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = raster.canvas();
        canvas.clear(self.opts.background);

        for el in surface.children(None) {
            self.draw_element(canvas, surface, el);
        }

        let image = raster.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        tracing::debug!(width = w, height = h, elements = surface.len(), bytes = data.as_bytes().len(), "scene rasterized");
        Ok(data.as_bytes().to_vec())
    }

    pub fn render_png(&self, surface: &RetainedSurface, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_png_bytes(surface)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn draw_element(&self, canvas: &skia::Canvas, surface: &RetainedSurface, el: &Element) {
        match &el.geometry {
            Geometry::Group { translate } => {
                canvas.save();
                canvas.translate((translate.0 as f32, translate.1 as f32));
                self.draw_children(canvas, surface, el.id);
                canvas.restore();
                return;
            }
            Geometry::Path(data) => {
                if let Some((first, rest)) = data.points.split_first() {
                    let mut path = skia::Path::new();
                    path.move_to((first.0 as f32, first.1 as f32));
                    for &(x, y) in rest {
                        path.line_to((x as f32, y as f32));
                    }
                    if let Some(p) = fill(&el.paint) {
                        canvas.draw_path(&path, &p);
                    }
                    if let Some(p) = stroke(&el.paint) {
                        canvas.draw_path(&path, &p);
                    }
                }
            }
            Geometry::Circle { cx, cy, r } => {
                let center = (*cx as f32, *cy as f32);
                if let Some(p) = fill(&el.paint) {
                    canvas.draw_circle(center, *r as f32, &p);
                }
                if let Some(p) = stroke(&el.paint) {
                    canvas.draw_circle(center, *r as f32, &p);
                }
            }
            Geometry::Axis(axis) => self.draw_axis(canvas, axis, &el.paint),
        }
        self.draw_children(canvas, surface, el.id);
    }

    fn draw_children(&self, canvas: &skia::Canvas, surface: &RetainedSurface, id: ElementId) {
        for child in surface.children(Some(id)) {
            self.draw_element(canvas, surface, child);
        }
    }

    fn draw_axis(&self, canvas: &skia::Canvas, axis: &Axis, paint: &graphics_core::Paint) {
        let line = stroke(paint).unwrap_or_else(|| {
            let mut p = skia::Paint::default();
            p.set_anti_alias(true);
            p.set_color(to_skia(&graphics_core::Color::black(), paint.opacity));
            p
        });
        let (a, b) = (axis.extent.0 as f32, axis.extent.1 as f32);
        let tick = TICK_SIZE as f32;
        match axis.orient {
            AxisOrient::Bottom => {
                canvas.draw_line((a, 0.0), (b, 0.0), &line);
                for t in &axis.ticks {
                    let x = t.offset as f32;
                    canvas.draw_line((x, 0.0), (x, tick), &line);
                    if let Some(text) = &self.text {
                        text.draw(canvas, &t.label, x, tick + 3.0 + self.opts.label_size / 2.0, Anchor::Middle);
                    }
                }
            }
            AxisOrient::Left => {
                canvas.draw_line((0.0, a), (0.0, b), &line);
                for t in &axis.ticks {
                    let y = t.offset as f32;
                    canvas.draw_line((-tick, y), (0.0, y), &line);
                    if let Some(text) = &self.text {
                        text.draw(canvas, &t.label, -tick - 3.0, y, Anchor::End);
                    }
                }
            }
        }
    }
}
