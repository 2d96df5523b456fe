// File: crates/graphics-render-skia/src/paint.rs
// Summary: Conversions from core colors and paints to Skia paints, plus the chart trace palette.

use graphics_core::{Color, Paint};
use skia_safe as skia;

/// Trace colors for chart series, cycled by series index.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

pub fn palette(i: usize) -> skia::Color {
    let (r, g, b) = PALETTE[i % PALETTE.len()];
    skia::Color::from_rgb(r, g, b)
}

/// `color` with its alpha scaled by `opacity`.
pub fn to_skia(color: &Color, opacity: f64) -> skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    let a = (a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, r, g, b)
}

pub fn stroke(paint: &Paint) -> Option<skia::Paint> {
    let color = paint.stroke.as_ref()?;
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(paint.stroke_width as f32);
    p.set_color(to_skia(color, paint.opacity));
    Some(p)
}

pub fn fill(paint: &Paint) -> Option<skia::Paint> {
    let color = paint.fill.as_ref()?;
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(to_skia(color, paint.opacity));
    Some(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_scales_alpha() {
        let c = to_skia(&Color::Rgb(255.0, 0.0, 0.0), 0.5);
        assert_eq!((c.r(), c.g(), c.b()), (255, 0, 0));
        assert_eq!(c.a(), 128);
    }

    #[test]
    fn unstroked_paint_has_no_stroke() {
        let p = Paint { stroke: None, stroke_width: 1.0, fill: Some(Color::black()), opacity: 1.0 };
        assert!(stroke(&p).is_none());
        assert!(fill(&p).is_some());
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette(0), palette(PALETTE.len()));
    }
}
