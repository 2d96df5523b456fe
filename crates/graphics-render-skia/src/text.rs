// File: crates/graphics-render-skia/src/text.rs
// Summary: Tick-label shaping with Skia textlayout, anchored by alignment.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Horizontal anchor of a label relative to its reference point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

pub struct TextShaper {
    fonts: FontCollection,
    size: f32,
    color: skia::Color,
}

impl TextShaper {
    pub fn new(size: f32, color: skia::Color) -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc, size: size.max(1.0), color }
    }

    fn layout(&self, text: &str) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut ts = TextStyle::new();
        ts.set_font_size(self.size);
        ts.set_color(self.color);
        // tabular digits keep tick labels aligned
        ts.set_font_families(&["Roboto Mono", "Consolas", "Menlo", "DejaVu Sans Mono", "monospace"]);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&ts);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure(&self, text: &str) -> f32 {
        self.layout(text).longest_line()
    }

    /// Draw `text` with its vertical center at `y`.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, anchor: Anchor) {
        let mut p = self.layout(text);
        let w = p.longest_line();
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - w / 2.0,
            Anchor::End => x - w,
        };
        p.paint(canvas, (left, y - p.height() / 2.0));
    }
}
