// File: crates/graphics-render-skia/src/lib.rs
// Summary: Skia renderer crate: CPU raster backends for retained scenes and chart widgets.

pub mod chart;
pub mod paint;
pub mod scene;
pub mod text;

pub use chart::{SkiaChartBackend, ViewRange};
pub use scene::{SceneRenderOptions, SkiaSceneRenderer};
pub use text::TextShaper;
