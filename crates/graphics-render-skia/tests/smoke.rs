// File: crates/graphics-render-skia/tests/smoke.rs
// Purpose: Chart widget end-to-end through the Skia backend, writing PNGs.

use graphics_core::{ChartKind, ChartOptions, ChartWidget, DataExpr, RecordingBus, StaticSource};
use graphics_render_skia::SkiaChartBackend;

#[tokio::test]
async fn list_line_plot_png() {
    let source = StaticSource::new().with("d", vec![vec![0.0, 0.0], vec![1.0, 2.0], vec![2.0, 1.0], vec![3.0, 3.5]]);
    let options = ChartOptions::from_json_str(r#"{"ImageSize": 360}"#).unwrap();
    let mut w = ChartWidget::create(ChartKind::ListLinePlot, DataExpr::new("d"), &options, SkiaChartBackend::new(false), &source)
        .await
        .expect("create chart");

    let bytes = w.backend().png().expect("rendered").to_vec();
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(img.width(), 360);

    source.set("d", vec![vec![0.0, 1.0], vec![1.0, 1.0], vec![2.0, 4.0]]);
    w.update(&source).await.expect("update");
    assert_eq!(w.backend().frames(), 1);

    let out = std::path::PathBuf::from("target/test_out/list_line_plot.png");
    w.backend().write_png(&out).expect("write png");
    assert!(std::fs::metadata(&out).expect("output exists").len() > 0);
}

#[tokio::test]
async fn list_plot_animation_repaints() {
    let source = StaticSource::new().with("d", vec![0.0, 1.0, 4.0, 9.0]);
    let options = ChartOptions::from_json_str(r#"{"RequestAnimationFrame": ["tick", "frame"]}"#).unwrap();
    let bus = RecordingBus::new();
    let mut w = ChartWidget::create(ChartKind::ListPlot, DataExpr::new("d"), &options, SkiaChartBackend::new(false), &source)
        .await
        .expect("create chart");
    let first = w.backend().png().expect("rendered").to_vec();
    let view = w.backend().view();

    source.set("d", vec![9.0, 4.0, 1.0, 0.0]);
    w.tick(&source, &bus).await.expect("tick");
    assert_eq!(w.backend().frames(), 1);
    assert_eq!(w.backend().view(), view);
    assert_ne!(w.backend().png().expect("frame"), &first[..]);
    assert_eq!(bus.events().len(), 1);
}
