// File: crates/graphics-core/tests/chart.rs
// Purpose: ListPlot/ListLinePlot widgets and the tick-driven animation loop.

use futures::stream;

use graphics_core::{
    ChartKind, ChartLayout, ChartOptions, ChartSeries, ChartWidget, DataExpr, EventPayload, FrameTransition,
    RecordingBus, RecordingChartBackend, SeriesMode, StaticSource, TickOutcome,
};

fn animated() -> ChartOptions {
    ChartOptions::from_json_str(r#"{"RequestAnimationFrame": ["frame", "renderer"]}"#).unwrap()
}

#[tokio::test]
async fn list_plot_renders_markers_at_default_size() {
    let source = StaticSource::new().with("d", vec![vec![0.0, 1.0], vec![1.0, 3.0]]);
    let w = ChartWidget::create(ChartKind::ListPlot, DataExpr::new("d"), &ChartOptions::default(), RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    let (series, layout) = &w.backend().renders[0];
    assert_eq!(
        series,
        &vec![ChartSeries { x: Some(vec![0.0, 1.0]), y: vec![1.0, 3.0], mode: Some(SeriesMode::Markers) }]
    );
    assert_eq!(*layout, ChartLayout::default());
    assert_eq!(layout.pad, 4.0);
    assert!(w.animation().is_none());
}

#[tokio::test]
async fn list_line_plot_honours_image_size_and_animates_updates() {
    let source = StaticSource::new().with("d", vec![1.0, 2.0, 3.0]);
    let options = ChartOptions::from_json_str(r#"{"ImageSize": 400, "AspectRatio": 0.5}"#).unwrap();
    let mut w = ChartWidget::create(ChartKind::ListLinePlot, DataExpr::new("d"), &options, RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    let layout = w.backend().renders[0].1;
    assert_eq!((layout.width, layout.height), (400.0, 200.0));
    assert_eq!(w.series()[0].mode, None);

    source.set("d", vec![vec![1.0, 2.0, 3.0], vec![3.0, 2.0, 1.0]]);
    w.update(&source).await.unwrap();
    let (frame, transition) = &w.backend().frames[0];
    assert_eq!(frame.len(), 2);
    assert_eq!(*transition, FrameTransition::UPDATE);
    assert_eq!(transition.transition_ms, 300);
}

#[tokio::test]
async fn animation_ticks_fire_event_and_push_frames() {
    let source = StaticSource::new().with("d", vec![0.0, 1.0]);
    let bus = RecordingBus::new();
    let mut w = ChartWidget::create(ChartKind::ListPlot, DataExpr::new("d"), &animated(), RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    assert!(w.animation().is_some_and(|h| h.is_live()));

    source.set("d", vec![0.5, 1.5, 2.5]);
    assert_eq!(w.tick(&source, &bus).await.unwrap(), TickOutcome::Rearmed);
    let (frame, transition) = &w.backend().frames[0];
    assert_eq!(frame, &vec![ChartSeries::values(vec![0.5, 1.5, 2.5], None)]);
    assert_eq!(*transition, FrameTransition::TICK);
    assert_eq!((transition.transition_ms, transition.frame_ms, transition.redraw), (30, 0, false));
    assert_eq!(bus.events(), vec![("frame".to_string(), EventPayload::Scalar(0.0))]);
}

#[tokio::test]
async fn run_ends_with_the_tick_stream() {
    let source = StaticSource::new().with("d", vec![0.0, 1.0]);
    let bus = RecordingBus::new();
    let mut w = ChartWidget::create(ChartKind::ListPlot, DataExpr::new("d"), &animated(), RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    let frames = w.run(stream::iter(vec![(); 4]), &source, &bus).await.unwrap();
    assert_eq!(frames, 4);
    assert_eq!(bus.events().len(), 4);
}

#[tokio::test]
async fn stopped_handle_ends_the_loop() {
    let source = StaticSource::new().with("d", vec![0.0, 1.0]);
    let bus = RecordingBus::new();
    let mut w = ChartWidget::create(ChartKind::ListPlot, DataExpr::new("d"), &animated(), RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    let handle = w.animation().unwrap();
    w.tick(&source, &bus).await.unwrap();
    handle.stop();
    assert_eq!(w.tick(&source, &bus).await.unwrap(), TickOutcome::Stopped);
    let frames = w.run(stream::iter(vec![(); 10]), &source, &bus).await.unwrap();
    assert_eq!(frames, 1);
    assert_eq!(bus.events().len(), 1);

    let backend = w.destroy();
    assert_eq!(backend.frames.len(), 1);
}

#[tokio::test]
async fn frames_with_a_different_rank_are_skipped() {
    let source = StaticSource::new().with("d", vec![0.0, 1.0]);
    let bus = RecordingBus::new();
    let mut w = ChartWidget::create(ChartKind::ListPlot, DataExpr::new("d"), &animated(), RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    source.set("d", vec![vec![0.0, 1.0], vec![1.0, 2.0]]);
    assert_eq!(w.tick(&source, &bus).await.unwrap(), TickOutcome::Rearmed);
    assert!(w.backend().frames.is_empty());
}

#[tokio::test]
async fn destroy_stops_animation() {
    let source = StaticSource::new().with("d", vec![0.0, 1.0]);
    let w = ChartWidget::create(ChartKind::ListPlot, DataExpr::new("d"), &animated(), RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    let handle = w.animation().unwrap();
    let _ = w.destroy();
    assert!(!handle.is_live());
}

#[tokio::test]
async fn line_plot_ignores_animation_rule() {
    let source = StaticSource::new().with("d", vec![0.0, 1.0]);
    let mut w = ChartWidget::create(ChartKind::ListLinePlot, DataExpr::new("d"), &animated(), RecordingChartBackend::new(), &source)
        .await
        .unwrap();
    assert!(w.animation().is_none());
    assert_eq!(w.tick(&source, &RecordingBus::new()).await.unwrap(), TickOutcome::Stopped);
}
