// File: crates/demo/src/main.rs
// Summary: Demo loads numeric CSV columns, draws a Graphics scene and chart widgets, then updates
// and animates them, writing PNGs under target/demo.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use graphics_core::{
    ChartKind, ChartOptions, ChartWidget, DataExpr, EventBus, EventPayload, Gesture, GraphicsExpr, GraphicsOptions,
    PrimitiveHandle, RecordingBus, RetainedSurface, Scene, StaticSource, Tensor,
};
use graphics_render_skia::{SceneRenderOptions, SkiaChartBackend, SkiaSceneRenderer};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

/// Columns of a CSV: first column is X, every other column one Y series.
struct Table {
    x: Vec<f64>,
    ys: Vec<Vec<f64>>,
}

impl Table {
    fn synthetic(n: usize, phase: f64) -> Self {
        let x: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1).max(1) as f64 * 10.0).collect();
        let ys = vec![
            x.iter().map(|v| (v + phase).sin()).collect(),
            x.iter().map(|v| 0.5 * (v * 0.7 + phase).cos()).collect(),
        ];
        Self { x, ys }
    }

    /// One `[x, y]` series per Y column (rank 3).
    fn series(&self) -> Tensor {
        Tensor::from(
            self.ys
                .iter()
                .map(|col| self.x.iter().zip(col).map(|(x, y)| vec![*x, *y]).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
        )
    }

    /// Every `step`-th sample of the first Y column as `[x, y]` pairs (rank 2).
    fn markers(&self, step: usize) -> Tensor {
        let first = self.ys.first().cloned().unwrap_or_default();
        Tensor::from(
            self.x
                .iter()
                .zip(first)
                .step_by(step.max(1))
                .map(|(x, y)| vec![*x, y])
                .collect::<Vec<_>>(),
        )
    }

    fn plot_range(&self) -> [[f64; 2]; 2] {
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in self.ys.iter().flatten() {
            lo = lo.min(*v);
            hi = hi.max(*v);
        }
        let x0 = self.x.first().copied().unwrap_or(0.0);
        let x1 = self.x.last().copied().unwrap_or(1.0);
        if !lo.is_finite() || (hi - lo).abs() < 1e-9 {
            return [[x0, x1], [-1.0, 1.0]];
        }
        let pad = (hi - lo) * 0.05;
        [[x0, x1], [lo - pad, hi + pad]]
    }
}

/// Bus that advances the demo data whenever the animation event fires,
/// standing in for the notebook logic that would normally react to it.
struct PhaseBus {
    source: Arc<StaticSource>,
    phase: Mutex<f64>,
    log: RecordingBus,
}

impl EventBus for PhaseBus {
    fn emit(&self, key: &str, payload: EventPayload) {
        if key == "tick" {
            if let Ok(mut phase) = self.phase.lock() {
                *phase += 0.25;
                let t = Table::synthetic(40, *phase);
                self.source.set("animated", t.ys[0].clone());
            }
        }
        self.log.emit(key, payload);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let table = match args.next() {
        Some(raw) => {
            let path = PathBuf::from(raw);
            load_table(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => Table::synthetic(200, 0.0),
    };
    let scene_json = args.next();
    tracing::info!(rows = table.x.len(), series = table.ys.len(), "data loaded");
    if table.x.is_empty() {
        anyhow::bail!("no numeric rows loaded; check headers/delimiter.");
    }

    let out_dir = PathBuf::from("target/demo");
    let source = Arc::new(
        StaticSource::new()
            .with("series", table.series())
            .with("points", table.markers(20))
            .with("animated", Table::synthetic(40, 0.0).ys[0].clone()),
    );

    // 1) Graphics scene
    let (options, body) = match scene_json {
        Some(p) => load_scene(Path::new(&p))?,
        None => builtin_scene(&table),
    };
    let bus = Arc::new(RecordingBus::new());
    let mut scene = Scene::build(&options, &body, RetainedSurface::new(), source.as_ref(), bus.clone()).await?;
    let renderer = SkiaSceneRenderer::new(SceneRenderOptions::default());
    renderer.render_png(scene.surface(), out_dir.join("scene.png"))?;
    println!("Wrote {}", out_dir.join("scene.png").display());

    // drag the first marker of every point primitive to (1, 0)
    let markers: Vec<_> = scene
        .tokens()
        .filter_map(|t| match scene.primitive(t) {
            Some(PrimitiveHandle::Point(h)) => h.markers().first().copied(),
            _ => None,
        })
        .collect();
    let (x, y) = scene.scales();
    for id in markers {
        scene.dispatch(id, Gesture::DragStart);
        scene.dispatch(id, Gesture::Drag { x: x.apply(1.0), y: y.apply(0.0) });
        scene.dispatch(id, Gesture::DragEnd);
    }
    for (key, payload) in bus.events() {
        println!("event {key} <- {payload}");
    }

    // 2) Data changes: reconcile in place (fewer markers, shifted series)
    let shifted = Table { x: table.x.clone(), ys: table.ys.iter().map(|c| c.iter().map(|v| v * 0.5).collect()).collect() };
    source.set("series", shifted.series());
    source.set("points", shifted.markers(40));
    scene.refresh(source.as_ref()).await?;
    renderer.render_png(scene.surface(), out_dir.join("scene_updated.png"))?;
    println!(
        "Wrote {} ({} transitions)",
        out_dir.join("scene_updated.png").display(),
        scene.surface().transitions().len()
    );

    // 3) ListLinePlot, then an animated update
    let line_opts = ChartOptions::from_json_str(r#"{"ImageSize": 600}"#)?;
    let mut line = ChartWidget::create(
        ChartKind::ListLinePlot,
        DataExpr::new("series"),
        &line_opts,
        SkiaChartBackend::default(),
        source.as_ref(),
    )
    .await?;
    line.backend().write_png(out_dir.join("list_line_plot.png"))?;
    source.set("series", table.series());
    line.update(source.as_ref()).await?;
    line.backend().write_png(out_dir.join("list_line_plot_updated.png"))?;
    println!("Wrote {}", out_dir.join("list_line_plot.png").display());

    // 4) ListPlot driven by animation ticks
    let anim_opts = ChartOptions::from_json_str(r#"{"RequestAnimationFrame": ["tick", "frame"]}"#)?;
    let mut plot = ChartWidget::create(
        ChartKind::ListPlot,
        DataExpr::new("animated"),
        &anim_opts,
        SkiaChartBackend::default(),
        source.as_ref(),
    )
    .await?;
    let phase_bus = PhaseBus { source: source.clone(), phase: Mutex::new(0.0), log: RecordingBus::new() };
    let ticks = IntervalStream::new(tokio::time::interval(Duration::from_millis(16))).take(30);
    let frames = plot.run(ticks, source.as_ref(), &phase_bus).await?;
    plot.backend().write_png(out_dir.join("list_plot_animated.png"))?;
    println!("Animated {frames} frames ({} tick events)", phase_bus.log.events().len());

    let _ = plot.destroy();
    let surface = scene.destroy();
    tracing::info!(remaining = surface.len(), "scene destroyed");
    Ok(())
}

fn builtin_scene(table: &Table) -> (GraphicsOptions, GraphicsExpr) {
    let options = GraphicsOptions {
        plot_range: Some(table.plot_range()),
        axes: Some(graphics_core::options::Axes::All(true)),
        ..Default::default()
    };
    let body = GraphicsExpr::List(vec![
        GraphicsExpr::Directive(vec![
            GraphicsExpr::RGBColor(vec![0.12, 0.47, 0.71]),
            GraphicsExpr::AbsoluteThickness(2.0),
            GraphicsExpr::line("series"),
        ]),
        GraphicsExpr::EventListener {
            body: Box::new(GraphicsExpr::Directive(vec![
                GraphicsExpr::Hue(vec![0.0, 0.8, 0.5]),
                GraphicsExpr::PointSize(0.04),
                GraphicsExpr::point("points"),
            ])),
            bindings: vec![(graphics_core::BehaviorKind::Drag, "marker-drag".to_string())],
        },
    ]);
    (options, body)
}

/// Scene file: options JSON, a `---` line, then the body expression JSON.
/// Without the separator the whole file is the body.
fn load_scene(path: &Path) -> Result<(GraphicsOptions, GraphicsExpr)> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read scene '{}'", path.display()))?;
    let (options, body) = text
        .split_once("\n---\n")
        .map(|(o, b)| (o.to_string(), b.to_string()))
        .unwrap_or_else(|| ("{}".to_string(), text.clone()));
    Ok((GraphicsOptions::from_json_str(&options)?, GraphicsExpr::from_json_str(&body)?))
}

fn load_table(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_path(path)?;
    let mut x = Vec::new();
    let mut ys: Vec<Vec<f64>> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let nums: Option<Vec<f64>> = rec.iter().map(|s| s.parse::<f64>().ok()).collect();
        let Some(nums) = nums else { continue };
        let Some((first, rest)) = nums.split_first() else { continue };
        if ys.is_empty() {
            ys = vec![Vec::new(); rest.len()];
        }
        if rest.len() != ys.len() {
            continue;
        }
        x.push(*first);
        for (col, v) in ys.iter_mut().zip(rest) {
            col.push(*v);
        }
    }
    Ok(Table { x, ys })
}
