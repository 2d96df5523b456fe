// File: crates/graphics-core/src/scene.rs
// Summary: Scene construction (size, margins, scales, axes, environment) and evaluation of
// the graphics expression tree; keeps the primitives it drew for later reconciliation.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tracing::{debug, error};

use crate::axis::Axis;
use crate::color::Color;
use crate::env::Environment;
use crate::error::Result;
use crate::expr::GraphicsExpr;
use crate::host::{DataExpr, DataSource, EventBus};
use crate::interaction::{Gesture, InteractionBinding};
use crate::options::GraphicsOptions;
use crate::primitive::{IdentityToken, PrimitiveHandle, PrimitiveKind};
use crate::scale::LinearScale;
use crate::surface::{ElementId, Geometry, Paint, RetainedSurface, VectorSurface};
use crate::tensor::Tensor;
use crate::types::{ImageSize, Margin};

/// Pixel geometry of a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    /// Full surface size including margins.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Plotting area inside the margins.
    pub plot_width: f64,
    pub plot_height: f64,
}

impl SceneLayout {
    pub fn new(image: [f64; 2], margin: Margin) -> Self {
        let plot_width = image[0] - margin.hsum();
        let plot_height = image[1] - margin.vsum();
        Self { width: plot_width + margin.hsum(), height: plot_height + margin.vsum(), margin, plot_width, plot_height }
    }
}

/// A primitive drawn by the scene, with the expression its data came from.
#[derive(Clone, Debug)]
pub struct PrimitiveEntry {
    pub expr: DataExpr,
    pub handle: PrimitiveHandle,
}

/// One evaluated `Graphics` expression and the surface it drew into.
///
/// Axes and scales are fixed for the scene's lifetime; only primitives are
/// reconciled afterwards.
pub struct Scene<S: VectorSurface> {
    surface: S,
    layout: SceneLayout,
    root: ElementId,
    axes: Vec<ElementId>,
    x: LinearScale,
    y: LinearScale,
    env: Environment,
    primitives: IndexMap<IdentityToken, PrimitiveEntry>,
    bus: Arc<dyn EventBus>,
}

fn axis_paint() -> Paint {
    Paint { stroke: Some(Color::black()), stroke_width: 1.0, fill: None, opacity: 1.0 }
}

impl<S: VectorSurface> Scene<S> {
    /// Lay out the scene in `container` and draw Epilog, `body`, then Prolog,
    /// all under one environment.
    ///
    /// Retrieval errors from `source` propagate unchanged.
    pub async fn build(
        options: &GraphicsOptions,
        body: &GraphicsExpr,
        mut container: S,
        source: &dyn DataSource,
        bus: Arc<dyn EventBus>,
    ) -> Result<Self> {
        let layout = SceneLayout::new(ImageSize::resolve(options.image_size, options.aspect_ratio), Margin::default());
        container.set_size(layout.width, layout.height);
        let root = container.append(
            None,
            Geometry::Group { translate: (layout.margin.left, layout.margin.top) },
            Paint::default(),
            "scene",
        );

        let [rx, ry] = options.plot_range_or_default();
        let x = LinearScale::new((rx[0], rx[1]), (0.0, layout.plot_width));
        let y = LinearScale::new((ry[0], ry[1]), (layout.plot_height, 0.0));

        let mut axes = Vec::new();
        let [show_x, show_y] = options.axis_flags();
        if show_x {
            let g = container.append(Some(root), Geometry::Group { translate: (0.0, layout.plot_height) }, Paint::default(), "axis-x");
            container.append(Some(g), Geometry::Axis(Axis::bottom(&x)), axis_paint(), "axis");
            axes.push(g);
        }
        if show_y {
            let g = container.append(Some(root), Geometry::Group { translate: (0.0, 0.0) }, Paint::default(), "axis-y");
            container.append(Some(g), Geometry::Axis(Axis::left(&y)), axis_paint(), "axis");
            axes.push(g);
        }

        let mut env = Environment::new(x, y, Some(root));
        if let Some(ms) = options.transition_duration {
            env.style.transition.duration_ms = ms;
        }

        let mut scene = Self {
            surface: container,
            layout,
            root,
            axes,
            x,
            y,
            env: env.clone(),
            primitives: IndexMap::new(),
            bus,
        };
        debug!(width = layout.width, height = layout.height, ?rx, ?ry, "scene layout");

        if let Some(epilog) = &options.epilog {
            scene.eval(epilog, &mut env, source).await?;
        }
        scene.eval(body, &mut env, source).await?;
        if let Some(prolog) = &options.prolog {
            scene.eval(prolog, &mut env, source).await?;
        }
        scene.env = env;
        Ok(scene)
    }

    fn eval<'a>(
        &'a mut self,
        expr: &'a GraphicsExpr,
        env: &'a mut Environment,
        source: &'a dyn DataSource,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match expr {
                GraphicsExpr::List(items) | GraphicsExpr::Annotation(items) => {
                    for item in items {
                        let mut child = env.clone();
                        self.eval(item, &mut child, source).await?;
                    }
                }
                GraphicsExpr::Directive(items) => {
                    for item in items {
                        self.eval(item, env, source).await?;
                    }
                }
                GraphicsExpr::Line(data) => self.draw(PrimitiveKind::Line, data, env, source).await?,
                GraphicsExpr::Point(data) => self.draw(PrimitiveKind::Point, data, env, source).await?,
                GraphicsExpr::AbsoluteThickness(w) => env.set_thickness(*w),
                GraphicsExpr::PointSize(s) => env.set_point_size(*s),
                GraphicsExpr::Opacity(o) => env.set_opacity(*o),
                GraphicsExpr::RGBColor(channels) => {
                    if let Err(e) = env.set_rgb(channels) {
                        error!("{e}");
                    }
                }
                GraphicsExpr::Hue(channels) => {
                    if let Err(e) = env.set_hue(channels) {
                        error!("{e}");
                    }
                }
                GraphicsExpr::EventListener { body, bindings } => {
                    let behaviors = bindings
                        .iter()
                        .map(|(kind, key)| InteractionBinding::new(*kind, key.clone(), env.x, env.y, self.bus.clone()))
                        .collect();
                    let mut child = env.with_behaviors(behaviors);
                    self.eval(body, &mut child, source).await?;
                }
                GraphicsExpr::Inert(_) => {}
            }
            Ok(())
        })
    }

    async fn draw(&mut self, kind: PrimitiveKind, expr: &DataExpr, env: &Environment, source: &dyn DataSource) -> Result<()> {
        let data = source.retrieve(expr).await?;
        let handle = kind.create(&data, env, &mut self.surface);
        debug!(?kind, token = %handle.token(), count = handle.cardinality(), %expr, "primitive created");
        self.primitives.insert(handle.token().clone(), PrimitiveEntry { expr: expr.clone(), handle });
        Ok(())
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn scales(&self) -> (LinearScale, LinearScale) {
        (self.x, self.y)
    }

    /// Root group all scene elements live under.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Axis groups, X first when both are shown.
    pub fn axes(&self) -> &[ElementId] {
        &self.axes
    }

    /// Environment as left by the top-level evaluation.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tokens of the drawn primitives, in drawing order.
    pub fn tokens(&self) -> impl Iterator<Item = &IdentityToken> {
        self.primitives.keys()
    }

    pub fn primitive(&self, token: &IdentityToken) -> Option<&PrimitiveHandle> {
        self.primitives.get(token).map(|e| &e.handle)
    }

    /// Reconcile one primitive against data the caller already holds.
    /// Returns false for an unknown token.
    pub fn update_with(&mut self, token: &IdentityToken, data: &Tensor) -> bool {
        match self.primitives.get_mut(token) {
            Some(entry) => {
                entry.handle.update(data, &mut self.surface);
                true
            }
            None => false,
        }
    }

    /// Re-retrieve one primitive's data and reconcile it.
    pub async fn update(&mut self, token: &IdentityToken, source: &dyn DataSource) -> Result<bool> {
        let Some(expr) = self.primitives.get(token).map(|e| e.expr.clone()) else {
            return Ok(false);
        };
        let data = source.retrieve(&expr).await?;
        Ok(self.update_with(token, &data))
    }

    /// Re-retrieve and reconcile every primitive, in drawing order.
    pub async fn refresh(&mut self, source: &dyn DataSource) -> Result<()> {
        let tokens: Vec<IdentityToken> = self.primitives.keys().cloned().collect();
        for token in &tokens {
            self.update(token, source).await?;
        }
        Ok(())
    }

    /// Destroy one primitive, removing its elements.
    pub fn remove_primitive(&mut self, token: &IdentityToken) -> bool {
        match self.primitives.shift_remove(token) {
            Some(entry) => {
                entry.handle.destroy(&mut self.surface);
                true
            }
            None => false,
        }
    }

    /// Remove every element the scene created and hand the container back.
    pub fn destroy(mut self) -> S {
        for (_, entry) in self.primitives.drain(..) {
            entry.handle.destroy(&mut self.surface);
        }
        self.surface.remove(self.root);
        self.surface
    }
}

impl Scene<RetainedSurface> {
    /// Deliver a host pointer gesture to the behaviours bound on `id`.
    pub fn dispatch(&mut self, id: ElementId, gesture: Gesture) -> bool {
        self.surface.dispatch(id, gesture)
    }
}
