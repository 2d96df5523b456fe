// File: crates/graphics-core/src/lib.rs
// Summary: Core library entry point; exports shape classification, scene building and chart widgets.

pub mod animation;
pub mod axis;
pub mod chart;
pub mod color;
pub mod env;
pub mod error;
pub mod expr;
pub mod host;
pub mod interaction;
pub mod options;
pub mod path;
pub mod primitive;
pub mod scale;
pub mod scene;
pub mod surface;
pub mod tensor;
pub mod types;

pub use animation::{AnimationDriver, AnimationHandle, TickOutcome};
pub use axis::{Axis, AxisOrient};
pub use chart::{ChartBackend, ChartKind, ChartLayout, ChartSeries, ChartWidget, FrameTransition, RecordingChartBackend, SeriesMode};
pub use color::Color;
pub use env::{Environment, Style};
pub use error::{GraphicsError, Result, RetrievalError};
pub use expr::GraphicsExpr;
pub use host::{DataExpr, DataSource, EventBus, EventPayload, RecordingBus, StaticSource};
pub use interaction::{BehaviorKind, Gesture, InteractionBinding};
pub use options::{ChartOptions, GraphicsOptions};
pub use primitive::{IdentityToken, PrimitiveHandle, PrimitiveKind};
pub use scale::LinearScale;
pub use scene::{Scene, SceneLayout};
pub use surface::{ElementId, Geometry, Paint, RetainedSurface, Transition, VectorSurface};
pub use tensor::{classify, transpose, Rank, Shape, Tensor};
pub use types::{ImageSize, Margin};
