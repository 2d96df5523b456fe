// File: crates/graphics-core/src/interaction.rs
// Summary: Pointer behaviours (drag, zoom) bound to primitive elements, reporting in data space.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::host::{EventBus, EventPayload};
use crate::scale::LinearScale;
use crate::surface::{ElementId, Geometry, VectorSurface};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorKind {
    Drag,
    Zoom,
}

/// Pointer gesture delivered by the host, in the plot group's screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    DragStart,
    Drag { x: f64, y: f64 },
    DragEnd,
    Zoom { k: f64 },
}

/// One behaviour generator: closes over the active scales and the key it reports under.
///
/// Holds no state of its own beyond the closure; every effect goes to the bus.
#[derive(Clone)]
pub struct InteractionBinding {
    pub kind: BehaviorKind,
    pub key: String,
    pub x: LinearScale,
    pub y: LinearScale,
    bus: Arc<dyn EventBus>,
}

impl fmt::Debug for InteractionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionBinding").field("kind", &self.kind).field("key", &self.key).finish()
    }
}

impl InteractionBinding {
    pub fn new(kind: BehaviorKind, key: impl Into<String>, x: LinearScale, y: LinearScale, bus: Arc<dyn EventBus>) -> Self {
        Self { kind, key: key.into(), x, y, bus }
    }

    /// React to `gesture` on `element`. Gestures of the other kind are ignored.
    pub fn handle(&self, gesture: Gesture, element: ElementId, surface: &mut dyn VectorSurface) {
        match (self.kind, gesture) {
            (BehaviorKind::Drag, Gesture::DragStart) => {
                surface.raise(element);
                if let Some(mut paint) = surface.paint(element).cloned() {
                    paint.stroke = Some(Color::black());
                    surface.set(element, None, Some(paint));
                }
            }
            (BehaviorKind::Drag, Gesture::Drag { x, y }) => {
                if let Some(Geometry::Circle { r, .. }) = surface.geometry(element).cloned() {
                    surface.set(element, Some(Geometry::Circle { cx: x, cy: y, r }), None);
                }
                self.bus.emit(&self.key, EventPayload::Point { x: self.x.invert(x), y: self.y.invert(y) });
            }
            (BehaviorKind::Drag, Gesture::DragEnd) => {
                if let Some(mut paint) = surface.paint(element).cloned() {
                    paint.stroke = None;
                    surface.set(element, None, Some(paint));
                }
            }
            (BehaviorKind::Zoom, Gesture::Zoom { k }) => {
                self.bus.emit(&self.key, EventPayload::Scalar(k));
            }
            _ => {}
        }
    }
}
