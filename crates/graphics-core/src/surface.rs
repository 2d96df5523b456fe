// File: crates/graphics-core/src/surface.rs
// Summary: Vector-graphics surface interface (element tree, transitions, gesture binding)
// and a retained in-memory implementation used headless and by the raster backend.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::axis::Axis;
use crate::color::Color;
use crate::interaction::{Gesture, InteractionBinding};
use crate::path::PathData;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Container translated by `translate` pixels.
    Group { translate: (f64, f64) },
    Path(PathData),
    Circle { cx: f64, cy: f64, r: f64 },
    /// Tick axis drawn at the group origin (bottom axes are placed by their parent group).
    Axis(Axis),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    /// `None` means no stroke.
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    /// `None` means no fill.
    pub fill: Option<Color>,
    pub opacity: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self { stroke: None, stroke_width: 1.0, fill: None, opacity: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicInOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration_ms: u64) -> Self {
        Self { duration_ms, easing: Easing::CubicInOut }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(300)
    }
}

/// Rendering surface a scene draws into (the vector-graphics backend).
///
/// Elements are addressed by id and also carry a class token so a primitive's
/// elements can be found again from its identity token.
pub trait VectorSurface: Send {
    fn set_size(&mut self, width: f64, height: f64);
    fn append(&mut self, parent: Option<ElementId>, geometry: Geometry, paint: Paint, class: &str) -> ElementId;
    /// Apply immediately.
    fn set(&mut self, id: ElementId, geometry: Option<Geometry>, paint: Option<Paint>);
    /// Animate towards the given state.
    fn transition(&mut self, id: ElementId, geometry: Option<Geometry>, paint: Option<Paint>, t: Transition);
    /// Animate opacity to zero, then remove the element.
    fn fade_out_and_remove(&mut self, id: ElementId, t: Transition);
    /// Remove the element and its descendants.
    fn remove(&mut self, id: ElementId);
    /// Move the element to the top of the paint order.
    fn raise(&mut self, id: ElementId);
    fn bind(&mut self, id: ElementId, binding: InteractionBinding);
    fn geometry(&self, id: ElementId) -> Option<&Geometry>;
    fn paint(&self, id: ElementId) -> Option<&Paint>;
    fn select_class(&self, class: &str) -> Vec<ElementId>;
}

#[derive(Clone, Debug)]
pub struct Element {
    pub id: ElementId,
    pub parent: Option<ElementId>,
    pub class: String,
    pub geometry: Geometry,
    pub paint: Paint,
    pub bindings: Vec<InteractionBinding>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Update,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRecord {
    pub element: ElementId,
    pub kind: TransitionKind,
    pub transition: Transition,
}

/// Surface that keeps the element tree in memory, in paint order.
///
/// Transitions jump straight to their end state and are logged, so callers
/// (and tests) can observe what was animated versus created or removed.
#[derive(Debug, Default)]
pub struct RetainedSurface {
    size: (f64, f64),
    next_id: u64,
    elements: IndexMap<ElementId, Element>,
    log: Vec<TransitionRecord>,
}

impl RetainedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// All elements in paint order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Direct children of `parent` (`None` for top level), in paint order.
    pub fn children(&self, parent: Option<ElementId>) -> impl Iterator<Item = &Element> {
        self.elements.values().filter(move |e| e.parent == parent)
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.log
    }

    pub fn clear_transitions(&mut self) {
        self.log.clear();
    }

    /// Deliver a host pointer gesture to the behaviours bound on `id`.
    /// Returns false when nothing is bound there.
    pub fn dispatch(&mut self, id: ElementId, gesture: Gesture) -> bool {
        let bindings = match self.elements.get(&id) {
            Some(e) if !e.bindings.is_empty() => e.bindings.clone(),
            _ => return false,
        };
        for b in &bindings {
            b.handle(gesture, id, self);
        }
        true
    }

    fn apply(&mut self, id: ElementId, geometry: Option<Geometry>, paint: Option<Paint>) {
        if let Some(e) = self.elements.get_mut(&id) {
            if let Some(g) = geometry {
                e.geometry = g;
            }
            if let Some(p) = paint {
                e.paint = p;
            }
        }
    }

    /// `id` and everything below it, gathered with one pass over the tree.
    fn descendants(&self, id: ElementId) -> HashSet<ElementId> {
        let mut children: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
        for e in self.elements.values() {
            if let Some(p) = e.parent {
                children.entry(p).or_default().push(e.id);
            }
        }
        let mut out = HashSet::from([id]);
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            for &c in children.get(&cur).into_iter().flatten() {
                if out.insert(c) {
                    stack.push(c);
                }
            }
        }
        out
    }
}

impl VectorSurface for RetainedSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    fn append(&mut self, parent: Option<ElementId>, geometry: Geometry, paint: Paint, class: &str) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.elements.insert(
            id,
            Element { id, parent, class: class.to_string(), geometry, paint, bindings: Vec::new() },
        );
        id
    }

    fn set(&mut self, id: ElementId, geometry: Option<Geometry>, paint: Option<Paint>) {
        self.apply(id, geometry, paint);
    }

    fn transition(&mut self, id: ElementId, geometry: Option<Geometry>, paint: Option<Paint>, t: Transition) {
        if !self.elements.contains_key(&id) {
            return;
        }
        self.apply(id, geometry, paint);
        self.log.push(TransitionRecord { element: id, kind: TransitionKind::Update, transition: t });
    }

    fn fade_out_and_remove(&mut self, id: ElementId, t: Transition) {
        if !self.elements.contains_key(&id) {
            return;
        }
        self.log.push(TransitionRecord { element: id, kind: TransitionKind::Exit, transition: t });
        self.remove(id);
    }

    fn remove(&mut self, id: ElementId) {
        if !self.elements.contains_key(&id) {
            return;
        }
        let doomed = self.descendants(id);
        self.elements.retain(|k, _| !doomed.contains(k));
    }

    fn raise(&mut self, id: ElementId) {
        if let Some(e) = self.elements.shift_remove(&id) {
            self.elements.insert(id, e);
        }
    }

    fn bind(&mut self, id: ElementId, binding: InteractionBinding) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.bindings.push(binding);
        }
    }

    fn geometry(&self, id: ElementId) -> Option<&Geometry> {
        self.elements.get(&id).map(|e| &e.geometry)
    }

    fn paint(&self, id: ElementId) -> Option<&Paint> {
        self.elements.get(&id).map(|e| &e.paint)
    }

    fn select_class(&self, class: &str) -> Vec<ElementId> {
        self.elements.values().filter(|e| e.class == class).map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_takes_descendants() {
        let mut s = RetainedSurface::new();
        let g = s.append(None, Geometry::Group { translate: (0.0, 0.0) }, Paint::default(), "root");
        let c = s.append(Some(g), Geometry::Circle { cx: 1.0, cy: 1.0, r: 1.0 }, Paint::default(), "dot");
        let other = s.append(None, Geometry::Group { translate: (0.0, 0.0) }, Paint::default(), "other");
        s.remove(g);
        assert!(s.element(c).is_none());
        assert!(s.element(other).is_some());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn remove_finds_children_painted_before_their_group() {
        let mut s = RetainedSurface::new();
        let g = s.append(None, Geometry::Group { translate: (0.0, 0.0) }, Paint::default(), "markers");
        let inner = s.append(Some(g), Geometry::Group { translate: (0.0, 0.0) }, Paint::default(), "inner");
        for i in 0..500 {
            s.append(Some(inner), Geometry::Circle { cx: i as f64, cy: 0.0, r: 1.0 }, Paint::default(), "dot");
        }
        s.raise(g);
        let keep = s.append(None, Geometry::Circle { cx: 0.0, cy: 0.0, r: 1.0 }, Paint::default(), "keep");
        s.remove(g);
        assert_eq!(s.elements().map(|e| e.id).collect::<Vec<_>>(), vec![keep]);
    }

    #[test]
    fn raise_moves_to_end_and_transitions_are_logged() {
        let mut s = RetainedSurface::new();
        let a = s.append(None, Geometry::Circle { cx: 0.0, cy: 0.0, r: 1.0 }, Paint::default(), "a");
        let b = s.append(None, Geometry::Circle { cx: 0.0, cy: 0.0, r: 1.0 }, Paint::default(), "b");
        s.raise(a);
        assert_eq!(s.elements().map(|e| e.id).collect::<Vec<_>>(), vec![b, a]);

        s.transition(b, Some(Geometry::Circle { cx: 5.0, cy: 5.0, r: 1.0 }), None, Transition::new(300));
        s.fade_out_and_remove(a, Transition::new(300));
        let kinds: Vec<_> = s.transitions().iter().map(|r| (r.element, r.kind)).collect();
        assert_eq!(kinds, vec![(b, TransitionKind::Update), (a, TransitionKind::Exit)]);
        assert_eq!(s.geometry(b), Some(&Geometry::Circle { cx: 5.0, cy: 5.0, r: 1.0 }));
        assert!(s.select_class("a").is_empty());
    }
}
