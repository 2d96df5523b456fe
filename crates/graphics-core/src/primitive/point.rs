// File: crates/graphics-core/src/primitive/point.rs
// Summary: Point primitive: circular markers matched to data by position across updates.

use tracing::{debug, warn};

use crate::env::Environment;
use crate::primitive::IdentityToken;
use crate::surface::{ElementId, Geometry, Paint, VectorSurface};
use crate::tensor::{Shape, Tensor};

#[derive(Clone, Debug)]
pub struct PointHandle {
    pub token: IdentityToken,
    pub env: Environment,
    group: Option<ElementId>,
    /// One marker per datum, in data order. `markers.len()` is the recorded point count.
    markers: Vec<ElementId>,
}

/// Marker coordinates for `data`. A flat tensor is a single coordinate;
/// rank-3 data is flattened into one marker set.
fn coordinates(data: &Tensor) -> Option<Vec<[f64; 2]>> {
    let pair = |r: &[f64]| [r.first().copied().unwrap_or(f64::NAN), r.get(1).copied().unwrap_or(f64::NAN)];
    Some(match Shape::of(data)? {
        Shape::Series(v) => vec![pair(&v)],
        Shape::Pairs(pts) => pts,
        Shape::MultiSeries(rows) => rows.iter().map(|r| pair(r)).collect(),
        Shape::MultiPairs(sets) => sets.into_iter().flatten().collect(),
    })
}

impl PointHandle {
    pub fn create(data: &Tensor, env: &Environment, surface: &mut dyn VectorSurface) -> Self {
        let mut handle = Self { token: IdentityToken::fresh(), env: env.clone(), group: None, markers: Vec::new() };
        let Some(points) = coordinates(data) else {
            warn!(token = %handle.token, "Point: unsupported data shape; nothing drawn");
            return handle;
        };
        let paint = handle.env.style.marker_paint();
        for p in &points {
            let id = handle.append_marker(*p, paint.clone(), surface);
            handle.markers.push(id);
        }
        handle
    }

    pub fn npoints(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> &[ElementId] {
        &self.markers
    }

    fn class(&self) -> String {
        format!("dot-{}", self.token)
    }

    fn circle(&self, p: [f64; 2]) -> Geometry {
        Geometry::Circle { cx: self.env.x.apply(p[0]), cy: self.env.y.apply(p[1]), r: self.env.style.marker_radius() }
    }

    fn append_marker(&mut self, p: [f64; 2], paint: Paint, surface: &mut dyn VectorSurface) -> ElementId {
        let group = match self.group {
            Some(g) => g,
            None => {
                let g = surface.append(
                    self.env.layer,
                    Geometry::Group { translate: (0.0, 0.0) },
                    Paint::default(),
                    "",
                );
                self.group = Some(g);
                g
            }
        };
        let id = surface.append(Some(group), self.circle(p), paint, &self.class());
        for b in &self.env.behaviors {
            surface.bind(id, b.clone());
        }
        id
    }

    /// Rebind markers to new data by position.
    ///
    /// Growing appends markers for the extra data under the same transition;
    /// shrinking moves the kept markers and fades out the rest.
    pub fn update(&mut self, data: &Tensor, surface: &mut dyn VectorSurface) {
        let Some(points) = coordinates(data) else {
            warn!(token = %self.token, "Point update: unsupported data shape; ignored");
            return;
        };
        let t = self.env.style.transition;
        let paint = self.env.style.marker_paint();
        let previous = self.markers.len();

        for (id, p) in self.markers.iter().zip(&points) {
            surface.transition(*id, Some(self.circle(*p)), Some(paint.clone()), t);
        }
        if points.len() > previous {
            for p in &points[previous..] {
                let id = self.append_marker(*p, paint.clone(), surface);
                surface.transition(id, Some(self.circle(*p)), Some(paint.clone()), t);
                self.markers.push(id);
            }
        } else if points.len() < previous {
            for id in self.markers.drain(points.len()..) {
                surface.fade_out_and_remove(id, t);
            }
        }
        debug!(token = %self.token, previous, npoints = self.markers.len(), "Point update");
    }

    pub fn destroy(self, surface: &mut dyn VectorSurface) {
        match self.group {
            Some(g) => surface.remove(g),
            None => self.markers.into_iter().for_each(|id| surface.remove(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::LinearScale;
    use crate::surface::{RetainedSurface, TransitionKind};

    fn env() -> Environment {
        Environment::new(
            LinearScale::new((0.0, 10.0), (0.0, 100.0)),
            LinearScale::new((0.0, 10.0), (100.0, 0.0)),
            None,
        )
    }

    fn pts(n: usize) -> Tensor {
        Tensor::from((0..n).map(|i| vec![i as f64, i as f64]).collect::<Vec<_>>())
    }

    #[test]
    fn flat_tensor_is_one_point() {
        let mut s = RetainedSurface::new();
        let h = PointHandle::create(&Tensor::from(vec![5.0, 5.0]), &env(), &mut s);
        assert_eq!(h.npoints(), 1);
        assert_eq!(s.geometry(h.markers()[0]), Some(&Geometry::Circle { cx: 50.0, cy: 50.0, r: env().style.marker_radius() }));
    }

    #[test]
    fn equal_update_moves_every_marker() {
        let mut s = RetainedSurface::new();
        let mut h = PointHandle::create(&pts(3), &env(), &mut s);
        let before = h.markers().to_vec();
        h.update(&Tensor::from(vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![9.0, 9.0]]), &mut s);
        assert_eq!(h.markers(), &before[..]);
        assert_eq!(s.transitions().len(), 3);
        assert!(s.transitions().iter().all(|r| r.kind == TransitionKind::Update));
        assert_eq!(s.geometry(before[2]), Some(&Geometry::Circle { cx: 90.0, cy: 10.0, r: env().style.marker_radius() }));
    }

    #[test]
    fn destroy_removes_group() {
        let mut s = RetainedSurface::new();
        let h = PointHandle::create(&pts(4), &env(), &mut s);
        assert_eq!(s.len(), 5);
        h.destroy(&mut s);
        assert!(s.is_empty());
    }
}
