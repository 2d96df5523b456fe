// File: crates/graphics-core/src/primitive/line.rs
// Summary: Line primitive: one path for an [x, y] series, one path per series for rank-3 data.

use tracing::{debug, warn};

use crate::env::Environment;
use crate::path::LineGenerator;
use crate::primitive::IdentityToken;
use crate::surface::{ElementId, Geometry, VectorSurface};
use crate::tensor::{Shape, Tensor};

#[derive(Clone, Debug, PartialEq)]
pub enum LineElements {
    /// Nothing drawn (unsupported data shape at creation).
    Empty,
    /// Rank-2 data: a single path.
    Single(ElementId),
    /// Rank-3 data: one path per series. `paths.len() == nsets` and never shrinks.
    Multi { paths: Vec<ElementId>, nsets: usize },
}

#[derive(Clone, Debug)]
pub struct LineHandle {
    pub token: IdentityToken,
    pub env: Environment,
    generator: LineGenerator,
    elements: LineElements,
}

/// `[x, y]` pairs of a rank-2 shape; rows longer than two use their first two entries.
fn rank2_pairs(shape: &Shape) -> Option<Vec<[f64; 2]>> {
    match shape {
        Shape::Pairs(pts) => Some(pts.clone()),
        Shape::MultiSeries(rows) => Some(
            rows.iter()
                .map(|r| [r.first().copied().unwrap_or(f64::NAN), r.get(1).copied().unwrap_or(f64::NAN)])
                .collect(),
        ),
        _ => None,
    }
}

impl LineHandle {
    pub fn create(data: &Tensor, env: &Environment, surface: &mut dyn VectorSurface) -> Self {
        let token = IdentityToken::fresh();
        let generator = env.line_generator();
        let paint = env.style.line_paint();
        let shape = Shape::of(data);

        let elements = match shape.as_ref() {
            Some(Shape::MultiPairs(sets)) => {
                let paths: Vec<ElementId> = sets
                    .iter()
                    .enumerate()
                    .map(|(i, set)| {
                        let class = format!("line-{token}{i}");
                        surface.append(env.layer, Geometry::Path(generator.path(set)), paint.clone(), &class)
                    })
                    .collect();
                LineElements::Multi { nsets: paths.len(), paths }
            }
            Some(s) => match rank2_pairs(s) {
                Some(pts) => {
                    let class = format!("line-{token}");
                    LineElements::Single(surface.append(env.layer, Geometry::Path(generator.path(&pts)), paint, &class))
                }
                None => {
                    warn!(%token, "Line: rank-1 data has no [x, y] pairs; nothing drawn");
                    LineElements::Empty
                }
            },
            None => {
                warn!(%token, "Line: unsupported data shape; nothing drawn");
                LineElements::Empty
            }
        };

        Self { token, env: env.clone(), generator, elements }
    }

    pub fn elements(&self) -> &LineElements {
        &self.elements
    }

    /// Series count recorded for reconciliation (1 for a single path).
    pub fn nsets(&self) -> usize {
        match &self.elements {
            LineElements::Empty => 0,
            LineElements::Single(_) => 1,
            LineElements::Multi { nsets, .. } => *nsets,
        }
    }

    /// Rebind new data to the existing paths.
    ///
    /// For rank-3 data the path count only grows: surplus paths from a larger
    /// earlier update are kept and redirected to draw series 0.
    pub fn update(&mut self, data: &Tensor, surface: &mut dyn VectorSurface) {
        let t = self.env.style.transition;
        let Some(shape) = Shape::of(data) else {
            warn!(token = %self.token, "Line update: unsupported data shape; ignored");
            return;
        };

        match (&mut self.elements, &shape) {
            (LineElements::Multi { paths, nsets }, Shape::MultiPairs(sets)) => {
                let n = sets.len();
                for (i, set) in sets.iter().enumerate().take(n.min(*nsets)) {
                    surface.transition(paths[i], Some(Geometry::Path(self.generator.path(set))), None, t);
                }
                if n > *nsets {
                    let fresh = self.env.line_generator();
                    for (i, set) in sets.iter().enumerate().skip(*nsets) {
                        let class = format!("line-{}{}", self.token, i);
                        let id = surface.append(
                            self.env.layer,
                            Geometry::Path(Default::default()),
                            self.env.style.line_paint(),
                            &class,
                        );
                        surface.transition(id, Some(Geometry::Path(fresh.path(set))), None, t);
                        paths.push(id);
                    }
                }
                if n < *nsets {
                    if let Some(first) = sets.first() {
                        let path = self.generator.path(first);
                        for id in &paths[n..] {
                            surface.transition(*id, Some(Geometry::Path(path.clone())), None, t);
                        }
                    }
                }
                *nsets = n.max(*nsets);
                debug!(token = %self.token, series = n, nsets = *nsets, "Line update");
            }
            (LineElements::Single(id), s) => match rank2_pairs(s) {
                Some(pts) => surface.transition(*id, Some(Geometry::Path(self.generator.path(&pts))), None, t),
                None => debug!(token = %self.token, rank = ?s.rank(), "Line update: rank differs from created line; ignored"),
            },
            (_, s) => debug!(token = %self.token, rank = ?s.rank(), "Line update: rank differs from created line; ignored"),
        }
    }

    pub fn destroy(self, surface: &mut dyn VectorSurface) {
        match self.elements {
            LineElements::Empty => {}
            LineElements::Single(id) => surface.remove(id),
            LineElements::Multi { paths, .. } => paths.into_iter().for_each(|id| surface.remove(id)),
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

    fn series(k: f64) -> Vec<Vec<f64>> {
        vec![vec![0.0, k], vec![10.0, k]]
    }

    fn path_of(surface: &RetainedSurface, id: ElementId) -> Vec<(f64, f64)> {
        match surface.geometry(id) {
            Some(Geometry::Path(p)) => p.points.clone(),
            other => panic!("not a path: {other:?}"),
        }
    }

    #[test]
    fn single_path_updates_in_place() {
        let mut s = RetainedSurface::new();
        let mut h = LineHandle::create(&Tensor::from(series(1.0)), &env(), &mut s);
        let LineElements::Single(id) = *h.elements() else { panic!("expected single path") };
        assert_eq!(s.select_class(&format!("line-{}", h.token)), vec![id]);

        h.update(&Tensor::from(series(5.0)), &mut s);
        assert_eq!(s.len(), 1);
        assert_eq!(path_of(&s, id), vec![(0.0, 50.0), (100.0, 50.0)]);
        assert_eq!(s.transitions()[0].kind, TransitionKind::Update);
        assert_eq!(s.transitions()[0].transition.duration_ms, 300);
    }

    #[test]
    fn multi_series_grow_appends_paths() {
        let mut s = RetainedSurface::new();
        let mut h = LineHandle::create(&Tensor::from(vec![series(1.0)]), &env(), &mut s);
        assert_eq!(h.nsets(), 1);
        h.update(&Tensor::from(vec![series(1.0), series(2.0), series(3.0)]), &mut s);
        assert_eq!(h.nsets(), 3);
        assert_eq!(s.len(), 3);
        let third = s.select_class(&format!("line-{}2", h.token));
        assert_eq!(third.len(), 1);
        assert_eq!(path_of(&s, third[0]), vec![(0.0, 70.0), (100.0, 70.0)]);
    }

    #[test]
    fn rank1_draws_nothing() {
        let mut s = RetainedSurface::new();
        let h = LineHandle::create(&Tensor::from(vec![1.0, 2.0, 3.0]), &env(), &mut s);
        assert!(s.is_empty());
        assert_eq!(h.nsets(), 0);
    }

    #[test]
    fn mismatched_rank_update_is_ignored() {
        let mut s = RetainedSurface::new();
        let mut h = LineHandle::create(&Tensor::from(series(1.0)), &env(), &mut s);
        h.update(&Tensor::from(vec![series(2.0), series(3.0)]), &mut s);
        assert!(s.transitions().is_empty());
        assert_eq!(h.nsets(), 1);
    }
}
