// File: crates/graphics-core/src/primitive/mod.rs
// Summary: Drawable primitives (Line, Point) with a uniform create/update/destroy interface.
// Notes:
// - `create` draws and returns a handle that owns the primitive's state (identity
//   token, element ids, cardinality). `update` reconciles new data against that
//   state in place; elements are reused by position instead of recreated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::Environment;
use crate::surface::VectorSurface;
use crate::tensor::Tensor;

pub mod line;
pub mod point;

pub use line::LineHandle;
pub use point::PointHandle;

/// Opaque token binding a primitive instance to its rendered elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Random 128-bit token, hex encoded.
    pub fn fresh() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Line,
    Point,
}

impl PrimitiveKind {
    /// Whether instances can be updated in place after creation.
    pub fn is_virtual(self) -> bool {
        match self {
            PrimitiveKind::Line | PrimitiveKind::Point => true,
        }
    }

    pub fn create(self, data: &Tensor, env: &Environment, surface: &mut dyn VectorSurface) -> PrimitiveHandle {
        match self {
            PrimitiveKind::Line => PrimitiveHandle::Line(LineHandle::create(data, env, surface)),
            PrimitiveKind::Point => PrimitiveHandle::Point(PointHandle::create(data, env, surface)),
        }
    }
}

/// State of one drawn primitive, returned by `create` and passed back to `update`.
#[derive(Clone, Debug)]
pub enum PrimitiveHandle {
    Line(LineHandle),
    Point(PointHandle),
}

impl PrimitiveHandle {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveHandle::Line(_) => PrimitiveKind::Line,
            PrimitiveHandle::Point(_) => PrimitiveKind::Point,
        }
    }

    pub fn token(&self) -> &IdentityToken {
        match self {
            PrimitiveHandle::Line(h) => &h.token,
            PrimitiveHandle::Point(h) => &h.token,
        }
    }

    /// Number of series (Line) or markers (Point) currently tracked.
    pub fn cardinality(&self) -> usize {
        match self {
            PrimitiveHandle::Line(h) => h.nsets(),
            PrimitiveHandle::Point(h) => h.npoints(),
        }
    }

    pub fn update(&mut self, data: &Tensor, surface: &mut dyn VectorSurface) {
        match self {
            PrimitiveHandle::Line(h) => h.update(data, surface),
            PrimitiveHandle::Point(h) => h.update(data, surface),
        }
    }

    pub fn destroy(self, surface: &mut dyn VectorSurface) {
        match self {
            PrimitiveHandle::Line(h) => h.destroy(surface),
            PrimitiveHandle::Point(h) => h.destroy(surface),
        }
    }

    /// Environment snapshot the primitive was created under.
    pub fn env(&self) -> &Environment {
        match self {
            PrimitiveHandle::Line(h) => &h.env,
            PrimitiveHandle::Point(h) => &h.env,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        let a = IdentityToken::fresh();
        let b = IdentityToken::fresh();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }
}
