// File: crates/graphics-core/src/tensor.rs
// Summary: Nested numeric data as delivered by the interpreter, rank classification and transpose.

use serde::{Deserialize, Serialize};

/// Nested numeric sequence of homogeneous depth (rank 1..=3 is drawable).
///
/// Deserializes from plain JSON: `[1, 2]`, `[[0, 0], [1, 1]]`, ...
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tensor {
    Number(f64),
    List(Vec<Tensor>),
}

impl Tensor {
    pub fn as_list(&self) -> Option<&[Tensor]> {
        match self {
            Tensor::List(items) => Some(items),
            Tensor::Number(_) => None,
        }
    }

    /// Number of items at the outermost level (0 for a scalar).
    pub fn len(&self) -> usize {
        self.as_list().map_or(0, <[Tensor]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn number_or_nan(&self) -> f64 {
        match self {
            Tensor::Number(v) => *v,
            Tensor::List(_) => f64::NAN,
        }
    }

    fn flat_numbers(&self) -> Vec<f64> {
        match self {
            Tensor::Number(v) => vec![*v],
            Tensor::List(items) => items.iter().map(Tensor::number_or_nan).collect(),
        }
    }

    fn pair(&self) -> [f64; 2] {
        match self {
            Tensor::Number(v) => [*v, f64::NAN],
            Tensor::List(items) => [
                items.first().map_or(f64::NAN, Tensor::number_or_nan),
                items.get(1).map_or(f64::NAN, Tensor::number_or_nan),
            ],
        }
    }
}

impl From<f64> for Tensor {
    fn from(v: f64) -> Self {
        Tensor::Number(v)
    }
}

impl<T: Into<Tensor>> From<Vec<T>> for Tensor {
    fn from(items: Vec<T>) -> Self {
        Tensor::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<[f64; 2]> for Tensor {
    fn from(p: [f64; 2]) -> Self {
        Tensor::List(vec![Tensor::Number(p[0]), Tensor::Number(p[1])])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    One = 1,
    Two = 2,
    Three = 3,
}

/// Nesting depth of `tensor`, judged from the first element at each level only.
///
/// This is a heuristic, not a validator: ragged input is not rejected.
/// Scalars, empty lists and anything deeper than three levels yield `None`.
pub fn classify(tensor: &Tensor) -> Option<Rank> {
    let first = tensor.as_list()?.first()?;
    let second = match first {
        Tensor::Number(_) => return Some(Rank::One),
        Tensor::List(items) => items.first()?,
    };
    let third = match second {
        Tensor::Number(_) => return Some(Rank::Two),
        Tensor::List(items) => items.first()?,
    };
    match third {
        Tensor::Number(_) => Some(Rank::Three),
        Tensor::List(_) => None,
    }
}

/// Geometric reading of a classified tensor.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Rank 1: one series of scalars.
    Series(Vec<f64>),
    /// Rank 2 whose first row has exactly two entries: one `[x, y]` series.
    Pairs(Vec<[f64; 2]>),
    /// Rank 2 otherwise: independent scalar series.
    MultiSeries(Vec<Vec<f64>>),
    /// Rank 3: a set of `[x, y]` series.
    MultiPairs(Vec<Vec<[f64; 2]>>),
}

impl Shape {
    pub fn of(tensor: &Tensor) -> Option<Shape> {
        let rank = classify(tensor)?;
        let items = tensor.as_list()?;
        Some(match rank {
            Rank::One => Shape::Series(items.iter().map(Tensor::number_or_nan).collect()),
            Rank::Two if items[0].len() == 2 => Shape::Pairs(items.iter().map(Tensor::pair).collect()),
            Rank::Two => Shape::MultiSeries(items.iter().map(Tensor::flat_numbers).collect()),
            Rank::Three => Shape::MultiPairs(
                items
                    .iter()
                    .map(|s| s.as_list().unwrap_or_default().iter().map(Tensor::pair).collect())
                    .collect(),
            ),
        })
    }

    pub fn rank(&self) -> Rank {
        match self {
            Shape::Series(_) => Rank::One,
            Shape::Pairs(_) | Shape::MultiSeries(_) => Rank::Two,
            Shape::MultiPairs(_) => Rank::Three,
        }
    }
}

/// Columns of `rows`: `out[i][j] == rows[j][i]`.
///
/// The input is only borrowed; the result is a fresh allocation. Rows shorter
/// than the first one contribute NaN.
pub fn transpose<R: AsRef<[f64]>>(rows: &[R]) -> Vec<Vec<f64>> {
    let width = rows.first().map_or(0, |r| r.as_ref().len());
    (0..width)
        .map(|j| rows.iter().map(|r| r.as_ref().get(j).copied().unwrap_or(f64::NAN)).collect())
        .collect()
}
