// File: crates/graphics-core/src/scale.rs
// Summary: Invertible linear scale mapping a data domain onto a pixel range, with nice ticks.

use serde::{Deserialize, Serialize};

/// Data-space coordinate.
pub type Value = f64;
/// Screen-space coordinate in pixels.
pub type Pixel = f64;

/// Monotonic mapping `domain -> range` and its inverse.
///
/// The range may be inverted (`range.0 > range.1`), which is how the Y axis is
/// built: data Y grows upward, screen Y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (Value, Value),
    pub range: (Pixel, Pixel),
}

impl LinearScale {
    pub fn new(domain: (Value, Value), range: (Pixel, Pixel)) -> Self {
        Self { domain, range }
    }

    #[inline]
    fn span(&self) -> f64 {
        self.domain.1 - self.domain.0
    }

    #[inline]
    pub fn apply(&self, x: Value) -> Pixel {
        let span = self.span();
        if span == 0.0 {
            return self.range.0;
        }
        self.range.0 + (x - self.domain.0) / span * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: Pixel) -> Value {
        let extent = self.range.1 - self.range.0;
        if extent == 0.0 {
            return self.domain.0;
        }
        self.domain.0 + (px - self.range.0) / extent * self.span()
    }

    /// Roughly `count` round values inside the domain (1-2-5 steps).
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        let (mut lo, mut hi) = self.domain;
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        if !step.is_finite() || step <= 0.0 || !(1.0 / step).is_finite() {
            return vec![lo, hi];
        }
        let (start, stop, inv) = if step >= 1.0 {
            ((lo / step).ceil(), (hi / step).floor(), None)
        } else {
            // divide by the inverse step to keep decimal ticks exact
            let inv = (1.0 / step).round();
            ((lo * inv).ceil(), (hi * inv).floor(), Some(inv))
        };
        // subnormal or huge domains lose precision in the step arithmetic
        if !start.is_finite() || !stop.is_finite() || stop - start > (count as f64) * 10.0 {
            return vec![lo, hi];
        }
        let (start, stop) = (start as i64, stop as i64);
        match inv {
            None => (start..=stop).map(|i| i as f64 * step).collect(),
            Some(inv) => (start..=stop).map(|i| i as f64 / inv).collect(),
        }
    }
}

/// Step between ticks for a `[lo, hi]` domain split into about `count` intervals.
pub fn tick_step(lo: Value, hi: Value, count: usize) -> f64 {
    let raw = (hi - lo).abs() / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let err = raw / magnitude;
    let factor = if err >= 50f64.sqrt() {
        10.0
    } else if err >= 10f64.sqrt() {
        5.0
    } else if err >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_inverts() {
        let s = LinearScale::new((-1.0, 1.0), (0.0, 200.0));
        assert_eq!(s.apply(-1.0), 0.0);
        assert_eq!(s.apply(0.0), 100.0);
        assert_eq!(s.apply(1.0), 200.0);
        for x in [-3.5, -1.0, 0.25, 0.9, 7.0] {
            assert!((s.invert(s.apply(x)) - x).abs() < 1e-12);
        }
    }

    #[test]
    fn inverted_range_for_screen_y() {
        let s = LinearScale::new((0.0, 1.0), (100.0, 0.0));
        assert_eq!(s.apply(0.0), 100.0);
        assert_eq!(s.apply(1.0), 0.0);
        assert!((s.invert(25.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn degenerate_domain_is_total() {
        let s = LinearScale::new((2.0, 2.0), (0.0, 50.0));
        assert_eq!(s.apply(10.0), 0.0);
        assert_eq!(s.invert(30.0), 2.0);
    }

    #[test]
    fn ticks_are_round_values() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 400.0));
        assert_eq!(s.ticks(10), (0..=10).map(f64::from).collect::<Vec<_>>());
        let s = LinearScale::new((0.0, 1.0), (0.0, 400.0));
        assert_eq!(s.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        let s = LinearScale::new((-1.0, 1.0), (0.0, 400.0));
        assert_eq!(s.ticks(10).first().copied(), Some(-1.0));
        assert_eq!(s.ticks(10).len(), 11);
    }

    #[test]
    fn tiny_or_huge_domains_fall_back_to_bounds() {
        let s = LinearScale::new((0.0, 1e-310), (0.0, 400.0));
        assert_eq!(s.ticks(10), vec![0.0, 1e-310]);
        let s = LinearScale::new((-1e308, 1e308), (0.0, 400.0));
        assert!(s.ticks(10).len() <= 101);
        let s = LinearScale::new((1e18, 1e18 + 4096.0), (0.0, 400.0));
        assert!(s.ticks(10).len() <= 101);
    }
}
