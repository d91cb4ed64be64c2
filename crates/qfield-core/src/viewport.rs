use std::ops::Range;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::Omega;

/// Lattice indices are enumerated this much past the visible window so the
/// skewed rows of a half-integral lattice still cover every corner.
pub const OVERSCAN: f64 = 1.5;

/// Upper bound on the number of index pairs a window may enumerate.
pub const MAX_INDEX_COUNT: usize = 4_000_000;

/// Symmetric bounds for the lattice indices `a` (along 1) and `b` (along ω).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRange {
    pub a_max: i64,
    pub b_max: i64,
}

impl IndexRange {
    pub fn new(a_max: i64, b_max: i64) -> Self {
        Self { a_max: a_max.max(0), b_max: b_max.max(0) }
    }

    pub fn a_values(&self) -> std::ops::RangeInclusive<i64> {
        -self.a_max..=self.a_max
    }

    pub fn b_values(&self) -> std::ops::RangeInclusive<i64> {
        -self.b_max..=self.b_max
    }

    /// Number of index pairs in the range, saturating at `usize::MAX`.
    pub fn count(&self) -> usize {
        let side = |m: i64| (m as u64).saturating_mul(2).saturating_add(1);
        let count = side(self.a_max).saturating_mul(side(self.b_max));
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

/// A rectangular window in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x_min: -5.0, x_max: 5.0, y_min: -5.0, y_max: 5.0 }
    }
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let viewport = Self { x_min, x_max, y_min, y_max };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.x_min, self.x_max, self.y_min, self.y_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidViewport(format!("non-finite limits {values:?}")));
        }
        if self.x_min >= self.x_max {
            return Err(Error::InvalidViewport(format!(
                "empty x range {}..{}",
                self.x_min, self.x_max
            )));
        }
        if self.y_min >= self.y_max {
            return Err(Error::InvalidViewport(format!(
                "empty y range {}..{}",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn aspect(&self) -> f64 {
        self.width() / self.height()
    }

    pub fn x_range(&self) -> Range<f64> {
        self.x_min..self.x_max
    }

    pub fn y_range(&self) -> Range<f64> {
        self.y_min..self.y_max
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// Index bounds covering this window for a lattice generated by 1 and ω.
    ///
    /// Fails when the window would enumerate more than [`MAX_INDEX_COUNT`]
    /// index pairs.
    pub fn index_range(&self, omega: Omega) -> Result<IndexRange> {
        let x_extent = self.x_min.abs().max(self.x_max.abs()) * OVERSCAN;
        let y_extent = self.y_min.abs().max(self.y_max.abs()) * OVERSCAN;
        let a_max = x_extent.ceil();
        let b_max = (y_extent / omega.imag).ceil();

        let pairs = (2.0 * a_max + 1.0) * (2.0 * b_max + 1.0);
        if !pairs.is_finite() || pairs > MAX_INDEX_COUNT as f64 {
            return Err(Error::InvalidViewport(format!(
                "window x {:?}, y {:?} spans about {pairs:.3e} lattice indices (limit {MAX_INDEX_COUNT})",
                self.x_range(),
                self.y_range()
            )));
        }
        Ok(IndexRange::new(a_max as i64, b_max as i64))
    }

    /// Largest pixel box inside `pixel_width` x `pixel_height` in which one
    /// data unit spans the same number of pixels on both axes.
    pub fn pixel_box(&self, pixel_width: u32, pixel_height: u32) -> (u32, u32) {
        let (w, h) = (pixel_width as f64, pixel_height as f64);
        if h == 0.0 || self.aspect() >= w / h {
            let box_h = (w / self.aspect()).round().min(h);
            (pixel_width, box_h as u32)
        } else {
            let box_w = (h * self.aspect()).round().min(w);
            (box_w as u32, pixel_height)
        }
    }
}
