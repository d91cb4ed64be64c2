use glam::{DMat2, DVec2};

use crate::error::Result;
use crate::field::{Omega, QuadraticField};
use crate::point::LatticePoint;
use crate::viewport::{IndexRange, Viewport};

/// The lattice Z + Zω of a quadratic field, placed in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    omega: Omega,
}

impl Lattice {
    pub fn new(field: &QuadraticField) -> Self {
        Self { omega: field.omega() }
    }

    pub fn omega(&self) -> Omega {
        self.omega
    }

    /// Columns are the plane images of 1 and ω.
    pub fn basis(&self) -> DMat2 {
        DMat2::from_cols(DVec2::X, self.omega.position())
    }

    pub fn point(&self, a: i64, b: i64) -> LatticePoint {
        LatticePoint::new(a, b, self.omega)
    }

    /// Every point with `|a| <= a_max` and `|b| <= b_max`, ordered by `a`
    /// then `b`.
    pub fn points(&self, range: IndexRange) -> Vec<LatticePoint> {
        let mut points = Vec::with_capacity(range.count());
        for a in range.a_values() {
            for b in range.b_values() {
                points.push(self.point(a, b));
            }
        }
        points
    }

    /// Grid edges of the index range: each point links to its ω-neighbour
    /// `(a, b + 1)` and its 1-neighbour `(a + 1, b)` when those are in range.
    pub fn edges(&self, range: IndexRange) -> Vec<(LatticePoint, LatticePoint)> {
        let mut edges = Vec::new();
        for a in range.a_values() {
            for b in range.b_values() {
                let here = self.point(a, b);
                if b < range.b_max {
                    edges.push((here, self.point(a, b + 1)));
                }
                if a < range.a_max {
                    edges.push((here, self.point(a + 1, b)));
                }
            }
        }
        edges
    }

    /// Vertices of the fundamental parallelogram: 0, 1, 1 + ω, ω.
    pub fn fundamental_cell(&self) -> [DVec2; 4] {
        let omega = self.omega.position();
        [DVec2::ZERO, DVec2::X, DVec2::X + omega, omega]
    }

    /// Area of the fundamental parallelogram.
    pub fn covolume(&self) -> f64 {
        self.basis().determinant().abs()
    }

    /// Points whose positions fall inside `viewport`.
    pub fn points_in(&self, viewport: &Viewport) -> Result<Vec<LatticePoint>> {
        let range = viewport.index_range(self.omega)?;
        Ok(self
            .points(range)
            .into_iter()
            .filter(|p| viewport.contains(p.position))
            .collect())
    }
}
