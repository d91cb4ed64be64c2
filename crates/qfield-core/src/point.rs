use glam::DVec2;
use serde::Serialize;

use crate::field::Omega;

/// An element `a + bω` of the ring of integers together with its position
/// in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatticePoint {
    pub a: i64,
    pub b: i64,
    #[serde(serialize_with = "serialize_position")]
    pub position: DVec2,
}

impl LatticePoint {
    pub fn new(a: i64, b: i64, omega: Omega) -> Self {
        let position = DVec2::new(a as f64 + omega.real * b as f64, omega.imag * b as f64);
        Self { a, b, position }
    }
}

impl std::fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.a, self.b) {
            (a, 0) => write!(f, "{a}"),
            (0, 1) => write!(f, "\u{03c9}"),
            (0, -1) => write!(f, "-\u{03c9}"),
            (0, b) => write!(f, "{b}\u{03c9}"),
            (a, 1) => write!(f, "{a} + \u{03c9}"),
            (a, -1) => write!(f, "{a} - \u{03c9}"),
            (a, b) if b < 0 => write!(f, "{a} - {}\u{03c9}", -b),
            (a, b) => write!(f, "{a} + {b}\u{03c9}"),
        }
    }
}

fn serialize_position<S: serde::Serializer>(position: &DVec2, s: S) -> Result<S::Ok, S::Error> {
    [position.x, position.y].serialize(s)
}
