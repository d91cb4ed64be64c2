use glam::DVec2;
use serde::Serialize;

use crate::error::{Error, Result};

/// Smallest `p >= 2` with `p^2 | n`, or `None` when `n` is square-free.
///
/// Zero is divisible by every square and reports 2.
pub fn square_factor(n: i64) -> Option<u64> {
    let mut m = n.unsigned_abs();
    if m == 0 {
        return Some(2);
    }

    let mut p: u64 = 2;
    while p.saturating_mul(p) <= m {
        if m % p == 0 {
            m /= p;
            if m % p == 0 {
                return Some(p);
            }
        }
        p += 1;
    }
    None
}

pub fn is_square_free(n: i64) -> bool {
    square_factor(n).is_none()
}

/// Position of the generator ω in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Omega {
    pub real: f64,
    pub imag: f64,
}

impl Omega {
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.real, self.imag)
    }
}

/// The quadratic field Q(√d) for a validated square-free `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadraticField {
    d: i64,
}

impl QuadraticField {
    /// Validate `d` and build the field.
    ///
    /// `d = 0` and `d = 1` give Q itself and are rejected as degenerate;
    /// any other `d` must be square-free.
    pub fn new(d: i64) -> Result<Self> {
        if d == 0 || d == 1 {
            return Err(Error::Degenerate { d });
        }
        if let Some(factor) = square_factor(d) {
            return Err(Error::NotSquareFree { d, factor });
        }
        log::debug!("validated square-free d = {d}");
        Ok(Self { d })
    }

    pub fn d(&self) -> i64 {
        self.d
    }

    pub fn is_imaginary(&self) -> bool {
        self.d < 0
    }

    /// `d mod 4` in `0..4`, so `-3` maps to 1.
    pub fn d_mod_4(&self) -> i64 {
        self.d.rem_euclid(4)
    }

    /// Whether ω = (1+√d)/2 rather than √d.
    pub fn has_half_integral_omega(&self) -> bool {
        self.d_mod_4() == 1
    }

    pub fn omega(&self) -> Omega {
        let root = (self.d.unsigned_abs() as f64).sqrt();
        if self.has_half_integral_omega() {
            Omega { real: 0.5, imag: root / 2.0 }
        } else {
            Omega { real: 0.0, imag: root }
        }
    }

    pub fn omega_tex(&self) -> String {
        if self.has_half_integral_omega() {
            format!(r"\frac{{1+\sqrt{{{}}}}}{{2}}", self.d)
        } else {
            format!(r"\sqrt{{{}}}", self.d)
        }
    }

    /// Plain-text rendering of ω for backends without a TeX engine.
    pub fn omega_text(&self) -> String {
        let root = self.sqrt_text();
        if self.has_half_integral_omega() {
            format!("(1+{root})/2")
        } else {
            root
        }
    }

    pub fn title_tex(&self) -> String {
        format!(
            r"Ring of integers of the Quadratic Number Field $\mathbb{{Q}}(\sqrt{{{}}})$",
            self.d
        )
    }

    pub fn title_text(&self) -> String {
        format!(
            "Ring of integers of the Quadratic Number Field \u{211a}({})",
            self.sqrt_text()
        )
    }

    fn sqrt_text(&self) -> String {
        if self.d < 0 {
            format!("\u{221a}({})", self.d)
        } else {
            format!("\u{221a}{}", self.d)
        }
    }
}

impl std::fmt::Display for QuadraticField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q({})", self.sqrt_text())
    }
}
