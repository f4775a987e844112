//! The escape-time iteration.
//!
//! A point's escape time is the number of passes of `z = z² + c` that
//! ran before `|z|²` went above 4, or the iteration limit if it never
//! did.  The two fractals here differ only in which value is fixed per
//! image and which comes from the pixel.

use num::Complex;
use std::fmt;

/// Squared escape radius.
const BAILOUT: f64 = 4.0;

/// The fractals the renderer knows how to draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fractal {
    /// The orbit starts at zero and the pixel's point is added on every pass.
    Mandelbrot,
    /// The orbit starts at the pixel's point and the given constant is added.
    Julia(Complex<f64>),
}

impl Default for Fractal {
    fn default() -> Self {
        Fractal::Mandelbrot
    }
}

impl fmt::Display for Fractal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Fractal::Mandelbrot => write!(f, "Mandelbrot"),
            Fractal::Julia(c) => write!(f, "Julia({}, {})", c.re, c.im),
        }
    }
}

impl Fractal {
    /// Number of passes completed before `point` escaped, in `[0, limit]`.
    pub fn escape_time(&self, point: Complex<f64>, limit: usize) -> usize {
        match *self {
            Fractal::Mandelbrot => iterate(Complex::new(0.0, 0.0), point, limit),
            Fractal::Julia(c) => iterate(point, c, limit),
        }
    }
}

/// This is our classic iterator function.  The bound is checked
/// before each pass, so an orbit that starts outside the radius
/// reports zero.
fn iterate(mut z: Complex<f64>, c: Complex<f64>, limit: usize) -> usize {
    let mut iteration = 0;
    while z.norm_sqr() <= BAILOUT && iteration < limit {
        z = z * z + c;
        iteration += 1;
    }
    iteration
}

/// Mandelbrot escape time of `point`.
pub fn escape_time(point: Complex<f64>, limit: usize) -> usize {
    Fractal::Mandelbrot.escape_time(point, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for limit in &[1, 10, 500, 10_000] {
            assert_eq!(escape_time(Complex::new(0.0, 0.0), *limit), *limit);
        }
    }

    #[test]
    fn far_points_escape_quickly() {
        let k = escape_time(Complex::new(3.0, 3.0), 500);
        assert!(k >= 1 && k <= 2, "escaped after {}", k);
        assert_eq!(escape_time(Complex::new(-2.0, -2.0), 500), 1);
    }

    #[test]
    fn period_two_cycle_stays_bounded() {
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 100), 100);
    }

    #[test]
    fn boundary_point_escapes_late() {
        // Just to the right of the cusp of the main cardioid.
        let k = escape_time(Complex::new(0.26, 0.0), 1000);
        assert!(k > 10 && k < 1000, "escaped after {}", k);
    }

    #[test]
    fn count_never_exceeds_limit() {
        for re in -20..20 {
            for im in -20..20 {
                let c = Complex::new(f64::from(re) / 10.0, f64::from(im) / 10.0);
                assert!(escape_time(c, 50) <= 50);
            }
        }
    }

    #[test]
    fn julia_starts_from_the_point() {
        let julia = Fractal::Julia(Complex::new(0.0, 0.0));
        // z -> z² stays on the unit circle forever.
        assert_eq!(julia.escape_time(Complex::new(1.0, 0.0), 64), 64);
        // Already outside the radius before the first pass.
        assert_eq!(julia.escape_time(Complex::new(3.0, 0.0), 64), 0);
    }

    #[test]
    fn display_names() {
        assert_eq!(Fractal::Mandelbrot.to_string(), "Mandelbrot");
        assert_eq!(
            Fractal::Julia(Complex::new(-0.8, 0.156)).to_string(),
            "Julia(-0.8, 0.156)"
        );
    }
}
