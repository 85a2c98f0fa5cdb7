//! The escape-time test at the heart of every Mandelbrot renderer.

use num::Complex;

/// What happened to a point's orbit.  A point either left the circle
/// of radius two at some iteration, or it was still inside when we
/// ran out of iterations and is presumed to be in the set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Escape {
    /// The orbit stayed bounded for the whole iteration budget.
    InSet,
    /// The orbit left the circle at this (zero-based) iteration.
    Escaped(usize),
}

impl Escape {
    /// The escape iteration, or None for points in the set.
    pub fn iterations(&self) -> Option<usize> {
        match *self {
            Escape::InSet => None,
            Escape::Escaped(i) => Some(i),
        }
    }

    /// True for points presumed to be in the set.
    pub fn is_in_set(&self) -> bool {
        *self == Escape::InSet
    }
}

/// Iterates z = z * z + c from z = 0, at most `limit` times.  Returns
/// the iteration at which |z| first exceeded 2, so a point already
/// outside the circle escapes at 0.  Any escape count is strictly less
/// than `limit`.
pub fn escape_time(c: Complex<f64>, limit: usize) -> Escape {
    let mut z = Complex {
        re: 0.0_f64,
        im: 0.0_f64,
    };
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > 4.0_f64 {
            return Escape::Escaped(i);
        }
    }
    Escape::InSet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_in_set() {
        for limit in &[1, 2, 50, 1000] {
            assert_eq!(escape_time(Complex::new(0.0, 0.0), *limit), Escape::InSet);
        }
    }

    #[test]
    fn minus_one_is_in_set() {
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 1000), Escape::InSet);
    }

    #[test]
    fn far_point_escapes_immediately() {
        assert_eq!(escape_time(Complex::new(2.0, 2.0), 1000), Escape::Escaped(0));
    }

    #[test]
    fn boundary_of_circle_is_not_an_escape() {
        // -2 bounces to 2 and stays there; |z| never exceeds 2.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 100), Escape::InSet);
    }

    #[test]
    fn slow_escape_counts_iterations() {
        // z: 1, 2, 5 -- escapes on the third step.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 100), Escape::Escaped(2));
        // Not enough budget to see it happen.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 2), Escape::InSet);
    }

    #[test]
    fn escape_counts_stay_under_the_limit() {
        let limit = 64;
        for step in 0..200 {
            let c = Complex::new(-2.5 + (step as f64) * 0.0175, 0.3);
            if let Some(i) = escape_time(c, limit).iterations() {
                assert!(i < limit);
            }
        }
    }

    #[test]
    fn escape_accessors() {
        assert_eq!(Escape::Escaped(7).iterations(), Some(7));
        assert_eq!(Escape::InSet.iterations(), None);
        assert!(Escape::InSet.is_in_set());
        assert!(!Escape::Escaped(0).is_in_set());
    }
}
