//! Bézier curves and uniform sampling used by every organic primitive

use crate::{Error, Point, Scalar};
use std::fmt;

/// Set of operations common to the bezier curves
pub trait Curve: Sized {
    /// Point at which curve starts
    fn start(&self) -> Point;

    /// Point at which curve ends
    fn end(&self) -> Point;

    /// Evaluate curve at parameter value `t` in (0.0..=1.0)
    fn at(&self, t: Scalar) -> Point;

    /// Identical curve but directed from end to start, instead of start to end.
    fn reverse(&self) -> Self;

    /// Evaluate the curve at `steps + 1` uniform parameter values `t = i / steps`
    ///
    /// Includes both endpoints. `steps` must be at least one.
    fn sample(&self, steps: usize) -> Result<Vec<Point>, Error> {
        if steps == 0 {
            return Err(Error::InvalidParameter {
                reason: "curve sampling requires at least one step".to_string(),
            });
        }
        Ok((0..=steps)
            .map(|i| self.at(i as Scalar / steps as Scalar))
            .collect())
    }
}

/// Quadratic bezier curve
///
/// Polynomial form:
/// `(1 - t) ^ 2 * p0 + 2 * (1 - t) * t * p1 + t ^ 2 * p2`
#[derive(Clone, Copy, PartialEq)]
pub struct Quad(pub [Point; 3]);

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Quad([p0, p1, p2]) = self;
        write!(f, "Quad {:?} {:?} {:?}", p0, p1, p2)
    }
}

impl Quad {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into(), p2.into()])
    }

    pub fn points(&self) -> [Point; 3] {
        self.0
    }
}

impl Curve for Quad {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[2]
    }

    fn at(&self, t: Scalar) -> Point {
        // at(t) =
        //   (1 - t) ^ 2 * p0 +
        //   2 * (1 - t) * t * p1 +
        //   t ^ 2 * p2
        let Self([p0, p1, p2]) = self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        t_2 * *p0 + 2.0 * t1 * t_1 * *p1 + t2 * *p2
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1, p2]) = *self;
        Self([p2, p1, p0])
    }
}

/// Cubic bezier curve
///
/// Polynomial form:
/// `(1 - t) ^ 3 * p0 + 3 * (1 - t) ^ 2 * t * p1 + 3 * (1 - t) * t ^ 2 * p2 + t ^ 3 * p3`
#[derive(Clone, Copy, PartialEq)]
pub struct Cubic(pub [Point; 4]);

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }
}

impl Curve for Cubic {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[3]
    }

    fn at(&self, t: Scalar) -> Point {
        // at(t) =
        //   (1 - t) ^ 3 * p0 +
        //   3 * (1 - t) ^ 2 * t * p1 +
        //   3 * (1 - t) * t ^ 2 * p2 +
        //   t ^ 3 * p3
        let Self([p0, p1, p2, p3]) = self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let (t3, t_3) = (t2 * t1, t_2 * t_1);
        t_3 * *p0 + 3.0 * t1 * t_2 * *p1 + 3.0 * t2 * t_1 * *p2 + t3 * *p3
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1, p2, p3]) = *self;
        Self([p3, p2, p1, p0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_quad_sample() -> Result<(), Error> {
        let quad = Quad::new((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        for steps in [1, 2, 8, 50] {
            let points = quad.sample(steps)?;
            assert_eq!(points.len(), steps + 1);
            assert!(points[0].is_close_to(quad.start()));
            assert!(points[steps].is_close_to(quad.end()));
        }
        let mid = quad.at(0.5);
        assert_approx_eq!(mid.x(), 1.0);
        assert_approx_eq!(mid.y(), 1.0);
        Ok(())
    }

    #[test]
    fn test_cubic_sample() -> Result<(), Error> {
        let cubic = Cubic::new((3.0, 7.0), (2.0, 8.0), (0.0, 3.0), (6.0, 5.0));
        let points = cubic.sample(50)?;
        assert_eq!(points.len(), 51);
        assert!(points[0].is_close_to(cubic.start()));
        assert!(points[50].is_close_to(cubic.end()));

        let mid = cubic.at(0.5);
        assert_approx_eq!(mid.x(), 1.875);
        assert_approx_eq!(mid.y(), 5.625);
        Ok(())
    }

    #[test]
    fn test_zero_steps() {
        let quad = Quad::new((0.0, 0.0), (1.0, 1.0), (2.0, 0.0));
        assert!(matches!(
            quad.sample(0),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_reverse() {
        let cubic = Cubic::new((3.0, 7.0), (2.0, 8.0), (0.0, 3.0), (6.0, 5.0));
        let reversed = cubic.reverse();
        assert!(cubic.at(0.25).is_close_to(reversed.at(0.75)));
        assert_eq!(cubic.start(), reversed.end());
    }
}
