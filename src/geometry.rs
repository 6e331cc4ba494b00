use std::{
    fmt,
    ops::{Add, Div, Mul, Sub},
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;
pub const PI: f64 = std::f64::consts::PI;

/// Format floats in a compact way suitable for SVG attributes
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Wrapper that displays a scalar with `scalar_fmt`
pub(crate) struct FmtScalar(pub Scalar);

impl fmt::Display for FmtScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        scalar_fmt(f, self.0)
    }
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)
    }
}

impl fmt::Display for Point {
    /// `x,y` pair as it appears in an SVG `points` attribute
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Point {
    #[inline]
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Get length of the vector (distance from the origin)
    pub fn length(self) -> Scalar {
        let Self([x, y]) = self;
        x.hypot(y)
    }

    /// Distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Dot product between two vectors
    pub fn dot(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * x1 + y0 * y1
    }

    /// Cross product between two vectors
    pub fn cross(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * y1 - y0 * x1
    }

    /// Counter-clockwise perpendicular of the vector (not unit sized)
    pub fn perp(self) -> Point {
        let Self([x, y]) = self;
        Self([-y, x])
    }

    /// Convert vector to a unit size vector, if length is not zero
    pub fn normalize(self) -> Option<Point> {
        let Self([x, y]) = self;
        let length = self.length();
        if length < EPSILON {
            None
        } else {
            Some(Self([x / length, y / length]))
        }
    }

    /// Determine if self is close to the other within the margin of error
    pub fn is_close_to(self, other: Point) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < EPSILON && (y0 - y1).abs() < EPSILON
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Div<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: Scalar) -> Self::Output {
        let Point([x, y]) = self;
        Point([x / rhs, y / rhs])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_point_ops() {
        let p0 = Point::new(1.0, 2.0);
        let p1 = Point::new(3.0, -1.0);
        assert_eq!(p0 + p1, Point::new(4.0, 1.0));
        assert_eq!(p1 - p0, Point::new(2.0, -3.0));
        assert_eq!(2.0 * p0, Point::new(2.0, 4.0));
        assert_eq!(p1 / 2.0, Point::new(1.5, -0.5));
        assert_approx_eq!(p0.dot(p1), 1.0);
        assert_approx_eq!(p0.cross(p1), -7.0);
        assert_approx_eq!(Point::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_normalize() {
        assert!(Point::new(0.0, 0.0).normalize().is_none());
        let n = Point::new(3.0, 4.0).normalize().unwrap();
        assert_approx_eq!(n.length(), 1.0);
        assert_approx_eq!(n.x(), 0.6);
        assert_approx_eq!(n.y(), 0.8);
    }

    #[test]
    fn test_perp() {
        let d = Point::new(2.0, 0.0);
        let p = d.perp();
        assert_eq!(p, Point::new(0.0, 2.0));
        assert_approx_eq!(d.dot(p), 0.0);
    }

    #[test]
    fn test_fmt() {
        assert_eq!(format!("{}", Point::new(100.0, 20.5)), "100,20.5");
        assert_eq!(format!("{}", FmtScalar(1.0)), "1");
        assert_eq!(format!("{}", FmtScalar(0.125)), "0.125");
    }
}
