//! Outline generators for the organic primitives
//!
//! Each shape here is a plain parameter struct that turns into an ordered
//! point sequence: a closed loop for `Blob`, `Tentacle` and `Pear` (drawn as
//! a filled polygon) and an open polyline for `Wave` (stroke only).

use crate::{Cubic, Curve, Error, Point, Quad, Scalar, utils::clamp, utils::Rnd, PI};

// Control points between blob anchors are pushed 15% further from the
// center than the anchor midpoint. Tuned constant: together with the
// grow-only radius jitter it keeps the sampled loop from bowing inward
// between anchors. Not a proven convexity bound.
const BLOB_PUSH: Scalar = 1.15;
const BLOB_SEGMENT_STEPS: usize = 8;
const CENTERLINE_STEPS: usize = 50;
const PEAR_ZONE_STEPS: usize = 13;

/// Organic irregular circle built from Bézier-smoothed jittered anchors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blob {
    /// Center point
    pub center: Point,
    /// Average radius, anchors only ever move outward from it
    pub radius: Scalar,
    /// Irregularity in [0, 1], `0.0` produces a near-regular polygon
    pub wobble: Scalar,
    /// Number of anchor points, at least three
    pub points: usize,
}

impl Blob {
    pub fn new(center: impl Into<Point>, radius: Scalar) -> Self {
        Self {
            center: center.into(),
            radius,
            wobble: 0.2,
            points: 8,
        }
    }

    pub fn wobble(self, wobble: Scalar) -> Self {
        Self { wobble, ..self }
    }

    pub fn points(self, points: usize) -> Self {
        Self { points, ..self }
    }

    /// Closed outline loop of the blob
    ///
    /// Radius jitter is drawn from `rnd`, the same seed reproduces the same
    /// loop. Even with `wobble = 0` the full smoothing pipeline runs, the
    /// result is a near-regular polygon rather than a true circle.
    pub fn outline(&self, rnd: &mut Rnd) -> Result<Vec<Point>, Error> {
        if self.radius <= 0.0 {
            return Err(Error::InvalidParameter {
                reason: format!("blob radius must be positive, got {}", self.radius),
            });
        }
        if self.points < 3 {
            return Err(Error::InvalidParameter {
                reason: format!("blob needs at least 3 anchor points, got {}", self.points),
            });
        }
        let wobble = clamp(self.wobble, 0.0, 1.0);

        // anchors evenly spaced by angle, radius only ever grows so the
        // polygon through them stays convex
        let mut anchors = Vec::with_capacity(self.points);
        for i in 0..self.points {
            let angle = (i as Scalar / self.points as Scalar) * 2.0 * PI;
            let radius = self.radius * (1.0 + rnd.uniform_range(0.0, wobble));
            anchors.push(self.center + radius * Point::new(angle.cos(), angle.sin()));
        }

        let mut outline = Vec::with_capacity(self.points * BLOB_SEGMENT_STEPS);
        for (i, &p0) in anchors.iter().enumerate() {
            let p2 = anchors[(i + 1) % anchors.len()];
            let mid = (p0 + p2) / 2.0;
            let control = self.center + BLOB_PUSH * (mid - self.center);
            let segment = Quad::new(p0, control, p2).sample(BLOB_SEGMENT_STEPS)?;
            // last point of each segment is the first of the next one
            outline.extend_from_slice(&segment[..segment.len() - 1]);
        }
        Ok(outline)
    }
}

/// Tapered, optionally S-curved, directional ribbon shape
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tentacle {
    /// Thick end
    pub base: Point,
    /// Thin end
    pub tip: Point,
    /// Bend direction and magnitude in [-1, 1], positive curves right
    pub curl: Scalar,
    /// Secondary S-bend strength in [0, 1], zero disables it
    pub twist: Scalar,
    /// Width at the base
    pub thickness: Scalar,
    /// Tip width as a fraction of base thickness in [0, 1]
    pub taper: Scalar,
}

impl Tentacle {
    pub fn new(base: impl Into<Point>, tip: impl Into<Point>) -> Self {
        Self {
            base: base.into(),
            tip: tip.into(),
            curl: 0.0,
            twist: 0.0,
            thickness: 20.0,
            taper: 0.5,
        }
    }

    pub fn curl(self, curl: Scalar) -> Self {
        Self { curl, ..self }
    }

    pub fn twist(self, twist: Scalar) -> Self {
        Self { twist, ..self }
    }

    pub fn thickness(self, thickness: Scalar) -> Self {
        Self { thickness, ..self }
    }

    pub fn taper(self, taper: Scalar) -> Self {
        Self { taper, ..self }
    }

    /// Centerline of the tentacle sampled at uniform parameter steps
    ///
    /// With `twist > 0` the centerline is a cubic with the second control
    /// point offset opposite to the first one, which is what produces the
    /// S-shape. Otherwise a single quadratic control at the curl offset.
    fn centerline(&self) -> Result<Vec<Point>, Error> {
        let dir = self.tip - self.base;
        let perp = dir.perp().normalize().ok_or_else(|| Error::InvalidParameter {
            reason: "tentacle base and tip coincide".to_string(),
        })?;
        let distance = dir.length();
        let side = if self.curl > 0.0 { 1.0 } else { -1.0 };

        if self.twist > 0.0 {
            let offset0 = distance * self.curl.abs() * 0.4;
            let c0 = self.base + 0.33 * dir + (offset0 * side) * perp;
            let offset1 = distance * self.curl.abs() * 0.4 * self.twist;
            let c1 = self.base + 0.67 * dir - (offset1 * side) * perp;
            Cubic::new(self.base, c0, c1, self.tip).sample(CENTERLINE_STEPS)
        } else {
            let offset = distance * self.curl.abs() * 0.5;
            let control = self.base + 0.5 * dir + (offset * side) * perp;
            Quad::new(self.base, control, self.tip).sample(CENTERLINE_STEPS)
        }
    }

    /// Closed outline loop of the tentacle
    ///
    /// Walks the centerline offsetting every sample by half the local width
    /// along the tangent perpendicular, one side forward and the other in
    /// reverse. The result has exactly twice as many points as the
    /// centerline.
    pub fn outline(&self) -> Result<Vec<Point>, Error> {
        let centerline = self.centerline()?;
        let tip_thickness = self.thickness * self.taper;

        let half_width = |t: Scalar| (self.thickness * (1.0 - t) + tip_thickness * t) / 2.0;
        let last = (centerline.len() - 1) as Scalar;

        let mut outline = Vec::with_capacity(centerline.len() * 2);
        for (i, &point) in centerline.iter().enumerate() {
            let offset = half_width(i as Scalar / last) * tangent_perp(&centerline, i);
            outline.push(point + offset);
        }
        for (i, &point) in centerline.iter().enumerate().rev() {
            let offset = half_width(i as Scalar / last) * tangent_perp(&centerline, i);
            outline.push(point - offset);
        }
        Ok(outline)
    }
}

/// Unit perpendicular of the polyline tangent at `index`
///
/// Forward difference everywhere except the last sample, which falls back
/// to the backward difference. Duplicate neighboring samples yield a zero
/// vector instead of a NaN point.
fn tangent_perp(line: &[Point], index: usize) -> Point {
    let tangent = if index + 1 < line.len() {
        line[index + 1] - line[index]
    } else {
        line[index] - line[index - 1]
    };
    match tangent.normalize() {
        Some(tangent) => tangent.perp(),
        None => Point::new(0.0, 0.0),
    }
}

/// Sinusoidal offset polyline between two points, stroke only
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wave {
    pub start: Point,
    pub end: Point,
    /// Amplitude of the oscillation
    pub height: Scalar,
    /// Number of complete wave cycles
    pub waves: usize,
}

impl Wave {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            height: 20.0,
            waves: 1,
        }
    }

    pub fn height(self, height: Scalar) -> Self {
        Self { height, ..self }
    }

    pub fn waves(self, waves: usize) -> Self {
        Self { waves, ..self }
    }

    /// Open polyline of the wave, more cycles sample more points
    pub fn polyline(&self) -> Vec<Point> {
        let dir = self.end - self.start;
        let angle = dir.y().atan2(dir.x());
        let steps = (self.waves * 20).max(50);

        let mut points = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let t = i as Scalar / steps as Scalar;
            let base = self.start + t * dir;
            let offset = self.height * (t * self.waves as Scalar * 2.0 * PI).sin();
            points.push(base + offset * Point::new(-angle.sin(), angle.cos()));
        }
        points
    }
}

/// Piecewise-width profile outline, wide at the top and narrow at the bottom
///
/// Zone breakpoints and width ratios are fixed constants of the shape, only
/// the overall width and height scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pear {
    /// Top center point
    pub top: Point,
    /// Maximum width, reached at the shoulder
    pub width: Scalar,
    /// Total height
    pub height: Scalar,
}

impl Pear {
    pub fn new(top: impl Into<Point>, width: Scalar, height: Scalar) -> Self {
        Self {
            top: top.into(),
            width,
            height,
        }
    }

    /// Half width of the profile and vertical position for one step of a zone
    ///
    /// `zone` is 0 for top..shoulder, 1 for shoulder..waist, 2 for
    /// waist..bottom; `t` runs 0..1 inside the zone.
    fn profile(&self, zone: usize, t: Scalar) -> (Scalar, Scalar) {
        // vertical zone breaks and the width ratio at each break
        let (y0, y1, w0, w1) = match zone {
            0 => (0.0, 0.3, 0.75, 1.0),
            1 => (0.3, 0.6, 1.0, 0.65),
            _ => (0.6, 1.0, 0.65, 0.55),
        };
        let y = self.top.y() + self.height * (y0 + (y1 - y0) * t);
        let width = self.width * (w0 + (w1 - w0) * t);
        let half = match zone {
            // sine ease rounds off the very top
            0 => width / 2.0 * (t * PI / 2.0).sin(),
            1 => width / 2.0,
            // quadratic ease pulls the bottom inward
            _ => width / 2.0 * (1.0 - 0.3 * (1.0 - (1.0 - t) * (1.0 - t))),
        };
        (half, y)
    }

    /// Closed outline loop of the pear
    ///
    /// Right-hand profile swept top to bottom, then the mirrored profile
    /// bottom to top.
    pub fn outline(&self) -> Result<Vec<Point>, Error> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidParameter {
                reason: format!(
                    "pear width and height must be positive, got {}x{}",
                    self.width, self.height
                ),
            });
        }

        let mut right = Vec::with_capacity(3 * PEAR_ZONE_STEPS);
        for zone in 0..3 {
            for i in 0..PEAR_ZONE_STEPS {
                let t = i as Scalar / (PEAR_ZONE_STEPS - 1) as Scalar;
                right.push(self.profile(zone, t));
            }
        }

        let mut outline = Vec::with_capacity(right.len() * 2);
        outline.extend(
            right
                .iter()
                .map(|&(half, y)| Point::new(self.top.x() + half, y)),
        );
        outline.extend(
            right
                .iter()
                .rev()
                .map(|&(half, y)| Point::new(self.top.x() - half, y)),
        );
        Ok(outline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_blob_outline() -> Result<(), Error> {
        let mut rnd = Rnd::with_seed(3);
        let blob = Blob::new((100.0, 100.0), 50.0).wobble(0.4).points(8);
        let outline = blob.outline(&mut rnd)?;
        assert_eq!(outline.len(), 8 * BLOB_SEGMENT_STEPS);

        // every curve sample stays outside the chord between its anchors,
        // so no point dips below radius * cos(pi / points)
        let floor = blob.radius * (PI / 8.0).cos();
        for point in &outline {
            assert!(point.dist(blob.center) >= floor - 1e-6);
        }
        let max = outline
            .iter()
            .map(|p| p.dist(blob.center))
            .fold(0.0, Scalar::max);
        assert!(max >= blob.radius);
        Ok(())
    }

    #[test]
    fn test_blob_deterministic() -> Result<(), Error> {
        let blob = Blob::new((0.0, 0.0), 10.0).wobble(1.0);
        let o0 = blob.outline(&mut Rnd::with_seed(11))?;
        let o1 = blob.outline(&mut Rnd::with_seed(11))?;
        assert_eq!(o0, o1);
        let o2 = blob.outline(&mut Rnd::with_seed(12))?;
        assert_ne!(o0, o2);
        Ok(())
    }

    #[test]
    fn test_blob_control_outside_chord() {
        // convexity proxy: the pushed control point sits strictly farther
        // from the center than the chord midpoint
        let center = Point::new(0.0, 0.0);
        let p0 = Point::new(10.0, 0.0);
        let p1 = Point::new(0.0, 10.0);
        let mid = (p0 + p1) / 2.0;
        let control = center + BLOB_PUSH * (mid - center);
        assert!(control.dist(center) > mid.dist(center));
    }

    #[test]
    fn test_blob_zero_wobble_runs_full_pipeline() -> Result<(), Error> {
        let blob = Blob::new((50.0, 50.0), 20.0).wobble(0.0).points(6);
        let outline = blob.outline(&mut Rnd::new())?;
        // still a smoothed polygon, not six raw anchors
        assert_eq!(outline.len(), 6 * BLOB_SEGMENT_STEPS);
        let floor = blob.radius * (PI / 6.0).cos();
        for point in &outline {
            assert!(point.dist(blob.center) >= floor - 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_blob_invalid() {
        let mut rnd = Rnd::new();
        let radius = Blob::new((0.0, 0.0), 0.0);
        assert!(matches!(
            radius.outline(&mut rnd),
            Err(Error::InvalidParameter { .. })
        ));
        let points = Blob::new((0.0, 0.0), 10.0).points(2);
        assert!(matches!(
            points.outline(&mut rnd),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_tentacle_outline_counts() -> Result<(), Error> {
        let tentacle = Tentacle::new((400.0, 300.0), (300.0, 500.0))
            .curl(0.4)
            .twist(0.5)
            .thickness(30.0);
        let outline = tentacle.outline()?;
        assert_eq!(outline.len(), 2 * (CENTERLINE_STEPS + 1));
        Ok(())
    }

    #[test]
    fn test_tentacle_straight_symmetry() -> Result<(), Error> {
        // straight vertical tentacle, outline sides mirror about x = 100
        let tentacle = Tentacle::new((100.0, 20.0), (100.0, 180.0))
            .thickness(20.0)
            .taper(0.3);
        let outline = tentacle.outline()?;
        let n = outline.len();

        let first = outline[0];
        let last = outline[n - 1];
        assert_approx_eq!(first.x() + last.x(), 200.0, 1e-6);
        assert_approx_eq!(first.y(), last.y(), 1e-6);
        // base is 20 wide, tip is 20 * 0.3 wide
        assert_approx_eq!((first.x() - last.x()).abs(), 20.0, 1e-6);
        let tip_side0 = outline[n / 2 - 1];
        let tip_side1 = outline[n / 2];
        assert_approx_eq!((tip_side0.x() - tip_side1.x()).abs(), 6.0, 1e-6);
        assert_approx_eq!(tip_side0.x() + tip_side1.x(), 200.0, 1e-6);
        Ok(())
    }

    #[test]
    fn test_tentacle_twist_bends_both_ways() -> Result<(), Error> {
        // with twist the two centerline halves sit on opposite sides of the
        // base..tip axis
        let tentacle = Tentacle::new((0.0, 0.0), (0.0, 100.0))
            .curl(0.5)
            .twist(1.0)
            .thickness(4.0);
        let centerline = tentacle.centerline()?;
        let early = centerline[CENTERLINE_STEPS / 4].x();
        let late = centerline[3 * CENTERLINE_STEPS / 4].x();
        assert!(early * late < 0.0, "{} and {} on the same side", early, late);
        Ok(())
    }

    #[test]
    fn test_tentacle_degenerate() {
        let tentacle = Tentacle::new((5.0, 5.0), (5.0, 5.0));
        assert!(matches!(
            tentacle.outline(),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_wave_polyline() {
        let wave = Wave::new((0.0, 300.0), (800.0, 300.0)).height(30.0).waves(3);
        let points = wave.polyline();
        assert_eq!(points.len(), 61);
        assert!(points[0].is_close_to(wave.start));
        assert!(points[60].dist(wave.end) < 1e-6);
        // peaks reach the amplitude
        let max = points
            .iter()
            .map(|p| (p.y() - 300.0).abs())
            .fold(0.0, Scalar::max);
        assert!(max > 29.0);

        // short wave still samples at least 50 steps
        assert_eq!(Wave::new((0.0, 0.0), (10.0, 0.0)).polyline().len(), 51);
    }

    #[test]
    fn test_pear_outline() -> Result<(), Error> {
        let pear = Pear::new((400.0, 200.0), 120.0, 100.0);
        let outline = pear.outline()?;
        assert_eq!(outline.len(), 2 * 3 * PEAR_ZONE_STEPS);

        // widest at the shoulder
        let max_half = outline
            .iter()
            .map(|p| (p.x() - 400.0).abs())
            .fold(0.0, Scalar::max);
        assert_approx_eq!(max_half, 60.0, 1e-6);

        // symmetric about the top center x
        let n = outline.len();
        for i in 0..n / 2 {
            let right = outline[i];
            let left = outline[n - 1 - i];
            assert_approx_eq!(right.x() + left.x(), 800.0, 1e-6);
            assert_approx_eq!(right.y(), left.y(), 1e-6);
        }

        // spans the full height
        assert_approx_eq!(outline[0].y(), 200.0, 1e-6);
        let bottom = outline
            .iter()
            .map(|p| p.y())
            .fold(0.0, Scalar::max);
        assert_approx_eq!(bottom, 300.0, 1e-6);
        Ok(())
    }

    #[test]
    fn test_pear_invalid() {
        assert!(matches!(
            Pear::new((0.0, 0.0), 0.0, 10.0).outline(),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
