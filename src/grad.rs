//! Gradient definitions, the fill value convention and the registry

use crate::{geometry::FmtScalar, Error, Point, Scalar};
use std::{cmp::Ordering, fmt};

/// Reserved prefix marking a fill string as a gradient reference
pub const GRADIENT_PREFIX: &str = "gradient:";

/// Specifies color at a particular offset of the gradient
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradStop {
    /// Offset of the stop in [0, 1]
    pub offset: Scalar,
    /// Opaque CSS/SVG color string
    pub color: String,
}

impl GradStop {
    pub fn new(offset: Scalar, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// List of all `GradStop` in a gradient, ordered by offset
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradStops {
    stops: Vec<GradStop>,
}

impl GradStops {
    /// Explicit stops, sorted so offsets are non-decreasing
    pub fn new(mut stops: Vec<GradStop>) -> Self {
        stops.sort_by(|s0, s1| {
            s0.offset
                .partial_cmp(&s1.offset)
                .unwrap_or(Ordering::Greater)
        });
        if stops.is_empty() {
            stops.push(GradStop::new(0.0, "#000000"));
            stops.push(GradStop::new(1.0, "#FFFFFF"));
        }
        Self { stops }
    }

    /// Colors without offsets, distributed evenly across [0, 1]
    pub fn evenly<S: Into<String>>(colors: impl IntoIterator<Item = S>) -> Self {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        let count = colors.len();
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| {
                let offset = if count > 1 {
                    i as Scalar / (count - 1) as Scalar
                } else {
                    0.0
                };
                GradStop { offset, color }
            })
            .collect();
        Self::new(stops)
    }

    pub fn stops(&self) -> &[GradStop] {
        &self.stops
    }

    fn write_svg(&self, out: &mut String) {
        for stop in &self.stops {
            out.push_str(&format!(
                "<stop offset=\"{}%\" stop-color=\"{}\"/>",
                FmtScalar(stop.offset * 100.0),
                stop.color
            ));
        }
    }
}

impl From<Vec<GradStop>> for GradStops {
    fn from(stops: Vec<GradStop>) -> Self {
        Self::new(stops)
    }
}

impl<const N: usize> From<[&str; N]> for GradStops {
    fn from(colors: [&str; N]) -> Self {
        Self::evenly(colors)
    }
}

impl<const N: usize> From<[(Scalar, &str); N]> for GradStops {
    fn from(stops: [(Scalar, &str); N]) -> Self {
        Self::new(
            stops
                .into_iter()
                .map(|(offset, color)| GradStop::new(offset, color))
                .collect(),
        )
    }
}

/// Gradient definition, geometry is expressed in percent space (0-100)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gradient {
    Linear {
        start: Point,
        end: Point,
        stops: GradStops,
    },
    Radial {
        center: Point,
        radius: Scalar,
        stops: GradStops,
    },
}

impl Gradient {
    pub fn linear(
        start: impl Into<Point>,
        end: impl Into<Point>,
        stops: impl Into<GradStops>,
    ) -> Self {
        Self::Linear {
            start: start.into(),
            end: end.into(),
            stops: stops.into(),
        }
    }

    pub fn radial(
        center: impl Into<Point>,
        radius: Scalar,
        stops: impl Into<GradStops>,
    ) -> Self {
        Self::Radial {
            center: center.into(),
            radius,
            stops: stops.into(),
        }
    }

    pub fn stops(&self) -> &GradStops {
        match self {
            Gradient::Linear { stops, .. } => stops,
            Gradient::Radial { stops, .. } => stops,
        }
    }

    /// SVG `<defs>` entry for this gradient under `id="grad_<name>"`
    fn write_svg(&self, name: &str, out: &mut String) {
        match self {
            Gradient::Linear { start, end, stops } => {
                out.push_str(&format!(
                    "<linearGradient id=\"grad_{}\" x1=\"{}%\" y1=\"{}%\" x2=\"{}%\" y2=\"{}%\">",
                    name,
                    FmtScalar(start.x()),
                    FmtScalar(start.y()),
                    FmtScalar(end.x()),
                    FmtScalar(end.y()),
                ));
                stops.write_svg(out);
                out.push_str("</linearGradient>");
            }
            Gradient::Radial {
                center,
                radius,
                stops,
            } => {
                out.push_str(&format!(
                    "<radialGradient id=\"grad_{}\" cx=\"{}%\" cy=\"{}%\" r=\"{}%\">",
                    name,
                    FmtScalar(center.x()),
                    FmtScalar(center.y()),
                    FmtScalar(*radius),
                ));
                stops.write_svg(out);
                out.push_str("</radialGradient>");
            }
        }
    }
}

/// Fill value at the API boundary
///
/// The `gradient:` prefix convention is parsed exactly once, when a fill
/// string enters a draw call; everything past that point works with the
/// tagged variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fill {
    /// Opaque CSS/SVG color string passed through verbatim
    Solid(String),
    /// Symbolic reference to a registered gradient by name
    Gradient(String),
}

impl Fill {
    /// Name the fill refers to, if it is a gradient reference
    pub fn gradient_name(&self) -> Option<&str> {
        match self {
            Fill::Solid(_) => None,
            Fill::Gradient(name) => Some(name),
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Solid("#000000".to_string())
    }
}

impl From<&str> for Fill {
    fn from(value: &str) -> Self {
        match value.strip_prefix(GRADIENT_PREFIX) {
            Some(name) => Fill::Gradient(name.to_string()),
            None => Fill::Solid(value.to_string()),
        }
    }
}

impl From<String> for Fill {
    fn from(value: String) -> Self {
        Fill::from(value.as_str())
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::Solid(color) => write!(f, "{}", color),
            Fill::Gradient(name) => write!(f, "{}{}", GRADIENT_PREFIX, name),
        }
    }
}

/// Named gradient definitions owned by a canvas
///
/// Keeps registration order for the `<defs>` block, re-registering a name
/// overwrites the definition in place.
#[derive(Debug, Clone, Default)]
pub struct GradientRegistry {
    entries: Vec<(String, Gradient)>,
}

impl GradientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, gradient: Gradient) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = gradient,
            None => self.entries.push((name, gradient)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Gradient> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, gradient)| gradient)
    }

    /// Resolve a fill to the literal attribute value
    ///
    /// Solid colors pass through verbatim, gradient references become
    /// `url(#grad_<name>)` and must name a registered gradient.
    pub fn resolve(&self, fill: &Fill) -> Result<String, Error> {
        match fill {
            Fill::Solid(color) => Ok(color.clone()),
            Fill::Gradient(name) => {
                if self.get(name).is_none() {
                    return Err(Error::UnknownGradient { name: name.clone() });
                }
                Ok(format!("url(#grad_{})", name))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `<defs>` block with every registered gradient, empty string if none
    pub fn write_defs(&self, out: &mut String) {
        if self.entries.is_empty() {
            return;
        }
        out.push_str("<defs>");
        for (name, gradient) in &self.entries {
            gradient.write_svg(name, out);
        }
        out.push_str("</defs>");
    }
}
