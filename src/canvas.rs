//! Canvas façade: draw-call routing and SVG document serialization

use crate::{
    geometry::FmtScalar,
    grad::{Fill, Gradient, GradientRegistry, GradStops},
    outline::{Blob, Pear, Tentacle, Wave},
    scene::{Fragment, SceneGraph},
    utils::Rnd,
    Error, Point, Scalar,
};
use tracing::debug;

pub const MAX_WIDTH: u32 = 2000;
pub const MAX_HEIGHT: u32 = 2000;
pub const MAX_AREA: u64 = 4_000_000;

/// Fill and stroke attributes shared by the draw calls
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Fill value, solid color or gradient reference
    pub fill: Fill,
    /// Stroke color, organic shapes fall back to the fill color when unset
    pub stroke: Option<String>,
    pub stroke_width: Scalar,
    /// Transparency in [0, 1], omitted from the markup when fully opaque
    pub opacity: Option<Scalar>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Fill::default(),
            stroke: None,
            stroke_width: 1.0,
            opacity: None,
        }
    }
}

impl Style {
    pub fn new(fill: impl Into<Fill>) -> Self {
        Self {
            fill: fill.into(),
            ..Self::default()
        }
    }

    pub fn stroke(self, color: impl Into<String>) -> Self {
        Self {
            stroke: Some(color.into()),
            ..self
        }
    }

    pub fn stroke_width(self, stroke_width: Scalar) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }

    pub fn opacity(self, opacity: Scalar) -> Self {
        Self {
            opacity: Some(opacity),
            ..self
        }
    }
}

impl From<Fill> for Style {
    fn from(fill: Fill) -> Self {
        Self::new(fill)
    }
}

impl From<&str> for Style {
    fn from(fill: &str) -> Self {
        Self::new(fill)
    }
}

impl From<String> for Style {
    fn from(fill: String) -> Self {
        Self::new(fill)
    }
}

/// Main drawing surface, collects shapes and serializes them to SVG
///
/// Every draw call is atomic: it either appends exactly one fragment to the
/// scene graph or fails without touching it. Calls return `&mut Self` so
/// they chain with `?`:
///
/// ```
/// # use inkblot::{Canvas, Style};
/// # fn main() -> Result<(), inkblot::Error> {
/// let mut canvas = Canvas::new(200, 200, "#FFFFFF")?;
/// canvas
///     .circle((100.0, 100.0), 40.0, Style::new("#4ECDC4"))?
///     .rect((10.0, 10.0), 50.0, 30.0, "#FF6B6B")?;
/// let svg = canvas.to_svg();
/// # assert!(svg.contains("<circle"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: String,
    scene: SceneGraph,
    gradients: GradientRegistry,
}

impl Canvas {
    /// Create a canvas, dimensions are validated against the size limits
    pub fn new(width: u32, height: u32, background: impl Into<String>) -> Result<Self, Error> {
        if width == 0
            || height == 0
            || width > MAX_WIDTH
            || height > MAX_HEIGHT
            || width as u64 * height as u64 > MAX_AREA
        {
            return Err(Error::InvalidDimensions { width, height });
        }
        debug!(width, height, "canvas: new");
        Ok(Self {
            width,
            height,
            background: background.into(),
            scene: SceneGraph::new(),
            gradients: GradientRegistry::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of fragments currently in the scene
    pub fn shape_count(&self) -> usize {
        self.scene.fragment_count()
    }

    // common attribute tail: fill, optional stroke, optional opacity
    fn style_attrs(&self, style: &Style, default_stroke_to_fill: bool) -> Result<String, Error> {
        let fill = self.gradients.resolve(&style.fill)?;
        let mut attrs = format!(" fill=\"{}\"", fill);
        let stroke = match &style.stroke {
            Some(stroke) => Some(stroke.clone()),
            None if default_stroke_to_fill => Some(fill),
            None => None,
        };
        if let Some(stroke) = stroke {
            attrs.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                stroke,
                FmtScalar(style.stroke_width)
            ));
        }
        if let Some(opacity) = style.opacity {
            if opacity < 1.0 {
                attrs.push_str(&format!(" opacity=\"{}\"", FmtScalar(opacity)));
            }
        }
        Ok(attrs)
    }

    fn push(&mut self, markup: String) -> Result<&mut Self, Error> {
        self.scene.push(Fragment::new(markup))?;
        Ok(self)
    }

    /// Draw a rectangle with its top-left corner at `origin`
    pub fn rect(
        &mut self,
        origin: impl Into<Point>,
        width: Scalar,
        height: Scalar,
        style: impl Into<Style>,
    ) -> Result<&mut Self, Error> {
        let origin = origin.into();
        let attrs = self.style_attrs(&style.into(), false)?;
        self.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}/>",
            FmtScalar(origin.x()),
            FmtScalar(origin.y()),
            FmtScalar(width),
            FmtScalar(height),
            attrs
        ))
    }

    /// Draw a rectangle with rounded corners
    pub fn rounded_rect(
        &mut self,
        origin: impl Into<Point>,
        width: Scalar,
        height: Scalar,
        radius: Scalar,
        style: impl Into<Style>,
    ) -> Result<&mut Self, Error> {
        let origin = origin.into();
        let attrs = self.style_attrs(&style.into(), false)?;
        self.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" ry=\"{}\"{}/>",
            FmtScalar(origin.x()),
            FmtScalar(origin.y()),
            FmtScalar(width),
            FmtScalar(height),
            FmtScalar(radius),
            FmtScalar(radius),
            attrs
        ))
    }

    /// Draw a circle centered at `center`
    pub fn circle(
        &mut self,
        center: impl Into<Point>,
        radius: Scalar,
        style: impl Into<Style>,
    ) -> Result<&mut Self, Error> {
        let center = center.into();
        let attrs = self.style_attrs(&style.into(), false)?;
        self.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
            FmtScalar(center.x()),
            FmtScalar(center.y()),
            FmtScalar(radius),
            attrs
        ))
    }

    /// Draw an ellipse with horizontal radius `rx` and vertical radius `ry`
    pub fn ellipse(
        &mut self,
        center: impl Into<Point>,
        rx: Scalar,
        ry: Scalar,
        style: impl Into<Style>,
    ) -> Result<&mut Self, Error> {
        let center = center.into();
        let attrs = self.style_attrs(&style.into(), false)?;
        self.push(format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{}/>",
            FmtScalar(center.x()),
            FmtScalar(center.y()),
            FmtScalar(rx),
            FmtScalar(ry),
            attrs
        ))
    }

    /// Draw a straight line
    pub fn line(
        &mut self,
        start: impl Into<Point>,
        end: impl Into<Point>,
        stroke: impl Into<String>,
        stroke_width: Scalar,
    ) -> Result<&mut Self, Error> {
        let start = start.into();
        let end = end.into();
        self.push(format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            FmtScalar(start.x()),
            FmtScalar(start.y()),
            FmtScalar(end.x()),
            FmtScalar(end.y()),
            stroke.into(),
            FmtScalar(stroke_width)
        ))
    }

    /// Draw a closed polygon through `points`
    pub fn polygon(
        &mut self,
        points: &[Point],
        style: impl Into<Style>,
    ) -> Result<&mut Self, Error> {
        let attrs = self.style_attrs(&style.into(), false)?;
        self.push(format!(
            "<polygon points=\"{}\"{}/>",
            points_attr(points),
            attrs
        ))
    }

    fn filled_outline(
        &mut self,
        points: &[Point],
        style: Style,
    ) -> Result<&mut Self, Error> {
        // organic shapes default the stroke to the fill color
        let attrs = self.style_attrs(&style, true)?;
        self.push(format!(
            "<polygon points=\"{}\"{}/>",
            points_attr(points),
            attrs
        ))
    }

    /// Draw text, `origin.y` is the baseline
    pub fn text(
        &mut self,
        origin: impl Into<Point>,
        content: &str,
        size: Scalar,
        fill: impl Into<Fill>,
        font: &str,
    ) -> Result<&mut Self, Error> {
        let origin = origin.into();
        let fill = self.gradients.resolve(&fill.into())?;
        self.push(format!(
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" font-family=\"{}\">{}</text>",
            FmtScalar(origin.x()),
            FmtScalar(origin.y()),
            FmtScalar(size),
            fill,
            font,
            escape_text(content)
        ))
    }

    /// Draw a coordinate grid with labels every second line
    pub fn grid(
        &mut self,
        spacing: u32,
        color: &str,
        show_coords: bool,
    ) -> Result<&mut Self, Error> {
        if spacing == 0 {
            return Err(Error::InvalidParameter {
                reason: "grid spacing must be positive".to_string(),
            });
        }
        let mut x = spacing;
        while x < self.width {
            self.line(
                (x as Scalar, 0.0),
                (x as Scalar, self.height as Scalar),
                color,
                0.5,
            )?;
            if show_coords && x % (spacing * 2) == 0 {
                self.text(
                    (x as Scalar + 2.0, 12.0),
                    &x.to_string(),
                    10.0,
                    "#AAAAAA",
                    "monospace",
                )?;
            }
            x += spacing;
        }
        let mut y = spacing;
        while y < self.height {
            self.line(
                (0.0, y as Scalar),
                (self.width as Scalar, y as Scalar),
                color,
                0.5,
            )?;
            if show_coords && y % (spacing * 2) == 0 {
                self.text(
                    (2.0, y as Scalar - 2.0),
                    &y.to_string(),
                    10.0,
                    "#AAAAAA",
                    "monospace",
                )?;
            }
            y += spacing;
        }
        if show_coords {
            self.text((2.0, 12.0), "(0,0)", 10.0, "#888888", "monospace")?;
        }
        Ok(self)
    }

    /// Draw an organic blob, radius jitter comes from `rnd`
    pub fn blob(
        &mut self,
        blob: Blob,
        style: impl Into<Style>,
        rnd: &mut Rnd,
    ) -> Result<&mut Self, Error> {
        let outline = blob.outline(rnd)?;
        self.filled_outline(&outline, style.into())
    }

    /// Draw a tapered tentacle ribbon
    pub fn tentacle(
        &mut self,
        tentacle: Tentacle,
        style: impl Into<Style>,
    ) -> Result<&mut Self, Error> {
        let outline = tentacle.outline()?;
        self.filled_outline(&outline, style.into())
    }

    /// Draw a pear profile
    pub fn pear(&mut self, pear: Pear, style: impl Into<Style>) -> Result<&mut Self, Error> {
        let outline = pear.outline()?;
        self.filled_outline(&outline, style.into())
    }

    /// Draw a wavy line, stroke only
    pub fn wave(
        &mut self,
        wave: Wave,
        stroke: impl Into<String>,
        stroke_width: Scalar,
    ) -> Result<&mut Self, Error> {
        let points = wave.polyline();
        self.push(format!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            points_attr(&points),
            stroke.into(),
            FmtScalar(stroke_width)
        ))
    }

    /// Register a linear gradient usable as `fill = "gradient:<name>"`
    ///
    /// `start` and `end` are in percent space (0-100).
    pub fn linear_gradient(
        &mut self,
        name: impl Into<String>,
        start: impl Into<Point>,
        end: impl Into<Point>,
        stops: impl Into<GradStops>,
    ) -> &mut Self {
        self.gradients
            .register(name, Gradient::linear(start, end, stops));
        self
    }

    /// Register a radial gradient usable as `fill = "gradient:<name>"`
    ///
    /// `center` and `radius` are in percent space (0-100).
    pub fn radial_gradient(
        &mut self,
        name: impl Into<String>,
        center: impl Into<Point>,
        radius: Scalar,
        stops: impl Into<GradStops>,
    ) -> &mut Self {
        self.gradients
            .register(name, Gradient::radial(center, radius, stops));
        self
    }

    /// Open a named group, shapes drawn until `end_group` land in it
    ///
    /// Creating is idempotent: reopening an existing group appends to it
    /// and leaves its transform and visibility alone.
    pub fn begin_group(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.scene.open_group(name)?;
        Ok(self)
    }

    /// Close the current group, later shapes go to the top level
    pub fn end_group(&mut self) -> &mut Self {
        self.scene.close_group();
        self
    }

    /// Run `body` with the named group open, closing it afterwards
    ///
    /// The group is closed even when `body` fails.
    pub fn with_group<F>(&mut self, name: &str, body: F) -> Result<&mut Self, Error>
    where
        F: FnOnce(&mut Canvas) -> Result<(), Error>,
    {
        self.scene.open_group(name)?;
        let result = body(self);
        self.scene.close_group();
        result?;
        Ok(self)
    }

    /// Move a group to offset `(dx, dy)`, replacing any previous move
    pub fn move_group(&mut self, name: &str, dx: Scalar, dy: Scalar) -> Result<&mut Self, Error> {
        self.scene.move_group(name, dx, dy)?;
        Ok(self)
    }

    /// Rotate a group by `angle` degrees around `(cx, cy)`
    pub fn rotate_group(
        &mut self,
        name: &str,
        angle: Scalar,
        cx: Scalar,
        cy: Scalar,
    ) -> Result<&mut Self, Error> {
        self.scene.rotate_group(name, angle, cx, cy)?;
        Ok(self)
    }

    /// Hide a group from the serialized output
    pub fn hide_group(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.scene.hide_group(name)?;
        Ok(self)
    }

    /// Show a previously hidden group
    pub fn show_group(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.scene.show_group(name)?;
        Ok(self)
    }

    /// Remove a group permanently
    pub fn remove_group(&mut self, name: &str) -> Result<&mut Self, Error> {
        self.scene.remove_group(name)?;
        Ok(self)
    }

    /// Clear all shapes and groups, registered gradients are kept
    pub fn clear(&mut self) -> &mut Self {
        self.scene.clear();
        self
    }

    /// Serialize the whole scene to an SVG document string
    ///
    /// Pure read of the accumulated state: calling it twice without
    /// drawing in between yields identical output.
    pub fn to_svg(&self) -> String {
        debug!(shapes = self.scene.fragment_count(), "canvas: serialize");
        let mut out = String::new();
        out.push_str(&format!(
            "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.width, self.height
        ));
        out.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            self.background
        ));
        self.gradients.write_defs(&mut out);
        self.scene.write_svg(&mut out);
        out.push_str("</svg>");
        out
    }
}

/// `points` attribute payload: `x,y` pairs separated by spaces
fn points_attr(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&point.to_string());
    }
    out
}

/// Escape text content for embedding in SVG markup
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MAX_SHAPES;

    #[test]
    fn test_dimension_limits() {
        assert!(Canvas::new(800, 600, "#FFFFFF").is_ok());
        assert!(Canvas::new(2000, 2000, "#FFFFFF").is_ok());
        for (w, h) in [(0, 100), (100, 0), (2001, 100), (100, 2001)] {
            assert_eq!(
                Canvas::new(w, h, "#FFFFFF").err(),
                Some(Error::InvalidDimensions {
                    width: w,
                    height: h
                })
            );
        }
    }

    #[test]
    fn test_basic_shapes_markup() -> Result<(), Error> {
        let mut canvas = Canvas::new(200, 200, "#FFFFFF")?;
        canvas
            .rect((10.0, 20.0), 50.0, 30.0, "#FF6B6B")?
            .circle((100.0, 100.0), 25.0, Style::new("#4ECDC4").opacity(0.5))?
            .line((0.0, 0.0), (200.0, 200.0), "#000000", 2.0)?;

        let svg = canvas.to_svg();
        assert!(svg.starts_with(
            "<svg width=\"200\" height=\"200\" xmlns=\"http://www.w3.org/2000/svg\">"
        ));
        assert!(svg.contains(
            "<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>"
        ));
        assert!(svg.contains(
            "<rect x=\"10\" y=\"20\" width=\"50\" height=\"30\" fill=\"#FF6B6B\"/>"
        ));
        assert!(svg.contains(
            "<circle cx=\"100\" cy=\"100\" r=\"25\" fill=\"#4ECDC4\" opacity=\"0.5\"/>"
        ));
        assert!(svg.contains(
            "<line x1=\"0\" y1=\"0\" x2=\"200\" y2=\"200\" stroke=\"#000000\" stroke-width=\"2\"/>"
        ));
        assert!(svg.ends_with("</svg>"));
        Ok(())
    }

    #[test]
    fn test_to_svg_idempotent() -> Result<(), Error> {
        let mut canvas = Canvas::new(100, 100, "#FFF")?;
        canvas
            .linear_gradient("sky", (0.0, 0.0), (0.0, 100.0), ["#001133", "#3366AA"])
            .rect((0.0, 0.0), 100.0, 50.0, "gradient:sky")?;
        canvas.begin_group("g")?.circle((5.0, 5.0), 2.0, "#abc")?;
        assert_eq!(canvas.to_svg(), canvas.to_svg());
        Ok(())
    }

    #[test]
    fn test_gradient_fill_resolution() -> Result<(), Error> {
        let mut canvas = Canvas::new(100, 100, "#FFF")?;
        canvas.linear_gradient("sunset", (0.0, 0.0), (100.0, 0.0), ["#fff", "#000"]);
        canvas.circle((50.0, 50.0), 20.0, "gradient:sunset")?;

        let svg = canvas.to_svg();
        assert!(svg.contains("fill=\"url(#grad_sunset)\""));
        // the gradient definition appears exactly once in <defs>
        assert_eq!(svg.matches("<linearGradient id=\"grad_sunset\"").count(), 1);
        assert!(svg.contains("<stop offset=\"0%\" stop-color=\"#fff\"/>"));
        assert!(svg.contains("<stop offset=\"100%\" stop-color=\"#000\"/>"));

        // unknown gradient fails without appending anything
        let before = canvas.shape_count();
        assert_eq!(
            canvas.circle((0.0, 0.0), 1.0, "gradient:nope").err(),
            Some(Error::UnknownGradient {
                name: "nope".to_string()
            })
        );
        assert_eq!(canvas.shape_count(), before);
        Ok(())
    }

    #[test]
    fn test_wave_has_no_fill() -> Result<(), Error> {
        let mut canvas = Canvas::new(800, 600, "#FFF")?;
        canvas.wave(
            Wave::new((0.0, 300.0), (800.0, 300.0)).height(30.0).waves(3),
            "#0077BE",
            2.0,
        )?;
        let svg = canvas.to_svg();
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("fill=\"none\""));
        Ok(())
    }

    #[test]
    fn test_organic_stroke_defaults_to_fill() -> Result<(), Error> {
        let mut canvas = Canvas::new(200, 200, "#FFF")?;
        canvas.pear(Pear::new((100.0, 20.0), 80.0, 100.0), "#88CC44")?;
        let svg = canvas.to_svg();
        assert!(svg.contains("fill=\"#88CC44\" stroke=\"#88CC44\""));
        Ok(())
    }

    #[test]
    fn test_straight_tentacle_scenario() -> Result<(), Error> {
        // end-to-end: straight vertical tentacle renders as one polygon
        // with even symmetry about x = 100 at both ends
        let mut canvas = Canvas::new(200, 200, "#FFFFFF")?;
        canvas.tentacle(
            Tentacle::new((100.0, 20.0), (100.0, 180.0))
                .thickness(20.0)
                .taper(0.3),
            "#AA66CC",
        )?;
        let svg = canvas.to_svg();
        assert_eq!(svg.matches("<polygon").count(), 1);

        let points = svg
            .split("points=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        let parsed: Vec<Point> = points
            .split(' ')
            .map(|pair| {
                let (x, y) = pair.split_once(',').unwrap();
                Point::new(x.parse().unwrap(), y.parse().unwrap())
            })
            .collect();
        let n = parsed.len();
        assert_eq!(n, 102);
        // base pair mirrors about x = 100
        assert!((parsed[0].x() + parsed[n - 1].x() - 200.0).abs() < 1e-3);
        // tip pair mirrors about x = 100
        assert!((parsed[n / 2 - 1].x() + parsed[n / 2].x() - 200.0).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_blob_deterministic_with_seed() -> Result<(), Error> {
        let mut c0 = Canvas::new(400, 400, "#FFF")?;
        let mut c1 = Canvas::new(400, 400, "#FFF")?;
        let blob = Blob::new((200.0, 200.0), 80.0).wobble(0.5);
        c0.blob(blob, "#3355FF", &mut Rnd::with_seed(9))?;
        c1.blob(blob, "#3355FF", &mut Rnd::with_seed(9))?;
        assert_eq!(c0.to_svg(), c1.to_svg());
        Ok(())
    }

    #[test]
    fn test_group_scenario() -> Result<(), Error> {
        let mut canvas = Canvas::new(400, 400, "#FFFFFF")?;
        canvas.with_group("flower", |canvas| {
            canvas
                .circle((100.0, 100.0), 20.0, "#FFD93D")?
                .circle((85.0, 90.0), 10.0, "#FF6B9D")?;
            Ok(())
        })?;
        canvas.move_group("flower", 50.0, 30.0)?;

        let svg = canvas.to_svg();
        assert!(svg.contains("<g id=\"flower\" transform=\"translate(50, 30)\">"));

        canvas.hide_group("flower")?;
        assert!(!canvas.to_svg().contains("flower"));
        canvas.show_group("flower")?;
        assert!(canvas
            .to_svg()
            .contains("<g id=\"flower\" transform=\"translate(50, 30)\">"));

        canvas.remove_group("flower")?;
        assert_eq!(
            canvas.move_group("flower", 0.0, 0.0).err(),
            Some(Error::UnknownGroup {
                name: "flower".to_string()
            })
        );
        Ok(())
    }

    #[test]
    fn test_group_closure_on_error() -> Result<(), Error> {
        let mut canvas = Canvas::new(100, 100, "#FFF")?;
        let result = canvas.with_group("broken", |canvas| {
            canvas.circle((0.0, 0.0), 1.0, "gradient:missing")?;
            Ok(())
        });
        assert!(result.is_err());
        // the group is closed despite the failure inside
        canvas.circle((5.0, 5.0), 1.0, "#000")?;
        let svg = canvas.to_svg();
        assert!(svg.contains("<circle cx=\"5\""));
        assert!(!svg.contains("<g id=\"broken\"><circle"));
        Ok(())
    }

    #[test]
    fn test_shape_limit_atomicity() -> Result<(), Error> {
        let mut canvas = Canvas::new(100, 100, "#FFF")?;
        for _ in 0..MAX_SHAPES {
            canvas.rect((0.0, 0.0), 1.0, 1.0, "#000")?;
        }
        assert_eq!(canvas.shape_count(), MAX_SHAPES);
        assert_eq!(
            canvas.rect((0.0, 0.0), 1.0, 1.0, "#000").err(),
            Some(Error::ShapeLimitExceeded)
        );
        assert_eq!(canvas.shape_count(), MAX_SHAPES);
        Ok(())
    }

    #[test]
    fn test_clear_keeps_gradients() -> Result<(), Error> {
        let mut canvas = Canvas::new(100, 100, "#FFF")?;
        canvas.linear_gradient("keep", (0.0, 0.0), (100.0, 0.0), ["#fff", "#000"]);
        canvas.rect((0.0, 0.0), 10.0, 10.0, "gradient:keep")?;
        canvas.clear();

        assert_eq!(canvas.shape_count(), 0);
        // gradient definitions survive a clear
        canvas.rect((0.0, 0.0), 10.0, 10.0, "gradient:keep")?;
        Ok(())
    }

    #[test]
    fn test_text_escaping() -> Result<(), Error> {
        let mut canvas = Canvas::new(100, 100, "#FFF")?;
        canvas.text((0.0, 20.0), "a < b & c > d", 16.0, "#000", "Arial")?;
        let svg = canvas.to_svg();
        assert!(svg.contains(">a &lt; b &amp; c &gt; d</text>"));
        Ok(())
    }

    #[test]
    fn test_grid() -> Result<(), Error> {
        let mut canvas = Canvas::new(200, 100, "#FFF")?;
        canvas.grid(50, "#E8E8E8", true)?;
        let svg = canvas.to_svg();
        // three vertical lines, one horizontal, labels on every second line
        assert!(svg.contains("x1=\"50\""));
        assert!(svg.contains("x1=\"150\""));
        assert!(svg.contains("y1=\"50\""));
        assert!(svg.contains(">100</text>"));
        assert!(svg.contains(">(0,0)</text>"));
        Ok(())
    }
}
