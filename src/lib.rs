//! Educational vector-drawing library with procedural organic shapes.
//!
//! Main features:
//!  - Canvas that accumulates shapes and serializes to an SVG string
//!  - Organic primitives: blob, tentacle, wave, pear
//!  - Named gradients and named groups with transform/visibility control
//!
#![deny(warnings)]

mod canvas;
mod curve;
mod error;
mod geometry;
mod grad;
mod outline;
mod scene;
mod utils;

pub use canvas::{Canvas, Style, MAX_AREA, MAX_HEIGHT, MAX_WIDTH};
pub use curve::{Cubic, Curve, Quad};
pub use error::Error;
pub use geometry::{scalar_fmt, Point, Scalar, EPSILON, PI};
pub use grad::{Fill, GradStop, GradStops, Gradient, GradientRegistry, GRADIENT_PREFIX};
pub use outline::{Blob, Pear, Tentacle, Wave};
pub use scene::{Fragment, Group, SceneGraph, MAX_SHAPES};
pub use utils::{clamp, Rnd};
