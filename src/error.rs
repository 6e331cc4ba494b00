use std::fmt;

/// Errors raised by canvas operations
///
/// All errors are raised synchronously by the call that triggers them and
/// never leave the canvas partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// Canvas constructed with non-positive or over-limit dimensions
    InvalidDimensions { width: u32, height: u32 },
    /// Draw call would exceed the shape-count ceiling
    ShapeLimitExceeded,
    /// Degenerate geometry passed to an outline generator or the sampler
    InvalidParameter { reason: String },
    /// Fill references a gradient name that was never registered
    UnknownGradient { name: String },
    /// Operation on a group name never created or already removed
    UnknownGroup { name: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid canvas dimensions {}x{}", width, height)
            }
            Error::ShapeLimitExceeded => {
                write!(f, "shape limit exceeded ({})", crate::scene::MAX_SHAPES)
            }
            Error::InvalidParameter { reason } => write!(f, "invalid parameter: {}", reason),
            Error::UnknownGradient { name } => write!(f, "unknown gradient \"{}\"", name),
            Error::UnknownGroup { name } => write!(f, "unknown group \"{}\"", name),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, error)
    }
}

impl std::error::Error for Error {}
