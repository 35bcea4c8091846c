use std::fmt;
use std::io;

/// Errors raised while building cost fields or their parameters.
#[derive(Debug)]
pub enum FieldError {
    /// The raster could not be read or decoded.
    Image(image::ImageError),
    /// The OpenEXR raster could not be read or decoded.
    Exr(exr::error::Error),
    /// The raster's channel layout has no cost interpretation.
    UnsupportedChannels(image::ColorType),
    /// The OpenEXR raster has neither a `Y` channel nor all of `R`, `G`, `B`, `A`.
    UnsupportedExrChannels(Vec<String>),
    /// The OpenEXR raster has both a `Y` channel and `R`, `G`, `B`, `A`.
    AmbiguousExrChannels(Vec<String>),
    /// A scaling factor was missing, malformed or not strictly positive.
    InvalidScaling(String),
    Io(io::Error),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Image(e) => write!(f, "cannot load raster: {e}"),
            FieldError::Exr(e) => write!(f, "cannot load OpenEXR raster: {e}"),
            FieldError::UnsupportedChannels(c) => {
                write!(f, "unsupported raster channel layout {c:?}")
            }
            FieldError::UnsupportedExrChannels(names) => {
                write!(f, "unsupported OpenEXR channel set [{}]", names.join(", "))
            }
            FieldError::AmbiguousExrChannels(names) => write!(
                f,
                "ambiguous OpenEXR channel set [{}]: both Y and RGBA present",
                names.join(", ")
            ),
            FieldError::InvalidScaling(s) => write!(f, "invalid scaling factors: {s}"),
            FieldError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Image(e) => Some(e),
            FieldError::Exr(e) => Some(e),
            FieldError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for FieldError {
    fn from(e: image::ImageError) -> Self {
        FieldError::Image(e)
    }
}

impl From<exr::error::Error> for FieldError {
    fn from(e: exr::error::Error) -> Self {
        FieldError::Exr(e)
    }
}

impl From<io::Error> for FieldError {
    fn from(e: io::Error) -> Self {
        FieldError::Io(e)
    }
}
