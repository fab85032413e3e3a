use crate::MAX_PIXELS;
use core::{error::Error, fmt, num::ParseIntError};

/// The error returned when an input pixel sequence cannot be clustered.
///
/// This is checked once at the extraction entry point, before any seeding
/// work begins; no partial clustering state is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// The input pixel slice was empty.
    Empty,
    /// The input pixel slice was longer than [`MAX_PIXELS`].
    TooManyPixels {
        /// The length of the provided pixel slice.
        len: usize,
    },
}

impl InvalidInput {
    pub(crate) const fn check<T>(pixels: &[T]) -> Result<(), Self> {
        let len = pixels.len();
        if len == 0 {
            Err(Self::Empty)
        } else if len > MAX_PIXELS as usize {
            Err(Self::TooManyPixels { len })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Empty => f.write_str("got an empty pixel sequence"),
            Self::TooManyPixels { len } => write!(
                f,
                "got a pixel sequence with length {len} which is above the maximum {MAX_PIXELS}",
            ),
        }
    }
}

impl Error for InvalidInput {}

/// The error returned when a color space conversion operand falls outside its
/// documented domain.
///
/// For example, the hue passed to [`hsl_to_rgb`](crate::color_space::hsl_to_rgb)
/// must be in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfDomain {
    /// The name of the offending component, e.g. `"H"`.
    component: &'static str,
    /// The documented domain, e.g. `"[0, 360)"`.
    domain: &'static str,
}

impl OutOfDomain {
    pub(crate) const fn new(component: &'static str, domain: &'static str) -> Self {
        Self { component, domain }
    }

    /// The name of the component that was out of its domain.
    #[must_use]
    #[inline]
    pub const fn component(&self) -> &'static str {
        self.component
    }

    /// The documented domain of the component.
    #[must_use]
    #[inline]
    pub const fn domain(&self) -> &'static str {
        self.domain
    }
}

impl fmt::Display for OutOfDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { component, domain } = *self;
        write!(f, "the given {component} value is outside {domain}")
    }
}

impl Error for OutOfDomain {}

/// The error returned when parsing a hex color string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseHexError {
    /// The hex string did not have 6 digits after stripping an optional `#`.
    InvalidLength,
    /// A non-hexadecimal character was encountered.
    InvalidDigit(ParseIntError),
}

impl From<ParseIntError> for ParseHexError {
    fn from(err: ParseIntError) -> Self {
        Self::InvalidDigit(err)
    }
}

impl fmt::Display for ParseHexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("invalid hex color length (expected 6 digits)"),
            Self::InvalidDigit(err) => write!(f, "invalid hex digit: {err}"),
        }
    }
}

impl Error for ParseHexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDigit(err) => Some(err),
            Self::InvalidLength => None,
        }
    }
}
