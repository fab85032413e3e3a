use crate::math;
use alloc::vec::Vec;
use core::{
    error::Error,
    fmt,
    ops::{Deref, Index},
    slice,
};
use palette::Srgb;

/// The error returned when attempting to convert an out of range integer into a [`PaletteSize`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaletteSizeFromIntError(());

impl fmt::Display for PaletteSizeFromIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("out of range conversion from integer to palette size")
    }
}

impl Error for PaletteSizeFromIntError {}

/// The number of colors to extract from an image.
///
/// This is a simple new type wrapper around `u16` with the invariant that it
/// must be in the range `2..=256` specified by [`PaletteSize::MIN`] and
/// [`PaletteSize::MAX`]. A single-color "palette" is not a clustering problem,
/// so `1` is rejected alongside `0`.
///
/// # Examples
///
/// A [`PaletteSize`] can be created from a `u16` or `usize`. To do so, use either:
/// - The clamping functions like [`from_u16_clamped`](PaletteSize::from_u16_clamped).
/// - The `TryFrom` trait implementations for [`PaletteSize`].
///   - There are also `const` compatible functions like [`try_from_u16`](PaletteSize::try_from_u16).
///
/// You can also use the [`PaletteSize::MIN`] or [`PaletteSize::MAX`] constants.
///
/// ```
/// # use kpalette::{PaletteSize, PaletteSizeFromIntError};
/// # fn main() -> Result<(), PaletteSizeFromIntError> {
/// let k: PaletteSize = 64u16.try_into()?;
/// assert_eq!(k, 64u16);
/// assert_eq!(PaletteSize::try_from(16usize)?, 16u16);
/// assert_eq!(PaletteSize::try_from_u16(256), Some(PaletteSize::MAX));
/// assert_eq!(PaletteSize::try_from_u16(1), None);
/// assert_eq!(PaletteSize::from_u16_clamped(1024), PaletteSize::MAX);
/// assert_eq!(PaletteSize::from_u16_clamped(0), PaletteSize::MIN);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(u16);

impl PaletteSize {
    /// The smallest possible palette size, which is `2`.
    pub const MIN: Self = Self(2);

    /// The largest possible palette size, which is `256`.
    pub const MAX: Self = Self(256);

    /// Returns a [`PaletteSize`] as a `u16`.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns a [`PaletteSize`] as a `usize`.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Create a [`PaletteSize`] directly from the given `u16` without ensuring
    /// that it is in range.
    #[inline]
    const fn new_unchecked(value: u16) -> Self {
        debug_assert!(Self::MIN.as_u16() <= value && value <= Self::MAX.as_u16());
        Self(value)
    }

    /// Create a [`PaletteSize`] from a `u16`, returning `None` if the provided `value`
    /// is less than [`PaletteSize::MIN`] or greater than [`PaletteSize::MAX`].
    #[must_use]
    #[inline]
    pub const fn try_from_u16(value: u16) -> Option<Self> {
        if Self::MIN.as_u16() <= value && value <= Self::MAX.as_u16() {
            Some(Self::new_unchecked(value))
        } else {
            None
        }
    }

    /// Create a [`PaletteSize`] from a `usize`, returning `None` if the provided `value`
    /// is less than [`PaletteSize::MIN`] or greater than [`PaletteSize::MAX`].
    #[must_use]
    #[inline]
    pub const fn try_from_usize(value: usize) -> Option<Self> {
        if value <= Self::MAX.as_usize() {
            #[allow(clippy::cast_possible_truncation)]
            Self::try_from_u16(value as u16)
        } else {
            None
        }
    }

    /// Create a [`PaletteSize`] from a `u16`, clamping out of range values to
    /// [`PaletteSize::MIN`] or [`PaletteSize::MAX`].
    #[must_use]
    #[inline]
    pub const fn from_u16_clamped(value: u16) -> Self {
        if value < Self::MIN.as_u16() {
            Self::MIN
        } else if value > Self::MAX.as_u16() {
            Self::MAX
        } else {
            Self::new_unchecked(value)
        }
    }

    /// Create a [`PaletteSize`] from a `usize`, clamping out of range values to
    /// [`PaletteSize::MIN`] or [`PaletteSize::MAX`].
    #[must_use]
    #[inline]
    pub const fn from_usize_clamped(value: usize) -> Self {
        if value > Self::MAX.as_usize() {
            Self::MAX
        } else {
            #[allow(clippy::cast_possible_truncation)]
            Self::from_u16_clamped(value as u16)
        }
    }
}

impl From<PaletteSize> for u16 {
    #[inline]
    fn from(value: PaletteSize) -> Self {
        value.as_u16()
    }
}

impl From<PaletteSize> for usize {
    #[inline]
    fn from(value: PaletteSize) -> Self {
        value.as_usize()
    }
}

impl TryFrom<u16> for PaletteSize {
    type Error = PaletteSizeFromIntError;

    #[inline]
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_from_u16(value).ok_or(PaletteSizeFromIntError(()))
    }
}

impl TryFrom<usize> for PaletteSize {
    type Error = PaletteSizeFromIntError;

    #[inline]
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::try_from_usize(value).ok_or(PaletteSizeFromIntError(()))
    }
}

impl PartialEq<u16> for PaletteSize {
    #[inline]
    fn eq(&self, other: &u16) -> bool {
        self.as_u16() == *other
    }
}

impl PartialEq<PaletteSize> for u16 {
    #[inline]
    fn eq(&self, other: &PaletteSize) -> bool {
        *self == other.as_u16()
    }
}

impl fmt::Display for PaletteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_u16().fmt(f)
    }
}

/// An extracted color palette.
///
/// Each entry is an RGB triple with channel values on the `[0, 255]` scale,
/// rounded to the precision requested from the
/// [`PaletteExtractor`](crate::PaletteExtractor) (integer-valued by default).
/// Entries are in cluster creation order, not sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette(Vec<[f32; 3]>);

impl Palette {
    /// Create a new [`Palette`] without checking that it is non-empty.
    #[inline]
    pub(crate) fn new_unchecked(colors: Vec<[f32; 3]>) -> Self {
        debug_assert!(!colors.is_empty());
        Self(colors)
    }

    /// The number of colors in the palette.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the palette has no colors. Extraction always produces at least
    /// [`PaletteSize::MIN`] colors, so this is always `false`.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The palette colors as a slice of RGB triples.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[[f32; 3]] {
        &self.0
    }

    /// Convert a [`Palette`] into its underlying [`Vec`] of RGB triples.
    #[must_use]
    #[inline]
    pub fn into_vec(self) -> Vec<[f32; 3]> {
        self.0
    }

    /// The palette colors as [`Srgb<u8>`] values, rounding and clamping each
    /// channel to `0..=255`.
    #[must_use]
    pub fn to_srgb8(&self) -> Vec<Srgb<u8>> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn channel(value: f32) -> u8 {
            math::round(value).clamp(0.0, 255.0) as u8
        }

        self.0
            .iter()
            .map(|&[r, g, b]| Srgb::new(channel(r), channel(g), channel(b)))
            .collect()
    }
}

impl Deref for Palette {
    type Target = [[f32; 3]];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[[f32; 3]]> for Palette {
    #[inline]
    fn as_ref(&self) -> &[[f32; 3]] {
        self
    }
}

impl Index<usize> for Palette {
    type Output = [f32; 3];

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl IntoIterator for Palette {
    type Item = [f32; 3];

    type IntoIter = alloc::vec::IntoIter<[f32; 3]>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a [f32; 3];

    type IntoIter = slice::Iter<'a, [f32; 3]>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
