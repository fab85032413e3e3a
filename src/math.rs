//! Float operations that need either `std` or `libm`.

#[cfg(feature = "std")]
#[inline]
pub(crate) fn round(x: f32) -> f32 {
    x.round()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn round(x: f32) -> f32 {
    libm::roundf(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn sqrt(x: f32) -> f32 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn sqrt(x: f32) -> f32 {
    libm::sqrtf(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn acos(x: f32) -> f32 {
    x.acos()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn acos(x: f32) -> f32 {
    libm::acosf(x)
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn cos(x: f32) -> f32 {
    x.cos()
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn cos(x: f32) -> f32 {
    libm::cosf(x)
}

/// Round `x` to the given number of decimal digits.
#[inline]
pub(crate) fn round_to(x: f32, digits: u8) -> f32 {
    let scale = (0..digits).fold(1.0_f32, |scale, _| scale * 10.0);
    round(x * scale) / scale
}
