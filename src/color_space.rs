//! Stateless color space conversions.
//!
//! These functions let downstream presentation code render extracted palette
//! colors in other color spaces. They are pure, independently-testable
//! arithmetic and contribute nothing to clustering itself.
//!
//! RGB values are on the interval `[0, 255]`; hue is in degrees on
//! `[0, 360)`; all other components are on `[0, 1]`. Each function validates
//! the operands it cannot enforce through its types and returns
//! [`OutOfDomain`] when one falls outside the documented interval. RGB inputs
//! are taken as [`Srgb<u8>`], so their range holds by construction.
//!
//! The `*_prec` parameters give the number of decimal digits the results are
//! rounded to. The conventional choices are `0` for RGB and hue outputs and
//! `3` for saturation/lightness/value/intensity and CMYK outputs.

use crate::{OutOfDomain, ParseHexError, math};
use alloc::string::String;
use palette::{Srgb, cast};

/// The pixel's channel values normalized to `[0, 1]`.
#[inline]
fn normalized(rgb: Srgb<u8>) -> [f32; 3] {
    cast::into_array(rgb).map(|channel| f32::from(channel) / 255.0)
}

/// Hue in degrees from normalized channels, `0` when achromatic.
fn hue(r: f32, g: f32, b: f32, c_max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        0.0
    } else if c_max == r {
        60.0 * wrap_sextant((g - b) / delta)
    } else if c_max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    }
}

/// Euclidean remainder of `x mod 6`, mapping the red sector's negative
/// offsets into `[0, 6)`.
fn wrap_sextant(x: f32) -> f32 {
    let rem = x % 6.0;
    if rem < 0.0 { rem + 6.0 } else { rem }
}

/// Round a hue to `prec` digits, wrapping a rounded-up `360` back to `0` so
/// the result stays inside `[0, 360)`.
fn round_hue(h: f32, prec: u8) -> f32 {
    let rounded = math::round_to(h, prec);
    if rounded >= 360.0 { 0.0 } else { rounded }
}

/// Converts an RGB triplet into a hex string of the form `#rrggbb`.
///
/// # Examples
///
/// ```
/// use kpalette::color_space::rgb_to_hex;
/// use palette::Srgb;
///
/// assert_eq!(rgb_to_hex(Srgb::new(89, 216, 114)), "#59d872");
/// ```
#[must_use]
pub fn rgb_to_hex(rgb: Srgb<u8>) -> String {
    alloc::format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Converts a hex string of the form `#rrggbb` or `rrggbb` into an RGB triplet.
///
/// # Errors
///
/// Returns an error if the string does not consist of exactly 6 hexadecimal
/// digits after stripping an optional leading `#`.
///
/// # Examples
///
/// ```
/// use kpalette::color_space::hex_to_rgb;
/// use palette::Srgb;
///
/// assert_eq!(hex_to_rgb("#59d872"), Ok(Srgb::new(89, 216, 114)));
/// assert_eq!(hex_to_rgb("b155d2"), Ok(Srgb::new(177, 85, 210)));
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<Srgb<u8>, ParseHexError> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ParseHexError::InvalidLength);
    }
    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..6], 16)?;
    Ok(Srgb::new(r, g, b))
}

/// Converts an RGB triplet into an HSL triplet.
///
/// H is given on `[0, 360)` rounded to `h_prec` digits; S and L are given on
/// `[0, 1]` rounded to `sl_prec` digits.
#[must_use]
pub fn rgb_to_hsl(rgb: Srgb<u8>, h_prec: u8, sl_prec: u8) -> [f32; 3] {
    let [r, g, b] = normalized(rgb);
    let c_max = r.max(g).max(b);
    let c_min = r.min(g).min(b);
    let delta = c_max - c_min;

    let h = hue(r, g, b, c_max, delta);
    let l = (c_max + c_min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    [
        round_hue(h, h_prec),
        math::round_to(s, sl_prec),
        math::round_to(l, sl_prec),
    ]
}

/// Converts an HSL triplet into an RGB triplet rounded to `prec` digits.
///
/// # Errors
///
/// Returns an error if H is outside `[0, 360)` or S or L is outside `[0, 1]`.
pub fn hsl_to_rgb(hsl: [f32; 3], prec: u8) -> Result<[f32; 3], OutOfDomain> {
    let [h, s, l] = hsl;
    let h = h / 60.0;
    if !(0.0..6.0).contains(&h) {
        return Err(OutOfDomain::new("H", "[0, 360)"));
    }
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&l) {
        return Err(OutOfDomain::new("S and/or L", "[0, 1]"));
    }

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - c / 2.0;
    Ok(sector_rgb(h, c).map(|v| math::round_to(255.0 * (v + m), prec)))
}

/// Converts an RGB triplet into an HSV triplet.
///
/// HSV is also known as HSB. H is given on `[0, 360)` rounded to `h_prec`
/// digits; S and V are given on `[0, 1]` rounded to `sv_prec` digits.
#[must_use]
pub fn rgb_to_hsv(rgb: Srgb<u8>, h_prec: u8, sv_prec: u8) -> [f32; 3] {
    let [r, g, b] = normalized(rgb);
    let c_max = r.max(g).max(b);
    let c_min = r.min(g).min(b);
    let delta = c_max - c_min;

    let h = hue(r, g, b, c_max, delta);
    let s = if c_max == 0.0 { 0.0 } else { delta / c_max };
    let v = c_max;

    [
        round_hue(h, h_prec),
        math::round_to(s, sv_prec),
        math::round_to(v, sv_prec),
    ]
}

/// Converts an HSV triplet into an RGB triplet rounded to `prec` digits.
///
/// # Errors
///
/// Returns an error if H is outside `[0, 360)` or S or V is outside `[0, 1]`.
pub fn hsv_to_rgb(hsv: [f32; 3], prec: u8) -> Result<[f32; 3], OutOfDomain> {
    let [h, s, v] = hsv;
    let h = h / 60.0;
    if !(0.0..6.0).contains(&h) {
        return Err(OutOfDomain::new("H", "[0, 360)"));
    }
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&v) {
        return Err(OutOfDomain::new("S and/or V", "[0, 1]"));
    }

    let c = v * s;
    let m = v - c;
    Ok(sector_rgb(h, c).map(|v| math::round_to(255.0 * (v + m), prec)))
}

/// Chroma distribution across the RGB channels for a hue sextant `h` in `[0, 6)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sector_rgb(h: f32, c: f32) -> [f32; 3] {
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    match h as u8 {
        0 => [c, x, 0.0],
        1 => [x, c, 0.0],
        2 => [0.0, c, x],
        3 => [0.0, x, c],
        4 => [x, 0.0, c],
        _ => [c, 0.0, x],
    }
}

/// Converts an RGB triplet into a CMYK quadruplet on `[0, 1]` rounded to
/// `prec` digits.
///
/// CMYK and RGB have different color gamuts, so visual results may differ
/// depending on the RGB profile in use.
#[must_use]
pub fn rgb_to_cmyk(rgb: Srgb<u8>, prec: u8) -> [f32; 4] {
    let [r, g, b] = normalized(rgb);
    let c_max = r.max(g).max(b);
    let k = 1.0 - c_max;

    // Pure black: the divisor 1 - k would be zero.
    let [c, m, y] = if c_max == 0.0 {
        [0.0; 3]
    } else {
        [r, g, b].map(|v| (1.0 - v - k) / (1.0 - k))
    };

    [c, m, y, k].map(|v| math::round_to(v, prec))
}

/// Converts a CMYK quadruplet into an RGB triplet rounded to `prec` digits.
///
/// # Errors
///
/// Returns an error if any component is outside `[0, 1]`.
pub fn cmyk_to_rgb(cmyk: [f32; 4], prec: u8) -> Result<[f32; 3], OutOfDomain> {
    for value in cmyk {
        if !(0.0..=1.0).contains(&value) {
            return Err(OutOfDomain::new("CMYK", "[0, 1]"));
        }
    }

    let [c, m, y, k] = cmyk;
    Ok([c, m, y].map(|v| math::round_to(255.0 * (1.0 - v) * (1.0 - k), prec)))
}

/// Converts an RGB triplet into an HSI triplet.
///
/// H is given on `[0, 360)` rounded to `h_prec` digits; S and I are given on
/// `[0, 1]` rounded to `si_prec` digits.
#[must_use]
pub fn rgb_to_hsi(rgb: Srgb<u8>, h_prec: u8, si_prec: u8) -> [f32; 3] {
    let [r, g, b] = normalized(rgb);
    let i = (r + g + b) / 3.0;
    let c_min = r.min(g).min(b);
    let s = if i == 0.0 { 0.0 } else { 1.0 - c_min / i };

    // Achromatic pixels have an undefined hue, reported as 0; the divisor
    // below is zero only in that same r == g == b case.
    let h = if s == 0.0 {
        0.0
    } else {
        let num = 0.5 * ((r - g) + (r - b));
        let den = math::sqrt((r - g) * (r - g) + (r - b) * (g - b));
        let degrees = math::acos((num / den).clamp(-1.0, 1.0)).to_degrees();
        let degrees = if b > g { 360.0 - degrees } else { degrees };
        if degrees >= 360.0 { 0.0 } else { degrees }
    };

    [
        round_hue(h, h_prec),
        math::round_to(s, si_prec),
        math::round_to(i, si_prec),
    ]
}

/// Converts an HSI triplet into an RGB triplet rounded to `prec` digits.
///
/// HSI can describe colors outside the RGB gamut; such results are clamped
/// to `[0, 255]` before rounding.
///
/// # Errors
///
/// Returns an error if H is outside `[0, 360)` or S or I is outside `[0, 1]`.
pub fn hsi_to_rgb(hsi: [f32; 3], prec: u8) -> Result<[f32; 3], OutOfDomain> {
    let [h, s, i] = hsi;
    if !(0.0..360.0).contains(&h) {
        return Err(OutOfDomain::new("H", "[0, 360)"));
    }
    if !(0.0..=1.0).contains(&s) || !(0.0..=1.0).contains(&i) {
        return Err(OutOfDomain::new("S and/or I", "[0, 1]"));
    }

    let [r, g, b] = if h < 120.0 {
        let (low, high, mid) = hsi_sector(h, s, i);
        [high, mid, low]
    } else if h < 240.0 {
        let (low, high, mid) = hsi_sector(h - 120.0, s, i);
        [low, high, mid]
    } else {
        let (low, high, mid) = hsi_sector(h - 240.0, s, i);
        [mid, low, high]
    };

    Ok([r, g, b].map(|v| math::round_to((255.0 * v).clamp(0.0, 255.0), prec)))
}

/// The three channel values of an HSI sector, for a sector-local hue in
/// degrees on `[0, 120)`.
fn hsi_sector(h: f32, s: f32, i: f32) -> (f32, f32, f32) {
    let h = h.to_radians();
    let sixty = 60.0_f32.to_radians();
    let low = i * (1.0 - s);
    let high = i * (1.0 + s * math::cos(h) / math::cos(sixty - h));
    let mid = 3.0 * i - low - high;
    (low, high, mid)
}
