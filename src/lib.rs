//! Dominant color palette extraction.
//!
//! `kpalette` finds the `k` most representative colors of an image by
//! clustering its pixels in RGB space. Initial centroids are selected with
//! k-means++ (squared-distance weighted sampling) and then refined with
//! Lloyd's algorithm until the integer-rounded centroids stop moving or an
//! iteration cap is reached.
//!
//! The entry point is [`PaletteExtractor`]:
//!
//! ```
//! # fn main() -> Result<(), kpalette::InvalidInput> {
//! use kpalette::{PaletteExtractor, PaletteSize};
//! use palette::Srgb;
//!
//! let pixels = vec![
//!     Srgb::new(0u8, 0, 0),
//!     Srgb::new(4u8, 4, 4),
//!     Srgb::new(250u8, 250, 250),
//!     Srgb::new(255u8, 255, 255),
//! ];
//!
//! let extraction = PaletteExtractor::new(PaletteSize::MIN).seed(7).extract(&pixels)?;
//! assert_eq!(extraction.palette().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Extraction is a pure function of the input pixels and the configured seed,
//! so repeated runs with the same seed produce identical palettes. Image
//! decoding is out of scope; pair this crate with the `image` crate (or any
//! other source of RGB data) and cast the raw buffer with
//! [`palette::cast::from_component_slice`].
//!
//! The [`color_space`] module holds the stateless color space conversions
//! (RGB ↔ Hex/HSL/HSV/CMYK/HSI) used to present extracted colors in other
//! color spaces. They contribute nothing to clustering itself.
//!
//! # Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: use [`libm`](https://crates.io/crates/libm) for float math, for
//!   `no_std` environments.
//! - `threads`: parallel extraction via [`rayon`](https://crates.io/crates/rayon),
//!   see [`PaletteExtractor::extract_par`].

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("one of the `std` or `libm` features must be enabled");

mod api;
mod cluster;
pub mod color_space;
mod deps;
mod math;
mod types;

pub use api::*;
pub use cluster::Outcome;
pub use deps::*;
pub use types::*;

/// The maximum number of input pixels supported, which is [`u32::MAX`].
pub const MAX_PIXELS: u32 = u32::MAX;
