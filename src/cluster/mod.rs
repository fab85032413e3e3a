//! The clustering core: k-means++ seeding and Lloyd refinement.
//!
//! Clustering happens in RGB space with channel values on the `[0, 255]`
//! scale. Squared Euclidean distance is used throughout, since it induces the
//! same ordering as Euclidean distance and avoids the square root.
//!
//! [`seed_centroids`] picks k well-spread initial centroids, then
//! [`ClusteringState`] performs reassign/update passes until the
//! integer-rounded centroids of every cluster stop changing or the iteration
//! cap is hit. See the [`PaletteExtractor`](crate::PaletteExtractor) docs for
//! the public face of this module.

mod lloyd;
mod seed;

pub use lloyd::Outcome;
pub(crate) use lloyd::ClusteringState;
pub(crate) use seed::seed_centroids;

use palette::{Srgb, cast};

/// The channel values of a pixel on the `[0, 255]` scale.
#[inline]
pub(crate) fn pixel_components(pixel: Srgb<u8>) -> [f32; 3] {
    cast::into_array(pixel).map(f32::from)
}

/// Squared Euclidean distance between two points in RGB space.
#[inline]
pub(crate) fn distance_squared(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}
