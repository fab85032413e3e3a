//! k-means++ centroid seeding.
//!
//! The first centroid is a uniform random pick from the input pixels. Each
//! subsequent centroid is sampled with probability proportional to the squared
//! distance to the nearest already-chosen centroid, which spreads the initial
//! centroids across the pixel distribution and reduces the chance of poor
//! local optima compared to uniform seeding.

use super::{distance_squared, pixel_components};
use crate::PaletteSize;
use alloc::vec::Vec;
use palette::Srgb;
use rand::{Rng, distr::Uniform, prelude::Distribution as _};

/// Select `k` initial centroids from `pixels` using k-means++.
///
/// `pixels` must be non-empty; this is validated at the extraction entry
/// point before any seeding work begins.
pub(crate) fn seed_centroids<R: Rng + ?Sized>(
    pixels: &[Srgb<u8>],
    k: PaletteSize,
    rng: &mut R,
) -> Vec<[f32; 3]> {
    debug_assert!(!pixels.is_empty());

    let mut centroids = Vec::with_capacity(k.as_usize());

    #[allow(clippy::expect_used)]
    let uniform = Uniform::new(0, pixels.len()).expect("pixels is non-empty");
    centroids.push(pixel_components(pixels[uniform.sample(rng)]));

    for _ in 1..k.as_usize() {
        // The weight buffer is scoped to this round and rebuilt from scratch,
        // so no distance from a previous round can leak into the draw.
        let weights = pixels
            .iter()
            .map(|&pixel| {
                let point = pixel_components(pixel);
                let nearest = centroids
                    .iter()
                    .map(|&centroid| distance_squared(centroid, point))
                    .fold(f32::INFINITY, f32::min);
                f64::from(nearest)
            })
            .collect::<Vec<_>>();

        let total: f64 = weights.iter().sum();
        let chosen = if total > 0.0 {
            weighted_index(&weights, rng.random_range(0.0..total))
        } else {
            // Every pixel coincides with an already-chosen centroid; the draw
            // degenerates to the first pixel in sequence.
            0
        };

        centroids.push(pixel_components(pixels[chosen]));
    }

    centroids
}

/// Returns the index of the first weight whose cumulative sum exceeds `draw`.
fn weighted_index(weights: &[f64], draw: f64) -> usize {
    let mut acc = 0.0;
    for (i, &weight) in weights.iter().enumerate() {
        acc += weight;
        if acc > draw {
            return i;
        }
    }
    // Accumulation error can leave the total fractionally below the draw;
    // fall back to the last pixel with any weight.
    weights.iter().rposition(|&weight| weight > 0.0).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use alloc::vec;
    use rand::SeedableRng as _;
    use rand_xoshiro::Xoroshiro128PlusPlus;

    fn seed(pixels: &[Srgb<u8>], k: u16, rng_seed: u64) -> Vec<[f32; 3]> {
        let rng = &mut Xoroshiro128PlusPlus::seed_from_u64(rng_seed);
        let k = PaletteSize::try_from_u16(k).unwrap();
        seed_centroids(pixels, k, rng)
    }

    #[test]
    fn produces_exactly_k_centroids() {
        let pixels = test_data_1024();
        for k in [2, 5, 16, 256] {
            assert_eq!(seed(&pixels, k, 0).len(), usize::from(k));
        }
    }

    #[test]
    fn centroids_are_copies_of_input_pixels() {
        let pixels = test_data_1024();
        for centroid in seed(&pixels, 16, 123) {
            assert!(pixels.iter().any(|&pixel| pixel_components(pixel) == centroid));
        }
    }

    #[test]
    fn identical_pixels_fall_back_to_first() {
        // After the first pick every weight is zero, so the remaining rounds
        // must degenerate to the first pixel instead of dividing by zero.
        let pixels = vec![Srgb::new(10u8, 20, 30); 8];
        let centroids = seed(&pixels, 4, 7);
        assert_eq!(centroids, vec![[10.0, 20.0, 30.0]; 4]);
    }

    #[test]
    fn distinct_pixels_equal_to_k_are_all_chosen() {
        let pixels = vec![
            Srgb::new(0u8, 1, 1),
            Srgb::new(2u8, 3, 5),
            Srgb::new(8u8, 13, 21),
            Srgb::new(34u8, 55, 89),
        ];
        let mut centroids = seed(&pixels, 4, 42);
        centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut expected = pixels.iter().map(|&p| pixel_components(p)).collect::<Vec<_>>();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(centroids, expected);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let pixels = test_data_1024();
        assert_eq!(seed(&pixels, 8, 99), seed(&pixels, 8, 99));
    }

    #[test]
    fn weighted_index_scans_in_order() {
        let weights = [0.0, 2.0, 0.0, 3.0];
        assert_eq!(weighted_index(&weights, 0.0), 1);
        assert_eq!(weighted_index(&weights, 1.9), 1);
        assert_eq!(weighted_index(&weights, 2.0), 3);
        assert_eq!(weighted_index(&weights, 4.9), 3);
        // A draw at (or past) the total falls back to the last nonzero weight.
        assert_eq!(weighted_index(&weights, 5.0), 3);
    }
}
