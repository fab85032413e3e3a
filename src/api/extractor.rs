//! The extraction facade: seed once, refine to convergence, read out the palette.

use crate::{
    InvalidInput, Outcome, Palette, PaletteSize,
    cluster::{ClusteringState, seed_centroids},
};
use palette::Srgb;
use rand::SeedableRng as _;
use rand_xoshiro::Xoroshiro128PlusPlus;

/// The default iteration cap for Lloyd refinement.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Extracts the k most representative colors from an image's pixels.
///
/// This struct has a builder API. See the docs for each of the following
/// functions for more details:
/// - [`precision`](Self::precision)
/// - [`seed`](Self::seed)
/// - [`max_iterations`](Self::max_iterations)
///
/// Extraction is a pure function of the input pixels and these options; no
/// state carries over between calls.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), kpalette::InvalidInput> {
/// use kpalette::{PaletteExtractor, PaletteSize};
/// use palette::Srgb;
///
/// let pixels = vec![
///     Srgb::new(255u8, 0, 0),
///     Srgb::new(250u8, 10, 5),
///     Srgb::new(0u8, 0, 255),
///     Srgb::new(10u8, 5, 250),
/// ];
///
/// let extraction = PaletteExtractor::new(PaletteSize::MIN)
///     .seed(42)
///     .extract(&pixels)?;
///
/// assert_eq!(extraction.palette().len(), 2);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteExtractor {
    /// The number of colors to extract.
    k: PaletteSize,
    /// The number of decimal digits each output channel is rounded to.
    precision: u8,
    /// The seed for the random number generator.
    seed: u64,
    /// The iteration cap for Lloyd refinement.
    max_iterations: u32,
}

impl PaletteExtractor {
    /// Create a new [`PaletteExtractor`] producing `k` colors, with default options.
    #[inline]
    pub const fn new(k: PaletteSize) -> Self {
        Self {
            k,
            precision: 0,
            seed: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Sets the number of decimal digits each output channel is rounded to.
    ///
    /// The default precision is `0`, i.e. integer channel values.
    #[inline]
    pub const fn precision(self, precision: u8) -> Self {
        Self { precision, ..self }
    }

    /// Sets the seed number used for the random number generator.
    ///
    /// k-means++ can land in different local optima from different starting
    /// points; re-invoking with a fresh seed is the way to get another
    /// candidate palette for the same image.
    ///
    /// The default seed is `0`.
    #[inline]
    pub const fn seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Sets the iteration cap for Lloyd refinement.
    ///
    /// Refinement normally stops when every cluster's integer-rounded
    /// centroid is unchanged from the previous iteration. Rounding near a
    /// channel boundary can in principle oscillate forever, so the cap bounds
    /// the running time; if it is hit, the current best-effort palette is
    /// returned and the [`Extraction`] reports [`Outcome::TimedOut`].
    ///
    /// The default cap is [`DEFAULT_MAX_ITERATIONS`].
    #[inline]
    pub const fn max_iterations(self, max_iterations: u32) -> Self {
        Self { max_iterations, ..self }
    }

    /// Returns the number of colors that will be extracted.
    #[inline]
    pub const fn get_k(&self) -> PaletteSize {
        self.k
    }

    /// Returns the current output precision.
    ///
    /// See [`precision`](Self::precision) for more information.
    #[inline]
    pub const fn get_precision(&self) -> u8 {
        self.precision
    }

    /// Returns the current seed number.
    ///
    /// See [`seed`](Self::seed) for more information.
    #[inline]
    pub const fn get_seed(&self) -> u64 {
        self.seed
    }

    /// Returns the current iteration cap.
    ///
    /// See [`max_iterations`](Self::max_iterations) for more information.
    #[inline]
    pub const fn get_max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Extract a palette from a slice of pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is empty or longer than
    /// [`MAX_PIXELS`](crate::MAX_PIXELS).
    pub fn extract(&self, pixels: &[Srgb<u8>]) -> Result<Extraction, InvalidInput> {
        self.run(pixels, ClusteringState::refine)
    }

    /// Extract a palette from a slice of pixels, running the refinement
    /// passes in parallel.
    ///
    /// Produces results identical to [`extract`](Self::extract).
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is empty or longer than
    /// [`MAX_PIXELS`](crate::MAX_PIXELS).
    #[cfg(feature = "threads")]
    pub fn extract_par(&self, pixels: &[Srgb<u8>]) -> Result<Extraction, InvalidInput> {
        self.run(pixels, ClusteringState::refine_par)
    }

    /// Boilerplate code shared by the serial and parallel entry points.
    fn run<'a>(
        &self,
        pixels: &'a [Srgb<u8>],
        refine: impl FnOnce(&mut ClusteringState<'a>, u32) -> (u32, Outcome),
    ) -> Result<Extraction, InvalidInput> {
        InvalidInput::check(pixels)?;

        let rng = &mut Xoroshiro128PlusPlus::seed_from_u64(self.seed);
        let centroids = seed_centroids(pixels, self.k, rng);
        let mut state = ClusteringState::new(pixels, centroids);
        let (iterations, outcome) = refine(&mut state, self.max_iterations);

        Ok(Extraction {
            palette: Palette::new_unchecked(state.into_palette_colors(self.precision)),
            iterations,
            outcome,
        })
    }
}

/// The result of one palette extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The extracted palette.
    palette: Palette,
    /// The number of refinement iterations performed.
    iterations: u32,
    /// How the refinement run ended.
    outcome: Outcome,
}

impl Extraction {
    /// The extracted palette, in cluster creation order.
    #[must_use]
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Consume the extraction and return the palette.
    #[must_use]
    #[inline]
    pub fn into_palette(self) -> Palette {
        self.palette
    }

    /// The number of refinement iterations that were performed.
    #[inline]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// How the refinement run ended.
    ///
    /// [`Outcome::TimedOut`] is a soft signal: the palette is still the best
    /// centroid set found, it just had not fully stabilized when the
    /// iteration cap was hit.
    #[inline]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the iteration cap was hit before convergence.
    #[inline]
    pub const fn timed_out(&self) -> bool {
        matches!(self.outcome, Outcome::TimedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use alloc::{vec, vec::Vec};

    fn extract(pixels: &[Srgb<u8>], k: u16) -> Extraction {
        PaletteExtractor::new(PaletteSize::try_from_u16(k).unwrap())
            .extract(pixels)
            .unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        let extractor = PaletteExtractor::new(PaletteSize::MIN);
        assert_eq!(extractor.extract(&[]), Err(InvalidInput::Empty));
    }

    #[test]
    fn palette_has_exactly_k_colors() {
        let pixels = test_data_1024();
        for k in [2, 3, 8, 64] {
            assert_eq!(extract(&pixels, k).palette().len(), usize::from(k));
        }
    }

    #[test]
    fn channels_stay_within_the_input_hull() {
        let pixels = test_pixels(512, 77);
        let extraction = extract(&pixels, 8);

        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for &pixel in &pixels {
            let point = crate::cluster::pixel_components(pixel);
            for channel in 0..3 {
                min[channel] = min[channel].min(point[channel]);
                max[channel] = max[channel].max(point[channel]);
            }
        }

        for color in extraction.palette() {
            for channel in 0..3 {
                assert!(min[channel] <= color[channel] && color[channel] <= max[channel]);
            }
        }
    }

    #[test]
    fn distinct_pixels_equal_to_k_are_reproduced_exactly() {
        let pixels = vec![
            Srgb::new(0u8, 1, 1),
            Srgb::new(2u8, 3, 5),
            Srgb::new(8u8, 13, 21),
            Srgb::new(34u8, 55, 89),
        ];
        let extraction = extract(&pixels, 4);
        assert_eq!(extraction.outcome(), Outcome::Converged);

        let mut palette = extraction.into_palette().into_vec();
        palette.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected = vec![
            [0.0, 1.0, 1.0],
            [2.0, 3.0, 5.0],
            [8.0, 13.0, 21.0],
            [34.0, 55.0, 89.0],
        ];
        assert_eq!(palette, expected);
    }

    #[test]
    fn identical_pixels_converge_to_that_pixel() {
        let pixels = vec![Srgb::new(7u8, 105, 210); 32];
        let extraction = extract(&pixels, 2);
        assert_eq!(extraction.outcome(), Outcome::Converged);
        assert_eq!(
            extraction.palette().as_slice(),
            [[7.0, 105.0, 210.0], [7.0, 105.0, 210.0]],
        );
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let pixels = test_data_1024();
        let extractor = PaletteExtractor::new(PaletteSize::try_from_u16(8).unwrap()).seed(123);
        assert_eq!(extractor.extract(&pixels), extractor.extract(&pixels));
    }

    #[test]
    fn different_seeds_reach_different_starting_points() {
        let pixels = test_data_1024();
        let k = PaletteSize::try_from_u16(8).unwrap();
        let a = PaletteExtractor::new(k).seed(1).max_iterations(0).extract(&pixels);
        let b = PaletteExtractor::new(k).seed(2).max_iterations(0).extract(&pixels);
        assert_ne!(a, b);
    }

    #[test]
    fn zero_cap_returns_seeded_centroids_as_timed_out() {
        let pixels = test_data_1024();
        let extraction = PaletteExtractor::new(PaletteSize::try_from_u16(4).unwrap())
            .max_iterations(0)
            .extract(&pixels)
            .unwrap();
        assert!(extraction.timed_out());
        assert_eq!(extraction.iterations(), 0);
        assert_eq!(extraction.palette().len(), 4);
    }

    #[test]
    fn precision_rounds_output_channels() {
        let pixels = vec![Srgb::new(0u8, 0, 0), Srgb::new(1u8, 1, 1)];
        let extraction = PaletteExtractor::new(PaletteSize::MIN)
            .precision(1)
            .extract(&pixels)
            .unwrap();
        for color in extraction.palette() {
            for &channel in color {
                assert_eq!(channel, crate::math::round_to(channel, 1));
            }
        }
    }

    #[cfg(feature = "threads")]
    #[test]
    fn extract_par_matches_extract() {
        let pixels = test_pixels(4096, 13);
        let extractor = PaletteExtractor::new(PaletteSize::try_from_u16(16).unwrap()).seed(5);
        let serial = extractor.extract(&pixels).unwrap();
        let parallel = extractor.extract_par(&pixels).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn input_length_check() {
        // `MAX_PIXELS + 1` pixels cannot be allocated in a test; exercise the
        // entry check directly instead.
        assert_eq!(InvalidInput::check(&[(); 8]), Ok(()));
        assert_eq!(InvalidInput::check::<()>(&[]), Err(InvalidInput::Empty));
    }

    #[test]
    fn builder_round_trips_options() {
        let extractor = PaletteExtractor::new(PaletteSize::MAX)
            .precision(2)
            .seed(99)
            .max_iterations(10);
        assert_eq!(extractor.get_k(), PaletteSize::MAX);
        assert_eq!(extractor.get_precision(), 2);
        assert_eq!(extractor.get_seed(), 99);
        assert_eq!(extractor.get_max_iterations(), 10);
    }

    #[test]
    fn palette_order_is_cluster_creation_order() {
        let pixels = test_data_1024();
        let k = PaletteSize::try_from_u16(6).unwrap();
        let seeded = PaletteExtractor::new(k).seed(31).max_iterations(0).extract(&pixels);
        let refined = PaletteExtractor::new(k).seed(31).extract(&pixels);
        let seeded: Vec<_> = seeded.unwrap().into_palette().into_vec();
        let refined: Vec<_> = refined.unwrap().into_palette().into_vec();
        // Refinement moves centroids but never reorders or drops clusters.
        assert_eq!(seeded.len(), refined.len());
    }
}
