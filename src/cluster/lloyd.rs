//! Lloyd's algorithm: iterative reassign/update refinement of seeded centroids.

use super::{distance_squared, pixel_components};
use crate::math;
use alloc::vec::Vec;
use palette::Srgb;

/// How a refinement run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every cluster's integer-rounded centroid was unchanged from the
    /// previous iteration, across all three channels.
    Converged,
    /// The iteration cap was hit before full agreement was reached. The
    /// current best-effort centroids are still valid.
    TimedOut,
}

/// One cluster: a centroid plus the pixels currently assigned to it.
///
/// The membership list holds indices into the borrowed pixel slice and is
/// cleared and fully rebuilt on every assignment pass; memberships are never
/// updated incrementally.
struct Cluster {
    centroid: [f32; 3],
    members: Vec<u32>,
}

/// The mutable state for one extraction call.
///
/// Owns the clusters, borrows the source pixels for the lifetime of the call,
/// and is discarded once the palette has been read out. Nothing is shared
/// across separate extraction calls.
pub(crate) struct ClusteringState<'a> {
    pixels: &'a [Srgb<u8>],
    clusters: Vec<Cluster>,
}

impl<'a> ClusteringState<'a> {
    /// Create a state from seeded centroids. `centroids.len()` is the target
    /// cluster count k and never changes afterwards.
    pub(crate) fn new(pixels: &'a [Srgb<u8>], centroids: Vec<[f32; 3]>) -> Self {
        debug_assert!(!pixels.is_empty() && centroids.len() >= 2);
        let clusters = centroids
            .into_iter()
            .map(|centroid| Cluster { centroid, members: Vec::new() })
            .collect();
        Self { pixels, clusters }
    }

    /// Snapshot of the current centroids, in cluster index order.
    fn centroids(&self) -> Vec<[f32; 3]> {
        self.clusters.iter().map(|cluster| cluster.centroid).collect()
    }

    /// Rebuild the membership lists from a per-pixel assignment buffer.
    fn rebuild_members(&mut self, assignments: &[u32]) {
        for cluster in &mut self.clusters {
            cluster.members.clear();
        }
        #[allow(clippy::cast_possible_truncation)]
        for (pixel, &cluster) in assignments.iter().enumerate() {
            self.clusters[cluster as usize].members.push(pixel as u32);
        }
    }

    /// Recompute the centroid of one cluster as the mean of its members.
    ///
    /// An empty cluster keeps its previous centroid; recomputing it would be
    /// a division by zero, and dropping or re-seeding it would change k.
    fn mean_centroid(pixels: &[Srgb<u8>], cluster: &mut Cluster) {
        if cluster.members.is_empty() {
            return;
        }
        let mut sums = [0.0_f64; 3];
        for &member in &cluster.members {
            let point = pixel_components(pixels[member as usize]);
            for (sum, channel) in sums.iter_mut().zip(point) {
                *sum += f64::from(channel);
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let count = cluster.members.len() as f64;
        #[allow(clippy::cast_possible_truncation)]
        {
            cluster.centroid = sums.map(|sum| (sum / count) as f32);
        }
    }

    /// Assign every pixel to its nearest cluster, then recompute the means.
    fn reassign_and_update(&mut self) {
        let centroids = self.centroids();
        let assignments = self
            .pixels
            .iter()
            .map(|&pixel| nearest_centroid(&centroids, pixel_components(pixel)))
            .collect::<Vec<_>>();
        self.rebuild_members(&assignments);

        let pixels = self.pixels;
        for cluster in &mut self.clusters {
            Self::mean_centroid(pixels, cluster);
        }
    }

    /// The integer-rounded centroids used by the convergence check.
    #[allow(clippy::cast_possible_truncation)]
    fn rounded_centroids(&self) -> Vec<[i32; 3]> {
        self.clusters
            .iter()
            .map(|cluster| cluster.centroid.map(|channel| math::round(channel) as i32))
            .collect()
    }

    /// Run reassign/update passes until convergence or the iteration cap.
    ///
    /// Convergence requires full agreement: every cluster's rounded centroid
    /// must be unchanged on all three channels. Returns the number of
    /// iterations performed and how the run ended.
    pub(crate) fn refine(&mut self, max_iterations: u32) -> (u32, Outcome) {
        let mut previous = self.rounded_centroids();
        for iteration in 1..=max_iterations {
            self.reassign_and_update();
            let current = self.rounded_centroids();
            if current == previous {
                log::trace!("converged after {iteration} iterations");
                return (iteration, Outcome::Converged);
            }
            previous = current;
        }
        log::warn!("iteration cap of {max_iterations} hit before convergence");
        (max_iterations, Outcome::TimedOut)
    }

    /// Consume the state, rounding each centroid to `precision` decimal
    /// digits, in cluster creation order.
    pub(crate) fn into_palette_colors(self, precision: u8) -> Vec<[f32; 3]> {
        self.clusters
            .into_iter()
            .map(|cluster| cluster.centroid.map(|channel| math::round_to(channel, precision)))
            .collect()
    }
}

/// Index of the cluster nearest to `point`.
///
/// Exact distance ties break toward the lowest cluster index: the scan visits
/// clusters in index order and only a strictly smaller distance replaces the
/// current choice. This is a deliberate, deterministic policy relied upon by
/// reproducibility tests.
#[inline]
fn nearest_centroid(centroids: &[[f32; 3]], point: [f32; 3]) -> u32 {
    let mut nearest = 0;
    let mut nearest_distance = f32::INFINITY;
    for (index, &centroid) in centroids.iter().enumerate() {
        let distance = distance_squared(centroid, point);
        if distance < nearest_distance {
            nearest_distance = distance;
            #[allow(clippy::cast_possible_truncation)]
            {
                nearest = index as u32;
            }
        }
    }
    nearest
}

#[cfg(feature = "threads")]
mod parallel {
    use super::{ClusteringState, Outcome, nearest_centroid};
    use crate::cluster::pixel_components;
    use alloc::vec::Vec;
    use rayon::prelude::*;

    impl ClusteringState<'_> {
        /// Parallel version of the reassign/update pass.
        ///
        /// The nearest-centroid search reads a snapshot of the centroid list,
        /// so pixels can be mapped independently; the update step runs per
        /// cluster, each summing its own members in pixel order. Both steps
        /// produce results identical to the serial pass.
        fn reassign_and_update_par(&mut self) {
            let centroids = self.centroids();
            let assignments = self
                .pixels
                .par_iter()
                .map(|&pixel| nearest_centroid(&centroids, pixel_components(pixel)))
                .collect::<Vec<_>>();
            self.rebuild_members(&assignments);

            let pixels = self.pixels;
            self.clusters
                .par_iter_mut()
                .for_each(|cluster| Self::mean_centroid(pixels, cluster));
        }

        /// Parallel version of [`refine`](Self::refine).
        pub(crate) fn refine_par(&mut self, max_iterations: u32) -> (u32, Outcome) {
            let mut previous = self.rounded_centroids();
            for iteration in 1..=max_iterations {
                self.reassign_and_update_par();
                let current = self.rounded_centroids();
                if current == previous {
                    log::trace!("converged after {iteration} iterations");
                    return (iteration, Outcome::Converged);
                }
                previous = current;
            }
            log::warn!("iteration cap of {max_iterations} hit before convergence");
            (max_iterations, Outcome::TimedOut)
        }
    }
}
