use std::collections::HashSet;

use log::debug;
use palette::Srgb;

use crate::color::{distance_sq, Color};
use crate::filter::filter_colors;
use crate::sample::sample_pixels;

/// Every run performs exactly this many assign/update rounds.
pub const MAX_ITERATIONS: usize = 10;

/// Result of the clustering driver.
#[derive(Clone, Debug, PartialEq)]
pub enum Dominant {
    /// Centroids from k-means over the filtered sample, in seed order.
    Clustered(Vec<Color>),
    /// The filter removed everything: the first `k` colors of the raw sample.
    Unfiltered(Vec<Color>),
}

/// `min(requested, distinct colors in filtered)`.
pub fn effective_k(requested: usize, filtered: &[Color]) -> usize {
    if requested == 0 {
        return 0;
    }
    let distinct: HashSet<[u8; 3]> = filtered.iter().map(|c| [c.red, c.green, c.blue]).collect();
    requested.min(distinct.len())
}

/// Evenly spaced, index-based seeds: centroid `i` is `filtered[floor(i * len / k)]`.
pub fn seed_centroids(filtered: &[Color], k: usize) -> Vec<Color> {
    let len = filtered.len();
    (0..k.min(len)).map(|i| filtered[i * len / k]).collect()
}

/// Index of the closest centroid. The first minimum wins ties.
#[inline(always)]
pub fn nearest_centroid(color: Color, centroids: &[Color]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = u32::MAX;
    for (idx, &c) in centroids.iter().enumerate() {
        let d = distance_sq(color, c);
        if d < best_dist {
            best_dist = d;
            best_idx = idx;
        }
    }
    best_idx
}

/// Rounded channel-wise mean, or `None` for an empty group.
fn mean_color(group: &[Color]) -> Option<Color> {
    if group.is_empty() {
        return None;
    }
    let n = group.len() as f64;
    let (r, g, b) = group.iter().fold((0u64, 0u64, 0u64), |(r, g, b), c| {
        (r + c.red as u64, g + c.green as u64, b + c.blue as u64)
    });
    let channel = |sum: u64| (sum as f64 / n).round().clamp(0.0, 255.0) as u8;
    Some(Srgb::new(channel(r), channel(g), channel(b)))
}

/// Plain Lloyd k-means over RGB triples with deterministic seeding.
///
/// Runs [`MAX_ITERATIONS`] rounds. Groups are rebuilt from scratch each round
/// and dropped after the update. A centroid whose group comes back empty keeps
/// its previous value for that round.
pub fn kmeans(filtered: &[Color], requested_k: usize) -> Vec<Color> {
    let k = effective_k(requested_k, filtered);
    let mut centroids = seed_centroids(filtered, k);
    if centroids.is_empty() {
        return centroids;
    }

    for _ in 0..MAX_ITERATIONS {
        refine(filtered, &mut centroids);
    }

    centroids
}

/// One assign/update round. Groups are index-aligned with `centroids`.
fn refine(filtered: &[Color], centroids: &mut [Color]) {
    let mut groups: Vec<Vec<Color>> = vec![Vec::new(); centroids.len()];
    for &px in filtered {
        groups[nearest_centroid(px, centroids)].push(px);
    }

    for (centroid, group) in centroids.iter_mut().zip(&groups) {
        if let Some(mean) = mean_color(group) {
            *centroid = mean;
        }
    }
}

/// Sample, filter and cluster a pixel buffer.
///
/// When the filter leaves nothing, the first `requested_k` colors of the
/// unfiltered sample are returned as-is instead of clustering.
pub fn dominant_colors(pixels: &[Color], requested_k: usize) -> Dominant {
    let sampled = sample_pixels(pixels);
    match filter_colors(&sampled) {
        Some(filtered) => {
            let centroids = kmeans(&filtered, requested_k);
            debug!(
                "clustered {} of {} sampled pixels into {} colors",
                filtered.len(),
                sampled.len(),
                centroids.len()
            );
            Dominant::Clustered(centroids)
        }
        None => {
            debug!("all {} sampled pixels filtered out, using raw sample", sampled.len());
            Dominant::Unfiltered(sampled.into_iter().take(requested_k).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Srgb::new(200, 30, 30);
    const BLUE: Color = Srgb::new(30, 30, 200);

    #[test]
    fn k_is_capped_by_distinct_colors() {
        assert_eq!(effective_k(6, &[RED, RED, RED]), 1);
        assert_eq!(effective_k(6, &[RED, BLUE, RED]), 2);
        assert_eq!(effective_k(1, &[RED, BLUE]), 1);
        assert_eq!(effective_k(0, &[RED, BLUE]), 0);
        assert_eq!(effective_k(3, &[]), 0);
    }

    #[test]
    fn seeds_are_evenly_spaced_indices() {
        let px: Vec<Color> = (0..10u8).map(|i| Srgb::new(i, 0, 0)).collect();
        let seeds = seed_centroids(&px, 3);
        // floor(0/3*10)=0, floor(1/3*10)=3, floor(2/3*10)=6
        assert_eq!(seeds, vec![px[0], px[3], px[6]]);
    }

    #[test]
    fn ties_go_to_the_earliest_centroid() {
        let centroids = [Srgb::new(0, 0, 0), Srgb::new(20, 0, 0), Srgb::new(0, 0, 0)];
        assert_eq!(nearest_centroid(Srgb::new(10, 0, 0), &centroids), 0);
        assert_eq!(nearest_centroid(Srgb::new(19, 0, 0), &centroids), 1);
    }

    #[test]
    fn mean_rounds_half_up() {
        let m = mean_color(&[Srgb::new(1, 0, 255), Srgb::new(2, 1, 254)]).unwrap();
        assert_eq!(m, Srgb::new(2, 1, 255));
        assert_eq!(mean_color(&[]), None);
    }

    #[test]
    fn separates_two_obvious_groups() {
        let mut px = Vec::new();
        px.extend((0..20u8).map(|i| Srgb::new(200 + i, 30, 30)));
        px.extend((0..20u8).map(|i| Srgb::new(30, 30, 200 + i)));
        let out = kmeans(&px, 2);
        assert_eq!(out.len(), 2);
        // seed 0 is reddish, seed 1 (index 20) is bluish
        assert!(out[0].red > 190 && out[0].blue < 40);
        assert!(out[1].blue > 190 && out[1].red < 40);
    }

    #[test]
    fn empty_cluster_is_frozen_not_reseeded() {
        let a = Srgb::new(100, 150, 50);
        let b = Srgb::new(110, 160, 60);
        let far = Srgb::new(0, 0, 255);
        let mut centroids = [a, far, a];
        refine(&[a, a, a, b], &mut centroids);
        // every pixel lands on centroid 0; (100*3+110)/4 = 102.5 -> 103
        assert_eq!(centroids, [Srgb::new(103, 153, 53), far, a]);
    }

    #[test]
    fn duplicate_seeds_keep_their_slot() {
        // k = 2 seeds indices 0 and 2, both A
        let a = Srgb::new(100, 150, 50);
        let b = Srgb::new(110, 160, 60);
        assert_eq!(seed_centroids(&[a, a, a, b], 2), vec![a, a]);
        assert_eq!(kmeans(&[a, a, a, b], 2).len(), 2);
    }

    #[test]
    fn is_deterministic() {
        let px: Vec<Color> = (0..500u32)
            .map(|i| Srgb::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
            .collect();
        assert_eq!(kmeans(&px, 5), kmeans(&px, 5));
    }

    #[test]
    fn driver_falls_back_to_raw_sample() {
        let white = Srgb::new(255, 255, 255);
        assert_eq!(dominant_colors(&[white; 10], 3), Dominant::Unfiltered(vec![white; 3]));
        assert_eq!(dominant_colors(&[], 3), Dominant::Unfiltered(vec![]));
    }

    #[test]
    fn driver_clusters_informative_pixels_only() {
        let px = [Srgb::new(10, 10, 10), Srgb::new(250, 250, 250), RED, BLUE];
        assert_eq!(dominant_colors(&px, 3), Dominant::Clustered(vec![RED, BLUE]));
    }
}
