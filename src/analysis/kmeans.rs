// src/analysis/kmeans.rs

use crate::domain::listing::median;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

pub const MAX_ITER: usize = 1000;

/// Per-point output of [`run_kmeans`]. All vectors have the same length.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClusterResult {
    pub lats: Vec<f64>,
    pub lngs: Vec<f64>,
    pub price: Vec<f64>,
    pub urls: Vec<String>,
    pub labels: Vec<usize>,
    /// Median price of the point's cluster.
    pub medium_prices: Vec<f64>,
}

impl ClusterResult {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Distinct clusters that ended up with at least one point.
    pub fn cluster_count(&self) -> usize {
        let mut seen: Vec<usize> = self.labels.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

/// Rows where every column is present.
pub type CompleteRows = (Vec<f64>, Vec<f64>, Vec<f64>, Vec<String>);

/// Drops every row that has a NULL in any of the four columns.
pub fn remove_null_values(
    lats: &[Option<f64>],
    lngs: &[Option<f64>],
    prices: &[Option<f64>],
    urls: &[Option<String>],
) -> CompleteRows {
    let n = lats.len().min(lngs.len()).min(prices.len()).min(urls.len());
    let mut out: CompleteRows = (Vec::new(), Vec::new(), Vec::new(), Vec::new());

    for i in 0..n {
        if let (Some(lat), Some(lng), Some(price), Some(url)) =
            (lats[i], lngs[i], prices[i], urls[i].as_ref())
        {
            if lat.is_nan() || lng.is_nan() || price.is_nan() {
                continue;
            }
            out.0.push(lat);
            out.1.push(lng);
            out.2.push(price);
            out.3.push(url.clone());
        }
    }
    out
}

/// Rule-of-thumb cluster count ⌊√(n/2)⌋, never below one for a non-empty set.
pub fn cluster_count(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    ((n as f64 / 2.0).sqrt().floor() as usize).max(1)
}

/// Groups listings by location with price-weighted K-Means and gives every
/// point its cluster's median price.
pub fn run_kmeans(
    lats: &[Option<f64>],
    lngs: &[Option<f64>],
    prices: &[Option<f64>],
    urls: &[Option<String>],
    seed: u64,
) -> ClusterResult {
    let (lats, lngs, price, urls) = remove_null_values(lats, lngs, prices, urls);
    let k = cluster_count(price.len());
    if k == 0 {
        return ClusterResult::default();
    }

    let points: Vec<[f64; 2]> = lats.iter().zip(&lngs).map(|(a, b)| [*a, *b]).collect();
    // Negative weights make no sense for a centroid.
    let weights: Vec<f64> = price.iter().map(|p| p.max(0.0)).collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let labels = WeightedKMeans::new(k, MAX_ITER).fit(&points, &weights, &mut rng);

    let mut groups: HashMap<usize, Vec<f64>> = HashMap::new();
    for (label, p) in labels.iter().zip(&price) {
        groups.entry(*label).or_default().push(*p);
    }
    let label_prices: HashMap<usize, f64> = groups
        .into_iter()
        .filter_map(|(label, group)| median(&group).map(|m| (label, m)))
        .collect();
    log::debug!("cluster medians: {label_prices:?}");

    let medium_prices = labels
        .iter()
        .map(|l| label_prices.get(l).copied().unwrap_or_default())
        .collect();

    ClusterResult {
        lats,
        lngs,
        price,
        urls,
        labels,
        medium_prices,
    }
}

/// Lloyd's algorithm with weighted k-means++ seeding.
#[derive(Debug, Clone)]
pub struct WeightedKMeans {
    k: usize,
    max_iter: usize,
}

impl WeightedKMeans {
    pub fn new(k: usize, max_iter: usize) -> Self {
        Self { k, max_iter }
    }

    /// Returns the cluster label of every point.
    pub fn fit<R: Rng>(&self, points: &[[f64; 2]], weights: &[f64], rng: &mut R) -> Vec<usize> {
        if points.is_empty() || self.k == 0 {
            return Vec::new();
        }
        let k = self.k.min(points.len());
        let mut centers = init_plus_plus(points, weights, k, rng);
        let mut labels = vec![0usize; points.len()];

        for iter in 0..self.max_iter {
            let mut changed = false;
            for (i, p) in points.iter().enumerate() {
                let nearest = nearest_center(p, &centers).0;
                if nearest != labels[i] {
                    labels[i] = nearest;
                    changed = true;
                }
            }

            let moved = update_centers(points, weights, &labels, &mut centers);
            if iter > 0 && !changed && !moved {
                log::debug!("k-means converged after {iter} iterations");
                break;
            }
        }
        labels
    }
}

fn sq_dist(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

fn nearest_center(p: &[f64; 2], centers: &[[f64; 2]]) -> (usize, f64) {
    centers
        .iter()
        .enumerate()
        .map(|(i, c)| (i, sq_dist(p, c)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

/// k-means++: each next center is drawn with probability ∝ weight · D².
fn init_plus_plus<R: Rng>(
    points: &[[f64; 2]],
    weights: &[f64],
    k: usize,
    rng: &mut R,
) -> Vec<[f64; 2]> {
    let mut centers = Vec::with_capacity(k);
    let first = match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..points.len()),
    };
    centers.push(points[first]);

    while centers.len() < k {
        let scores: Vec<f64> = points
            .iter()
            .zip(weights)
            .map(|(p, w)| w * nearest_center(p, &centers).1)
            .collect();
        let next = match WeightedIndex::new(&scores) {
            Ok(dist) => dist.sample(rng),
            // Every remaining point sits on a center already.
            Err(_) => rng.gen_range(0..points.len()),
        };
        centers.push(points[next]);
    }
    centers
}

/// Moves each center to the weighted mean of its points. Clusters with no
/// weight keep their center. Returns whether any center moved.
fn update_centers(
    points: &[[f64; 2]],
    weights: &[f64],
    labels: &[usize],
    centers: &mut [[f64; 2]],
) -> bool {
    let mut sums = vec![[0.0f64; 2]; centers.len()];
    let mut totals = vec![0.0f64; centers.len()];
    for ((p, w), &l) in points.iter().zip(weights).zip(labels) {
        sums[l][0] += w * p[0];
        sums[l][1] += w * p[1];
        totals[l] += w;
    }

    let mut moved = false;
    for (c, (sum, total)) in centers.iter_mut().zip(sums.iter().zip(&totals)) {
        if *total <= 0.0 {
            continue;
        }
        let next = [sum[0] / total, sum[1] / total];
        if sq_dist(c, &next) > 1e-18 {
            moved = true;
        }
        *c = next;
    }
    moved
}
