use crate::order::{Order, shuffle};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

const CHUNK_TRIALS: usize = 4096;
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Tally of shuffle outcomes over many independent trials.
#[derive(Clone, Debug, Serialize)]
pub struct ShuffleHistogram {
    pub positions: usize,
    pub trials: usize,
    pub permutations: usize,
    pub expected: f64,
    pub chi_square: f64,
    #[serde(serialize_with = "counts_by_label")]
    pub counts: BTreeMap<Order, usize>,
}

// JSON object keys must be strings
fn counts_by_label<S: Serializer>(
    counts: &BTreeMap<Order, usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(counts.iter().map(|(k, v)| (k.to_string(), v)))
}

impl ShuffleHistogram {
    /// Largest relative deviation of any permutation from the uniform count.
    pub fn max_relative_deviation(&self) -> f64 {
        if self.expected == 0.0 {
            return 0.0;
        }
        all_permutations(self.positions)
            .iter()
            .map(|p| {
                let c = self.counts.get(p).copied().unwrap_or(0) as f64;
                (c - self.expected).abs() / self.expected
            })
            .fold(0.0, f64::max)
    }
}

// seed ^ chunk * golden-ratio constant; neighbouring seeds must not share
// chunk streams the way seed + chunk would
fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    seed ^ (chunk as u64).wrapping_mul(SEED_MIX)
}

/// Every permutation of `0..n` in lexicographic order.
pub fn all_permutations(n: usize) -> Vec<Order> {
    fn walk(prefix: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Order>) {
        if prefix.len() == used.len() {
            // prefix is built from distinct indices below `used.len()`
            if let Ok(o) = Order::new(prefix) {
                out.push(o);
            }
            return;
        }
        for idx in 0..used.len() {
            if used[idx] {
                continue;
            }
            used[idx] = true;
            prefix.push(idx);
            walk(prefix, used, out);
            prefix.pop();
            used[idx] = false;
        }
    }

    let mut out = Vec::new();
    walk(&mut Vec::with_capacity(n), &mut vec![false; n], &mut out);
    out
}

/// Shuffle `order` `trials` times on the rayon pool and tally the results.
///
/// Work is split into fixed-size chunks, each with its own generator seeded
/// from `seed` and the chunk number, so the outcome depends only on
/// `(order, trials, seed)` and not on the pool size.
pub fn shuffle_histogram(order: &Order, trials: usize, seed: u64) -> ShuffleHistogram {
    let chunks = trials.div_ceil(CHUNK_TRIALS);

    let counts = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk));
            let n = CHUNK_TRIALS.min(trials - chunk * CHUNK_TRIALS);
            let mut local: BTreeMap<Order, usize> = BTreeMap::new();
            for _ in 0..n {
                *local.entry(shuffle(order, &mut rng)).or_default() += 1;
            }
            local
        })
        .reduce(BTreeMap::new, |mut acc, part| {
            for (k, v) in part {
                *acc.entry(k).or_default() += v;
            }
            acc
        });

    let perms = all_permutations(order.len());
    let expected = if perms.is_empty() {
        0.0
    } else {
        trials as f64 / perms.len() as f64
    };

    let chi_square = if expected > 0.0 {
        perms
            .iter()
            .map(|p| {
                let observed = counts.get(p).copied().unwrap_or(0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum()
    } else {
        0.0
    };

    debug!(
        "shuffle_histogram: trials={} permutations={} chi2={:.4}",
        trials,
        perms.len(),
        chi_square
    );

    ShuffleHistogram {
        positions: order.len(),
        trials,
        permutations: perms.len(),
        expected,
        chi_square,
        counts,
    }
}
